//! SNP literature summarization CLI
//!
//! Cross-references a VCF variant file against a reference SNP list,
//! attaches per-SNP literature text, and summarizes it with OpenAI.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use snpsum_core::config::{
    DEFAULT_CHAT_MODEL, DEFAULT_EMBED_MODEL, DEFAULT_QUERY, DEFAULT_SNP_LIST, DEFAULT_TEXT_DIR,
    DEFAULT_VCF_FILE,
};
use snpsum_core::engine::DEFAULT_TOP_K;
use snpsum_core::{OpenAiClient, OpenAiConfig, OpenAiEngine, PipelineConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "snpsum")]
#[command(about = "Summarize literature for SNPs shared by a VCF file and a reference list")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the pipeline and print the summarization response
    Summarize {
        /// Reference SNP list (CSV with an ID column)
        #[arg(long, default_value = DEFAULT_SNP_LIST)]
        snp_list: PathBuf,

        /// VCF variant file
        #[arg(long, default_value = DEFAULT_VCF_FILE)]
        vcf: PathBuf,

        /// Directory holding <id>/data.csv text files
        #[arg(long, default_value = DEFAULT_TEXT_DIR)]
        text_dir: PathBuf,

        /// Query issued against the index
        #[arg(long, default_value = DEFAULT_QUERY)]
        query: String,

        /// Chat completion model
        #[arg(long, default_value = DEFAULT_CHAT_MODEL)]
        chat_model: String,

        /// Embedding model
        #[arg(long, default_value = DEFAULT_EMBED_MODEL)]
        embed_model: String,

        /// Chunks retrieved per query
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,

        /// Summarize each SNP separately instead of querying one index
        #[arg(long)]
        per_snp: bool,
    },

    /// Print the joined variant table as Markdown (no network)
    Variants {
        /// Reference SNP list (CSV with an ID column)
        #[arg(long, default_value = DEFAULT_SNP_LIST)]
        snp_list: PathBuf,

        /// VCF variant file
        #[arg(long, default_value = DEFAULT_VCF_FILE)]
        vcf: PathBuf,
    },

    /// Print per-SNP literature sources as Markdown (no network)
    Sources {
        /// Reference SNP list (CSV with an ID column)
        #[arg(long, default_value = DEFAULT_SNP_LIST)]
        snp_list: PathBuf,

        /// VCF variant file
        #[arg(long, default_value = DEFAULT_VCF_FILE)]
        vcf: PathBuf,

        /// Directory holding <id>/data.csv text files
        #[arg(long, default_value = DEFAULT_TEXT_DIR)]
        text_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(
                    "snpsum_core=info"
                        .parse()
                        .expect("directive is compile-time constant"),
                )
                .add_directive(
                    "snpsum=info"
                        .parse()
                        .expect("directive is compile-time constant"),
                ),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Summarize {
            snp_list,
            vcf,
            text_dir,
            query,
            chat_model,
            embed_model,
            top_k,
            per_snp,
        } => {
            // The credential is required before any file is opened.
            let mut openai = OpenAiConfig::from_env()
                .context("set OPENAI_API_KEY in the environment")?;
            openai.chat_model = chat_model;
            openai.embed_model = embed_model;
            info!(
                chat_model = %openai.chat_model,
                embed_model = %openai.embed_model,
                "starting summarization run"
            );

            let config = PipelineConfig {
                snp_list,
                vcf_file: vcf,
                text_dir,
                query,
            };

            if per_snp {
                let client = OpenAiClient::new(openai);
                let summaries = snpsum_core::run_per_snp(&config, &client).await?;
                for summary in &summaries {
                    println!("SNP ID: {}", summary.id);
                    println!("Summary: {}\n", summary.summary);
                }
            } else {
                let mut engine = OpenAiEngine::new(openai).with_top_k(top_k);
                let response = snpsum_core::run_summarize(&config, &mut engine).await?;
                println!("{response}");
            }
        }

        Command::Variants { snp_list, vcf } => {
            let config = PipelineConfig {
                snp_list,
                vcf_file: vcf,
                ..PipelineConfig::default()
            };
            print!("{}", snpsum_core::run_variants(&config)?);
        }

        Command::Sources {
            snp_list,
            vcf,
            text_dir,
        } => {
            let config = PipelineConfig {
                snp_list,
                vcf_file: vcf,
                text_dir,
                ..PipelineConfig::default()
            };
            print!("{}", snpsum_core::run_sources(&config)?);
        }
    }

    Ok(())
}
