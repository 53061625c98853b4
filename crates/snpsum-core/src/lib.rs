//! # snpsum-core
//!
//! SNP literature cross-reference and summarization pipeline.
//!
//! The pipeline is a one-shot batch flow:
//!
//! 1. Load a reference list of SNP identifiers from a CSV file
//! 2. Scan a VCF variant file into tabular records
//! 3. Inner-join the variants against the reference list on identifier
//! 4. Attach per-SNP literature text from `<text_dir>/<id>/data.csv`
//! 5. Build a retrieval index over the texts and answer one query
//!
//! Steps 1-4 are pure file work. Step 5 talks to the OpenAI API through
//! the [`SummaryEngine`] trait, so tests can swap in a local substitute.
//!
//! ## Example
//!
//! ```no_run
//! use snpsum_core::{OpenAiConfig, OpenAiEngine, PipelineConfig};
//!
//! # async fn run() -> snpsum_core::Result<()> {
//! let config = PipelineConfig::default();
//! let mut engine = OpenAiEngine::new(OpenAiConfig::from_env()?);
//! let response = snpsum_core::run_summarize(&config, &mut engine).await?;
//! println!("{response}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod join;
pub mod literature;
pub mod pipeline;
pub mod reference;
pub mod vcf;

pub use config::{OpenAiConfig, PipelineConfig};
pub use engine::{Document, OpenAiClient, OpenAiEngine, SummaryEngine, Summarizer};
pub use error::{Result, SnpsumError};
pub use join::{inner_join_on_id, JoinedVariant};
pub use literature::{AnnotatedSnp, MISSING_TEXT_SENTINEL};
pub use pipeline::{
    collect_snps, join_inputs, run_per_snp, run_sources, run_summarize, run_variants, SnpSummary,
};
pub use reference::{SnpEntry, SnpList};
pub use vcf::{InfoValue, VariantRecord, VcfScanner};
