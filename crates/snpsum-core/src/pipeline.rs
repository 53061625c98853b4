//! One-shot pipeline orchestration.
//!
//! Every command runs the same front half: load the reference list, scan
//! the VCF, inner-join on identifier. The back half differs per command:
//! summarize builds an index and queries it, the digest summarizes per
//! SNP, and the report commands render tables without touching the
//! network.

use std::fmt::Write as _;

use tracing::info;

use crate::config::PipelineConfig;
use crate::engine::{Document, SummaryEngine, Summarizer};
use crate::error::Result;
use crate::join::{inner_join_on_id, JoinedVariant};
use crate::literature::{attach_texts, parse_abstracts, AnnotatedSnp, MISSING_TEXT_SENTINEL};
use crate::reference::SnpList;
use crate::vcf::VcfScanner;

/// Load, parse, and join the two inputs.
///
/// # Errors
///
/// Returns an error when either input file is missing or malformed.
pub fn join_inputs(config: &PipelineConfig) -> Result<Vec<JoinedVariant>> {
    let snp_list = SnpList::from_csv_path(&config.snp_list)?;
    info!(entries = snp_list.len(), "loaded reference list");

    let variants = VcfScanner::scan_file(&config.vcf_file)?;
    info!(variants = variants.len(), "scanned VCF file");

    let joined = inner_join_on_id(&variants, &snp_list);
    info!(rows = joined.len(), "joined variants against reference list");

    Ok(joined)
}

/// Joined rows with literature text attached, in join order.
///
/// # Errors
///
/// Returns an error when an input is malformed or a text file exists but
/// cannot be read.
pub fn collect_snps(config: &PipelineConfig) -> Result<Vec<AnnotatedSnp>> {
    let joined = join_inputs(config)?;
    attach_texts(&joined, &config.text_dir)
}

/// Run the full pipeline: collect the SNP texts, build the index, and
/// answer the configured query.
///
/// # Errors
///
/// Returns an error when any stage fails, including the remote calls.
pub async fn run_summarize(
    config: &PipelineConfig,
    engine: &mut dyn SummaryEngine,
) -> Result<String> {
    let snps = collect_snps(config)?;
    let documents: Vec<Document> = snps.iter().map(Document::from).collect();

    engine.build(&documents).await?;
    info!(query = %config.query, "querying index");
    engine.query(&config.query).await
}

/// Per-SNP digest row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpSummary {
    /// Variant identifier
    pub id: String,
    /// Summary text, or the missing-file placeholder
    pub summary: String,
}

/// Summarize each annotated SNP separately, in join order.
///
/// Rows without a text file keep the placeholder as their summary and
/// skip the remote call.
///
/// # Errors
///
/// Returns an error when any stage or remote call fails.
pub async fn run_per_snp(
    config: &PipelineConfig,
    summarizer: &dyn Summarizer,
) -> Result<Vec<SnpSummary>> {
    let snps = collect_snps(config)?;

    let mut summaries = Vec::new();
    for snp in &snps {
        let summary = if snp.has_text() {
            summarizer.summarize(&snp.content).await?
        } else {
            MISSING_TEXT_SENTINEL.to_string()
        };
        summaries.push(SnpSummary {
            id: snp.id.clone(),
            summary,
        });
    }
    Ok(summaries)
}

/// Render the joined table as Markdown, without touching the network.
///
/// # Errors
///
/// Returns an error when either input file is missing or malformed.
pub fn run_variants(config: &PipelineConfig) -> Result<String> {
    let joined = join_inputs(config)?;

    let mut md = String::new();
    md.push_str("# Joined Variants\n\n");

    if joined.is_empty() {
        md.push_str("*(no matching variants)*\n");
        return Ok(md);
    }

    // Reference columns are uniform across rows; take the names from the
    // first one.
    let extra_names: Vec<&str> = joined[0]
        .reference
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();

    md.push_str("| CHROM | POS | ID | REF | ALT | QUAL | FILTER | INFO |");
    for name in &extra_names {
        let _ = write!(md, " {name} |");
    }
    md.push('\n');

    md.push_str("|-------|-----|----|-----|-----|------|--------|------|");
    for _ in &extra_names {
        md.push_str("------|");
    }
    md.push('\n');

    for row in &joined {
        let v = &row.variant;
        let _ = write!(
            md,
            "| {} | {} | {} | {} | {} | {} | {} | {} |",
            v.chrom,
            v.pos,
            row.id,
            v.ref_bases,
            v.alt_field(),
            v.qual_field(),
            v.filter_field(),
            v.info_field()
        );
        for (_, value) in &row.reference {
            let _ = write!(md, " {value} |");
        }
        md.push('\n');
    }

    Ok(md)
}

/// Render per-SNP literature sources as Markdown, without touching the
/// network.
///
/// Each row's `data.csv` is parsed as an abstract table; rows without a
/// text file carry the placeholder line instead.
///
/// # Errors
///
/// Returns an error when an input is malformed or an existing text file
/// is not a valid abstract table.
pub fn run_sources(config: &PipelineConfig) -> Result<String> {
    let snps = collect_snps(config)?;

    let mut md = String::new();
    md.push_str("# SNP Literature Sources\n\n");

    if snps.is_empty() {
        md.push_str("*(no matching variants)*\n");
        return Ok(md);
    }

    for snp in &snps {
        let _ = writeln!(md, "## {}\n", snp.id);

        if !snp.has_text() {
            let _ = writeln!(md, "{MISSING_TEXT_SENTINEL}\n");
            continue;
        }

        let abstracts = parse_abstracts(&snp.content)?;
        let _ = writeln!(md, "{} abstracts\n", abstracts.len());
        for entry in &abstracts {
            let _ = writeln!(md, "- {}", entry.url);
        }
        md.push('\n');
    }

    Ok(md)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const VCF: &str = r"##fileformat=VCFv4.2
#CHROM	POS	ID	REF	ALT	QUAL	FILTER	INFO
chr1	14370	rs1	G	A	29	PASS	NS=3;DP=14
chr1	17330	rs3	T	A	3	q10	NS=3
";

    fn write_fixture(dir: &Path, snp_list: &str, vcf: &str) -> PipelineConfig {
        let vcf_dir = dir.join("vcf_files");
        fs::create_dir_all(&vcf_dir).unwrap();
        fs::write(vcf_dir.join("snp_list.csv"), snp_list).unwrap();
        fs::write(vcf_dir.join("dummy_vcf_1.vcf"), vcf).unwrap();

        PipelineConfig {
            snp_list: vcf_dir.join("snp_list.csv"),
            vcf_file: vcf_dir.join("dummy_vcf_1.vcf"),
            text_dir: dir.join("text"),
            query: "Please summarize the following text".to_string(),
        }
    }

    fn write_snp_text(dir: &Path, id: &str, content: &str) {
        let snp_dir = dir.join("text").join(id);
        fs::create_dir_all(&snp_dir).unwrap();
        fs::write(snp_dir.join("data.csv"), content).unwrap();
    }

    #[test]
    fn test_collect_snps_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path(), "ID\nrs1\nrs2\n", VCF);
        write_snp_text(dir.path(), "rs1", "Hello");

        let snps = collect_snps(&config).unwrap();

        // rs1 is in both inputs, rs2 only in the list, rs3 only in the VCF.
        assert_eq!(snps.len(), 1);
        assert_eq!(snps[0].id, "rs1");
        assert_eq!(snps[0].content, "Hello");
    }

    #[test]
    fn test_collect_snps_sentinel_for_missing_text() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path(), "ID\nrs1\nrs3\n", VCF);

        let snps = collect_snps(&config).unwrap();

        assert_eq!(snps.len(), 2);
        assert!(snps.iter().all(|s| s.content == "No text file found"));
    }

    #[test]
    fn test_collect_snps_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path(), "ID\nrs1\nrs3\n", VCF);
        write_snp_text(dir.path(), "rs1", "Hello");

        let first = collect_snps(&config).unwrap();
        let second = collect_snps(&config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_join_inputs_missing_vcf() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_fixture(dir.path(), "ID\nrs1\n", VCF);
        config.vcf_file = dir.path().join("missing.vcf");

        assert!(join_inputs(&config).is_err());
    }

    #[test]
    fn test_run_variants_renders_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path(), "ID,Gene\nrs1,BRCA1\n", VCF);

        let md = run_variants(&config).unwrap();

        assert!(md.contains("# Joined Variants"));
        assert!(md.contains("| CHROM | POS | ID | REF | ALT | QUAL | FILTER | INFO | Gene |"));
        assert!(md.contains("| chr1 | 14370 | rs1 | G | A | 29 | PASS | NS=3;DP=14 | BRCA1 |"));
        assert!(!md.contains("rs3"));
    }

    #[test]
    fn test_run_variants_no_matches() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path(), "ID\nrs99\n", VCF);

        let md = run_variants(&config).unwrap();
        assert!(md.contains("no matching variants"));
    }

    #[test]
    fn test_run_sources_lists_urls() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_fixture(dir.path(), "ID\nrs1\nrs3\n", VCF);
        write_snp_text(
            dir.path(),
            "rs1",
            "Abstract,PubMedURL\nA study,https://pubmed.ncbi.nlm.nih.gov/1/\n",
        );

        let md = run_sources(&config).unwrap();

        assert!(md.contains("## rs1"));
        assert!(md.contains("1 abstracts"));
        assert!(md.contains("- https://pubmed.ncbi.nlm.nih.gov/1/"));
        assert!(md.contains("## rs3"));
        assert!(md.contains("No text file found"));
    }
}
