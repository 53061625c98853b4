//! Integration tests for the snpsum CLI
//!
//! Tests each command with real invocations against temp fixtures.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a CLI command
fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_snpsum"))
}

/// Lay out the default input files under `dir`.
///
/// The SNP list and the VCF share rs1 and rs2; only rs1 has a text file.
fn write_fixture(dir: &Path) {
    let vcf_dir = dir.join("vcf_files");
    fs::create_dir_all(&vcf_dir).unwrap();
    fs::write(vcf_dir.join("snp_list.csv"), "ID\nrs1\nrs2\n").unwrap();
    fs::write(
        vcf_dir.join("dummy_vcf_1.vcf"),
        "##fileformat=VCFv4.2\n\
         ##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">\n\
         #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
         1\t1000\trs1\tA\tG\t50\tPASS\tDP=10\n\
         2\t2000\trs2\tC\tT\t40\tPASS\tDP=8\n",
    )
    .unwrap();

    let rs1_dir = dir.join("text").join("rs1");
    fs::create_dir_all(&rs1_dir).unwrap();
    fs::write(
        rs1_dir.join("data.csv"),
        "Abstract,PubMedURL\nA study of rs1.,https://pubmed.ncbi.nlm.nih.gov/111/\n",
    )
    .unwrap();
}

// ============ SUMMARIZE COMMAND TESTS ============

#[test]
fn test_summarize_requires_api_key() {
    let temp = TempDir::new().unwrap();
    write_fixture(temp.path());

    cli()
        .current_dir(temp.path())
        .env_remove("OPENAI_API_KEY")
        .arg("summarize")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_summarize_checks_key_before_inputs() {
    // No input files at all: the missing credential is still the error.
    let temp = TempDir::new().unwrap();

    cli()
        .current_dir(temp.path())
        .env_remove("OPENAI_API_KEY")
        .arg("summarize")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY not set"));
}

#[test]
fn test_summarize_help() {
    cli()
        .arg("summarize")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--per-snp"))
        .stdout(predicate::str::contains("--top-k"));
}

// ============ VARIANTS COMMAND TESTS ============

#[test]
fn test_variants_command() {
    let temp = TempDir::new().unwrap();
    write_fixture(temp.path());

    // Offline command: no credential needed.
    cli()
        .current_dir(temp.path())
        .env_remove("OPENAI_API_KEY")
        .arg("variants")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "| CHROM | POS | ID | REF | ALT | QUAL | FILTER | INFO |",
        ))
        .stdout(predicate::str::contains(
            "| 1 | 1000 | rs1 | A | G | 50 | PASS | DP=10 |",
        ))
        .stdout(predicate::str::contains(
            "| 2 | 2000 | rs2 | C | T | 40 | PASS | DP=8 |",
        ));
}

#[test]
fn test_variants_explicit_paths() {
    let temp = TempDir::new().unwrap();
    write_fixture(temp.path());

    cli()
        .env_remove("OPENAI_API_KEY")
        .arg("variants")
        .arg("--snp-list")
        .arg(temp.path().join("vcf_files").join("snp_list.csv"))
        .arg("--vcf")
        .arg(temp.path().join("vcf_files").join("dummy_vcf_1.vcf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("rs1"))
        .stdout(predicate::str::contains("rs2"));
}

#[test]
fn test_variants_missing_vcf() {
    let temp = TempDir::new().unwrap();
    let vcf_dir = temp.path().join("vcf_files");
    fs::create_dir_all(&vcf_dir).unwrap();
    fs::write(vcf_dir.join("snp_list.csv"), "ID\nrs1\n").unwrap();

    cli()
        .current_dir(temp.path())
        .arg("variants")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_variants_missing_id_column() {
    let temp = TempDir::new().unwrap();
    write_fixture(temp.path());
    fs::write(
        temp.path().join("vcf_files").join("snp_list.csv"),
        "Name\nrs1\n",
    )
    .unwrap();

    cli()
        .current_dir(temp.path())
        .arg("variants")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ID"));
}

// ============ SOURCES COMMAND TESTS ============

#[test]
fn test_sources_command() {
    let temp = TempDir::new().unwrap();
    write_fixture(temp.path());

    cli()
        .current_dir(temp.path())
        .env_remove("OPENAI_API_KEY")
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing SNP: rs1"))
        .stdout(predicate::str::contains("Processing SNP: rs2"))
        .stdout(predicate::str::contains("# SNP Literature Sources"))
        .stdout(predicate::str::contains("## rs1"))
        .stdout(predicate::str::contains("1 abstracts"))
        .stdout(predicate::str::contains(
            "https://pubmed.ncbi.nlm.nih.gov/111/",
        ))
        .stdout(predicate::str::contains("## rs2"))
        .stdout(predicate::str::contains("No text file found"));
}

// ============ GLOBAL FLAGS TESTS ============

#[test]
fn test_help_flag() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("summarize"))
        .stdout(predicate::str::contains("variants"))
        .stdout(predicate::str::contains("sources"));
}
