//! Pipeline and API configuration.
//!
//! The API key is read from the environment exactly once, up front, and
//! carried as an explicit value from there on.

use std::env;
use std::path::PathBuf;

use crate::error::{Result, SnpsumError};

/// Environment variable holding the OpenAI API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default path of the reference SNP list.
pub const DEFAULT_SNP_LIST: &str = "./vcf_files/snp_list.csv";
/// Default path of the VCF variant file.
pub const DEFAULT_VCF_FILE: &str = "./vcf_files/dummy_vcf_1.vcf";
/// Default directory holding per-SNP text files.
pub const DEFAULT_TEXT_DIR: &str = "./text";
/// Query issued against the index when no override is given.
pub const DEFAULT_QUERY: &str = "Please summarize the following text";

/// Default chat completion model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
/// Default embedding model.
pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";
/// Base URL of the OpenAI API.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Credentials and model selection for the OpenAI backend.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key sent as a bearer token
    pub api_key: String,
    /// Chat completion model id
    pub chat_model: String,
    /// Embedding model id
    pub embed_model: String,
    /// API base URL (no trailing slash)
    pub base_url: String,
}

impl OpenAiConfig {
    /// Create a config with the given key and default models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            base_url: OPENAI_API_BASE.to_string(),
        }
    }

    /// Read the API key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`SnpsumError::MissingApiKey`] when the variable is unset.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_ENV).map_err(|_| SnpsumError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }
}

/// Inputs and the query for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Reference SNP list (CSV with an `ID` column)
    pub snp_list: PathBuf,
    /// VCF variant file
    pub vcf_file: PathBuf,
    /// Directory holding `<id>/data.csv` text files
    pub text_dir: PathBuf,
    /// Query issued against the built index
    pub query: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            snp_list: PathBuf::from(DEFAULT_SNP_LIST),
            vcf_file: PathBuf::from(DEFAULT_VCF_FILE),
            text_dir: PathBuf::from(DEFAULT_TEXT_DIR),
            query: DEFAULT_QUERY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = PipelineConfig::default();
        assert_eq!(config.snp_list, PathBuf::from("./vcf_files/snp_list.csv"));
        assert_eq!(config.vcf_file, PathBuf::from("./vcf_files/dummy_vcf_1.vcf"));
        assert_eq!(config.text_dir, PathBuf::from("./text"));
        assert_eq!(config.query, "Please summarize the following text");
    }

    #[test]
    fn test_openai_config_defaults() {
        let config = OpenAiConfig::new("sk-test");
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.embed_model, DEFAULT_EMBED_MODEL);
        assert!(config.base_url.starts_with("https://"));
    }
}
