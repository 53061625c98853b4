//! OpenAI-backed summarization engine.
//!
//! Two endpoints are used: `/embeddings` to vectorize document chunks and
//! the query, and `/chat/completions` to synthesize the final answer from
//! the retrieved chunks.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::OpenAiConfig;
use crate::error::{Result, SnpsumError};

use super::index::{chunk_document, VectorIndex, DEFAULT_TOP_K};
use super::{Document, SummaryEngine, Summarizer};

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    input: Vec<String>,
    model: String,
    encoding_format: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Thin client for the two OpenAI endpoints the engine needs.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Embed a batch of texts, one vector per input, in input order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// response that does not match the request.
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingRequest {
            input: texts.to_vec(),
            model: self.config.embed_model.clone(),
            encoding_format: "float".to_string(),
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SnpsumError::Engine(format!(
                "OpenAI API error ({status}): {error_text}"
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| SnpsumError::Engine(format!("failed to parse embedding response: {e}")))?;

        if parsed.data.len() != texts.len() {
            return Err(SnpsumError::Engine(format!(
                "embedding count mismatch: sent {}, received {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }

    /// Send one chat completion and return the first choice's content.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// empty response.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.chat_model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SnpsumError::Engine(format!(
                "OpenAI API error ({status}): {error_text}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| SnpsumError::Engine(format!("failed to parse chat response: {e}")))?;

        debug!(
            prompt_tokens = parsed.usage.prompt_tokens,
            completion_tokens = parsed.usage.completion_tokens,
            "chat completion usage"
        );

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SnpsumError::Engine("empty chat response".to_string()))?;

        Ok(choice.message.content.trim().to_string())
    }
}

#[async_trait]
impl Summarizer for OpenAiClient {
    async fn summarize(&self, text: &str) -> Result<String> {
        self.complete(&format!("Please summarize the following text:\n\n{text}"))
            .await
    }
}

/// Prompt sent to the chat model: retrieved chunks first, then the query.
fn synthesis_prompt(context: &str, query: &str) -> String {
    format!(
        "Context information is below.\n\
         ---------------------\n\
         {context}\n\
         ---------------------\n\
         Given the context information and not prior knowledge, answer the query.\n\
         Query: {query}\n\
         Answer:"
    )
}

/// Retrieval engine backed by the OpenAI API.
///
/// Documents are chunked and embedded up front; each query embeds the
/// prompt, retrieves the closest chunks by cosine similarity, and hands
/// them to the chat model for synthesis.
#[derive(Debug)]
pub struct OpenAiEngine {
    client: OpenAiClient,
    index: VectorIndex,
    top_k: usize,
}

impl OpenAiEngine {
    #[must_use]
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: OpenAiClient::new(config),
            index: VectorIndex::new(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Number of chunks retrieved per query (at least 1).
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }
}

#[async_trait]
impl SummaryEngine for OpenAiEngine {
    async fn build(&mut self, documents: &[Document]) -> Result<()> {
        if documents.is_empty() {
            return Err(SnpsumError::Engine("no documents to index".to_string()));
        }

        let chunks: Vec<_> = documents.iter().flat_map(chunk_document).collect();
        if chunks.is_empty() {
            return Err(SnpsumError::Engine(
                "documents contain no text".to_string(),
            ));
        }

        info!(
            documents = documents.len(),
            chunks = chunks.len(),
            "embedding document chunks"
        );

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.client.embed(&texts).await?;
        self.index = VectorIndex::from_parts(chunks, embeddings)?;
        Ok(())
    }

    async fn query(&self, prompt: &str) -> Result<String> {
        if self.index.is_empty() {
            return Err(SnpsumError::Engine("index not built".to_string()));
        }

        let query_embedding = self
            .client
            .embed(&[prompt.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SnpsumError::Engine("empty query embedding".to_string()))?;

        let hits = self.index.search(&query_embedding, self.top_k);
        debug!(hits = hits.len(), "retrieved chunks for query");

        let context = hits
            .iter()
            .map(|hit| format!("snp_id: {}\n{}", hit.chunk.doc_id, hit.chunk.text))
            .collect::<Vec<_>>()
            .join("\n\n");

        self.client.complete(&synthesis_prompt(&context, prompt)).await
    }
}
