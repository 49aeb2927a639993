use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{ChatModel, check_status};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// `generateContent` client. Every call is a fresh single-turn chat.
pub struct GeminiChat {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiChat {
    pub fn new(client: reqwest::Client, api_key: &str, model: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        }
    }

    fn url(&self) -> String {
        format!("{BASE_URL}/{}:generateContent", self.model)
    }
}

fn request(prompt: &str) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part { text: prompt }],
        }],
    }
}

impl ChatModel for GeminiChat {
    async fn reply(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request(prompt))
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let response: GenerateResponse = check_status("Gemini", response)
            .await?
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        extract_reply(response)
    }
}

fn extract_reply(response: GenerateResponse) -> Result<String> {
    let content = response
        .candidates
        .into_iter()
        .next()
        .context("No candidates in Gemini response")?
        .content
        .context("Gemini candidate has no content")?;

    let text = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<String>();

    anyhow::ensure!(!text.trim().is_empty(), "Gemini candidate has no text");
    Ok(text.trim().to_owned())
}
