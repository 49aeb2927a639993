use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{ChatModel, check_status};

const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client with a fixed system prompt and temperature.
pub struct OpenAiChat {
    client: reqwest::Client,
    api_key: String,
    model: String,
    system_prompt: String,
    temperature: f32,
}

impl OpenAiChat {
    pub fn new(
        client: reqwest::Client,
        api_key: &str,
        model: &str,
        system_prompt: &str,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            system_prompt: system_prompt.to_owned(),
            temperature,
        }
    }

    fn request<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &self.system_prompt,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
        }
    }
}

impl ChatModel for OpenAiChat {
    async fn reply(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&self.request(prompt))
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        let response: ChatResponse = check_status("OpenAI", response)
            .await?
            .json()
            .await
            .context("Failed to parse OpenAI API response")?;

        extract_reply(response)
    }
}

fn extract_reply(response: ChatResponse) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .context("No choices in OpenAI response")?
        .message
        .content
        .context("OpenAI response message has no content")?;

    anyhow::ensure!(!content.trim().is_empty(), "OpenAI response message is empty");
    Ok(content.trim().to_owned())
}
