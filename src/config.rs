use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

/// Credentials read from the environment (and `.env`, when present).
#[derive(Debug)]
pub struct Environment {
    pub openai_api_key: String,
    pub gemini_api_key: String,
}

/// Variables as `envy` sees them. `gptkey`/`geminikey` are the names older
/// `.env` files use; the current names win when both are set.
#[derive(Deserialize)]
struct RawEnvironment {
    openai_api_key: Option<String>,
    gptkey: Option<String>,
    gemini_api_key: Option<String>,
    geminikey: Option<String>,
}

impl Environment {
    pub fn from_env() -> Result<Self> {
        Self::resolve(envy::from_env().context("Failed to read environment")?)
    }

    fn resolve(raw: RawEnvironment) -> Result<Self> {
        Ok(Self {
            openai_api_key: raw
                .openai_api_key
                .or(raw.gptkey)
                .context("OPENAI_API_KEY environment variable not set")?,
            gemini_api_key: raw
                .gemini_api_key
                .or(raw.geminikey)
                .context("GEMINI_API_KEY environment variable not set")?,
        })
    }
}

#[derive(StructOpt, Debug)]
#[structopt(
    name = "llm-debate",
    about = "Let ChatGPT and Gemini talk about a fresh topic and keep the transcript"
)]
pub struct Args {
    /// Number of turns in the conversation
    #[structopt(short, long, default_value = "5")]
    pub turns: usize,

    /// File holding previously used topics, one per line
    #[structopt(long, default_value = "topics.txt")]
    pub topics_file: PathBuf,

    /// Directory the dated transcript is written to
    #[structopt(long, default_value = ".")]
    pub transcript_dir: PathBuf,

    /// Pause between turns, in milliseconds
    #[structopt(long, default_value = "1000")]
    pub turn_delay_ms: u64,

    /// Optional TOML file overriding model settings
    #[structopt(short = "c", long)]
    pub config: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub gemini: GeminiConfig,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct OpenAiConfig {
    pub model: String,
    pub temperature: f32,
    pub topic_temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            temperature: 0.7,
            topic_temperature: 0.8,
        }
    }
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct GeminiConfig {
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
        }
    }
}

impl Config {
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config TOML {}", path.display()))
    }
}
