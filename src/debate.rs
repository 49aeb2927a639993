use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Duration;
use strum::Display;

use crate::prompt::{self, TurnContext};
use crate::provider::ChatModel;
use crate::topics::{TopicLog, normalize_topic};
use crate::transcript::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Speaker {
    #[strum(serialize = "ChatGPT")]
    ChatGpt,
    #[strum(serialize = "Gemini")]
    Gemini,
}

impl Speaker {
    /// Even turns open, odd turns answer.
    pub fn for_turn(turn: usize) -> Self {
        if turn % 2 == 0 {
            Self::ChatGpt
        } else {
            Self::Gemini
        }
    }
}

#[derive(Debug, Clone)]
pub struct DebateSettings {
    pub max_turns: usize,
    pub turn_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Turn {
    pub index: usize,
    pub speaker: Speaker,
    pub reply: String,
    pub failed: bool,
}

#[derive(Debug)]
pub struct DebateOutcome {
    pub topic: String,
    pub turns: Vec<Turn>,
}

pub async fn run(
    settings: &DebateSettings,
    topics: &TopicLog,
    transcript: &Transcript,
    topic_model: &impl ChatModel,
    first: &impl ChatModel,
    second: &impl ChatModel,
) -> Result<DebateOutcome> {
    let previous = topics.previous().await?;
    info!("Requesting a new topic ({} used before)…", previous.len());

    let topic = normalize_topic(
        &topic_model
            .reply(&prompt::topic_request(&previous))
            .await
            .context("Failed to generate a topic")?,
    );
    anyhow::ensure!(!topic.is_empty(), "Topic model returned a blank topic");
    info!("Topic: {topic}");

    topics.append(&topic).await?;
    transcript.append(&format!("[Topic] {topic}")).await?;
    debug!(
        "Recorded topic in {} and {}",
        topics.path().display(),
        transcript.path().display()
    );

    let mut last_message = prompt::OPENING_LINE.to_owned();
    let mut turns = Vec::with_capacity(settings.max_turns);

    for index in 0..settings.max_turns {
        let speaker = Speaker::for_turn(index);
        info!("Turn {}/{} ({speaker})…", index + 1, settings.max_turns);

        let log = transcript.read().await?;
        let prompt = prompt::turn_prompt(&TurnContext {
            topic: &topic,
            log: &log,
            last_message: &last_message,
            speaker,
            closing: prompt::is_closing_turn(index, settings.max_turns),
        });
        debug!("Prompt for turn {} is {} bytes", index + 1, prompt.len());

        let result = match speaker {
            Speaker::ChatGpt => first.reply(&prompt).await,
            Speaker::Gemini => second.reply(&prompt).await,
        };

        let (reply, failed) = match result {
            Ok(reply) => (reply, false),
            Err(err) => {
                warn!("{speaker} failed on turn {}: {err:#}", index + 1);
                (format!("[{speaker} error: {err:#}]"), true)
            }
        };

        transcript.append(&format!("{speaker}: {reply}")).await?;
        last_message.clone_from(&reply);
        turns.push(Turn {
            index,
            speaker,
            reply,
            failed,
        });

        if index + 1 < settings.max_turns && !settings.turn_delay.is_zero() {
            tokio::time::sleep(settings.turn_delay).await;
        }
    }

    info!("All {} turns finished.", turns.len());

    Ok(DebateOutcome { topic, turns })
}
