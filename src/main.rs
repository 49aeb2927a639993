mod config;
mod debate;
mod prompt;
mod provider;
mod topics;
mod transcript;

use std::time::Duration;
use structopt::StructOpt;
use time::OffsetDateTime;

use config::{Args, Config, Environment};
use debate::DebateSettings;
use provider::{gemini::GeminiChat, openai::OpenAiChat};
use topics::TopicLog;
use transcript::Transcript;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // The local offset can only be read while the process is single-threaded.
    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date();
    dotenv::dotenv().ok();
    let environment = Environment::from_env()?;
    let args = Args::from_args();
    let config = Config::load(args.config.as_deref()).await?;

    let client = reqwest::Client::new();
    let topic_model = OpenAiChat::new(
        client.clone(),
        &environment.openai_api_key,
        &config.openai.model,
        prompt::TOPIC_SYSTEM_PROMPT,
        config.openai.topic_temperature,
    );
    let chatgpt = OpenAiChat::new(
        client.clone(),
        &environment.openai_api_key,
        &config.openai.model,
        prompt::DEBATER_SYSTEM_PROMPT,
        config.openai.temperature,
    );
    let gemini = GeminiChat::new(client, &environment.gemini_api_key, &config.gemini.model);

    tokio::fs::create_dir_all(&args.transcript_dir).await?;
    let transcript = Transcript::for_date(&args.transcript_dir, today)?;
    let topics = TopicLog::new(args.topics_file);

    let settings = DebateSettings {
        max_turns: args.turns,
        turn_delay: Duration::from_millis(args.turn_delay_ms),
    };

    let outcome = debate::run(
        &settings,
        &topics,
        &transcript,
        &topic_model,
        &chatgpt,
        &gemini,
    )
    .await?;

    println!("Today's topic: {}", outcome.topic);
    for turn in outcome.turns.iter().filter(|turn| turn.failed) {
        println!("Turn {} ({}) failed: {}", turn.index + 1, turn.speaker, turn.reply);
    }
    println!(
        "Finished {} turns. Transcript: {}",
        outcome.turns.len(),
        transcript.path().display()
    );

    Ok(())
}
