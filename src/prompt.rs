use itertools::Itertools;

use crate::debate::Speaker;

pub const OPENING_LINE: &str = "Shall we talk about this topic?";

pub const TOPIC_SYSTEM_PROMPT: &str =
    "You are an AI that recommends original and insightful conversation topics.";

pub const DEBATER_SYSTEM_PROMPT: &str =
    "You are a friendly and intelligent AI who keeps a natural, informative conversation going.";

const CLOSING_HINT: &str =
    "This conversation is about to end. Wrap things up naturally or give your closing remarks.";

pub fn topic_request(previous: &[String]) -> String {
    let topic_list = previous.iter().map(|topic| format!("- {topic}")).join("\n");

    format!(
        r#"Here are the topics used so far:

{topic_list}

Recommend exactly one interesting science or society topic for a conversation that does not overlap with this list. Keep it short and clear."#
    )
}

/// Whether `turn` is one of the last two of the conversation.
pub fn is_closing_turn(turn: usize, max_turns: usize) -> bool {
    turn + 2 >= max_turns
}

pub struct TurnContext<'a> {
    pub topic: &'a str,
    pub log: &'a str,
    pub last_message: &'a str,
    pub speaker: Speaker,
    pub closing: bool,
}

pub fn turn_prompt(context: &TurnContext<'_>) -> String {
    let TurnContext {
        topic,
        log,
        last_message,
        speaker,
        closing,
    } = context;
    let closing_hint = if *closing { CLOSING_HINT } else { "" };

    format!(
        r#"Topic: {topic}

Conversation so far:
{log}

Your counterpart last said:
"{last_message}"

You ({speaker}) should continue the conversation naturally. Feel free to offer a new perspective or ask a question.
{closing_hint}

What do you say next?
"#
    )
}
