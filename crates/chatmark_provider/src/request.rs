use chatmark_config::ProviderConfig;
use chatmark_domain::ChatMessage;
use derive_setters::Setters;
use serde::Serialize;

/// Chat-completion request body.
#[derive(Debug, Clone, PartialEq, Serialize, Setters)]
#[setters(into)]
pub struct Request {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub stream: bool,
}

impl Request {
    /// Recent `history` (at most `history_limit` messages) followed by the
    /// new user `prompt`.
    pub fn new(config: &ProviderConfig, history: &[ChatMessage], prompt: &str) -> Self {
        let start = history.len().saturating_sub(config.history_limit);
        let messages = history[start..]
            .iter()
            .cloned()
            .chain(std::iter::once(ChatMessage::user(prompt)))
            .collect();

        Self {
            model: config.model.clone(),
            messages,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            stream: true,
        }
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
