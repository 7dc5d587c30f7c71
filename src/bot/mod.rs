//! Chat administration of the schedule
//!
//! Transport-free: [`handlers::AdminBot`] turns administrator text and button
//! presses into schedule operations and returns a [`BotReply`]. The Telegram
//! wiring lives in [`crate::telegram`].

pub mod calendar;
pub mod callbacks;
pub mod commands;
pub mod handlers;

pub use callbacks::AdminAction;
pub use handlers::AdminBot;

/// One inline button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: AdminAction,
}

impl Button {
    pub fn new(label: impl Into<String>, action: AdminAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Message to send back to the administrator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotReply {
    pub text: String,
    /// Rows of inline buttons
    pub keyboard: Vec<Vec<Button>>,
    /// Send with Markdown formatting
    pub markdown: bool,
}

impl BotReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn markdown(mut self) -> Self {
        self.markdown = true;
        self
    }

    pub fn with_keyboard(mut self, keyboard: Vec<Vec<Button>>) -> Self {
        self.keyboard = keyboard;
        self
    }
}
