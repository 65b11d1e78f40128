//! Chat transcripts
//!
//! A transcript is the message list behind one assistant widget. It only
//! grows: one user message when a question is sent, one model message when
//! the answer (or the widget's apology) arrives. Only one question may be in
//! flight at a time.

use serde::{Deserialize, Serialize};

use super::{AssistantError, AssistantReply, Widget};
use crate::gemini::{Role, Source};

/// One message of a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Citations attached to a model answer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            sources: Vec::new(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            content: content.into(),
            sources: Vec::new(),
        }
    }

    /// Builder method: attach citations
    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }
}

impl From<AssistantReply> for ChatMessage {
    fn from(reply: AssistantReply) -> Self {
        ChatMessage::model(reply.text).with_sources(reply.sources)
    }
}

/// A question accepted by [`Transcript::begin`]
#[derive(Debug, Clone)]
pub struct PendingTurn {
    /// The visitor's message, as typed
    pub message: String,
    /// Conversation before this message
    pub history: Vec<ChatMessage>,
}

/// Message list and loading state of one widget
#[derive(Debug, Clone)]
pub struct Transcript {
    widget: Widget,
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Transcript {
    pub fn new(widget: Widget) -> Self {
        Self {
            widget,
            messages: Vec::new(),
            pending: false,
        }
    }

    pub fn widget(&self) -> Widget {
        self.widget
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True while a question waits for its answer
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record the visitor's message and mark the transcript as loading.
    ///
    /// Returns `None` (and changes nothing) for blank input or while another
    /// question is still pending.
    pub fn begin(&mut self, input: &str) -> Option<PendingTurn> {
        if input.trim().is_empty() || self.pending {
            return None;
        }

        let history = self.messages.clone();
        self.messages.push(ChatMessage::user(input));
        self.pending = true;

        Some(PendingTurn {
            message: input.to_string(),
            history,
        })
    }

    /// Append the outcome of the pending question and clear the loading state.
    ///
    /// Failures become the widget's apology. Widgets without an apology
    /// (the gallery) append nothing on failure.
    pub fn finish(&mut self, outcome: Result<AssistantReply, AssistantError>) {
        if !self.pending {
            tracing::warn!(widget = %self.widget, "Answer received with no pending question");
            return;
        }
        self.pending = false;

        match outcome {
            Ok(reply) => self.messages.push(reply.into()),
            Err(e) => {
                tracing::warn!(widget = %self.widget, error = %e, "Assistant request failed");
                if let Some(apology) = self.widget.apology() {
                    self.messages.push(ChatMessage::model(apology));
                }
            }
        }
    }
}
