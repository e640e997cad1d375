//! Replies returned to the presentation layer.

use serde::{Deserialize, Serialize};

/// How the front end should present a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Input accepted; the message carries the next prompt.
    Success,
    /// Input rejected; the step did not change.
    Error,
    /// The conversation is over.
    Final,
}

/// One bot message in response to one user line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotReply {
    pub kind: ReplyKind,
    pub message: String,
}

impl BotReply {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Error,
            message: message.into(),
        }
    }

    pub fn finished(message: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Final,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == ReplyKind::Success
    }

    pub fn is_error(&self) -> bool {
        self.kind == ReplyKind::Error
    }

    pub fn is_final(&self) -> bool {
        self.kind == ReplyKind::Final
    }
}
