//! Conversation domain module.
//!
//! Guides a user through the valuation questions one answer at a time.
//! Handles the step lifecycle, the user-facing texts and the hand-off to
//! the prediction pipeline.

mod engine;
mod messages;
mod reply;
mod state;
mod step;

pub use engine::ConversationEngine;
pub use messages::CITY_PREVIEW_LIMIT;
pub use reply::{BotReply, ReplyKind};
pub use state::ConversationState;
pub use step::ConversationStep;
