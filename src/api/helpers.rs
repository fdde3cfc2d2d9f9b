//! Response builders shared by the skill handlers.
//!
//! Every reply is HTTP 200 with a skill envelope; the platform drops anything
//! else.

use axum::Json;

use crate::errors::BotError;
use crate::kakao::{
    BUSY_MESSAGE, INVALID_REQUEST_MESSAGE, SkillReply, callback_ack, format_reply,
};

#[must_use]
pub fn ok_text(text: &str) -> Json<SkillReply> {
    Json(SkillReply::Immediate(format_reply(text)))
}

#[must_use]
pub fn ok_callback_ack(text: &str) -> Json<SkillReply> {
    Json(SkillReply::Deferred(callback_ack(text)))
}

/// Map a request-level error to the message the user sees.
#[must_use]
pub fn err_text(error: &BotError) -> Json<SkillReply> {
    match error {
        BotError::QueueFull | BotError::QueueClosed => ok_text(BUSY_MESSAGE),
        _ => ok_text(INVALID_REQUEST_MESSAGE),
    }
}
