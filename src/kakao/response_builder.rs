//! Reply envelopes for the KakaoTalk skill platform.
//!
//! The platform rejects anything that is not one of these two shapes, so every
//! reply (including errors) goes through this module.

use serde::{Deserialize, Serialize};

use super::{MAX_TEXT_CHARS, SKILL_VERSION};

const TRUNCATION_MARKER: &str = "...";

/// `{version, template: {outputs: [{simpleText: {text}}]}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillResponse {
    pub version: String,
    pub template: SkillTemplate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTemplate {
    pub outputs: Vec<SkillOutput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillOutput {
    #[serde(rename = "simpleText")]
    pub simple_text: SimpleText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleText {
    pub text: String,
}

impl SkillResponse {
    /// Text of the first output, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.template
            .outputs
            .first()
            .map(|output| output.simple_text.text.as_str())
    }
}

/// Acknowledgement for callback mode: `{version, useCallback: true, data: {text}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackAck {
    pub version: String,
    #[serde(rename = "useCallback")]
    pub use_callback: bool,
    pub data: CallbackData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackData {
    pub text: String,
}

/// Anything a skill endpoint may put on the synchronous connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SkillReply {
    Immediate(SkillResponse),
    Deferred(CallbackAck),
}

/// Cut `text` to the platform ceiling.
///
/// Counts characters, not bytes. Over-long input keeps its first 997
/// characters followed by `"..."`.
#[must_use]
pub fn truncate_reply_text(text: &str) -> String {
    if text.chars().count() <= MAX_TEXT_CHARS {
        return text.to_string();
    }

    let keep = MAX_TEXT_CHARS - TRUNCATION_MARKER.len();
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

/// Wrap `text` in the simple-text envelope.
///
/// # Examples
///
/// ```
/// use news_analyzer::kakao::format_reply;
///
/// let reply = format_reply("안녕하세요");
/// assert_eq!(reply.version, "2.0");
/// assert_eq!(reply.text(), Some("안녕하세요"));
/// ```
#[must_use]
pub fn format_reply(text: &str) -> SkillResponse {
    SkillResponse {
        version: SKILL_VERSION.to_string(),
        template: SkillTemplate {
            outputs: vec![SkillOutput {
                simple_text: SimpleText {
                    text: truncate_reply_text(text),
                },
            }],
        },
    }
}

#[must_use]
pub fn callback_ack(text: &str) -> CallbackAck {
    CallbackAck {
        version: SKILL_VERSION.to_string(),
        use_callback: true,
        data: CallbackData {
            text: text.to_string(),
        },
    }
}
