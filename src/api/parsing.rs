use serde::Deserialize;
use url::Url;

use crate::core::models::CallbackRequest;
use crate::errors::BotError;

/// Inbound skill request. Only the fields the bot reads are modelled.
#[derive(Debug, Deserialize)]
pub struct SkillPayload {
    #[serde(rename = "userRequest")]
    pub user_request: UserRequest,
}

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub utterance: Option<String>,
    #[serde(rename = "callbackUrl", default)]
    pub callback_url: Option<String>,
}

/// # Errors
///
/// Returns [`BotError::ParseError`] for invalid JSON or a missing `userRequest`.
pub fn parse_skill_payload(body: &[u8]) -> Result<SkillPayload, BotError> {
    serde_json::from_slice(body)
        .map_err(|e| BotError::ParseError(format!("Invalid skill payload: {}", e)))
}

/// The user's text, trimmed. `Ok("")` means the user sent nothing.
///
/// # Errors
///
/// Returns [`BotError::ParseError`] if `userRequest.utterance` is missing.
pub fn extract_utterance(payload: &SkillPayload) -> Result<&str, BotError> {
    payload
        .user_request
        .utterance
        .as_deref()
        .map(str::trim)
        .ok_or_else(|| BotError::ParseError("Missing userRequest.utterance".to_string()))
}

/// Callback address, if the platform offered one. Empty strings count as absent.
///
/// # Errors
///
/// Returns [`BotError::ParseError`] if the address is present but is not an
/// absolute http(s) URL.
pub fn extract_callback(payload: &SkillPayload) -> Result<Option<CallbackRequest>, BotError> {
    let Some(raw) = payload
        .user_request
        .callback_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Ok(None);
    };

    let callback_url = Url::parse(raw)?;
    if !matches!(callback_url.scheme(), "http" | "https") {
        return Err(BotError::ParseError(format!(
            "Unsupported callback scheme: {}",
            callback_url.scheme()
        )));
    }
    Ok(Some(CallbackRequest { callback_url }))
}
