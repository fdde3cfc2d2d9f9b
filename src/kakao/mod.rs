//! KakaoTalk skill protocol: reply envelopes and canned user-facing messages

pub mod response_builder;

pub use response_builder::{
    CallbackAck, SkillReply, SkillResponse, callback_ack, format_reply, truncate_reply_text,
};

/// Envelope version the skill server speaks.
pub const SKILL_VERSION: &str = "2.0";

/// Hard ceiling on `simpleText.text`, in characters.
pub const MAX_TEXT_CHARS: usize = 1000;

pub const PROMPT_FOR_TOPIC_MESSAGE: &str = "분석할 뉴스 주제나 키워드를 입력해주세요.";

pub const INVALID_REQUEST_MESSAGE: &str = "잘못된 요청 형식입니다.";

pub const CANNOT_RETRIEVE_MESSAGE: &str = "긱뉴스 글을 가져올 수 없습니다. 잠시 후 다시 시도해주세요.";

pub const ANALYSIS_PENDING_MESSAGE: &str = "긱뉴스 분석 중... 잠시만 기다려주세요.";

pub const ANALYSIS_FAILED_MESSAGE: &str = "뉴스 분석 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

pub const BUSY_MESSAGE: &str = "요청이 많아 지금은 분석할 수 없습니다. 잠시 후 다시 시도해주세요.";

/// Placeholder shown by `/basic` while topic analysis is not wired to the pipeline.
#[must_use]
pub fn placeholder_analysis_message(topic: &str) -> String {
    format!(
        "'{}' 주제의 뉴스 분석을 준비하고 있습니다. 최신 기술 뉴스 요약은 '긱뉴스'를 요청해주세요.",
        topic
    )
}
