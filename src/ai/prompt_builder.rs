use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};

use crate::core::config::PipelineConfig;
use crate::core::models::Article;

/// Section headings the model is asked to produce, in order.
pub const OUTPUT_SECTIONS: [&str; 3] = ["📌 핵심 요약", "💡 주요 관점", "🔍 시사점"];

/// Remove control characters (newlines and tabs survive) and hard-truncate
/// to `max_chars`.
#[must_use]
pub fn sanitize_prompt_text(raw: &str, max_chars: usize) -> String {
    raw.chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .take(max_chars)
        .collect()
}

fn message(role: MessageRole, text: String) -> ChatCompletionMessage {
    ChatCompletionMessage {
        role,
        content: Content::Text(text),
        name: None,
        tool_calls: None,
        tool_call_id: None,
    }
}

fn system_prompt(config: &PipelineConfig) -> String {
    let stages = config
        .stages
        .iter()
        .enumerate()
        .map(|(i, stage)| format!("{}. {}: {}", i + 1, stage.role, stage.goal))
        .collect::<Vec<_>>()
        .join("\n");
    let sections = OUTPUT_SECTIONS
        .iter()
        .map(|s| format!("[{s}]"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "당신은 기술 뉴스를 카카오톡으로 전달하는 분석 봇입니다. \
         아래 역할을 순서대로 수행한 결과만 한국어로 출력하세요.\n\
         {stages}\n\
         ─────────────── 출력 형식 ───────────────\n\
         다음 세 섹션을 이 순서대로 모두 포함하세요.\n\
         {sections}\n\
         ─────────────── 규칙 ───────────────\n\
         - 전체 분량은 공백 포함 800자 이내로 작성합니다.\n\
         - 기사에 없는 사실이나 링크를 지어내지 않습니다.\n\
         - 마크다운 표나 코드 블록을 쓰지 않습니다."
    )
}

fn article_prompt(article: &Article, detail_text: &str, detail_char_limit: usize) -> String {
    let detail = sanitize_prompt_text(detail_text.trim(), detail_char_limit);
    let detail_block = if detail.is_empty() {
        "(본문 없음: 제목과 설명만으로 분석하세요)".to_string()
    } else {
        detail
    };

    format!(
        "제목: {}\n링크: {}\n설명: {}\n포인트: {}\n\n본문:\n{}",
        sanitize_prompt_text(&article.title, 300),
        article.link,
        sanitize_prompt_text(&article.description, 1000),
        article.points,
        detail_block
    )
}

/// Build the single-call chat prompt for one article.
///
/// The detail body is cut to `config.detail_char_limit` characters.
#[must_use]
pub fn build_analysis_prompt(
    config: &PipelineConfig,
    article: &Article,
    detail_text: &str,
) -> Vec<ChatCompletionMessage> {
    vec![
        message(MessageRole::system, system_prompt(config)),
        message(
            MessageRole::user,
            article_prompt(article, detail_text, config.detail_char_limit),
        ),
    ]
}
