use news_analyzer::ai::prompt_builder::{
    OUTPUT_SECTIONS, build_analysis_prompt, sanitize_prompt_text,
};
use news_analyzer::core::config::{PipelineConfig, StageConfig};
use news_analyzer::core::models::Article;
use openai_api_rs::v1::chat_completion::{Content, MessageRole};
use url::Url;

fn article() -> Article {
    Article {
        title: "새로운 데이터베이스 엔진 공개".to_string(),
        link: Url::parse("https://example.com/db").unwrap(),
        description: "저장 엔진을 처음부터 다시 작성".to_string(),
        points: 128,
        topic_id: "900".to_string(),
    }
}

fn text_of(content: &Content) -> &str {
    match content {
        Content::Text(text) => text,
        _ => panic!("expected text content"),
    }
}

#[test]
fn test_prompt_has_system_then_user_message() {
    let prompt = build_analysis_prompt(&PipelineConfig::default(), &article(), "본문");
    assert_eq!(prompt.len(), 2);
    assert!(matches!(prompt[0].role, MessageRole::system));
    assert!(matches!(prompt[1].role, MessageRole::user));
}

#[test]
fn test_system_prompt_lists_stages_and_sections() {
    let mut config = PipelineConfig::default();
    config.stages = vec![
        StageConfig::new("수집가", "사실을 모은다"),
        StageConfig::new("해설가", "의미를 설명한다"),
    ];
    let prompt = build_analysis_prompt(&config, &article(), "");
    let system = text_of(&prompt[0].content);

    assert!(system.contains("1. 수집가: 사실을 모은다"));
    assert!(system.contains("2. 해설가: 의미를 설명한다"));
    for section in OUTPUT_SECTIONS {
        assert!(system.contains(section), "missing section {section}");
    }
}

#[test]
fn test_user_prompt_embeds_article_fields() {
    let prompt = build_analysis_prompt(&PipelineConfig::default(), &article(), "엔진 상세 설명");
    let user = text_of(&prompt[1].content);

    assert!(user.contains("새로운 데이터베이스 엔진 공개"));
    assert!(user.contains("https://example.com/db"));
    assert!(user.contains("저장 엔진을 처음부터 다시 작성"));
    assert!(user.contains("128"));
    assert!(user.contains("엔진 상세 설명"));
}

#[test]
fn test_detail_is_capped_at_limit() {
    let config = PipelineConfig::default();
    assert_eq!(config.detail_char_limit, 3000);

    let detail = format!("{}{}", "가".repeat(3000), "끝");
    let prompt = build_analysis_prompt(&config, &article(), &detail);
    let user = text_of(&prompt[1].content);

    assert!(user.contains(&"가".repeat(3000)));
    assert!(!user.contains('끝'));
}

#[test]
fn test_empty_detail_is_marked() {
    let prompt = build_analysis_prompt(&PipelineConfig::default(), &article(), "   ");
    let user = text_of(&prompt[1].content);
    assert!(user.contains("본문 없음"));
}

#[test]
fn test_sanitize_prompt_text() {
    let input = "줄 하나\n줄 둘\t탭 \u{0000}널 \u{007F}삭제";
    assert_eq!(sanitize_prompt_text(input, 100), "줄 하나\n줄 둘\t탭 널 삭제");

    let long_input = "a".repeat(150);
    assert_eq!(sanitize_prompt_text(&long_input, 100).len(), 100);
}
