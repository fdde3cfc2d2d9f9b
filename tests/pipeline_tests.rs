mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use common::*;
use news_analyzer::errors::BotError;
use news_analyzer::kakao::CANNOT_RETRIEVE_MESSAGE;
use news_analyzer::worker::AnalysisPipeline;
use news_analyzer::worker::summarize::{analysis_text, briefing_text};

#[tokio::test]
async fn test_quick_briefing_uses_template() {
    let pipeline = AnalysisPipeline::new(
        Arc::new(FakeSource::with_article()),
        Arc::new(PanickingSummarizer),
    );
    let result = pipeline.quick_briefing().await;
    assert_eq!(result.text(), briefing_text("긱뉴스", &sample_article()));
}

#[tokio::test]
async fn test_full_analysis_frames_model_output() {
    let source = Arc::new(FakeSource::with_article());
    let summarizer = Arc::new(FakeSummarizer::ok("\n모델 출력\n"));
    let pipeline = AnalysisPipeline::new(source.clone(), summarizer.clone());

    let result = pipeline.full_analysis().await.unwrap();
    assert_eq!(result.text(), analysis_text(&sample_article(), "모델 출력"));
    assert!(result.text().starts_with("📰 Rust 2024 에디션 정식 출시"));
    assert_eq!(source.detail_calls.load(Ordering::SeqCst), 1);
    assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_full_analysis_truncates_long_output() {
    let pipeline = AnalysisPipeline::new(
        Arc::new(FakeSource::with_article()),
        Arc::new(FakeSummarizer::ok(&"요약".repeat(1000))),
    );
    let result = pipeline.full_analysis().await.unwrap();
    assert_eq!(result.text().chars().count(), 1000);
    assert!(result.text().ends_with("..."));
}

#[tokio::test]
async fn test_full_analysis_without_article_skips_summarizer() {
    let pipeline = AnalysisPipeline::new(
        Arc::new(FakeSource::empty()),
        Arc::new(PanickingSummarizer),
    );
    let result = pipeline.full_analysis().await.unwrap();
    assert_eq!(result.text(), CANNOT_RETRIEVE_MESSAGE);
}

#[tokio::test]
async fn test_full_analysis_propagates_detail_failure() {
    let mut source = FakeSource::with_article();
    source.detail = Err("GET topic?id=19377 returned 503".to_string());
    let pipeline = AnalysisPipeline::new(Arc::new(source), Arc::new(PanickingSummarizer));

    let result = pipeline.full_analysis().await;
    assert!(matches!(result, Err(BotError::FetchError(_))));
}

#[tokio::test]
async fn test_briefing_omits_empty_description() {
    let mut article = sample_article();
    article.description.clear();
    let text = briefing_text("긱뉴스", &article);
    assert!(!text.contains("\n\n\n"));
    assert!(text.contains("🔗 https://blog.rust-lang.org/"));
}

#[tokio::test]
async fn test_quick_briefing_falls_back_to_next_source() {
    let primary = Arc::new(FakeSource::empty());
    let fallback = Arc::new(FakeSource::with_article());
    let pipeline = AnalysisPipeline::new(primary.clone(), Arc::new(PanickingSummarizer))
        .with_fallback(fallback.clone());

    let result = pipeline.quick_briefing().await;
    assert_eq!(result.text(), briefing_text("긱뉴스", &sample_article()));
    assert_eq!(primary.top_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fallback.top_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fallback_is_not_consulted_when_primary_has_an_article() {
    let pipeline = AnalysisPipeline::new(
        Arc::new(FakeSource::with_article()),
        Arc::new(PanickingSummarizer),
    )
    .with_fallback(Arc::new(UnreachableSource));

    let result = pipeline.quick_briefing().await;
    assert!(result.text().contains("Rust 2024 에디션 정식 출시"));
}

#[tokio::test]
async fn test_full_analysis_reads_detail_from_the_producing_source() {
    let primary = Arc::new(FakeSource::empty());
    let fallback = Arc::new(FakeSource::with_article());
    let summarizer = Arc::new(FakeSummarizer::ok("모델 출력"));
    let pipeline = AnalysisPipeline::new(primary.clone(), summarizer.clone())
        .with_fallback(fallback.clone());

    let result = pipeline.full_analysis().await.unwrap();
    assert_eq!(result.text(), analysis_text(&sample_article(), "모델 출력"));
    assert_eq!(primary.detail_calls.load(Ordering::SeqCst), 0);
    assert_eq!(fallback.detail_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_full_analysis_without_any_article_cannot_retrieve() {
    let pipeline = AnalysisPipeline::new(
        Arc::new(FakeSource::empty()),
        Arc::new(PanickingSummarizer),
    )
    .with_fallback(Arc::new(FakeSource::empty()));

    let result = pipeline.full_analysis().await.unwrap();
    assert_eq!(result.text(), CANNOT_RETRIEVE_MESSAGE);
}
