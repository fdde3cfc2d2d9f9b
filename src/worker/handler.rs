use tracing::{error, info, instrument};

use super::deliver::{CallbackClient, deliver_error, deliver_reply};
use super::summarize::AnalysisPipeline;
use crate::core::models::CallbackJob;
use crate::kakao::ANALYSIS_FAILED_MESSAGE;

/// Run the full analysis for one deferred request and POST the outcome.
///
/// Exactly one callback POST is attempted: the analysis on success, an error
/// envelope if the pipeline failed. Delivery failures are only logged.
#[instrument(level = "info", skip_all, fields(correlation_id = %job.correlation_id))]
pub async fn handle_job(
    pipeline: &AnalysisPipeline,
    client: &dyn CallbackClient,
    job: &CallbackJob,
) {
    let callback_url = &job.callback.callback_url;
    info!(%callback_url, "Processing callback job");

    match pipeline.full_analysis().await {
        Ok(result) => {
            deliver_reply(client, callback_url, result.text(), &job.correlation_id).await;
        }
        Err(e) => {
            error!(error = %e, "Analysis pipeline failed");
            deliver_error(client, callback_url, ANALYSIS_FAILED_MESSAGE, &job.correlation_id)
                .await;
        }
    }
}
