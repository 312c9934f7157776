use axum::{extract::Extension, Json};
use serde::Deserialize;
use tracing::info;

use crate::domains::verification::{verify_text, Verdict};
use crate::server::app::AxumAppState;

/// Body of `POST /verify`
#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    /// Absent or null means empty text
    #[serde(default)]
    pub text: Option<String>,
}

/// Verify all claims in the submitted text
///
/// Per-claim faults come back as degraded verdicts, so this handler always
/// answers 200 once the JSON body parses.
pub async fn verify_handler(
    Extension(state): Extension<AxumAppState>,
    Json(request): Json<VerifyRequest>,
) -> Json<Vec<Verdict>> {
    let text = request.text.unwrap_or_default();

    let verdicts = verify_text(&text, &state.server_deps).await;
    info!(
        text_chars = text.chars().count(),
        verdicts = verdicts.len(),
        "Verify request complete"
    );

    Json(verdicts)
}
