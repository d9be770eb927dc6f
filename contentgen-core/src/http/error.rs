//! Backend error capture

use crate::providers::{GeneratorError, GeneratorResult};
use reqwest::Response;
use tracing::debug;

/// Pass a successful response through, or capture a failed one verbatim.
///
/// The status and body are kept exactly as the backend sent them; no
/// classification or retry hinting happens here. A body that cannot be read
/// is reported as empty so the status still reaches the caller.
pub async fn ensure_success(
    provider: &'static str,
    response: Response,
) -> GeneratorResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(
        provider,
        status = status.as_u16(),
        "backend returned an error status"
    );

    Err(GeneratorError::Api {
        provider,
        status: status.as_u16(),
        body,
    })
}
