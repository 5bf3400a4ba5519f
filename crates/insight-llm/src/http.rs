//! Shared HTTP plumbing for the network-backed providers

use crate::LlmError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Build a reqwest client with a request timeout
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// POST a JSON body and decode a JSON response, retrying transport and
/// server errors with exponential backoff (1s, 2s, 4s, ...).
///
/// 404 maps to `ModelNotAvailable`, 429 to `RateLimitExceeded`; neither is retried.
pub(crate) async fn post_json_with_retry<B, R>(
    client: &reqwest::Client,
    url: &str,
    body: &B,
    bearer: Option<&str>,
    model: &str,
    max_attempts: u32,
) -> Result<R, LlmError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_attempts {
        let mut request = client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return response.json::<R>().await.map_err(|e| {
                        LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                    });
                } else if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(LlmError::ModelNotAvailable(model.to_string()));
                } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    return Err(LlmError::RateLimitExceeded);
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    last_error = Some(LlmError::Communication(format!(
                        "HTTP {}: {}",
                        status, error_text
                    )));
                }
            }
            Err(e) => {
                last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < max_attempts {
            let delay = Duration::from_secs(2u64.pow(attempts - 1));
            warn!("LLM request to {} failed, retrying in {:?}", url, delay);
            tokio::time::sleep(delay).await;
        } else {
            debug!("LLM request to {} failed after {} attempt(s)", url, attempts);
        }
    }

    Err(last_error
        .unwrap_or_else(|| LlmError::Communication("Max attempts exceeded".to_string())))
}
