use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tokio::time::sleep;

use vw_core::{Error, Result};

use crate::request::GenerationRequest;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Maximum attempts for retryable failures (503, transport errors).
pub const MAX_ATTEMPTS: u32 = 3;
/// Base backoff delay; the wait before retry N is `BASE_DELAY * N`.
pub const BASE_DELAY: Duration = Duration::from_millis(2000);

const STATUS_SERVICE_UNAVAILABLE: u16 = 503;

/// Linear-multiplicative backoff, no jitter.
pub fn retry_delay(attempt: u32) -> Duration {
    BASE_DELAY * attempt
}

/// Raw result of one completed HTTP exchange, success or not.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: u16,
    pub body: String,
}

/// Seam between the retry policy and the wire. The production impl posts to
/// the completions endpoint; tests script outcomes.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn execute(&self, req: &GenerationRequest) -> Result<BackendResponse>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    api_key: String,
}

impl fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackend")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl HttpBackend {
    pub fn new(api_key: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Config(
                "Generation API key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
        })
    }
}

#[async_trait]
impl CompletionBackend for HttpBackend {
    async fn execute(&self, req: &GenerationRequest) -> Result<BackendResponse> {
        let response = self
            .client
            .post(COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(req)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(BackendResponse { status, body })
    }
}

/// Untrusted model output plus the model that produced it.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub model_id: String,
    pub raw_text: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Bounded-retry client over a [`CompletionBackend`]. Holds no state between
/// calls; retries are sequential and blocking from the caller's perspective.
pub struct GenerationClient<B: CompletionBackend> {
    backend: B,
}

impl<B: CompletionBackend> GenerationClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Issue the request, retrying 503s and transport failures up to
    /// [`MAX_ATTEMPTS`] with linear backoff. Any other non-success status is
    /// terminal immediately, with the response body kept for diagnostics.
    pub async fn send(&self, req: &GenerationRequest) -> Result<GenerationResult> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.backend.execute(req).await {
                Ok(response) if (200..300).contains(&response.status) => {
                    let parsed: CompletionResponse = serde_json::from_str(&response.body)?;
                    let raw_text = parsed
                        .choices
                        .into_iter()
                        .next()
                        .map(|choice| choice.message.content)
                        .unwrap_or_default();
                    return Ok(GenerationResult {
                        model_id: req.model.clone(),
                        raw_text,
                    });
                }
                Ok(response) if response.status == STATUS_SERVICE_UNAVAILABLE => {
                    if attempt >= MAX_ATTEMPTS {
                        return Err(Error::ServiceUnavailable {
                            attempts: attempt,
                            body: response.body,
                        });
                    }
                    tracing::warn!(
                        attempt,
                        "Generation endpoint unavailable (503), retrying in {:?}",
                        retry_delay(attempt)
                    );
                    sleep(retry_delay(attempt)).await;
                }
                Ok(response) => {
                    return Err(Error::Upstream {
                        status: response.status,
                        body: response.body,
                    });
                }
                Err(Error::Http(source)) => {
                    if attempt >= MAX_ATTEMPTS {
                        return Err(Error::Network {
                            attempts: attempt,
                            source,
                        });
                    }
                    tracing::warn!(
                        attempt,
                        error = %source,
                        "Network failure, retrying in {:?}",
                        retry_delay(attempt)
                    );
                    sleep(retry_delay(attempt)).await;
                }
                Err(other) => return Err(other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{build_request, SamplingParams};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    enum Step {
        Status(u16, &'static str),
        TransportError,
    }

    struct ScriptedBackend {
        steps: Mutex<Vec<Step>>,
        attempts: AtomicU32,
    }

    impl ScriptedBackend {
        fn new(mut steps: Vec<Step>) -> Self {
            steps.reverse();
            Self {
                steps: Mutex::new(steps),
                attempts: AtomicU32::new(0),
            }
        }

        fn attempts(&self) -> u32 {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    // An invalid URL makes reqwest fail inside send() without touching the
    // network, which is the closest stand-in for a transport-level error.
    async fn transport_error() -> reqwest::Error {
        reqwest::Client::new()
            .get("http://")
            .send()
            .await
            .unwrap_err()
    }

    #[async_trait]
    impl CompletionBackend for &ScriptedBackend {
        async fn execute(&self, _req: &GenerationRequest) -> Result<BackendResponse> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let step = self
                .steps
                .lock()
                .unwrap()
                .pop()
                .expect("backend called more times than scripted");
            match step {
                Step::Status(status, body) => Ok(BackendResponse {
                    status,
                    body: body.to_string(),
                }),
                Step::TransportError => Err(Error::Http(transport_error().await)),
            }
        }
    }

    fn request() -> GenerationRequest {
        build_request("prompt", "o3-mini", &SamplingParams::default())
    }

    const SUCCESS_BODY: &str =
        r#"{"choices":[{"message":{"role":"assistant","content":"generated text"}}]}"#;

    #[tokio::test(start_paused = true)]
    async fn test_retries_503_then_succeeds() {
        let backend = ScriptedBackend::new(vec![
            Step::Status(503, "busy"),
            Step::Status(503, "busy"),
            Step::Status(200, SUCCESS_BODY),
        ]);
        let client = GenerationClient::new(&backend);

        let started = tokio::time::Instant::now();
        let result = client.send(&request()).await.unwrap();

        assert_eq!(result.raw_text, "generated text");
        assert_eq!(result.model_id, "o3-mini");
        assert_eq!(backend.attempts(), 3);
        // Two waits: 2000ms after attempt 1, 4000ms after attempt 2.
        assert_eq!(started.elapsed(), Duration::from_millis(6000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_503_is_terminal() {
        let backend = ScriptedBackend::new(vec![
            Step::Status(503, "busy"),
            Step::Status(503, "busy"),
            Step::Status(503, "still busy"),
        ]);
        let client = GenerationClient::new(&backend);

        let err = client.send(&request()).await.unwrap_err();
        match err {
            Error::ServiceUnavailable { attempts, body } => {
                assert_eq!(attempts, 3);
                assert_eq!(body, "still busy");
            }
            other => panic!("expected ServiceUnavailable, got {other:?}"),
        }
        assert_eq!(backend.attempts(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_status_fails_immediately() {
        let backend = ScriptedBackend::new(vec![Step::Status(400, "bad request body")]);
        let client = GenerationClient::new(&backend);

        let started = tokio::time::Instant::now();
        let err = client.send(&request()).await.unwrap_err();
        match err {
            Error::Upstream { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad request body");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
        assert_eq!(backend.attempts(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_errors_retry_then_fail() {
        let backend = ScriptedBackend::new(vec![
            Step::TransportError,
            Step::TransportError,
            Step::TransportError,
        ]);
        let client = GenerationClient::new(&backend);

        let started = tokio::time::Instant::now();
        let err = client.send(&request()).await.unwrap_err();
        match err {
            Error::Network { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("expected Network, got {other:?}"),
        }
        assert_eq!(backend.attempts(), 3);
        assert_eq!(started.elapsed(), Duration::from_millis(6000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_then_success() {
        let backend = ScriptedBackend::new(vec![
            Step::TransportError,
            Step::Status(200, SUCCESS_BODY),
        ]);
        let client = GenerationClient::new(&backend);

        let result = client.send(&request()).await.unwrap();
        assert_eq!(result.raw_text, "generated text");
        assert_eq!(backend.attempts(), 2);
    }

    #[tokio::test]
    async fn test_empty_choices_degrade_to_empty_text() {
        let backend = ScriptedBackend::new(vec![Step::Status(200, r#"{"choices":[]}"#)]);
        let client = GenerationClient::new(&backend);

        let result = client.send(&request()).await.unwrap();
        assert_eq!(result.raw_text, "");
    }

    #[test]
    fn test_retry_delay_is_linear() {
        assert_eq!(retry_delay(1), Duration::from_millis(2000));
        assert_eq!(retry_delay(2), Duration::from_millis(4000));
        assert_eq!(retry_delay(3), Duration::from_millis(6000));
    }

    #[test]
    fn test_empty_api_key_fails_fast() {
        let err = HttpBackend::new("  ".to_string()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let backend = HttpBackend::new("sk-very-secret".to_string()).unwrap();
        let debugged = format!("{backend:?}");
        assert!(!debugged.contains("sk-very-secret"));
        assert!(debugged.contains("<redacted>"));
    }
}
