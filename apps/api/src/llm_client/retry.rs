//! Bounded retry around throttled completion calls.
//!
//! Backoff is linear: the n-th retry waits `base * n`. Only [`LlmError::RateLimited`] is
//! retried; every other failure is returned after the first attempt.

use std::time::Duration;

use tracing::warn;

use crate::llm_client::{CompletionService, LlmError};

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_SECS: u64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base: Duration::from_secs(DEFAULT_BASE_SECS),
        }
    }
}

impl RetryPolicy {
    pub fn with_base_secs(base_secs: u64) -> Self {
        Self {
            base: Duration::from_secs(base_secs),
            ..Self::default()
        }
    }

    /// Wait before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base * attempt
    }
}

/// Calls `service` until it answers with something other than a throttling signal, or until
/// `policy.max_retries` retries have been spent.
pub async fn complete_with_retry(
    service: &dyn CompletionService,
    prompt: &str,
    temperature: f32,
    policy: &RetryPolicy,
) -> Result<String, LlmError> {
    let mut attempt = 0u32;

    loop {
        match service.complete(prompt, temperature).await {
            Err(LlmError::RateLimited { message, .. }) => {
                if attempt >= policy.max_retries {
                    return Err(LlmError::RateLimited {
                        retries: attempt,
                        message,
                    });
                }
                attempt += 1;
                let delay = policy.backoff(attempt);
                warn!(
                    "Rate limit hit. Waiting {}s before retry {}/{}",
                    delay.as_secs(),
                    attempt,
                    policy.max_retries
                );
                tokio::time::sleep(delay).await;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Replays scripted upstream answers in order; answers "{}" once the script runs out.
    pub(crate) struct ScriptedService {
        script: Mutex<VecDeque<Result<String, LlmError>>>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedService {
        pub(crate) fn new(script: Vec<Result<String, LlmError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedService {
        async fn complete(&self, prompt: &str, _temperature: f32) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("{}".to_string()))
        }
    }

    pub(crate) fn throttled() -> Result<String, LlmError> {
        Err(LlmError::RateLimited {
            retries: 0,
            message: "429 quota exceeded".to_string(),
        })
    }

    #[test]
    fn test_backoff_is_linear() {
        let policy = RetryPolicy::with_base_secs(25);
        assert_eq!(policy.backoff(1), Duration::from_secs(25));
        assert_eq!(policy.backoff(2), Duration::from_secs(50));
        assert_eq!(policy.backoff(3), Duration::from_secs(75));
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_throttles_then_success_makes_four_calls() {
        let service = ScriptedService::new(vec![
            throttled(),
            throttled(),
            throttled(),
            Ok("done".to_string()),
        ]);
        let policy = RetryPolicy::with_base_secs(10);

        let start = tokio::time::Instant::now();
        let text = complete_with_retry(&service, "prompt", 1.0, &policy)
            .await
            .unwrap();

        assert_eq!(text, "done");
        assert_eq!(service.calls(), 4);
        assert_eq!(start.elapsed(), Duration::from_secs(10 + 20 + 30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let service = ScriptedService::new(vec![throttled(), throttled(), throttled(), throttled()]);
        let policy = RetryPolicy::with_base_secs(1);

        let err = complete_with_retry(&service, "prompt", 1.0, &policy)
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::RateLimited { retries: 3, .. }));
        assert_eq!(service.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_errors_are_not_retried() {
        let service = ScriptedService::new(vec![Err(LlmError::Api {
            status: 400,
            message: "bad request".to_string(),
        })]);

        let start = tokio::time::Instant::now();
        let err = complete_with_retry(&service, "prompt", 0.7, &RetryPolicy::default())
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Api { status: 400, .. }));
        assert_eq!(service.calls(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
