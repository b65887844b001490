/// Mock advice generator for testing and local development
///
/// Returns a canned advice string (or a simulated failure) and records
/// every request it receives, so tests can assert both that the generator
/// was called with the expected prompt and that it was *not* called when a
/// consultation fails validation or ownership checks.
///
/// # Example
///
/// ```no_run
/// use taskcoach_api::coach::{AdviceGenerator, AdviceRequest, MockGenerator, TaskContext};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let generator = MockGenerator::with_response("Start with a small step.");
///
/// # let request: AdviceRequest = todo!();
/// let advice = generator.generate_advice(&request).await?;
/// assert_eq!(advice, "Start with a small step.");
/// assert_eq!(generator.call_count(), 1);
/// # Ok(())
/// # }
/// ```

use std::sync::Mutex;

use async_trait::async_trait;

use super::{AdviceGenerator, AdviceRequest, CoachError};

/// Default canned advice
const DEFAULT_ADVICE: &str = "Break the task into smaller steps and schedule the first one today.";

/// Deterministic advice generator
pub struct MockGenerator {
    response: String,
    should_fail: bool,
    requests: Mutex<Vec<AdviceRequest>>,
}

impl MockGenerator {
    /// Creates a mock returning the default canned advice
    pub fn new() -> Self {
        Self::with_response(DEFAULT_ADVICE)
    }

    /// Creates a mock returning the given advice text
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            should_fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that fails every request with an upstream error
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<AdviceRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdviceGenerator for MockGenerator {
    async fn generate_advice(&self, request: &AdviceRequest) -> Result<String, CoachError> {
        self.requests.lock().unwrap().push(request.clone());

        if self.should_fail {
            return Err(CoachError::Upstream("simulated failure".to_string()));
        }

        Ok(self.response.clone())
    }
}
