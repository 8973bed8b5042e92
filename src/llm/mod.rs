pub mod openai;

pub use openai::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generation backend is not reachable at {0}")]
    Connection(String),

    #[error("Generation request timed out after {0}s")]
    Timeout(u64),

    #[error("Generation backend returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

/// Text-generation backend abstraction (allows mocking)
pub trait TextGenerator {
    fn generate(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, GenerationError>;
}

/// Mock generator for testing. Replies are matched against the user
/// prompt by substring; the first match wins. An empty needle matches
/// every prompt.
pub struct MockGenerator {
    replies: Vec<(String, String)>,
    failures: Vec<String>,
    default_reply: String,
}

impl MockGenerator {
    pub fn new(default_reply: &str) -> Self {
        Self {
            replies: Vec::new(),
            failures: Vec::new(),
            default_reply: default_reply.to_string(),
        }
    }

    /// Reply with `reply` whenever the user prompt contains `needle`.
    pub fn with_reply(mut self, needle: &str, reply: &str) -> Self {
        self.replies.push((needle.to_string(), reply.to_string()));
        self
    }

    /// Fail with a connection error whenever the user prompt contains
    /// `needle`.
    pub fn with_failure(mut self, needle: &str) -> Self {
        self.failures.push(needle.to_string());
        self
    }
}

impl TextGenerator for MockGenerator {
    fn generate(
        &self,
        _system: &str,
        user: &str,
        _temperature: f32,
    ) -> Result<String, GenerationError> {
        for needle in &self.failures {
            if user.contains(needle.as_str()) {
                return Err(GenerationError::Connection("mock://offline".to_string()));
            }
        }
        for (needle, reply) in &self.replies {
            if user.contains(needle.as_str()) {
                return Ok(reply.clone());
            }
        }
        Ok(self.default_reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_default_reply() {
        let gen = MockGenerator::new("fallback");
        let out = gen.generate("sys", "anything", 0.2).unwrap();
        assert_eq!(out, "fallback");
    }

    #[test]
    fn mock_matches_needle_in_user_prompt() {
        let gen = MockGenerator::new("default")
            .with_reply("agenda", r#"{"agenda": ["Roadmap"]}"#)
            .with_reply("decisions", r#"{"decisions": []}"#);
        let out = gen.generate("sys", "list concise agenda bullets", 0.2).unwrap();
        assert_eq!(out, r#"{"agenda": ["Roadmap"]}"#);
    }

    #[test]
    fn mock_first_match_wins() {
        let gen = MockGenerator::new("default")
            .with_reply("alpha", "first")
            .with_reply("alpha beta", "second");
        assert_eq!(gen.generate("s", "alpha beta", 0.0).unwrap(), "first");
    }

    #[test]
    fn mock_failure_needle_produces_error() {
        let gen = MockGenerator::new("ok").with_failure("agenda");
        assert!(gen.generate("s", "list concise agenda bullets", 0.2).is_err());
        assert!(gen.generate("s", "unrelated", 0.2).is_ok());
    }

    #[test]
    fn mock_empty_failure_needle_fails_everything() {
        let gen = MockGenerator::new("ok").with_failure("");
        assert!(gen.generate("s", "anything at all", 0.2).is_err());
    }
}
