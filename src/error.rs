//! Error types for the probe.

use thiserror::Error;

/// Everything that can end an invocation before a verdict is printed.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Network or HTTP failure.
    #[error("{0}")]
    Transport(String),

    /// Response did not have the expected shape.
    #[error("{0}")]
    Parse(String),

    /// Filter file unreadable or descriptor file unwritable.
    #[error("{0}")]
    Config(String),

    /// No classifiable signal in the health report.
    #[error("no recognizable health signal")]
    EvaluationExhausted,
}

impl ProbeError {
    /// Prefix the message with the operation that failed.
    pub fn context(self, context: &str) -> Self {
        match self {
            ProbeError::Transport(msg) => ProbeError::Transport(format!("{}: {}", context, msg)),
            ProbeError::Parse(msg) => ProbeError::Parse(format!("{}: {}", context, msg)),
            ProbeError::Config(msg) => ProbeError::Config(format!("{}: {}", context, msg)),
            ProbeError::EvaluationExhausted => ProbeError::EvaluationExhausted,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ProbeError::EvaluationExhausted => 3,
            _ => 1,
        }
    }

    /// Whether the failure is reported with a message or only through the exit code.
    pub fn is_silent(&self) -> bool {
        matches!(self, ProbeError::EvaluationExhausted)
    }

    /// Transport failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProbeError::Transport(_))
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Transport("request timed out".to_string())
        } else if err.is_decode() {
            ProbeError::Parse(err.to_string())
        } else {
            ProbeError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::Parse(err.to_string())
    }
}

/// Attach an operation name to the error side of a result.
pub trait ResultExt<T> {
    fn context(self, context: &str) -> Result<T, ProbeError>;
}

impl<T, E: Into<ProbeError>> ResultExt<T> for Result<T, E> {
    fn context(self, context: &str) -> Result<T, ProbeError> {
        self.map_err(|e| Into::<ProbeError>::into(e).context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_prefixes_message() {
        let err = ProbeError::Transport("connection refused".to_string())
            .context("Not able to get cluster names");
        assert_eq!(err.to_string(), "Not able to get cluster names: connection refused");
        assert_eq!(err.exit_code(), 1);
        assert!(!err.is_silent());
    }

    #[test]
    fn test_evaluation_exhausted_is_silent_exit_3() {
        let err = ProbeError::EvaluationExhausted.context("ignored");
        assert!(err.is_silent());
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(ProbeError::Transport("503".to_string()).is_retryable());
        assert!(!ProbeError::Parse("missing key".to_string()).is_retryable());
        assert!(!ProbeError::Config("unreadable".to_string()).is_retryable());
        assert!(!ProbeError::EvaluationExhausted.is_retryable());
    }

    #[test]
    fn test_result_ext_converts_serde_errors() {
        let result: Result<Vec<String>, serde_json::Error> = serde_json::from_str("{");
        let err = result.context("Not able to get metrics names").unwrap_err();
        assert!(matches!(err, ProbeError::Parse(_)));
        assert!(err.to_string().starts_with("Not able to get metrics names: "));
    }
}
