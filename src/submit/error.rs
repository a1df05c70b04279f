//! Submission failures

use thiserror::Error;

/// Message shown when the server answers with a non-success status
pub const REJECTED_MESSAGE: &str = "Erro ao enviar formulário";

/// Why a submission did not succeed
///
/// All variants are recoverable: they end up as a danger alert and the user
/// may submit again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The server answered with a non-2xx status
    #[error("{}", REJECTED_MESSAGE)]
    Rejected { status: u16 },
    /// Connection, TLS or timeout failure
    #[error("Falha de conexão: {0}")]
    Transport(String),
    /// The request could not be built
    #[error("Requisição inválida: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            SubmissionError::InvalidRequest(err.to_string())
        } else if let Some(status) = err.status() {
            SubmissionError::Rejected {
                status: status.as_u16(),
            }
        } else {
            SubmissionError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_matches_site_copy() {
        let err = SubmissionError::Rejected { status: 500 };
        assert_eq!(err.to_string(), "Erro ao enviar formulário");
    }

    #[test]
    fn test_transport_message_keeps_cause() {
        let err = SubmissionError::Transport("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
