use thiserror::Error;

/// Erreurs de validation levées par la compression, avant tout appel réseau.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("hour grid must contain {expected} slots, got {actual}")]
    GridLength { expected: usize, actual: usize },
    #[error("hour grid has no assigned user")]
    NoAssignedUsers,
    #[error("user {user} needs {count} restrictions, PagerDuty accepts fewer than 90 per layer")]
    TooManyRestrictions { user: String, count: usize },
}

/// Échec d'une requête PagerDuty (statut non 2xx ou requête jamais aboutie).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NetworkError {
    pub message: String,
    pub status_code: Option<u16>,
    pub reason: String,
}

impl NetworkError {
    pub fn new(status_code: Option<u16>, reason: Option<&str>) -> Self {
        let reason = reason.unwrap_or("Unknown").to_string();
        let message = match status_code {
            Some(_) => format!("PagerDuty request failed: {reason}"),
            None => "PagerDuty request failed with unknown status code".to_string(),
        };
        Self {
            message,
            status_code,
            reason,
        }
    }
}

#[derive(Error, Debug)]
pub enum PdError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("invalid PagerDuty payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("expected at most one schedule matching {query:?}, found {found}")]
    AmbiguousSchedule { query: String, found: usize },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_messages() {
        let err = NetworkError::new(Some(401), Some("Unauthorized"));
        assert_eq!(err.to_string(), "PagerDuty request failed: Unauthorized");
        assert_eq!(err.status_code, Some(401));

        let err = NetworkError::new(None, None);
        assert_eq!(
            err.to_string(),
            "PagerDuty request failed with unknown status code"
        );
        assert_eq!(err.reason, "Unknown");
    }
}
