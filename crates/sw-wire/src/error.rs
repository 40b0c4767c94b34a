use thiserror::Error;

/// Fault type the service reports for task tokens and types it does not know.
pub const UNKNOWN_RESOURCE_FAULT: &str = "com.amazonaws.swf.base.model#UnknownResourceFault";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("service fault {fault}: {message}")]
    Fault { fault: String, message: String },
    #[error("transport failure: {message}")]
    Failure { message: String },
}

impl TransportError {
    pub fn fault(fault: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fault {
            fault: fault.into(),
            message: message.into(),
        }
    }

    pub fn unknown_resource(message: impl Into<String>) -> Self {
        Self::fault(UNKNOWN_RESOURCE_FAULT, message)
    }

    pub fn is_unknown_resource(&self) -> bool {
        match self {
            Self::Fault { fault, .. } => {
                fault == UNKNOWN_RESOURCE_FAULT || fault.ends_with("#UnknownResourceFault")
            }
            Self::Failure { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_resource_detection() {
        assert!(TransportError::unknown_resource("gone").is_unknown_resource());
        assert!(
            !TransportError::fault("com.amazonaws.swf.base.model#LimitExceededFault", "slow down")
                .is_unknown_resource()
        );
        assert!(
            !TransportError::Failure {
                message: "connection reset".to_string()
            }
            .is_unknown_resource()
        );
    }
}
