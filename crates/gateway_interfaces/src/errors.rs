//! Errors interface

/// Connector Errors
#[allow(missing_docs, missing_debug_implementations)]
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConnectorError {
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Invalid Data format")]
    InvalidDataFormat { field_name: &'static str },
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Failed to execute a processing step: {0:?}")]
    ProcessingStepFailed(Option<bytes::Bytes>),
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    #[error("{0} is not implemented")]
    NotImplemented(String),
}

impl ConnectorError {
    /// The caller handed in something unusable. Nothing was sent to the connector.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField { .. } | Self::InvalidDataFormat { .. }
        )
    }

    /// The connector could not be reached, or what came back was not a reply document.
    /// Distinct from a decline, which is a successful call with `success == false`.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::ProcessingStepFailed(_) | Self::ResponseDeserializationFailed
        )
    }
}

/// Http Client Errors
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum HttpClientError {
    #[error("Client construction failed")]
    ClientConstructionFailed,
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("URL parsing failed")]
    UrlParsingFailed,
    #[error("Failed to send request to server {0}")]
    RequestNotSent(String),
    #[error("Server responded with Request Timeout")]
    RequestTimeoutReceived,
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_and_transport_errors_are_disjoint() {
        let invalid = ConnectorError::MissingRequiredField {
            field_name: "billing_address",
        };
        assert!(invalid.is_invalid_argument());
        assert!(!invalid.is_transport_failure());

        for error in [
            ConnectorError::ProcessingStepFailed(None),
            ConnectorError::ResponseDeserializationFailed,
        ] {
            assert!(error.is_transport_failure());
            assert!(!error.is_invalid_argument());
        }

        assert!(!ConnectorError::RequestEncodingFailed.is_invalid_argument());
        assert!(!ConnectorError::RequestEncodingFailed.is_transport_failure());
    }
}
