use std::marker::PhantomData;

use masking::Secret;
use serde::{Deserialize, Serialize};

/// Everything a connector needs to build one request for `Flow` and to record what came back.
#[derive(Debug, Clone)]
pub struct RouterData<Flow, Request, Response> {
    pub flow: PhantomData<Flow>,
    pub connector: String,
    pub connector_auth_type: ConnectorAuthType,
    pub test_mode: Option<bool>,

    /// Contains flow-specific data required to construct a request and send it to the connector.
    pub request: Request,

    /// Contains flow-specific data that the connector responds with.
    pub response: Option<Response>,

    pub connector_http_status_code: Option<u16>,
}

impl<Flow, Request, Response> RouterData<Flow, Request, Response> {
    pub fn new(
        connector: impl Into<String>,
        connector_auth_type: ConnectorAuthType,
        test_mode: bool,
        request: Request,
    ) -> Self {
        Self {
            flow: PhantomData,
            connector: connector.into(),
            connector_auth_type,
            test_mode: Some(test_mode),
            request,
            response: None,
            connector_http_status_code: None,
        }
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_mode.unwrap_or(false)
    }
}

#[derive(Default, Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "auth_type")]
pub enum ConnectorAuthType {
    HeaderKey {
        api_key: Secret<String>,
    },
    BodyKey {
        api_key: Secret<String>,
        key1: Secret<String>,
    },
    #[default]
    NoKey,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn auth_type_is_tagged_and_masked() {
        let auth: ConnectorAuthType = serde_json::from_str(
            r#"{"auth_type":"BodyKey","api_key":"87654321","key1":"refund-pass"}"#,
        )
        .unwrap();

        assert!(matches!(auth, ConnectorAuthType::BodyKey { .. }));
        let debug = format!("{auth:?}");
        assert!(!debug.contains("87654321"));
        assert!(!debug.contains("refund-pass"));
    }

    #[test]
    fn new_router_data_has_no_response() {
        let data = RouterData::<(), u8, ()>::new("eway", ConnectorAuthType::NoKey, true, 7);

        assert!(data.is_test_mode());
        assert!(data.response.is_none());
        assert_eq!(data.request, 7);
    }
}
