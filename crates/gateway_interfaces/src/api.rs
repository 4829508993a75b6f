//! API interface

pub mod payments;
pub mod refunds;

use common_utils::{
    errors::CustomResult,
    request::{Method, Request, RequestContent},
};
use error_stack::{report, ResultExt};
use gateway_domain_models::router_data::{ConnectorAuthType, RouterData};
use gateway_env::{instrument, logger};
use masking::Maskable;

pub use self::{payments::*, refunds::*};
use crate::{configs::Connectors, errors, types};

/// type BoxedConnectorIntegration
pub type BoxedConnectorIntegration<'a, T, Req, Resp> =
    Box<&'a (dyn ConnectorIntegration<T, Req, Resp> + Send + Sync)>;

/// trait ConnectorIntegrationAny
pub trait ConnectorIntegrationAny<T, Req, Resp>: Send + Sync + 'static {
    /// fn get_connector_integration
    fn get_connector_integration(&self) -> BoxedConnectorIntegration<'_, T, Req, Resp>;
}

impl<S, T, Req, Resp> ConnectorIntegrationAny<T, Req, Resp> for S
where
    S: ConnectorIntegration<T, Req, Resp> + Send + Sync,
{
    fn get_connector_integration(&self) -> BoxedConnectorIntegration<'_, T, Req, Resp> {
        Box::new(self)
    }
}

/// trait ConnectorIntegration
pub trait ConnectorIntegration<T, Req, Resp>:
    ConnectorIntegrationAny<T, Req, Resp> + Sync + ConnectorCommon
{
    /// fn get_headers
    fn get_headers(
        &self,
        _req: &RouterData<T, Req, Resp>,
        _connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(vec![])
    }

    /// fn get_content_type
    fn get_content_type(&self) -> &'static str {
        mime::APPLICATION_JSON.essence_str()
    }

    /// primarily used when creating signature based on request method of payment flow
    fn get_http_method(&self) -> Method {
        Method::Post
    }

    /// fn get_url
    fn get_url(
        &self,
        _req: &RouterData<T, Req, Resp>,
        _connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(String::new())
    }

    /// fn get_request_body
    fn get_request_body(
        &self,
        _req: &RouterData<T, Req, Resp>,
        _connectors: &Connectors,
    ) -> CustomResult<RequestContent, errors::ConnectorError> {
        Err(report!(errors::ConnectorError::NotImplemented(
            "request body".to_string()
        )))
    }

    /// fn build_request
    fn build_request(
        &self,
        _req: &RouterData<T, Req, Resp>,
        _connectors: &Connectors,
    ) -> CustomResult<Option<Request>, errors::ConnectorError> {
        Ok(None)
    }

    /// fn handle_response
    fn handle_response(
        &self,
        data: &RouterData<T, Req, Resp>,
        _res: types::Response,
    ) -> CustomResult<RouterData<T, Req, Resp>, errors::ConnectorError>
    where
        T: Clone,
        Req: Clone,
        Resp: Clone,
    {
        Ok(data.clone())
    }
}

/// The trait that provides the common
pub trait ConnectorCommon {
    /// Name of the connector (in lowercase).
    fn id(&self) -> &'static str;

    /// HTTP header used for authorization.
    fn get_auth_header(
        &self,
        _auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(Vec::new())
    }

    /// HTTP `Content-Type` to be used for POST requests.
    /// Defaults to `application/json`.
    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    /// The base URL for interacting with the connector's API.
    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str;
}

/// Extended trait for connector common to allow functions with generic type
pub trait ConnectorCommonExt<Flow, Req, Resp>:
    ConnectorCommon + ConnectorIntegration<Flow, Req, Resp>
{
    /// common header builder when every request for the connector have same headers
    fn build_headers(
        &self,
        _req: &RouterData<Flow, Req, Resp>,
        _connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(Vec::new())
    }
}

/// Redaction of raw request/response logs captured around a connector call
pub trait ConnectorTranscript {
    /// Whether [`ConnectorTranscript::scrub`] removes the connector's sensitive fields
    fn supports_scrubbing(&self) -> bool {
        true
    }

    /// Copy of `transcript` with card data replaced by a marker. Everything else is left as is.
    fn scrub(&self, transcript: &str) -> String;
}

/// Sends a built connector request and hands back the raw reply.
///
/// Implementations own timeouts, pooling and TLS. No retries happen above this seam.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
pub trait ConnectorTransport {
    /// Perform exactly one round trip for `request`
    fn send_request(
        &self,
        request: Request,
    ) -> CustomResult<types::Response, errors::HttpClientError>;
}

/// Build the request for one flow, send it through `transport` and let the connector
/// turn the reply into the flow's response.
#[instrument(skip_all, fields(connector = %req.connector))]
pub fn execute_connector_processing_step<T, Req, Resp, C>(
    transport: &C,
    connector_integration: BoxedConnectorIntegration<'_, T, Req, Resp>,
    req: &RouterData<T, Req, Resp>,
    connectors: &Connectors,
) -> CustomResult<RouterData<T, Req, Resp>, errors::ConnectorError>
where
    T: Clone + std::fmt::Debug + 'static,
    Req: Clone + std::fmt::Debug + 'static,
    Resp: Clone + std::fmt::Debug + 'static,
    C: ConnectorTransport + ?Sized,
{
    let flow = std::any::type_name::<T>()
        .rsplit("::")
        .next()
        .unwrap_or_default();

    let request = connector_integration
        .build_request(req, connectors)?
        .ok_or_else(|| report!(errors::ConnectorError::NotImplemented(flow.to_string())))?;
    logger::debug!(connector_request=?request);

    let response = transport
        .send_request(request)
        .change_context(errors::ConnectorError::ProcessingStepFailed(None))
        .attach_printable_lazy(|| format!("{flow} request to {} was not delivered", req.connector))?;
    logger::debug!(connector_http_status_code = response.status_code);

    let status_code = response.status_code;
    let mut router_data = connector_integration.handle_response(req, response)?;
    router_data.connector_http_status_code = Some(status_code);
    Ok(router_data)
}
