//! Blocking HTTP transport towards connector endpoints

/// client module
pub mod client;
/// request module
pub mod request;

use std::time::Duration;

use common_utils::{
    errors::CustomResult,
    request::{Method, Request, RequestContent},
};
use error_stack::ResultExt;
use gateway_env::{instrument, logger};
use gateway_interfaces::{
    api::ConnectorTransport, configs::HttpClientSettings, errors::HttpClientError, types,
};
use masking::ExposeInterface;
use request::HeaderExt;

/// [`ConnectorTransport`] backed by a pooled, blocking `reqwest` client.
///
/// Sends every request exactly once. Timeouts and connection failures are reported as errors,
/// never as a connector reply.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Transport using the client settings of the gateway
    pub fn new(settings: &HttpClientSettings) -> CustomResult<Self, HttpClientError> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        Ok(Self {
            client: client::create_client(timeout)?,
            timeout,
        })
    }
}

impl ConnectorTransport for ReqwestTransport {
    #[instrument(skip_all)]
    fn send_request(&self, request: Request) -> CustomResult<types::Response, HttpClientError> {
        send_request(&self.client, request, self.timeout)
    }
}

#[allow(missing_docs)]
pub fn send_request(
    client: &reqwest::blocking::Client,
    request: Request,
    timeout: Duration,
) -> CustomResult<types::Response, HttpClientError> {
    logger::info!(method=?request.method, headers=?request.headers, payload=?request.body, url=%request.url);

    let url = reqwest::Url::parse(&request.url)
        .change_context(HttpClientError::UrlParsingFailed)
        .attach_printable_lazy(|| format!("Invalid connector url {:?}", request.url))?;
    let headers = request.headers.construct_header_map()?;

    let builder = match request.method {
        Method::Get => client.get(url),
        Method::Post => client.post(url),
        Method::Put => client.put(url),
        Method::Patch => client.patch(url),
        Method::Delete => client.delete(url),
    };
    let builder = match request.body {
        Some(body @ RequestContent::Xml(_)) => {
            let content_type = body.content_type();
            builder
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(body.get_inner_value().expose())
        }
        None => builder,
    }
    .headers(headers)
    .timeout(timeout);

    let response = builder
        .send()
        .map_err(|error| match error {
            error if error.is_timeout() => HttpClientError::RequestTimeoutReceived,
            error => HttpClientError::RequestNotSent(error.to_string()),
        })
        .attach_printable("Unable to send request to connector")?;

    let status_code = response.status().as_u16();
    let body = response
        .bytes()
        .change_context(HttpClientError::ResponseDecodingFailed)
        .attach_printable("Unable to read connector response body")?;
    logger::info!(status_code, response_length = body.len());

    Ok(types::Response {
        response: body,
        status_code,
    })
}
