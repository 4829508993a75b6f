//! Outbound request model handed to connector transports

use masking::{Maskable, Secret};
#[cfg(feature = "logs")]
use gateway_env::logger;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{CustomResult, ParsingError},
    ext_traits::Encode,
};

/// Request headers, with credentials kept masked
pub type Headers = Vec<(String, Maskable<String>)>;

/// HTTP methods used towards connectors
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

/// Body of an outbound request, already encoded into its wire format
pub enum RequestContent {
    /// XML document
    Xml(Secret<String>),
}

impl std::fmt::Debug for RequestContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Xml(_) => "XmlRequestBody",
        })
    }
}

impl RequestContent {
    /// Encode `body` as XML, logging its masked debug representation
    pub fn xml<T>(body: &T) -> CustomResult<Self, ParsingError>
    where
        T: Serialize + std::fmt::Debug,
    {
        #[cfg(feature = "logs")]
        logger::info!(connector_request_body=?body);
        Ok(Self::Xml(Secret::new(body.encode_to_string_of_xml()?)))
    }

    /// Content type header value matching the body format
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Xml(_) => "application/xml",
        }
    }

    /// This method takes the content and returns the inner value as a Secret<String>.
    pub fn get_inner_value(self) -> Secret<String> {
        match self {
            Self::Xml(body) => body,
        }
    }
}

#[derive(Debug)]
#[allow(missing_docs)]
pub struct Request {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestContent>,
}

impl Request {
    /// Creates a new instance of Request with the specified HTTP method and URL.
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: String::from(url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Sets the body of the request to the provided value.
    pub fn set_body<T: Into<RequestContent>>(&mut self, body: T) {
        self.body.replace(body.into());
    }

    /// Adds a new header to the headers list.
    pub fn add_header(&mut self, header: &str, value: Maskable<String>) {
        self.headers.push((String::from(header), value));
    }
}

#[derive(Debug)]
#[allow(missing_docs)]
pub struct RequestBuilder {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestContent>,
}

impl RequestBuilder {
    /// Creates a new builder for a GET request with no url, headers or body
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            url: String::with_capacity(1024),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Sets the URL for the HTTP request and returns the modified instance.
    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the method for the request and returns the modified instance.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Appends a single header
    pub fn header(mut self, header: &str, value: &str) -> Self {
        self.headers.push((header.into(), value.into()));
        self
    }

    /// Adds the provided headers to the existing headers of the request.
    pub fn headers(mut self, headers: Vec<(String, Maskable<String>)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the body of the request with the given content and returns the modified request.
    pub fn set_body<T: Into<RequestContent>>(mut self, body: T) -> Self {
        self.body.replace(body.into());
        self
    }

    /// Builds a Request object using the values stored in the current Builder instance.
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use masking::PeekInterface;

    use super::*;

    #[derive(Debug, Serialize)]
    #[serde(rename = "ewaygateway")]
    struct Body {
        #[serde(rename = "ewayCVN")]
        cvn: Secret<String>,
    }

    #[test]
    fn builder_keeps_body_masked_in_debug_output() {
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url("https://www.eway.com.au/gateway_cvn/xmlpayment.asp")
            .header("Content-Type", "application/xml")
            .set_body(
                RequestContent::xml(&Body {
                    cvn: Secret::new("123".to_string()),
                })
                .unwrap(),
            )
            .build();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.method.to_string(), "POST");
        let debug = format!("{request:?}");
        assert!(debug.contains("XmlRequestBody"));
        assert!(!debug.contains("123"));

        let body = request.body.unwrap();
        assert_eq!(body.content_type(), "application/xml");
        assert_eq!(
            body.get_inner_value().peek(),
            "<ewaygateway><ewayCVN>123</ewayCVN></ewaygateway>"
        );
    }
}
