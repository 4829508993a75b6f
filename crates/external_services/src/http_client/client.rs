use std::time::Duration;

use common_utils::errors::CustomResult;
use error_stack::ResultExt;
use gateway_env::logger;
use gateway_interfaces::errors::HttpClientError;

/// Blocking client shared by every request of a transport. Redirects are never followed.
pub fn create_client(timeout: Duration) -> CustomResult<reqwest::blocking::Client, HttpClientError> {
    logger::debug!(timeout_secs = timeout.as_secs(), "Creating blocking HTTP client");
    reqwest::blocking::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(timeout)
        .build()
        .change_context(HttpClientError::ClientConstructionFailed)
        .attach_printable("Failed to construct blocking HTTP client")
}
