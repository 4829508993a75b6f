//! Commonly used constants

/// Default timeout in seconds for requests sent to external services
pub const REQUEST_TIME_OUT: u64 = 30;

/// Marker written in place of sensitive values in logs and transcripts
pub const FILTERED_MARKER: &str = "[FILTERED]";

/// Maximum length of an email address
pub const EMAIL_MAX_LENGTH: usize = 319;
