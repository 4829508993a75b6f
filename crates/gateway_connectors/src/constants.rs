pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
}

/// Replacement for sensitive values in scrubbed transcripts
pub(crate) const FILTERED: &str = common_utils::consts::FILTERED_MARKER;
