//! Errors raised while preparing report URLs.

/// Errors that can occur while preparing the URLs of a report job.
#[derive(Debug, thiserror::Error)]
pub enum ReportingError {
    /// The job carries neither `urls` nor `relativeUrl`. Fatal, not retried.
    #[error("Unable to generate report. Url is not defined.")]
    UrlNotDefined,

    /// A job URL could not be parsed.
    #[error("Invalid report URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Result alias for reporting operations.
pub type Result<T> = std::result::Result<T, ReportingError>;
