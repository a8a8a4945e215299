use thiserror::Error;

/// Anything that turns a check-in run into a `Checkin Error` report.
#[derive(Debug, Error)]
pub enum CheckinError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid json from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {0} header value")]
    InvalidHeader(&'static str),

    #[error("response from {url} is null")]
    NullBody { url: String },

    #[error("status response has no `data` object")]
    MissingStatusData,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("push to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
