//! Error types shared by the REST key-value client.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`KvError`] failures.
pub type KvResult<T> = Result<T, KvError>;

/// Failures that can occur while talking to the key-value REST endpoint.
#[derive(Debug, Error)]
pub enum KvError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build key-value client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The command could not be sent.
    #[error("failed to send `{command}` for `{key}`")]
    RequestSend {
        command: &'static str,
        key: String,
        #[source]
        source: reqwest::Error,
    },
    /// The endpoint answered with a non-success status code.
    #[error("unexpected status {status} for `{command}` on `{key}`: {message}")]
    RequestStatus {
        command: &'static str,
        key: String,
        status: StatusCode,
        message: String,
    },
    /// Response payload could not be parsed into JSON.
    #[error("failed to decode `{command}` response for `{key}`")]
    DecodeResponse {
        command: &'static str,
        key: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server executed the command and reported an error.
    #[error("`{command}` on `{key}` failed: {message}")]
    Command {
        command: &'static str,
        key: String,
        message: String,
    },
    /// The command succeeded but returned a value of an unexpected shape.
    #[error("unexpected `{command}` result for `{key}`: {result}")]
    UnexpectedResult {
        command: &'static str,
        key: String,
        result: String,
    },
}
