use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid {what}: expected {expected} hexadecimal characters, got {actual}")]
    InvalidIdentifierLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid {what}: not a hexadecimal string")]
    InvalidIdentifierHex { what: &'static str },

    #[error("Invalid zone name: {0}")]
    InvalidZoneName(String),

    #[error("Invalid network identifier: {0}")]
    InvalidNetworkId(String),

    #[error("API request failed: {0}")]
    ApiRequest(String),

    #[error("API returned unexpected status {0}")]
    ApiStatus(u16),

    #[error("API response decode failed: {0}")]
    ApiDecode(String),
}
