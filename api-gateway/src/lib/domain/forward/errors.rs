use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("No token provided")]
    MissingToken,

    #[error("Authentication service unreachable: {0}")]
    UpstreamUnreachable(String),
}
