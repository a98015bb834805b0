//! Error types for the framework model

/// Errors raised while decoding framework, mapping or prediction payloads
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    /// Payload is not valid JSON or does not match the expected shape
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Widget type name outside the known set
    #[error("unknown widget type: {0}")]
    UnknownWidgetType(String),
}
