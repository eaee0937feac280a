//! Error types for MessagePack tree decoding

/// Errors that can occur while decoding a MessagePack value into an arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Tag byte is reserved or not supported by this decoder
    #[error("unsupported MessagePack tag 0x{0:02x}")]
    Format(u8),
    /// Top-level value is not the requested container kind
    #[error("value is not of the requested container type")]
    TypeMismatch,
    /// Containers nested deeper than the configured limit
    #[error("nesting limit exceeded")]
    NestingTooDeep,
    /// Arena budget exhausted
    #[error("arena capacity exhausted")]
    OutOfMemory,
    /// Input ended before the current value was complete
    #[error("unexpected end of input")]
    TruncatedInput,
    /// String payload is not valid UTF-8
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
    /// Map key is not a string
    #[error("map key is not a string")]
    NonStringKey,
}

/// Result type alias for decoding operations
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::Format(0xc1).to_string(),
            "unsupported MessagePack tag 0xc1"
        );
        assert_eq!(Error::TruncatedInput.to_string(), "unexpected end of input");
        assert_eq!(Error::NestingTooDeep.to_string(), "nesting limit exceeded");
    }
}
