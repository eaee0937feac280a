//! Decoder configuration

use crate::DEFAULT_NESTING_LIMIT;

/// Settings fixed when a [`Deserializer`](crate::Deserializer) is built
///
/// `use_int64` and `use_double` describe the target platform. With 64-bit
/// integers disabled, uint 64 and int 64 keep only their low 32 bits. With
/// doubles disabled, float 64 values are narrowed to single precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum container depth
    pub nesting_limit: u8,
    /// Keep all 64 bits of 8-byte integers
    pub use_int64: bool,
    /// Decode float 64 as `f64` rather than narrowing to `f32`
    pub use_double: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nesting_limit: DEFAULT_NESTING_LIMIT,
            use_int64: true,
            use_double: true,
        }
    }
}

impl Config {
    /// Default configuration
    #[inline]
    pub const fn new() -> Self {
        Self {
            nesting_limit: DEFAULT_NESTING_LIMIT,
            use_int64: true,
            use_double: true,
        }
    }

    /// Set the maximum container depth
    #[inline]
    pub const fn with_nesting_limit(mut self, limit: u8) -> Self {
        self.nesting_limit = limit;
        self
    }

    /// Behave like a target without 64-bit integers
    #[inline]
    pub const fn without_int64(mut self) -> Self {
        self.use_int64 = false;
        self
    }

    /// Behave like a target without a native double type
    #[inline]
    pub const fn without_double(mut self) -> Self {
        self.use_double = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config, Config::new());
        assert_eq!(config.nesting_limit, DEFAULT_NESTING_LIMIT);
        assert!(config.use_int64);
        assert!(config.use_double);
    }

    #[test]
    fn test_chained_setters() {
        let config = Config::new()
            .with_nesting_limit(3)
            .without_int64()
            .without_double();
        assert_eq!(config.nesting_limit, 3);
        assert!(!config.use_int64);
        assert!(!config.use_double);
    }
}
