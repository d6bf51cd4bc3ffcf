//! Utility modules for configuration, error handling, and rounding.

pub mod config;
pub mod error;

// Re-export commonly used error types for convenience
pub use error::{ConfigError, OutputError, SourceError};

/// Round a value to `places` decimal places.
///
/// Only called at the output boundary; the engine keeps full precision.
pub fn round_to(value: f64, places: usize) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(71.666_666, 2), 71.67);
        assert_eq!(round_to(12.5, 0), 13.0);
        assert_eq!(round_to(0.0, 2), 0.0);
    }
}
