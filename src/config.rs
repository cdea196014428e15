// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Scan configuration.
//!
//! This module defines the [`ScanConfig`] struct, which controls capture
//! behavior (countdown timer) and the unit used when presenting or
//! exporting results. It uses a builder pattern for convenient
//! construction.

use crate::measurements::Units;

/// Configuration for a measurement scan.
///
/// # Example
///
/// ```rust
/// use bodyscan::{ScanConfig, Units};
///
/// let config = ScanConfig::new()
///     .with_timer(5)
///     .with_units(Units::Cm);
/// ```
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Countdown seconds before each capture commits. `0` captures
    /// immediately.
    pub timer_seconds: u32,
    /// Unit used when presenting or exporting the finished record.
    /// Synthesis always computes in inches and converts at the boundary.
    pub units: Units,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timer_seconds: 3,
            units: Units::Inches,
        }
    }
}

impl ScanConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capture countdown timer.
    ///
    /// # Arguments
    ///
    /// * `seconds` - Countdown length; `0` commits immediately.
    #[must_use]
    pub const fn with_timer(mut self, seconds: u32) -> Self {
        self.timer_seconds = seconds;
        self
    }

    /// Set the presentation/export unit.
    #[must_use]
    pub const fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }
}
