//! Value normalization for controller values
//!
//! The recorder sends 0-127, hosts take floating point:
//! - Volume, device parameters: 0.0 to 1.0
//! - Pan: -1.0 to 1.0 (bipolar, 64 is centre)
//!
//! The divisor is 128, not 127, matching hosts that address values as
//! `value` steps out of a 128-step resolution.

/// Steps in a 7-bit controller value
pub const RESOLUTION: f32 = 128.0;

/// Target value range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlRange {
    /// Unit range: 0.0 to 1.0 (volume, parameters)
    Unit,
    /// Bipolar range: -1.0 to 1.0 (pan)
    Bipolar,
}

impl ControlRange {
    pub fn min(&self) -> f32 {
        match self {
            Self::Unit => 0.0,
            Self::Bipolar => -1.0,
        }
    }

    pub fn max(&self) -> f32 {
        match self {
            Self::Unit => 1.0,
            Self::Bipolar => 1.0,
        }
    }
}

/// Normalize a controller value (0-127) to the target range
///
/// Values above 127 are clamped.
pub fn normalize_value(value: u8, range: ControlRange) -> f32 {
    let normalized = f32::from(value.min(127)) / RESOLUTION;
    let min = range.min();
    let max = range.max();
    min + normalized * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_range() {
        assert_eq!(normalize_value(0, ControlRange::Unit), 0.0);
        assert_eq!(normalize_value(64, ControlRange::Unit), 0.5);
        let top = normalize_value(127, ControlRange::Unit);
        assert!((top - 127.0 / 128.0).abs() < 1e-6);
    }

    #[test]
    fn test_bipolar_range() {
        assert_eq!(normalize_value(0, ControlRange::Bipolar), -1.0);
        assert_eq!(normalize_value(64, ControlRange::Bipolar), 0.0);
        assert!(normalize_value(127, ControlRange::Bipolar) < 1.0);
        assert!(normalize_value(127, ControlRange::Bipolar) > 0.98);
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(
            normalize_value(200, ControlRange::Unit),
            normalize_value(127, ControlRange::Unit)
        );
    }
}
