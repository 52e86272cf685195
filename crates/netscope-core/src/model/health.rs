use serde::{Deserialize, Serialize};

/// Health band for a percentage reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Healthy",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// Percent thresholds separating the [`Severity`] bands.
///
/// `percent < warning` is normal, `warning <= percent < critical` is a
/// warning, anything at or above `critical` is critical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityBands {
    pub warning: f64,
    pub critical: f64,
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self {
            warning: 70.0,
            critical: 85.0,
        }
    }
}

impl SeverityBands {
    pub fn classify(self, percent: f64) -> Severity {
        let percent = clamp_percent(percent);
        if percent >= self.critical {
            Severity::Critical
        } else if percent >= self.warning {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

/// Clamp a percentage into `[0, 100]`. NaN reads as zero.
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_inputs() {
        let inputs = [-5.0, 0.0, 50.0, 100.0, 150.0];
        let outputs: Vec<f64> = inputs.iter().map(|p| clamp_percent(*p)).collect();
        assert_eq!(outputs, vec![0.0, 0.0, 50.0, 100.0, 100.0]);
        assert!(clamp_percent(f64::NAN).abs() < f64::EPSILON);
    }

    #[test]
    fn default_bands() {
        let bands = SeverityBands::default();
        assert_eq!(bands.classify(0.0), Severity::Normal);
        assert_eq!(bands.classify(69.9), Severity::Normal);
        assert_eq!(bands.classify(70.0), Severity::Warning);
        assert_eq!(bands.classify(84.9), Severity::Warning);
        assert_eq!(bands.classify(85.0), Severity::Critical);
        assert_eq!(bands.classify(250.0), Severity::Critical);
    }

    #[test]
    fn custom_bands() {
        let bands = SeverityBands {
            warning: 50.0,
            critical: 60.0,
        };
        assert_eq!(bands.classify(55.0), Severity::Warning);
        assert_eq!(bands.classify(60.0), Severity::Critical);
    }
}
