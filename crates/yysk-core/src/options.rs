//! Options for the preview and waterfall header images.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Every option the header-image builder recognizes, with its default.
///
/// Numeric knobs that are `0` are treated as "let the service decide" and are
/// left out of the generated URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderImageOptions {
    /// Number of representative images composed into the animated preview.
    pub image_size: usize,
    /// Seconds each preview frame stays on screen.
    pub image_duration: f64,
    /// Seconds spent transitioning between preview frames.
    pub transition_duration: f64,
    /// Frames per second of the rendered preview.
    pub image_fps: u32,
    /// Column count of the waterfall grid.
    pub target_column: u32,
    /// Number of leading images placed in the waterfall grid; `0` keeps all.
    pub waterfall_target_count: usize,
}

impl Default for HeaderImageOptions {
    fn default() -> Self {
        Self {
            image_size: 10,
            image_duration: 0.0,
            transition_duration: 0.0,
            image_fps: 0,
            target_column: 0,
            waterfall_target_count: 0,
        }
    }
}

impl HeaderImageOptions {
    /// Reject values that can never produce a sensible URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when a duration is NaN, infinite
    /// or negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("image_duration", self.image_duration),
            ("transition_duration", self.transition_duration),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{field} must be a finite, non-negative number of seconds; got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Lenient counterpart of [`validate`](Self::validate) used at the builder
    /// boundary: unusable durations collapse to `0` (omitted) instead of failing.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            image_duration: clean(self.image_duration),
            transition_duration: clean(self.transition_duration),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sample_ten_images_and_omit_knobs() {
        let opts = HeaderImageOptions::default();
        assert_eq!(opts.image_size, 10);
        assert_eq!(opts.image_fps, 0);
        assert_eq!(opts.target_column, 0);
        assert_eq!(opts.waterfall_target_count, 0);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let opts: HeaderImageOptions =
            serde_yaml::from_str("image_fps: 12\nimage_duration: 0.6\n").expect("parse");
        assert_eq!(opts.image_fps, 12);
        assert!((opts.image_duration - 0.6).abs() < f64::EPSILON);
        assert_eq!(opts.image_size, 10);
        assert_eq!(opts.target_column, 0);
    }

    #[test]
    fn negative_duration_fails_validation() {
        let opts = HeaderImageOptions {
            transition_duration: -0.2,
            ..HeaderImageOptions::default()
        };
        let err = opts.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("transition_duration")),
            "got: {err:?}"
        );
    }

    #[test]
    fn nan_duration_fails_validation() {
        let opts = HeaderImageOptions {
            image_duration: f64::NAN,
            ..HeaderImageOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn normalized_zeroes_unusable_durations() {
        let opts = HeaderImageOptions {
            image_duration: f64::INFINITY,
            transition_duration: -1.0,
            image_fps: 12,
            ..HeaderImageOptions::default()
        };
        let norm = opts.normalized();
        assert!(norm.image_duration.abs() < f64::EPSILON);
        assert!(norm.transition_duration.abs() < f64::EPSILON);
        assert_eq!(norm.image_fps, 12);
        assert!(norm.validate().is_ok());
    }
}
