pub const APP_NAME: &str = "interval-cli";

/// Seconds before the end of an interval that get an audio cue
pub const DEFAULT_CUE_WINDOW_SECS: u64 = 3;

pub const DEFAULT_CUE_VOLUME: u8 = 40;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Extensions accepted by `import`
pub const SUPPORTED_ROUTINE_EXTENSIONS: &[&str] = &["toml", "json"];

/// Convert user volume percentage (0-100) to amplitude multiplier using perceptual scaling
///
/// Human hearing is logarithmic, so x^4 approximates an exponential curve.
/// A beep at 10% then feels about as far from 20% as 90% is from 100%.
///
/// # Arguments
/// *`percent` - User input volume percentage (0-100)
///
/// # Returns
/// * `f32` - Amplitude multiplier (0.0-1.0)
pub fn volume_percent_to_amplitude(percent: u8) -> f32 {
    let x = (percent.min(100) as f32) / 100.0;
    x.powi(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_curve_endpoints() {
        assert_eq!(volume_percent_to_amplitude(0), 0.0);
        assert_eq!(volume_percent_to_amplitude(100), 1.0);
        assert_eq!(volume_percent_to_amplitude(250), 1.0);
    }

    #[test]
    fn volume_curve_is_perceptual() {
        assert!((volume_percent_to_amplitude(50) - 0.0625).abs() < 1e-6);
    }
}
