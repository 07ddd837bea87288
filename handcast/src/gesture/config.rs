//! Recognition thresholds and cooldown durations.

use anyhow::Context;
use lexpr::Value;
use tracing::debug;

use super::cooldown::Channel;
use crate::sexp::{bool_sexp, get_bool, get_float};

/// Configuration for gesture recognition thresholds.
///
/// Distances without a unit suffix are in normalized landmark units;
/// `_px` fields are screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Enable gesture recognition (pointer updates continue when disabled).
    pub enabled: bool,
    /// Thumb–index distance below which a pinch engages.
    pub pinch_engage: f32,
    /// Thumb–index distance above which an engaged pinch releases.
    pub pinch_release: f32,
    /// Minimum index–middle tip spread for a V sign.
    pub v_spread: f32,
    /// Samples required before circle detection runs.
    pub circle_min_samples: usize,
    /// Minimum bounding-box width and height of a circle.
    pub circle_min_size_px: f32,
    /// Accepted width/height ratio band for a circle.
    pub circle_min_ratio: f32,
    pub circle_max_ratio: f32,
    /// Samples required before thrust detection runs.
    pub thrust_min_samples: usize,
    /// The thrust compares the newest sample with this one counted from the end.
    pub thrust_lookback: usize,
    /// Minimum travel over the lookback window for a thrust.
    pub thrust_distance_px: f32,
    /// Per-frame hand-center travel that counts as a swipe.
    pub swipe_threshold: f32,
    /// Per-frame decay applied to the wave momentum accumulator.
    pub wave_decay: f32,
    /// Absolute momentum at which a wave fires.
    pub wave_threshold_px: f32,
    /// Cooldowns (ms) per gesture channel.
    pub spell_cooldown_ms: f64,
    pub swipe_cooldown_ms: f64,
    pub v_action_cooldown_ms: f64,
    pub wave_cooldown_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pinch_engage: 0.04,
            pinch_release: 0.08,
            v_spread: 0.05,
            circle_min_samples: 15,
            circle_min_size_px: 50.0,
            circle_min_ratio: 0.6,
            circle_max_ratio: 1.4,
            thrust_min_samples: 5,
            thrust_lookback: 4,
            thrust_distance_px: 100.0,
            swipe_threshold: 0.08,
            wave_decay: 0.8,
            wave_threshold_px: 200.0,
            spell_cooldown_ms: 1000.0,
            swipe_cooldown_ms: 1000.0,
            v_action_cooldown_ms: 2000.0,
            wave_cooldown_ms: 1500.0,
        }
    }
}

impl GestureConfig {
    /// Cooldown duration for a channel.
    pub fn cooldown_ms(&self, channel: Channel) -> f64 {
        match channel {
            Channel::SpellCast => self.spell_cooldown_ms,
            Channel::Swipe => self.swipe_cooldown_ms,
            Channel::VAction => self.v_action_cooldown_ms,
            Channel::Wave => self.wave_cooldown_ms,
        }
    }

    /// Apply overrides from an s-expression plist.  Unknown keys are ignored.
    pub fn apply_sexp(&mut self, value: &Value) {
        if let Some(enabled) = get_bool(value, "enabled") {
            self.enabled = enabled;
        }
        let set_f32 = |key: &str, field: &mut f32| {
            if let Some(v) = get_float(value, key) {
                *field = v as f32;
            }
        };
        set_f32("pinch-engage", &mut self.pinch_engage);
        set_f32("pinch-release", &mut self.pinch_release);
        set_f32("v-spread", &mut self.v_spread);
        set_f32("circle-min-size", &mut self.circle_min_size_px);
        set_f32("circle-min-ratio", &mut self.circle_min_ratio);
        set_f32("circle-max-ratio", &mut self.circle_max_ratio);
        set_f32("thrust-distance", &mut self.thrust_distance_px);
        set_f32("swipe-threshold", &mut self.swipe_threshold);
        set_f32("wave-decay", &mut self.wave_decay);
        set_f32("wave-threshold", &mut self.wave_threshold_px);

        let set_count = |key: &str, field: &mut usize| {
            if let Some(v) = get_float(value, key) {
                if v >= 1.0 {
                    *field = v as usize;
                }
            }
        };
        set_count("circle-min-samples", &mut self.circle_min_samples);
        set_count("thrust-min-samples", &mut self.thrust_min_samples);
        set_count("thrust-lookback", &mut self.thrust_lookback);

        let set_ms = |key: &str, field: &mut f64| {
            if let Some(v) = get_float(value, key) {
                *field = v.max(0.0);
            }
        };
        set_ms("spell-cooldown-ms", &mut self.spell_cooldown_ms);
        set_ms("swipe-cooldown-ms", &mut self.swipe_cooldown_ms);
        set_ms("v-action-cooldown-ms", &mut self.v_action_cooldown_ms);
        set_ms("wave-cooldown-ms", &mut self.wave_cooldown_ms);

        if self.pinch_release < self.pinch_engage {
            debug!(
                "Pinch release {:.3} below engage {:.3}; clamping",
                self.pinch_release, self.pinch_engage
            );
            self.pinch_release = self.pinch_engage;
        }
    }

    /// Parse a config plist, starting from the defaults.
    pub fn from_sexp_str(raw: &str) -> anyhow::Result<Self> {
        let value = lexpr::from_str(raw).context("malformed gesture config s-expression")?;
        let mut config = Self::default();
        config.apply_sexp(&value);
        Ok(config)
    }

    /// Generate s-expression for the current config.
    pub fn config_sexp(&self) -> String {
        format!(
            "(:enabled {} :pinch-engage {:.3} :pinch-release {:.3} :v-spread {:.3} :circle-min-samples {} :circle-min-size {:.0} :circle-min-ratio {:.2} :circle-max-ratio {:.2} :thrust-min-samples {} :thrust-lookback {} :thrust-distance {:.0} :swipe-threshold {:.3} :wave-decay {:.2} :wave-threshold {:.0} :spell-cooldown-ms {:.0} :swipe-cooldown-ms {:.0} :v-action-cooldown-ms {:.0} :wave-cooldown-ms {:.0})",
            bool_sexp(self.enabled),
            self.pinch_engage,
            self.pinch_release,
            self.v_spread,
            self.circle_min_samples,
            self.circle_min_size_px,
            self.circle_min_ratio,
            self.circle_max_ratio,
            self.thrust_min_samples,
            self.thrust_lookback,
            self.thrust_distance_px,
            self.swipe_threshold,
            self.wave_decay,
            self.wave_threshold_px,
            self.spell_cooldown_ms,
            self.swipe_cooldown_ms,
            self.v_action_cooldown_ms,
            self.wave_cooldown_ms,
        )
    }
}
