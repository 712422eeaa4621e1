//! Scene configuration presets and validation.

use crate::decor::easing::Easing;
use crate::decor::palette::Palette;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Motion style of the background blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneVariant {
    /// Blobs jitter around the canvas center.
    Jitter,
    /// Blobs jitter around a point traveling along the route curve.
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneConfigError {
    ZeroDuration(&'static str),
}

impl Display for SceneConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDuration(field) => write!(f, "scene config `{field}` must be > 0"),
        }
    }
}

impl Error for SceneConfigError {}

/// Timing and appearance of one blob scene.
///
/// Deserialized fields that are missing take the value of the chosen
/// variant's preset, so `{"variant":"path"}` yields `SceneConfig::path()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SceneConfigWire")]
pub struct SceneConfig {
    pub variant: SceneVariant,
    /// One leg of the progress loop (0 to 1).
    pub progress_duration_ms: u64,
    /// Interval between jitter steps.
    pub jitter_period_ms: u64,
    /// Length of the eased move after each jitter step.
    pub jitter_transition_ms: u64,
    /// Progress runs back to 0 after reaching 1 instead of restarting.
    pub autoreverse: bool,
    /// Timing curve of each progress leg.
    pub progress_easing: Easing,
    pub palette: Palette,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Host-facing shape of `SceneConfig`; every field is optional.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneConfigWire {
    variant: Option<SceneVariant>,
    progress_duration_ms: Option<u64>,
    jitter_period_ms: Option<u64>,
    jitter_transition_ms: Option<u64>,
    autoreverse: Option<bool>,
    progress_easing: Option<Easing>,
    palette: Option<Palette>,
    seed: Option<u64>,
}

impl From<SceneConfigWire> for SceneConfig {
    fn from(wire: SceneConfigWire) -> Self {
        let preset = SceneConfig::preset(wire.variant.unwrap_or(SceneVariant::Jitter));
        Self {
            variant: preset.variant,
            progress_duration_ms: wire
                .progress_duration_ms
                .unwrap_or(preset.progress_duration_ms),
            jitter_period_ms: wire.jitter_period_ms.unwrap_or(preset.jitter_period_ms),
            jitter_transition_ms: wire
                .jitter_transition_ms
                .unwrap_or(preset.jitter_transition_ms),
            autoreverse: wire.autoreverse.unwrap_or(preset.autoreverse),
            progress_easing: wire.progress_easing.unwrap_or(preset.progress_easing),
            palette: wire.palette.unwrap_or(preset.palette),
            seed: wire.seed.or(preset.seed),
        }
    }
}

impl SceneConfig {
    pub fn jitter() -> Self {
        Self {
            variant: SceneVariant::Jitter,
            progress_duration_ms: 1_000,
            jitter_period_ms: 1_000,
            jitter_transition_ms: 1_000,
            autoreverse: true,
            progress_easing: Easing::EaseInOut,
            palette: Palette::default(),
            seed: None,
        }
    }

    pub fn path() -> Self {
        Self {
            variant: SceneVariant::Path,
            progress_duration_ms: 4_000,
            ..Self::jitter()
        }
    }

    pub fn preset(variant: SceneVariant) -> Self {
        match variant {
            SceneVariant::Jitter => Self::jitter(),
            SceneVariant::Path => Self::path(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Rejects zero progress duration and zero jitter period.
    ///
    /// A zero transition is allowed and means "jump to target". An empty
    /// palette is allowed and yields the fallback color.
    pub fn validate(&self) -> Result<(), SceneConfigError> {
        if self.progress_duration_ms == 0 {
            return Err(SceneConfigError::ZeroDuration("progress_duration_ms"));
        }
        if self.jitter_period_ms == 0 {
            return Err(SceneConfigError::ZeroDuration("jitter_period_ms"));
        }
        Ok(())
    }

    pub fn progress_duration(&self) -> Duration {
        Duration::from_millis(self.progress_duration_ms)
    }

    pub fn jitter_period(&self) -> Duration {
        Duration::from_millis(self.jitter_period_ms)
    }

    pub fn jitter_transition(&self) -> Duration {
        Duration::from_millis(self.jitter_transition_ms)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::jitter()
    }
}

#[cfg(test)]
mod tests {
    use super::{SceneConfig, SceneConfigError, SceneVariant};
    use crate::decor::easing::Easing;
    use crate::decor::palette::{BlobColor, Palette};

    #[test]
    fn presets_match_reference_timings() {
        let jitter = SceneConfig::jitter();
        assert_eq!(jitter.progress_duration_ms, 1_000);
        assert_eq!(jitter.jitter_period_ms, 1_000);

        let path = SceneConfig::path();
        assert_eq!(path.variant, SceneVariant::Path);
        assert_eq!(path.progress_duration_ms, 4_000);
        assert_eq!(path.jitter_transition_ms, 1_000);
    }

    #[test]
    fn validate_rejects_zero_period() {
        let config = SceneConfig {
            jitter_period_ms: 0,
            ..SceneConfig::jitter()
        };
        assert_eq!(
            config.validate(),
            Err(SceneConfigError::ZeroDuration("jitter_period_ms"))
        );
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SceneConfig = serde_json::from_value(serde_json::json!({
            "variant": "path",
            "palette": ["teal"],
            "seed": 9
        }))
        .unwrap();

        assert_eq!(config.variant, SceneVariant::Path);
        assert_eq!(config.palette, Palette::single(BlobColor::Teal));
        assert_eq!(config.progress_duration_ms, 4_000);
        assert_eq!(config.jitter_period_ms, 1_000);
        assert_eq!(config.progress_easing, Easing::EaseInOut);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn bare_variant_json_matches_its_preset() {
        let path: SceneConfig = serde_json::from_str(r#"{"variant":"path"}"#).unwrap();
        assert_eq!(path, SceneConfig::path());

        let jitter: SceneConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(jitter, SceneConfig::jitter());
    }

    #[test]
    fn explicit_fields_override_the_preset() {
        let config: SceneConfig = serde_json::from_str(
            r#"{"variant":"path","progress_duration_ms":2500,"progress_easing":"linear"}"#,
        )
        .unwrap();
        assert_eq!(config.progress_duration_ms, 2_500);
        assert_eq!(config.progress_easing, Easing::Linear);
        assert_eq!(config.jitter_transition_ms, 1_000);
    }

    #[test]
    fn serialized_config_reads_back_unchanged() {
        let config = SceneConfig::path().with_seed(4);
        let json = serde_json::to_string(&config).unwrap();
        let back: SceneConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<SceneConfig>(r#"{"variant":"path","speed":2}"#);
        assert!(result.is_err());
    }
}
