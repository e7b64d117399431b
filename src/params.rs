/*
 * Effect Parameters Module
 *
 * This module defines the EffectParams struct that holds every constant of
 * the particle effect: sampling grid spacing, pointer influence radius, the
 * per-particle friction/ease model and where particles spawn on a rebuild.
 * The two presets match the image and text variants of the effect. Params
 * can be loaded from a JSON file and some of them are adjusted live from the
 * control panel.
 */

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::text::TextStyle;

/// Half-open range `[min, max)` a per-particle constant is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    // Degenerate spans always yield `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

/// How friction and ease are assigned to particles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    /// Every particle shares the same constants
    Fixed { friction: f64, ease: f64 },
    /// Each particle draws its own constants once, at construction
    Random { friction: Span, ease: Span },
}

impl Motion {
    /// Draw the (friction, ease) pair for one new particle
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        match self {
            Motion::Fixed { friction, ease } => (*friction, *ease),
            Motion::Random { friction, ease } => (friction.sample(rng), ease.sample(rng)),
        }
    }
}

/// Where freshly built particles start before flying home
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spawn {
    /// Uniformly over the whole surface
    #[default]
    Scatter,
    /// Uniformly along the top edge
    TopEdge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectParams {
    pub gap: u32,
    pub radius: f64,
    pub motion: Motion,
    pub spawn: Spawn,
    pub parallel: bool,
    pub text: TextStyle,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self::for_image()
    }
}

impl EffectParams {
    // Image variant: stiff, uniform motion
    pub fn for_image() -> Self {
        Self {
            gap: 3,
            radius: 10_000.0,
            motion: Motion::Fixed {
                friction: 0.7,
                ease: 0.05,
            },
            spawn: Spawn::Scatter,
            parallel: false,
            text: TextStyle::default(),
        }
    }

    // Text variant: wider influence and per-particle jitter
    pub fn for_text() -> Self {
        Self {
            gap: 3,
            radius: 20_000.0,
            motion: Motion::Random {
                friction: Span::new(0.15, 0.75),
                ease: Span::new(0.005, 0.105),
            },
            spawn: Spawn::Scatter,
            parallel: false,
            text: TextStyle::default(),
        }
    }

    /// Read params from a JSON file, filling missing fields from `base`
    pub fn from_json_file(path: impl AsRef<Path>, base: &EffectParams) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut value = serde_json::to_value(base)?;
        let overrides: serde_json::Value = serde_json::from_str(&contents)?;
        merge(&mut value, overrides);
        let params: EffectParams = serde_json::from_value(value)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.gap == 0 {
            return Err(Error::InvalidParams("gap must be at least 1".into()));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::InvalidParams(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        match self.motion {
            Motion::Fixed { friction, ease } => {
                check_unit("friction", Span::new(friction, friction))?;
                check_unit("ease", Span::new(ease, ease))?;
            }
            Motion::Random { friction, ease } => {
                check_unit("friction", friction)?;
                check_unit("ease", ease)?;
            }
        }
        self.text.validate()
    }

    // Get parameter ranges for UI sliders
    pub fn get_gap_range() -> RangeInclusive<u32> {
        1..=20
    }

    pub fn get_radius_range() -> RangeInclusive<f64> {
        1_000.0..=100_000.0
    }
}

fn check_unit(name: &str, span: Span) -> Result<()> {
    let inside = |v: f64| v > 0.0 && v < 1.0;
    if inside(span.min) && inside(span.max) && span.min <= span.max {
        Ok(())
    } else {
        Err(Error::InvalidParams(format!(
            "{name} must lie in (0, 1) with min <= max, got [{}, {}]",
            span.min, span.max
        )))
    }
}

// Objects merge key by key when every override key already exists in the
// base, otherwise the override replaces the value (e.g. switching the
// `motion` variant from `random` to `fixed`).
fn merge(base: &mut serde_json::Value, overrides: serde_json::Value) {
    use serde_json::Value;

    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides))
            if overrides.keys().all(|key| base.contains_key(key)) =>
        {
            for (key, value) in overrides {
                if let Some(slot) = base.get_mut(&key) {
                    merge(slot, value);
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn presets_are_valid() {
        EffectParams::for_image().validate().unwrap();
        EffectParams::for_text().validate().unwrap();
    }

    #[test]
    fn zero_gap_is_rejected() {
        let params = EffectParams {
            gap: 0,
            ..EffectParams::for_image()
        };
        assert!(matches!(params.validate(), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn friction_outside_unit_interval_is_rejected() {
        let params = EffectParams {
            motion: Motion::Fixed {
                friction: 1.0,
                ease: 0.05,
            },
            ..EffectParams::for_image()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn random_motion_stays_inside_its_spans() {
        let motion = EffectParams::for_text().motion;
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let (friction, ease) = motion.draw(&mut rng);
            assert!((0.15..0.75).contains(&friction));
            assert!((0.005..0.105).contains(&ease));
        }
    }

    #[test]
    fn partial_file_keeps_base_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "gap": 5, "text": {{ "font_size": 40.0 }} }}"#).unwrap();

        let params = EffectParams::from_json_file(file.path(), &EffectParams::for_text()).unwrap();

        assert_eq!(params.gap, 5);
        assert_eq!(params.radius, 20_000.0);
        assert_eq!(params.text.font_size, 40.0);
        assert_eq!(params.text.line_height, TextStyle::default().line_height);
        assert_eq!(params.motion, EffectParams::for_text().motion);
    }

    #[test]
    fn file_can_switch_motion_model() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "motion": {{ "fixed": {{ "friction": 0.5, "ease": 0.1 }} }} }}"#).unwrap();

        let params = EffectParams::from_json_file(file.path(), &EffectParams::for_text()).unwrap();

        assert_eq!(
            params.motion,
            Motion::Fixed {
                friction: 0.5,
                ease: 0.1
            }
        );
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "gap = 5").unwrap();

        let err = EffectParams::from_json_file(file.path(), &EffectParams::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
