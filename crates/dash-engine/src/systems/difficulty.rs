//! Adaptive difficulty: one smoothed scalar in [0, 1] derived from elapsed
//! session time and score.

use crate::api::config::DifficultyConfig;

/// Share of `max_difficulty_*` reached, in [0, 1]. Negative, NaN and
/// non-positive denominators contribute nothing.
fn saturating_ratio(value: f32, max: f32) -> f32 {
    if !(max > 0.0) || !(value > 0.0) {
        return 0.0;
    }
    (value / max).min(1.0)
}

#[derive(Debug, Clone)]
pub struct DifficultySystem {
    config: DifficultyConfig,
    /// Smoothed difficulty.
    state: f32,
    override_value: Option<f32>,
}

impl DifficultySystem {
    pub fn new(config: DifficultyConfig) -> Self {
        Self {
            config,
            state: 0.0,
            override_value: None,
        }
    }

    /// Unsmoothed target for the given inputs.
    pub fn raw(&self, elapsed_seconds: f32, score: f32) -> f32 {
        let c = &self.config;
        let raw = c.time_scale * saturating_ratio(elapsed_seconds, c.max_difficulty_time)
            + c.score_scale * saturating_ratio(score, c.max_difficulty_score);
        if raw.is_nan() {
            0.0
        } else {
            raw.clamp(0.0, 1.0)
        }
    }

    /// Step the smoothed state toward the raw target and return it.
    /// While an override is set the override is returned and the smoothed
    /// state is left untouched.
    pub fn compute(&mut self, elapsed_seconds: f32, score: f32) -> f32 {
        if let Some(value) = self.override_value {
            return value;
        }
        let raw = self.raw(elapsed_seconds, score);
        let alpha = self.config.smoothing.clamp(0.0, 1.0);
        self.state = (self.state + alpha * (raw - self.state)).clamp(0.0, 1.0);
        self.state
    }

    /// Pin difficulty (`Some`) or resume smoothing from the last state (`None`).
    /// Pinned values are clamped to [0, 1]; NaN clears the override.
    pub fn set_override(&mut self, value: Option<f32>) {
        self.override_value = match value {
            Some(v) if v.is_nan() => {
                log::warn!("ignoring NaN difficulty override");
                None
            }
            Some(v) => Some(v.clamp(0.0, 1.0)),
            None => None,
        };
    }

    pub fn override_value(&self) -> Option<f32> {
        self.override_value
    }

    /// Current difficulty: the override if pinned, else the smoothed state.
    pub fn current(&self) -> f32 {
        self.override_value.unwrap_or(self.state)
    }

    pub fn game_speed_multiplier(&self) -> f32 {
        self.config.game_speed_multiplier.lerp(self.current())
    }

    pub fn spawn_rate_multiplier(&self) -> f32 {
        self.config.spawn_rate_multiplier.lerp(self.current())
    }

    /// Back to zero for a new session. The override is kept.
    pub fn reset_state(&mut self) {
        self.state = 0.0;
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }
}
