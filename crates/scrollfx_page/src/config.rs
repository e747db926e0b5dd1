//! Page configuration (scrollfx.toml)
//!
//! Every section is optional; missing sections and fields fall back to the
//! values the landing page was tuned with.

use std::fs;
use std::path::Path;

use scrollfx_animation::Easing;
use scrollfx_core::Viewport;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Top-level page configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PageConfig {
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default)]
    pub counters: CounterSettings,
    #[serde(default)]
    pub dots: DotsConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

/// Cursor follower settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PointerConfig {
    /// Fraction of the remaining gap the lagged follower closes each frame
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,
    /// Follower size used when the element has no layout size
    #[serde(default = "default_dot_size")]
    pub dot_size: f32,
    #[serde(default = "default_ring_size")]
    pub ring_size: f32,
}

fn default_smoothing() -> f32 {
    0.12
}

fn default_dot_size() -> f32 {
    12.0
}

fn default_ring_size() -> f32 {
    36.0
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            smoothing: default_smoothing(),
            dot_size: default_dot_size(),
            ring_size: default_ring_size(),
        }
    }
}

/// Animated counter settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CounterSettings {
    /// Seconds from 0 to the target
    #[serde(default = "default_counter_duration")]
    pub duration: f32,
    #[serde(default = "default_counter_ease")]
    pub ease: String,
    /// Trigger start position
    #[serde(default = "default_counter_start")]
    pub start: String,
    /// Element attribute holding the target value
    #[serde(default = "default_counter_attribute")]
    pub attribute: String,
}

fn default_counter_duration() -> f32 {
    2.0
}

fn default_counter_ease() -> String {
    "power2.out".to_string()
}

fn default_counter_start() -> String {
    "top 80%".to_string()
}

fn default_counter_attribute() -> String {
    "data-target".to_string()
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            duration: default_counter_duration(),
            ease: default_counter_ease(),
            start: default_counter_start(),
            attribute: default_counter_attribute(),
        }
    }
}

/// Decorative dots in the parallax section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DotsConfig {
    #[serde(default = "default_dot_count")]
    pub count: usize,
    /// Seed for dot placement, so runs are reproducible
    #[serde(default = "default_dot_seed")]
    pub seed: u64,
    #[serde(default = "default_min_opacity")]
    pub min_opacity: f32,
    /// Width of the random opacity range above `min_opacity`
    #[serde(default = "default_opacity_spread")]
    pub opacity_spread: f32,
}

fn default_dot_count() -> usize {
    40
}

fn default_dot_seed() -> u64 {
    0x5eed
}

fn default_min_opacity() -> f32 {
    0.1
}

fn default_opacity_spread() -> f32 {
    0.4
}

impl Default for DotsConfig {
    fn default() -> Self {
        Self {
            count: default_dot_count(),
            seed: default_dot_seed(),
            min_opacity: default_min_opacity(),
            opacity_spread: default_opacity_spread(),
        }
    }
}

/// Registry behaviour
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Ignore a second `init` instead of registering every binding again
    #[serde(default = "default_guard_reinit")]
    pub guard_reinit: bool,
}

fn default_guard_reinit() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            guard_reinit: default_guard_reinit(),
        }
    }
}

/// Initial viewport size
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    800.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl ViewportConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

impl PageConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PageConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.pointer.smoothing > 0.0 && self.pointer.smoothing <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "pointer.smoothing",
                reason: format!("{} is outside (0, 1]", self.pointer.smoothing),
            });
        }
        if self.counters.duration < 0.0 {
            return Err(ConfigError::Invalid {
                field: "counters.duration",
                reason: "must not be negative".to_string(),
            });
        }
        if let Err(e) = Easing::from_name(&self.counters.ease) {
            return Err(ConfigError::Invalid {
                field: "counters.ease",
                reason: e.to_string(),
            });
        }
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "viewport",
                reason: "width and height must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Counter easing (validated on load; falls back to `power2.out`)
    pub fn counter_easing(&self) -> Easing {
        Easing::from_name(&self.counters.ease).unwrap_or(Easing::EaseOutCubic)
    }
}
