//! Greeting page configuration
//!
//! The page reads an optional `heartglow.toml`. Every section and every field
//! is optional; anything left out keeps its built-in value:
//!
//! ```toml
//! seed = 7
//!
//! [floating_hearts]
//! count = 40
//! color = "#ff6b9d"
//!
//! [carousel]
//! cards = 6
//! auto_advance_ms = 3000
//!
//! [counter]
//! targets = [21, 365]
//! ```

use crate::error::{AppError, Result};
use heartglow_animation::{Attraction, HeartTrailConfig, ParticleConfig};
use heartglow_core::Color;
use heartglow_widgets::{CarouselConfig, CubeConfig, GiftConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "heartglow.toml";

/// Complete page configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreetingConfig {
    /// Seed for every random sequence on the page; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub sparkles: ParticleSection,
    pub floating_hearts: ParticleSection,
    pub final_hearts: ParticleSection,
    pub heart_trail: HeartTrailConfig,
    pub carousel: CarouselSection,
    pub cube: CubeConfig,
    pub gift: GiftConfig,
    pub counter: CounterConfig,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            seed: None,
            sparkles: ParticleSection::from_preset(&ParticleConfig::sparkles()),
            floating_hearts: ParticleSection::from_preset(&ParticleConfig::floating_hearts()),
            final_hearts: ParticleSection::from_preset(&ParticleConfig::final_hearts()),
            heart_trail: HeartTrailConfig::default(),
            carousel: CarouselSection::default(),
            cube: CubeConfig::default(),
            gift: GiftConfig::default(),
            counter: CounterConfig::default(),
        }
    }
}

impl GreetingConfig {
    /// Parse a TOML document
    pub fn from_toml(source: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Load and validate a config file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| AppError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load `path` if it exists, otherwise use the defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_path(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load `heartglow.toml` from a directory, falling back to the defaults
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load_or_default(&dir.join(CONFIG_FILE_NAME))
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the config as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        fs::write(path, content).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check every section for values the page cannot run with
    pub fn validate(&self) -> Result<()> {
        self.sparkles_config()?;
        self.floating_hearts_config()?;
        self.final_hearts_config()?;

        let trail = &self.heart_trail;
        if !(0.0..=1.0).contains(&trail.smoothing) {
            return Err(AppError::InvalidConfig(format!(
                "heart_trail.smoothing must be in [0, 1], got {}",
                trail.smoothing
            )));
        }
        if trail.size.is_empty() {
            return Err(AppError::InvalidConfig(
                "heart_trail.size must have a positive width and height".to_string(),
            ));
        }
        if self.carousel.config.swipe_threshold < 0.0 {
            return Err(AppError::InvalidConfig(
                "carousel.swipe_threshold must not be negative".to_string(),
            ));
        }
        if self.gift.burst.fade_step <= 0.0 {
            return Err(AppError::InvalidConfig(
                "gift.burst.fade_step must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sparkles_config(&self) -> Result<ParticleConfig> {
        self.sparkles
            .apply(ParticleConfig::sparkles())
            .map_err(|e| section_error("sparkles", e))
    }

    pub fn floating_hearts_config(&self) -> Result<ParticleConfig> {
        self.floating_hearts
            .apply(ParticleConfig::floating_hearts())
            .map_err(|e| section_error("floating_hearts", e))
    }

    pub fn final_hearts_config(&self) -> Result<ParticleConfig> {
        self.final_hearts
            .apply(ParticleConfig::final_hearts())
            .map_err(|e| section_error("final_hearts", e))
    }
}

fn section_error(section: &str, err: AppError) -> AppError {
    match err {
        AppError::InvalidConfig(msg) => AppError::InvalidConfig(format!("{section}.{msg}")),
        other => other,
    }
}

/// Overrides for one particle field preset
///
/// Ranges are written as `[min, max]`; colors as `"#rrggbb"`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_x: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_y: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_speed: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attraction: Option<Attraction>,
}

impl ParticleSection {
    /// A section spelling out every value of `preset`
    pub fn from_preset(preset: &ParticleConfig) -> Self {
        let range = |r: &std::ops::Range<f32>| Some([r.start, r.end]);
        Self {
            count: Some(preset.count),
            color: Some(color_to_hex(preset.color)),
            size: range(&preset.size),
            speed_x: range(&preset.speed_x),
            speed_y: range(&preset.speed_y),
            opacity: range(&preset.opacity),
            rotation_speed: range(&preset.rotation_speed),
            attraction: preset.attraction,
        }
    }

    /// Overlay the values set in this section onto `preset`
    pub fn apply(&self, mut preset: ParticleConfig) -> Result<ParticleConfig> {
        if let Some(count) = self.count {
            preset.count = count;
        }
        if let Some(color) = &self.color {
            preset.color = parse_color(color)?;
        }
        let ranges = [
            ("size", self.size, &mut preset.size),
            ("speed_x", self.speed_x, &mut preset.speed_x),
            ("speed_y", self.speed_y, &mut preset.speed_y),
            ("opacity", self.opacity, &mut preset.opacity),
            ("rotation_speed", self.rotation_speed, &mut preset.rotation_speed),
        ];
        for (name, value, target) in ranges {
            if let Some([min, max]) = value {
                if min > max {
                    return Err(AppError::InvalidConfig(format!(
                        "{name}: min {min} is greater than max {max}"
                    )));
                }
                *target = min..max;
            }
        }
        if let Some(attraction) = self.attraction {
            preset.attraction = Some(attraction);
        }
        Ok(preset)
    }
}

/// `"#rrggbb"` (the `#` is optional)
pub fn parse_color(value: &str) -> Result<Color> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return Err(AppError::InvalidConfig(format!(
            "color: expected #rrggbb, got {value:?}"
        )));
    }
    u32::from_str_radix(hex, 16)
        .map(Color::from_hex)
        .map_err(|_| AppError::InvalidConfig(format!("color: {value:?} is not hexadecimal")))
}

fn color_to_hex(color: Color) -> String {
    let [r, g, b, _] = color.to_rgba8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Carousel section: card count plus ring behavior
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSection {
    /// Number of cards; 0 leaves the carousel out
    pub cards: usize,
    #[serde(flatten)]
    pub config: CarouselConfig,
}

impl Default for CarouselSection {
    fn default() -> Self {
        Self {
            cards: 5,
            config: CarouselConfig::default(),
        }
    }
}

/// Statistics counters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: u64,
    /// One counter per target
    pub targets: Vec<u32>,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            targets: vec![21, 365, 1000],
        }
    }
}

impl CounterConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
