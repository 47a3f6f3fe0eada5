//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//!
//! [physics]
//! bounce_damping = 0.8
//! friction = 0.99
//! repulsion_distance = 300
//! repulsion_force = 1.5
//! random_speed = 3.0
//! direction_change_interval = 1.5
//! drift = true
//! initial_rotation_speed = 4.0
//! max_velocity = 12
//! max_rotation_speed = 10
//!
//! [size]
//! vw = 15
//! min = 100
//! max = 250
//!
//! [ball.trade]
//! image = assets/trade.png
//! url = https://trade.abaj.ai
//! ```
//!
//! `[ball.*]` sections are read in file order and replace the default balls.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

use crate::physics::PhysicsParams;
use crate::resources::ballsize::SizeRule;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const BALL_SECTION_PREFIX: &str = "ball.";

const DEFAULT_BALLS: [(&str, &str); 5] = [
    ("assets/trade.png", "https://trade.abaj.ai"),
    ("assets/real_inferno.png", "https://bots.abaj.ai"),
    ("assets/imag_jet.png", "https://arcade.abaj.ai"),
    ("assets/abs_hsv.png", "https://abaj.ai"),
    ("assets/tools.png", "https://tools.abaj.ai"),
];

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },
    #[error("invalid value for [{section}] {key}: {reason}")]
    Invalid {
        section: String,
        key: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// One configured ball: the image drawn for it and where it links to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BallAsset {
    pub image: String,
    pub url: String,
}

impl BallAsset {
    pub fn new(image: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            url: url.into(),
        }
    }
}

/// The five balls shipped with the landing page.
pub fn default_balls() -> Vec<BallAsset> {
    DEFAULT_BALLS
        .iter()
        .map(|(image, url)| BallAsset::new(*image, *url))
        .collect()
}

/// Game configuration resource.
///
/// Stores window settings, physics parameters, the sizing rule and the list
/// of balls. The set of balls is fixed once the engine spawns them.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// World parameters for the physics step.
    pub physics: PhysicsParams,
    /// How the ball diameter follows the viewport.
    pub size: SizeRule,
    /// One entry per ball, in spawn order.
    pub balls: Vec<BallAsset>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            physics: PhysicsParams::default(),
            size: SizeRule::default(),
            balls: default_balls(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. On error the
    /// configuration is left unchanged.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = parser();
        config
            .load(&self.config_path)
            .map_err(|reason| ConfigError::Load {
                path: self.config_path.clone(),
                reason,
            })?;
        self.apply(&config)?;

        info!(
            "Loaded config from {:?}: {}x{} window, fps={}, {} balls",
            self.config_path,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.balls.len()
        );
        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = parser();
        config
            .read(text.to_string())
            .map_err(|reason| ConfigError::Load {
                path: PathBuf::from("<string>"),
                reason,
            })?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), ConfigError> {
        let mut next = self.clone();

        // [window] section
        if let Some(width) = uint(config, "window", "width")? {
            next.window_width = width;
        }
        if let Some(height) = uint(config, "window", "height")? {
            next.window_height = height;
        }
        if let Some(fps) = uint(config, "window", "target_fps")? {
            next.target_fps = fps;
        }

        // [physics] section
        let physics = &mut next.physics;
        if let Some(v) = float(config, "physics", "bounce_damping")? {
            physics.bounce_damping = v;
        }
        if let Some(v) = float(config, "physics", "friction")? {
            physics.friction = v;
        }
        if let Some(v) = float(config, "physics", "repulsion_distance")? {
            physics.repulsion_distance = v;
        }
        if let Some(v) = float(config, "physics", "repulsion_force")? {
            physics.repulsion_force = v;
        }
        if let Some(v) = float(config, "physics", "random_speed")? {
            physics.random_speed = v;
        }
        if let Some(v) = float(config, "physics", "direction_change_interval")? {
            physics.direction_change_interval = v;
        }
        if let Some(v) = config
            .getbool("physics", "drift")
            .map_err(|e| ConfigError::invalid("physics", "drift", e))?
        {
            physics.drift = v;
        }
        if let Some(v) = float(config, "physics", "initial_rotation_speed")? {
            physics.initial_rotation_speed = v;
        }
        if let Some(v) = float(config, "physics", "max_velocity")? {
            physics.max_velocity = Some(v);
        }
        if let Some(v) = float(config, "physics", "max_rotation_speed")? {
            physics.max_rotation_speed = Some(v);
        }

        // [size] section
        if let Some(v) = float(config, "size", "vw")? {
            next.size.vw = v;
        }
        if let Some(v) = float(config, "size", "min")? {
            next.size.min = v;
        }
        if let Some(v) = float(config, "size", "max")? {
            next.size.max = v;
        }
        if let Some(v) = float(config, "size", "fixed")? {
            next.size.fixed = Some(v);
        }

        // [ball.*] sections
        let mut balls = Vec::new();
        for section in config.sections() {
            if !section.starts_with(BALL_SECTION_PREFIX) {
                continue;
            }
            let image = config
                .get(&section, "image")
                .ok_or_else(|| ConfigError::invalid(&section, "image", "missing"))?;
            let url = config
                .get(&section, "url")
                .ok_or_else(|| ConfigError::invalid(&section, "url", "missing"))?;
            balls.push(BallAsset::new(image, url));
        }
        if !balls.is_empty() {
            next.balls = balls;
        }

        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Check that every value is usable by the physics step.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        if !(0.0..=1.0).contains(&p.bounce_damping) {
            return Err(ConfigError::invalid(
                "physics",
                "bounce_damping",
                "must be within [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&p.friction) {
            return Err(ConfigError::invalid(
                "physics",
                "friction",
                "must be within [0, 1]",
            ));
        }
        if p.repulsion_distance <= 0.0 {
            return Err(ConfigError::invalid(
                "physics",
                "repulsion_distance",
                "must be positive",
            ));
        }
        if p.direction_change_interval < 0.0 {
            return Err(ConfigError::invalid(
                "physics",
                "direction_change_interval",
                "must not be negative",
            ));
        }
        if p.max_velocity.is_some_and(|v| v < 0.0) {
            return Err(ConfigError::invalid(
                "physics",
                "max_velocity",
                "must not be negative",
            ));
        }
        if p.max_rotation_speed.is_some_and(|v| v < 0.0) {
            return Err(ConfigError::invalid(
                "physics",
                "max_rotation_speed",
                "must not be negative",
            ));
        }
        if self.size.vw <= 0.0 {
            return Err(ConfigError::invalid("size", "vw", "must be positive"));
        }
        if self.size.min <= 0.0 || self.size.min > self.size.max {
            return Err(ConfigError::invalid(
                "size",
                "min",
                format!("must be positive and at most max ({})", self.size.max),
            ));
        }
        if self.size.fixed.is_some_and(|v| v <= 0.0) {
            return Err(ConfigError::invalid("size", "fixed", "must be positive"));
        }
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = parser();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [physics] section
        let p = &self.physics;
        config.set("physics", "bounce_damping", Some(p.bounce_damping.to_string()));
        config.set("physics", "friction", Some(p.friction.to_string()));
        config.set(
            "physics",
            "repulsion_distance",
            Some(p.repulsion_distance.to_string()),
        );
        config.set("physics", "repulsion_force", Some(p.repulsion_force.to_string()));
        config.set("physics", "random_speed", Some(p.random_speed.to_string()));
        config.set(
            "physics",
            "direction_change_interval",
            Some(p.direction_change_interval.to_string()),
        );
        config.set("physics", "drift", Some(p.drift.to_string()));
        config.set(
            "physics",
            "initial_rotation_speed",
            Some(p.initial_rotation_speed.to_string()),
        );
        if let Some(v) = p.max_velocity {
            config.set("physics", "max_velocity", Some(v.to_string()));
        }
        if let Some(v) = p.max_rotation_speed {
            config.set("physics", "max_rotation_speed", Some(v.to_string()));
        }

        // [size] section
        config.set("size", "vw", Some(self.size.vw.to_string()));
        config.set("size", "min", Some(self.size.min.to_string()));
        config.set("size", "max", Some(self.size.max.to_string()));
        if let Some(v) = self.size.fixed {
            config.set("size", "fixed", Some(v.to_string()));
        }

        // [ball.*] sections
        for (index, ball) in self.balls.iter().enumerate() {
            let section = format!("{BALL_SECTION_PREFIX}{index}");
            config.set(&section, "image", Some(ball.image.clone()));
            config.set(&section, "url", Some(ball.url.clone()));
        }

        config
            .write(&self.config_path)
            .map_err(|e| ConfigError::Load {
                path: self.config_path.clone(),
                reason: e.to_string(),
            })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

/// INI parser with comments only at the start of a line, so `#` fragments
/// and `;` query separators in urls survive.
fn parser() -> Ini {
    let mut defaults = Ini::new().defaults();
    defaults.enable_inline_comments = false;
    Ini::new_from_defaults(defaults)
}

fn uint(config: &Ini, section: &str, key: &str) -> Result<Option<u32>, ConfigError> {
    let value = config
        .getuint(section, key)
        .map_err(|e| ConfigError::invalid(section, key, e))?;
    value
        .map(|v| u32::try_from(v).map_err(|e| ConfigError::invalid(section, key, e.to_string())))
        .transpose()
}

fn float(config: &Ini, section: &str, key: &str) -> Result<Option<f32>, ConfigError> {
    config
        .getfloat(section, key)
        .map(|v| v.map(|v| v as f32))
        .map_err(|e| ConfigError::invalid(section, key, e))
}
