//! Game configuration resource.
//!
//! Manages window and drag settings loaded from an INI configuration file.
//! Provides defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//!
//! [camera]
//! zoom = 1.0
//!
//! [drag]
//! restrict_to_screen = true
//!
//! [scene]
//! path = ./assets/scene.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_CAMERA_ZOOM: f32 = 1.0;
const DEFAULT_RESTRICT_TO_SCREEN: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_SCENE_PATH: &str = "./assets/scene.json";

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Camera zoom applied to the centered camera.
    pub camera_zoom: f32,
    /// Clamp dragged maps so they never scroll past the viewport.
    pub restrict_to_screen: bool,
    /// Scene file spawned at startup.
    pub scene_path: PathBuf,
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
            camera_zoom: DEFAULT_CAMERA_ZOOM,
            restrict_to_screen: DEFAULT_RESTRICT_TO_SCREEN,
            scene_path: PathBuf::from(DEFAULT_SCENE_PATH),
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
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [camera] section
        if let Some(zoom) = config.getfloat("camera", "zoom").ok().flatten() {
            if zoom > 0.0 {
                self.camera_zoom = zoom as f32;
            } else {
                log::warn!("Ignoring non-positive camera zoom {}", zoom);
            }
        }

        // [drag] section
        if let Some(restrict) = config.getbool("drag", "restrict_to_screen").ok().flatten() {
            self.restrict_to_screen = restrict;
        }

        // [scene] section
        if let Some(path) = config.get("scene", "path") {
            self.scene_path = PathBuf::from(path);
        }

        info!(
            "Loaded config: {}x{} window, fps={}, zoom={}, restrict_to_screen={}, scene={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.camera_zoom,
            self.restrict_to_screen,
            self.scene_path.display()
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [camera] section
        config.set("camera", "zoom", Some(self.camera_zoom.to_string()));

        // [drag] section
        config.set(
            "drag",
            "restrict_to_screen",
            Some(self.restrict_to_screen.to_string()),
        );

        // [scene] section
        config.set(
            "scene",
            "path",
            Some(self.scene_path.to_string_lossy().into_owned()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Load the INI file, first writing the current settings to it when it
    /// does not exist yet.
    pub fn load_or_create(&mut self) -> Result<(), String> {
        if !self.config_path.exists() {
            info!("No config file at {:?}, writing defaults", self.config_path);
            self.save_to_file()?;
        }
        self.load_from_file()
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
