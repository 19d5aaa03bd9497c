//! Display options resource.
//!
//! Holds the player-facing display settings (fullscreen, resolution, vsync),
//! the list of resolutions the player can cycle through, and the INI file the
//! settings persist to.
//!
//! # Configuration File Format
//!
//! ```ini
//! [display]
//! fullscreen = false
//! vsync = true
//! res_w = 960
//! res_h = 540
//! ```
//!
//! # Resolution cycling
//!
//! The selectable list is whatever the host reports plus three guaranteed
//! entries (960x540, 1280x720, 1920x1080), kept ordered by width then height.
//! The largest entry is only reachable while fullscreen.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_WINDOWED_WIDTH: u32 = 960;
const DEFAULT_WINDOWED_HEIGHT: u32 = 540;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const GUARANTEED_RESOLUTIONS: [Resolution; 3] = [
    Resolution::new(DEFAULT_WINDOWED_WIDTH, DEFAULT_WINDOWED_HEIGHT),
    Resolution::new(1280, 720),
    Resolution::new(1920, 1080),
];
const ON: &str = "ON";
const OFF: &str = "OFF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Resolution { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A user-changeable display option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Fullscreen,
    Resolution,
    Vsync,
}

impl OptionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::Fullscreen => "FULLSCREEN",
            OptionKey::Resolution => "RESOLUTION",
            OptionKey::Vsync => "VSYNC",
        }
    }
}

impl FromStr for OptionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FULLSCREEN" => Ok(OptionKey::Fullscreen),
            "RESOLUTION" => Ok(OptionKey::Resolution),
            "VSYNC" => Ok(OptionKey::Vsync),
            other => Err(format!("Unknown display option: {}", other)),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index at which `res` keeps `list` ordered by width, then height.
pub fn index_to_insert(res: Resolution, list: &[Resolution]) -> usize {
    list.iter()
        .position(|r| r.width > res.width || (r.width == res.width && r.height > res.height))
        .unwrap_or(list.len())
}

/// Display settings resource.
#[derive(Resource, Debug, Clone)]
pub struct DisplayOptions {
    pub fullscreen: bool,
    pub resolution: Resolution,
    pub vsync: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
    resolutions: Vec<Resolution>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayOptions {
    /// Windowed 960x540 with vsync, and only the guaranteed resolutions selectable.
    pub fn new() -> Self {
        Self::with_host_resolutions(Vec::new())
    }

    /// Same defaults, with the host's supported resolutions added to the
    /// selectable list.
    pub fn with_host_resolutions(host: Vec<Resolution>) -> Self {
        let mut resolutions = host;
        for res in GUARANTEED_RESOLUTIONS {
            if !resolutions.contains(&res) {
                let index = index_to_insert(res, &resolutions);
                resolutions.insert(index, res);
            }
        }
        Self {
            fullscreen: DEFAULT_FULLSCREEN,
            resolution: Resolution::new(DEFAULT_WINDOWED_WIDTH, DEFAULT_WINDOWED_HEIGHT),
            vsync: DEFAULT_VSYNC,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            resolutions,
        }
    }

    /// Builder: use a custom config file path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    /// Apply one step of change to `key`. `dir` only matters for the resolution.
    pub fn change_value(&mut self, key: OptionKey, dir: i32) {
        match key {
            OptionKey::Fullscreen => self.change_fullscreen(),
            OptionKey::Resolution => self.change_resolution(dir),
            OptionKey::Vsync => self.vsync = !self.vsync,
        }
        debug!("{} -> {}", key, self.display_suffix(key));
    }

    /// Text shown next to the option name in a menu.
    pub fn display_suffix(&self, key: OptionKey) -> String {
        let on_off = |flag: bool| (if flag { ON } else { OFF }).to_string();
        match key {
            OptionKey::Fullscreen => on_off(self.fullscreen),
            OptionKey::Resolution => self.resolution.to_string(),
            OptionKey::Vsync => on_off(self.vsync),
        }
    }

    fn change_fullscreen(&mut self) {
        if self.fullscreen {
            self.resolution = Resolution::new(DEFAULT_WINDOWED_WIDTH, DEFAULT_WINDOWED_HEIGHT);
            self.fullscreen = false;
        } else {
            if let Some(largest) = self.resolutions.last() {
                self.resolution = *largest;
            }
            self.fullscreen = true;
        }
    }

    fn change_resolution(&mut self, dir: i32) {
        let len = self.resolutions.len() as i64;
        let current = self
            .resolutions
            .iter()
            .position(|r| *r == self.resolution)
            .map_or(len, |i| i as i64);

        let max = if self.fullscreen { len } else { len - 1 };
        if max <= 0 {
            return;
        }
        let mut index = current + dir as i64;
        if index >= max {
            index = 0;
        } else if index < 0 {
            index = max - 1;
        }
        self.resolution = self.resolutions[index as usize];
    }

    /// Load options from the INI file.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        if let Some(fullscreen) = config.getbool("display", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }
        if let Some(vsync) = config.getbool("display", "vsync").ok().flatten() {
            self.vsync = vsync;
        }
        if let Some(width) = config.getuint("display", "res_w").ok().flatten() {
            self.resolution.width = width as u32;
        }
        if let Some(height) = config.getuint("display", "res_h").ok().flatten() {
            self.resolution.height = height as u32;
        }

        info!(
            "Loaded display options: {} fullscreen={}, vsync={}",
            self.resolution, self.fullscreen, self.vsync
        );

        Ok(())
    }

    /// Save options to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("display", "fullscreen", Some(self.fullscreen.to_string()));
        config.set("display", "vsync", Some(self.vsync.to_string()));
        config.set("display", "res_w", Some(self.resolution.width.to_string()));
        config.set("display", "res_h", Some(self.resolution.height.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved display options to {:?}", self.config_path);

        Ok(())
    }
}
