use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ErrorStringExt;

pub const DEFAULT_WIDTH: f32 = 800.0;
pub const DEFAULT_HEIGHT: f32 = 800.0;

/// Window geometry in logical points, restored on the next start.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WindowState {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            maximized: false,
        }
    }
}

impl WindowState {
    pub fn from_viewport(info: &egui::ViewportInfo) -> Option<Self> {
        // minimized windows report a collapsed rect far off-screen
        if info.minimized == Some(true) {
            return None;
        }
        let inner = info.inner_rect?;
        if inner.width() < 1.0 || inner.height() < 1.0 {
            return None;
        }
        let position = info.outer_rect.map(|rect| rect.min);
        Some(Self {
            x: position.map(|pos| pos.x),
            y: position.map(|pos| pos.y),
            width: inner.width(),
            height: inner.height(),
            maximized: info.maximized == Some(true),
        })
    }

    // while maximized only the flag changes, the normal bounds are kept
    pub fn track(&mut self, info: &egui::ViewportInfo) {
        match Self::from_viewport(info) {
            Some(state) if state.maximized => self.maximized = true,
            Some(state) => *self = state,
            None => (),
        }
    }

    pub fn apply(&self, builder: egui::ViewportBuilder) -> egui::ViewportBuilder {
        let builder = builder
            .with_inner_size([self.width, self.height])
            .with_maximized(self.maximized);
        match (self.x, self.y) {
            (Some(x), Some(y)) => builder.with_position([x, y]),
            _ => builder,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowState,
    // start directory for the open dialog
    pub last_dir: Option<PathBuf>,
}

impl ViewerConfig {
    pub fn load(path: Option<PathBuf>) -> Result<Self, String> {
        // if no path is given, load from home directory
        let path = match path {
            Some(path) => path,
            None => default_config_path()
                .err_to_string("ERROR: could not find default config file path")?,
        };
        let config_raw = fs::read_to_string(&path).err_to_string(&format!(
            "Could not read contents of config file {}",
            path.to_string_lossy()
        ))?;
        serde_json::from_str::<ViewerConfig>(&config_raw).err_to_string(&format!(
            "ERROR: could not read config file {}",
            path.to_string_lossy(),
        ))
    }

    pub fn load_or_default() -> Self {
        Self::load(None).unwrap_or_else(|msg| {
            log::warn!("{msg}, using default window state");
            Self::default()
        })
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<(), String> {
        let path = match path {
            Some(path) => path,
            None => default_config_path()
                .err_to_string("ERROR: could not find default config file path")?,
        };
        let state =
            serde_json::to_string_pretty(&self).err_to_string("ERROR: could not serialize config")?;
        fs::write(&path, state).err_to_string(&format!(
            "ERROR: could not write config {}",
            path.to_string_lossy()
        ))
    }
}

fn default_config_path() -> Result<PathBuf, std::env::VarError> {
    let home_path = std::env::var("HOME")?;
    Ok(PathBuf::from(home_path).join(".mainsequence-viewer.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "mainsequence-viewer-config-{}-{}.json",
            std::process::id(),
            name
        ))
    }

    #[test]
    fn saved_config_loads_back() {
        let path = temp_config("saved");
        let config = ViewerConfig {
            window: WindowState {
                x: Some(12.0),
                y: Some(40.0),
                width: 1024.0,
                height: 700.0,
                maximized: false,
            },
            last_dir: Some(PathBuf::from("/tmp/reports")),
        };
        config.save(Some(path.clone())).unwrap();
        let loaded = ViewerConfig::load(Some(path.clone())).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let path = temp_config("partial");
        fs::write(&path, r#"{"last_dir": "/data"}"#).unwrap();
        let loaded = ViewerConfig::load(Some(path.clone())).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded.window, WindowState::default());
        assert_eq!(loaded.last_dir, Some(PathBuf::from("/data")));
    }

    #[test]
    fn missing_config_is_an_error_message() {
        let msg = ViewerConfig::load(Some(temp_config("missing"))).unwrap_err();
        assert!(msg.starts_with("Could not read contents of config file"));
    }

    #[test]
    fn garbage_config_is_an_error_message() {
        let path = temp_config("garbage");
        fs::write(&path, "not json").unwrap();
        let msg = ViewerConfig::load(Some(path.clone())).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(msg.starts_with("ERROR: could not read config file"));
    }

    #[test]
    fn default_window_has_no_position() {
        let builder = WindowState::default().apply(egui::ViewportBuilder::default());
        assert_eq!(
            builder.inner_size,
            Some(egui::vec2(DEFAULT_WIDTH, DEFAULT_HEIGHT))
        );
        assert_eq!(builder.position, None);
    }

    #[test]
    fn restored_window_keeps_position() {
        let state = WindowState {
            x: Some(100.0),
            y: Some(50.0),
            width: 640.0,
            height: 480.0,
            maximized: false,
        };
        let builder = state.apply(egui::ViewportBuilder::default());
        assert_eq!(builder.position, Some(egui::pos2(100.0, 50.0)));
        assert_eq!(builder.inner_size, Some(egui::vec2(640.0, 480.0)));
    }

    fn viewport(min: egui::Pos2, size: egui::Vec2) -> egui::ViewportInfo {
        let rect = egui::Rect::from_min_size(min, size);
        egui::ViewportInfo {
            inner_rect: Some(rect),
            outer_rect: Some(rect),
            minimized: Some(false),
            maximized: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn minimized_window_is_not_recorded() {
        let mut info = viewport(egui::pos2(-32000.0, -32000.0), egui::Vec2::ZERO);
        info.minimized = Some(true);
        assert_eq!(WindowState::from_viewport(&info), None);

        let mut state = WindowState::default();
        state.track(&info);
        assert_eq!(state, WindowState::default());
    }

    #[test]
    fn collapsed_window_is_not_recorded() {
        let info = viewport(egui::pos2(10.0, 10.0), egui::Vec2::ZERO);
        assert_eq!(WindowState::from_viewport(&info), None);
    }

    #[test]
    fn maximized_window_keeps_normal_bounds() {
        let mut state = WindowState::default();
        state.track(&viewport(egui::pos2(30.0, 20.0), egui::vec2(900.0, 600.0)));
        assert_eq!(state.width, 900.0);

        let mut info = viewport(egui::pos2(0.0, 0.0), egui::vec2(1920.0, 1080.0));
        info.maximized = Some(true);
        state.track(&info);
        assert!(state.maximized);
        assert_eq!((state.x, state.y), (Some(30.0), Some(20.0)));
        assert_eq!((state.width, state.height), (900.0, 600.0));
    }

    #[test]
    fn maximized_flag_is_restored() {
        let state = WindowState {
            maximized: true,
            ..Default::default()
        };
        let builder = state.apply(egui::ViewportBuilder::default());
        assert_eq!(builder.maximized, Some(true));
    }

    #[test]
    fn config_without_maximized_flag_loads() {
        let path = temp_config("legacy");
        fs::write(
            &path,
            r#"{"window": {"x": 1.0, "y": 2.0, "width": 300.0, "height": 200.0}}"#,
        )
        .unwrap();
        let loaded = ViewerConfig::load(Some(path.clone())).unwrap();
        fs::remove_file(&path).ok();
        assert!(!loaded.window.maximized);
        assert_eq!(loaded.window.width, 300.0);
    }

    #[test]
    fn viewport_without_rects_is_ignored() {
        assert_eq!(WindowState::from_viewport(&egui::ViewportInfo::default()), None);
    }
}
