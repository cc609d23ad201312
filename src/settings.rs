//! Viewer settings persisted in the OS config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::Layout;

/// User-editable settings. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub canvas_width: f64,
    pub left_margin: f64,
    pub timeline_height: f64,
    pub constraint_height: f64,
    pub color_bar_height: f64,
    pub major_tick_period: u32,
    /// Schedule feed to open at startup; the bundled sample is used when unset.
    pub dataset_path: Option<PathBuf>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        let layout = Layout::default();
        Self {
            canvas_width: layout.canvas_width,
            left_margin: layout.left_margin,
            timeline_height: layout.timeline_height,
            constraint_height: layout.constraint_height,
            color_bar_height: layout.color_bar_height,
            major_tick_period: layout.major_tick_period,
            dataset_path: None,
        }
    }
}

impl ViewerSettings {
    pub fn layout(&self) -> Layout {
        let heights = [
            self.timeline_height,
            self.constraint_height,
            self.color_bar_height,
        ];
        let sizes_ok = self.canvas_width.is_finite()
            && self.left_margin.is_finite()
            && self.left_margin >= 0.0
            && self.canvas_width > self.left_margin
            && heights.iter().all(|h| h.is_finite() && *h > 0.0);
        if !sizes_ok {
            log::warn!(
                "Ignoring layout: width {}, margin {}, heights {:?}",
                self.canvas_width,
                self.left_margin,
                heights
            );
            return Layout::default();
        }
        Layout {
            canvas_width: self.canvas_width,
            left_margin: self.left_margin,
            timeline_height: self.timeline_height,
            constraint_height: self.constraint_height,
            color_bar_height: self.color_bar_height,
            major_tick_period: self.major_tick_period.max(1),
        }
    }

    /// Directory holding `settings.json`.
    pub fn config_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "ConstraintTimeline")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn settings_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Unreadable settings {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        self.save_to(&Self::settings_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Err(e) = std::fs::write(path, json) {
                log::warn!("Failed to save settings {:?}: {}", path, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "left_margin": 120.0 }"#).unwrap();

        let settings = ViewerSettings::load_from(&path);
        assert_eq!(settings.left_margin, 120.0);
        assert_eq!(settings.canvas_width, 1500.0);
        assert_eq!(settings.layout().plot_width(), 1380.0);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = ViewerSettings {
            dataset_path: Some(PathBuf::from("/data/schedule.json")),
            ..Default::default()
        };
        settings.save_to(&path);
        assert_eq!(ViewerSettings::load_from(&path), settings);
    }

    #[test]
    fn invalid_geometry_falls_back() {
        let settings = ViewerSettings {
            canvas_width: 50.0,
            ..Default::default()
        };
        assert_eq!(settings.layout(), Layout::default());
        assert_eq!(ViewerSettings::load_from(Path::new("/nope.json")), ViewerSettings::default());
    }

    #[test]
    fn non_finite_or_flat_geometry_falls_back() {
        let broken = [
            ViewerSettings {
                canvas_width: f64::NAN,
                ..Default::default()
            },
            ViewerSettings {
                left_margin: f64::INFINITY,
                ..Default::default()
            },
            ViewerSettings {
                constraint_height: 0.0,
                ..Default::default()
            },
            ViewerSettings {
                timeline_height: -18.0,
                ..Default::default()
            },
            ViewerSettings {
                color_bar_height: f64::NAN,
                ..Default::default()
            },
        ];
        for settings in broken {
            assert_eq!(settings.layout(), Layout::default(), "{:?}", settings);
        }

        let taller = ViewerSettings {
            constraint_height: 30.0,
            ..Default::default()
        };
        assert_eq!(taller.layout().constraint_height, 30.0);
    }
}
