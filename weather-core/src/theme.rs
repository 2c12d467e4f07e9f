use std::{fmt, path::PathBuf};

use anyhow::Result;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the theme preference lives between runs.
pub trait ThemeStore: Send + Sync {
    fn get(&self) -> Theme;
    fn set(&self, theme: Theme) -> Result<()>;
}

/// Flip the stored theme and persist it, returning the new one.
pub fn toggle_stored<T: ThemeStore + ?Sized>(store: &T) -> Result<Theme> {
    let next = store.get().toggled();
    store.set(next)?;
    Ok(next)
}

/// Keeps the preference in the `theme` key of the config file.
#[derive(Debug, Clone)]
pub struct ConfigThemeStore {
    path: PathBuf,
}

impl ConfigThemeStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_default_location() -> Result<Self> {
        Ok(Self::new(Config::config_file_path()?))
    }
}

impl ThemeStore for ConfigThemeStore {
    fn get(&self) -> Theme {
        match Config::load_from(&self.path) {
            Ok(cfg) => cfg.theme,
            Err(err) => {
                tracing::warn!(error = %err, "could not read theme preference, using default");
                Theme::default()
            }
        }
    }

    fn set(&self, theme: Theme) -> Result<()> {
        let mut cfg = Config::load_from(&self.path)?;
        cfg.theme = theme;
        cfg.save_to(&self.path)
    }
}

#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    theme: Mutex<Theme>,
}

impl MemoryThemeStore {
    pub fn new(theme: Theme) -> Self {
        Self { theme: Mutex::new(theme) }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn get(&self) -> Theme {
        *self.theme.lock()
    }

    fn set(&self, theme: Theme) -> Result<()> {
        *self.theme.lock() = theme;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_two_themes() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn toggle_stored_persists_the_flip() {
        let store = MemoryThemeStore::default();
        assert_eq!(toggle_stored(&store).expect("toggle"), Theme::Dark);
        assert_eq!(store.get(), Theme::Dark);
        assert_eq!(toggle_stored(&store).expect("toggle"), Theme::Light);
        assert_eq!(store.get(), Theme::Light);
    }

    #[test]
    fn config_store_defaults_to_light() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigThemeStore::new(dir.path().join("config.toml"));
        assert_eq!(store.get(), Theme::Light);
    }

    #[test]
    fn config_store_persists_without_touching_other_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let cfg = Config { api_key: Some("KEY".into()), ..Config::default() };
        cfg.save_to(&path).expect("save");

        let store = ConfigThemeStore::new(path.clone());
        store.set(Theme::Dark).expect("set");

        assert_eq!(ConfigThemeStore::new(path.clone()).get(), Theme::Dark);
        assert_eq!(Config::load_from(&path).expect("load").api_key.as_deref(), Some("KEY"));
    }

    #[test]
    fn unreadable_config_falls_back_to_light() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").expect("write");

        assert_eq!(ConfigThemeStore::new(path).get(), Theme::Light);
    }
}
