use adw::Application;
use directories::BaseDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sender::CommandSender;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub contacts_path: PathBuf,
    pub template_path: PathBuf,
    /// Token in the message text that is replaced by each recipient's name.
    pub placeholder: String,
    pub sender: CommandSender,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            contacts_path: PathBuf::from("contacts.txt"),
            template_path: PathBuf::from("text.txt"),
            placeholder: "имя".to_string(),
            sender: CommandSender::default(),
        }
    }
}

impl Settings {
    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("wa-image-sender.toml"))
    }

    pub fn load() -> Self {
        match Self::toml_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    // Missing file means defaults; a broken one is logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        let Ok(text) = fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str::<Settings>(&text) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Mutable state owned by the window for the lifetime of the process.
#[derive(Debug, Default)]
pub struct AppState {
    pub selected_image: Option<PathBuf>,
}

impl AppState {
    /// Replace the selection and return the text for the image label.
    pub fn select_image(&mut self, path: PathBuf) -> String {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        log::info!("image selected: {}", path.display());
        self.selected_image = Some(path);
        format!("Image selected: {}", name)
    }
}

pub fn build_ui(app: &Application) {
    let settings = Settings::load();
    crate::ui::main_window::show_main_window(app, settings);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.toml"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.placeholder, "имя");
        assert_eq!(settings.contacts_path, PathBuf::from("contacts.txt"));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        fs::write(
            &path,
            "placeholder = \"NAME\"\n[sender]\nprogram = \"wa-cli\"\n",
        )
        .unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.placeholder, "NAME");
        assert_eq!(settings.sender.program, "wa-cli");
        assert_eq!(settings.sender.args, CommandSender::default().args);
        assert_eq!(settings.template_path, PathBuf::from("text.txt"));
    }

    #[test]
    fn broken_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        fs::write(&path, "placeholder = [").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn reselecting_overwrites_and_labels_basename() {
        let mut state = AppState::default();
        assert_eq!(state.select_image(PathBuf::from("/pics/a.png")), "Image selected: a.png");
        assert_eq!(state.select_image(PathBuf::from("/pics/b.jpg")), "Image selected: b.jpg");
        assert_eq!(state.selected_image, Some(PathBuf::from("/pics/b.jpg")));
    }
}
