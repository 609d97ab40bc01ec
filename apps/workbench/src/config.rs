use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::{DayId, Part};

pub const CONFIG_PATH_ENV: &str = "AOC_WORKBENCH_CONFIG";
const CONFIG_FILE_NAME: &str = "workbench.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub default_day: DayId,
    pub default_part: Part,
    pub initial_speed: f32,
    pub input_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_day: DayId(1),
            default_part: Part::One,
            initial_speed: dial::playback::SpeedSetting::DEFAULT.value(),
            input_path: None,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    default_day: Option<toml::Value>,
    default_part: Option<toml::Value>,
    initial_speed: Option<toml::Value>,
    input_path: Option<String>,
    log_filter: Option<String>,
}

/// Settings plus the problems met while resolving them. Loading happens
/// before logging is installed, so the caller reports `warnings` later.
#[derive(Debug, Default)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

pub fn load_settings() -> LoadedSettings {
    let path = std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .or_else(default_config_path);
    load_settings_from(path.as_deref(), |name| std::env::var(name).ok())
}

/// `./workbench.toml` when present, otherwise the per-user config dir.
fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir().map(|dir| dir.join("aoc_workbench").join(CONFIG_FILE_NAME))
}

pub fn load_settings_from(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> LoadedSettings {
    let mut loaded = LoadedSettings::default();

    if let Some(path) = path {
        match fs::read_to_string(path) {
            Ok(raw) => {
                match toml::from_str::<FileSettings>(&raw) {
                    Ok(file_cfg) => apply_file(&mut loaded, file_cfg),
                    Err(err) => loaded
                        .warnings
                        .push(format!("ignoring malformed {}: {err}", path.display())),
                }
                loaded.source = Some(path.to_path_buf());
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => loaded
                .warnings
                .push(format!("could not read {}: {err}", path.display())),
        }
    }

    apply_env(&mut loaded, env);
    loaded.settings.initial_speed = loaded.settings.initial_speed.clamp(0.0, 1.0);
    loaded
}

fn apply_file(loaded: &mut LoadedSettings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.default_day {
        set_day(loaded, &value_text(&v), "default_day");
    }
    if let Some(v) = file_cfg.default_part {
        set_part(loaded, &value_text(&v), "default_part");
    }
    if let Some(v) = file_cfg.initial_speed {
        set_speed(loaded, &value_text(&v), "initial_speed");
    }
    if let Some(v) = file_cfg.input_path {
        loaded.settings.input_path = Some(PathBuf::from(v));
    }
    if let Some(v) = file_cfg.log_filter {
        loaded.settings.log_filter = v;
    }
}

fn apply_env(loaded: &mut LoadedSettings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("AOC__DEFAULT_DAY") {
        set_day(loaded, &v, "AOC__DEFAULT_DAY");
    }
    if let Some(v) = env("AOC__DEFAULT_PART") {
        set_part(loaded, &v, "AOC__DEFAULT_PART");
    }
    if let Some(v) = env("AOC__INITIAL_SPEED") {
        set_speed(loaded, &v, "AOC__INITIAL_SPEED");
    }
    if let Some(v) = env("AOC__INPUT_PATH") {
        loaded.settings.input_path = (!v.trim().is_empty()).then(|| PathBuf::from(v));
    }
    if let Some(v) = env("AOC__LOG_FILTER") {
        loaded.settings.log_filter = v;
    }
}

// Integers, floats and strings all read back the way a user would type them.
fn value_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn set_day(loaded: &mut LoadedSettings, raw: &str, key: &str) {
    match raw.trim().parse::<u8>() {
        Ok(day) if (1..=25).contains(&day) => loaded.settings.default_day = DayId(day),
        _ => loaded.warnings.push(format!("{key}: '{raw}' is not a day in 1..=25")),
    }
}

fn set_part(loaded: &mut LoadedSettings, raw: &str, key: &str) {
    match Part::parse(raw) {
        Some(part) => loaded.settings.default_part = part,
        None => loaded.warnings.push(format!("{key}: '{raw}' is not a part")),
    }
}

fn set_speed(loaded: &mut LoadedSettings, raw: &str, key: &str) {
    match raw.trim().parse::<f32>() {
        Ok(speed) if speed.is_finite() => loaded.settings.initial_speed = speed,
        _ => loaded.warnings.push(format!("{key}: '{raw}' is not a number")),
    }
}

/// Contents of the configured input file, if one is set.
pub fn read_initial_input(settings: &Settings) -> anyhow::Result<Option<String>> {
    let Some(path) = settings.input_path.as_deref() else {
        return Ok(None);
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read puzzle input '{}'", path.display()))?;
    Ok(Some(text))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
