use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};
use wallpaper_core::{TimeWindow, DEFAULT_CHANNEL};
use wallpaper_engine::EngineConfig;

use super::cli::Cli;

const APP_DIR: &str = "top_wallpaper";
const CONFIG_FILENAME: &str = "config.ron";

/// On-disk configuration. Every field is optional; `Some(..)` may be omitted.
///
/// ```ron
/// (
///     subreddit: "wallpapers+EarthPorn",
///     time: "week",
///     min_width: 2560,
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub subreddit: Option<String>,
    pub time: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub min_width: Option<u32>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_image_bytes: Option<u64>,
    pub user_agent: Option<String>,
    pub source_base_url: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub channel: String,
    pub window: TimeWindow,
    pub offline: bool,
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
    pub engine: EngineConfig,
    /// Problems found while resolving, logged once the logger is up.
    pub warnings: Vec<String>,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// `<Pictures>/Wallpapers`, falling back to `~/Pictures/Wallpapers`, then `./Wallpapers`.
pub fn default_cache_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Wallpapers")
}

/// Reads a config file. A missing file is `Ok(None)`.
pub fn load_file_config(path: &Path) -> anyhow::Result<Option<FileConfig>> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };

    let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
    let config = options
        .from_str::<FileConfig>(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(Some(config))
}

/// Merges CLI flags over the config file over built-in defaults.
///
/// A broken config file is not fatal: its problem is recorded in
/// `Settings::warnings` and defaults are used instead.
pub fn resolve_settings(cli: &Cli) -> Settings {
    let mut warnings = Vec::new();

    let file = match cli.config.clone().or_else(default_config_path) {
        Some(path) => match load_file_config(&path) {
            Ok(config) => config.unwrap_or_default(),
            Err(err) => {
                warnings.push(format!("{err:#}; using defaults"));
                FileConfig::default()
            }
        },
        None => FileConfig::default(),
    };

    merge(cli, file, warnings)
}

fn merge(cli: &Cli, file: FileConfig, mut warnings: Vec<String>) -> Settings {
    let channel = cli
        .subreddit
        .clone()
        .or(file.subreddit)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CHANNEL.to_string());

    let file_window = file.time.and_then(|raw| match raw.parse::<TimeWindow>() {
        Ok(window) => Some(window),
        Err(err) => {
            warnings.push(format!("config: {err}; using default"));
            None
        }
    });
    let window = cli.time.or(file_window).unwrap_or_default();

    let cache_dir = cli
        .cache_dir
        .clone()
        .or(file.cache_dir)
        .unwrap_or_else(default_cache_dir);

    let mut engine = EngineConfig::default_with_cache(cache_dir);
    if let Some(min_width) = cli.min_width.or(file.min_width) {
        engine.size_policy.min_width = min_width;
    }
    if let Some(secs) = file.connect_timeout_secs {
        engine.fetch.connect_timeout = Duration::from_secs(secs);
        engine.source.connect_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = file.request_timeout_secs {
        engine.fetch.request_timeout = Duration::from_secs(secs);
        engine.source.request_timeout = Duration::from_secs(secs);
    }
    if let Some(max) = file.max_image_bytes {
        engine.fetch.max_bytes = max;
    }
    if let Some(agent) = file.user_agent {
        engine.fetch.user_agent = agent.clone();
        engine.source.user_agent = Some(agent);
    }
    if let Some(base_url) = file.source_base_url {
        engine.source.base_url = base_url;
    }

    Settings {
        channel,
        window,
        offline: cli.offline,
        verbose: cli.verbose,
        log_file: file.log_file,
        engine,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;

    use tempfile::TempDir;
    use wallpaper_core::{TimeWindow, DEFAULT_CHANNEL};

    use super::{load_file_config, resolve_settings, Cli, FileConfig};

    fn cli_with_config(path: PathBuf) -> Cli {
        Cli {
            config: Some(path),
            ..Cli::default()
        }
    }

    #[test]
    fn missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_file_config(&temp.path().join("nope.ron")).unwrap(), None);
    }

    #[test]
    fn parses_without_some_wrappers() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ron");
        fs::write(
            &path,
            r#"(subreddit: "EarthPorn", time: "month", min_width: 2560, request_timeout_secs: 5)"#,
        )
        .unwrap();

        let config = load_file_config(&path).unwrap().unwrap();
        assert_eq!(
            config,
            FileConfig {
                subreddit: Some("EarthPorn".to_string()),
                time: Some("month".to_string()),
                min_width: Some(2560),
                request_timeout_secs: Some(5),
                ..FileConfig::default()
            }
        );
    }

    #[test]
    fn cli_flags_override_file_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ron");
        fs::write(
            &path,
            r#"(subreddit: "EarthPorn", time: "month", cache_dir: "/srv/walls", min_width: 2560)"#,
        )
        .unwrap();

        let cli = Cli {
            subreddit: Some("wallpapers".to_string()),
            min_width: Some(1000),
            ..cli_with_config(path)
        };
        let settings = resolve_settings(&cli);
        assert_eq!(settings.channel, "wallpapers");
        assert_eq!(settings.window, TimeWindow::Month);
        assert_eq!(settings.engine.cache_dir, PathBuf::from("/srv/walls"));
        assert_eq!(settings.engine.size_policy.min_width, 1000);
        assert!(settings.warnings.is_empty());
    }

    #[test]
    fn broken_file_falls_back_to_defaults_with_warning() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ron");
        fs::write(&path, "(subreddit: ").unwrap();

        let settings = resolve_settings(&cli_with_config(path));
        assert_eq!(settings.channel, DEFAULT_CHANNEL);
        assert_eq!(settings.window, TimeWindow::Day);
        assert_eq!(settings.engine.size_policy.min_width, 1920);
        assert_eq!(settings.warnings.len(), 1);
    }

    #[test]
    fn bad_window_in_file_is_a_warning() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ron");
        fs::write(&path, r#"(time: "decade", connect_timeout_secs: 3)"#).unwrap();

        let settings = resolve_settings(&cli_with_config(path));
        assert_eq!(settings.window, TimeWindow::Day);
        assert_eq!(settings.engine.fetch.connect_timeout, Duration::from_secs(3));
        assert_eq!(settings.engine.source.connect_timeout, Duration::from_secs(3));
        assert_eq!(settings.warnings.len(), 1);
    }
}
