use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use playtime_core::error::PlaytimeError;
use playtime_core::settings::Settings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install location used by the default launcher on Windows.
pub const WINDOWS_LOG_DIR: &str =
    r"C:\Program Files\Roberts Space Industries\StarCitizen\LIVE\logbackups";

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// Output always goes to stderr. When `log_file` is given the same events are
/// appended to that file without ANSI colours.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

/// Map the CLI level names onto `tracing` directives.
fn level_directive(log_level: &str) -> String {
    let upper = log_level.to_uppercase();
    match upper.as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

// ── Log-directory discovery ────────────────────────────────────────────────────

/// Default install locations, most common first.
///
/// Besides the stock Windows path this covers the usual Wine prefix layout
/// used by Linux launchers.
pub fn default_log_dirs() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(WINDOWS_LOG_DIR)];
    if let Some(home) = dirs::home_dir() {
        candidates.push(
            home.join("Games")
                .join("star-citizen")
                .join("drive_c")
                .join("Program Files")
                .join("Roberts Space Industries")
                .join("StarCitizen")
                .join("LIVE")
                .join("logbackups"),
        );
    }
    candidates
}

/// Return the first default install location that exists.
pub fn discover_log_dir() -> Option<PathBuf> {
    first_existing_dir(default_log_dirs())
}

fn first_existing_dir(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|p| p.is_dir())
}

/// Pick the directory to scan.
///
/// An explicit or remembered `--log-dir` is returned as is, so a stale path
/// surfaces later as [`PlaytimeError::LogDirNotFound`]. Otherwise the default
/// install locations are probed.
pub fn resolve_log_dir(settings: &Settings) -> Result<PathBuf, PlaytimeError> {
    resolve_with(settings.log_dir.as_deref(), discover_log_dir)
}

fn resolve_with(
    configured: Option<&Path>,
    discover: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf, PlaytimeError> {
    if let Some(dir) = configured {
        return Ok(dir.to_path_buf());
    }
    discover().ok_or_else(|| {
        PlaytimeError::Config(
            "no log directory found; pass --log-dir or set SC_PLAYTIME_LOG_DIR".to_string(),
        )
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_level_directive_mapping() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive("Trace"), "trace");
    }

    #[test]
    fn test_default_log_dirs_includes_wine_prefix_under_home() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let candidates = default_log_dirs();

        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        assert_eq!(candidates[0], PathBuf::from(WINDOWS_LOG_DIR));
        assert!(candidates[1].starts_with(tmp.path()));
        assert!(candidates[1].ends_with("LIVE/logbackups"));
    }

    #[test]
    fn test_first_existing_dir_skips_missing_and_files() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("not-a-dir.log");
        std::fs::write(&file, "x").expect("write file");
        let dir = tmp.path().join("logbackups");
        std::fs::create_dir(&dir).expect("create dir");

        let found = first_existing_dir(vec![tmp.path().join("missing"), file, dir.clone()]);
        assert_eq!(found, Some(dir));
        assert_eq!(first_existing_dir(Vec::new()), None);
    }

    #[test]
    fn test_resolve_prefers_configured_dir() {
        let configured = PathBuf::from("/somewhere/logbackups");
        let resolved = resolve_with(Some(configured.as_path()), || {
            panic!("discovery must not run when a directory is configured")
        })
        .unwrap();
        assert_eq!(resolved, configured);
    }

    #[test]
    fn test_resolve_falls_back_to_discovery() {
        let tmp = TempDir::new().expect("tempdir");
        let found = tmp.path().to_path_buf();
        let resolved = resolve_with(None, || Some(found.clone())).unwrap();
        assert_eq!(resolved, found);
    }

    #[test]
    fn test_resolve_without_any_dir_is_config_error() {
        let err = resolve_with(None, || None).unwrap_err();
        assert!(matches!(err, PlaytimeError::Config(_)));
        assert!(err.to_string().contains("--log-dir"));
    }
}
