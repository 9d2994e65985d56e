pub mod cycle_time;
pub mod dedupe;
pub mod import;
pub mod init;
pub mod report;
pub mod stale;
pub mod status;
pub mod version;

use burndown_core::Settings;
use burndown_ledger::Paths;
use std::path::PathBuf;

/// Resolved locations shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub paths: Paths,
    pub settings_path: PathBuf,
}

impl Context {
    pub fn resolve(data_dir: Option<PathBuf>, settings: Option<PathBuf>) -> anyhow::Result<Self> {
        let paths = match data_dir {
            Some(dir) => Paths::with_root(dir),
            None => Paths::new()?,
        };
        let settings_path = settings.unwrap_or_else(|| paths.settings_file());
        Ok(Self {
            paths,
            settings_path,
        })
    }

    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        Ok(Settings::load_or_default(&self.settings_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_paths() {
        let ctx = Context::resolve(
            Some(PathBuf::from("/tmp/bd")),
            Some(PathBuf::from("/etc/bd.json")),
        )
        .unwrap();
        assert_eq!(ctx.paths.ledger_file(), PathBuf::from("/tmp/bd/daily_status.jsonl"));
        assert_eq!(ctx.settings_path, PathBuf::from("/etc/bd.json"));
    }

    #[test]
    #[serial]
    fn test_default_paths_follow_home() {
        let original_home = std::env::var("HOME").unwrap();
        let temp = TempDir::new().unwrap();

        unsafe { std::env::set_var("HOME", temp.path()) };
        let ctx = Context::resolve(None, None);
        unsafe { std::env::set_var("HOME", &original_home) };

        let ctx = ctx.unwrap();
        assert_eq!(ctx.paths.data_dir, temp.path().join(".burndown"));
        assert_eq!(ctx.settings_path, temp.path().join(".burndown/settings.json"));
    }
}
