//! Path resolution for ledger, settings and report files

use std::path::PathBuf;

/// Resolves standard paths under the data directory (`~/.burndown`)
#[derive(Debug, Clone)]
pub struct Paths {
    pub data_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths resolver rooted at `$HOME/.burndown`
    pub fn new() -> std::io::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self::with_root(home.join(".burndown")))
    }

    /// Paths rooted at an explicit data directory
    pub fn with_root(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Get settings.json path
    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }

    /// Get the snapshot ledger path
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir.join("daily_status.jsonl")
    }

    /// Get sprints.json path (iteration definitions)
    pub fn sprints_file(&self) -> PathBuf {
        self.data_dir.join("sprints.json")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join("reports")
    }

    /// Report path for a sprint, with the name flattened into a file stem
    pub fn report_path(&self, sprint_name: &str) -> PathBuf {
        self.reports_dir()
            .join(format!("{}.json", file_stem(sprint_name)))
    }

    pub fn exists(&self) -> bool {
        self.data_dir.is_dir()
    }
}

fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    if stem.is_empty() {
        "sprint".to_string()
    } else {
        stem
    }
}
