use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolves and creates the on-disk layout under the data directory.
#[derive(Debug, Clone)]
pub struct PathManager {
    root: PathBuf,
}

impl PathManager {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: data_dir.into(),
        }
    }

    /// Main data directory (`./data` by default).
    pub fn data_dir(&self) -> &Path {
        &self.root
    }

    /// Database directory (`<data>/db`).
    pub fn db_dir(&self) -> PathBuf {
        self.root.join("db")
    }

    /// Upload directory (`<data>/uploads`).
    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }

    /// SQLite URL for the default database file.
    pub fn default_database_url(&self) -> String {
        format!(
            "sqlite://{}",
            self.db_dir().join("switchboard.sqlite").to_string_lossy()
        )
    }

    /// Path an upload is stored at: `<uploads>/<uuid>_<filename>`.
    pub fn upload_path(&self, filename: &str) -> PathBuf {
        self.uploads_dir()
            .join(format!("{}_{}", uuid::Uuid::new_v4(), filename))
    }

    /// Creates the data, db and uploads directories if missing.
    pub fn init(&self) -> Result<(), std::io::Error> {
        for dir in [self.root.clone(), self.db_dir(), self.uploads_dir()] {
            if !dir.exists() {
                info!("Creating directory: {:?}", dir);
                fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}
