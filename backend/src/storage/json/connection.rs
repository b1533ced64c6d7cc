use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// JsonConnection manages the data directory holding the tracker document.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection rooted at `base_directory`, creating the
    /// directory if it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory under the user's
    /// Documents folder.
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir)
            .join("Documents")
            .join("GradeTracker");

        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Path of the document file inside the data directory.
    pub fn database_file_path(&self) -> PathBuf {
        self.base_directory.join("database.json")
    }

    /// The data directory this connection is rooted at.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}
