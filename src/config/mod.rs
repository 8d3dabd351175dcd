use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory holding the table file when none is given
pub const DEFAULT_DATA_DIR: &str = "student_data";

/// Table file name when none is given
pub const DEFAULT_FILE_NAME: &str = "students_data.csv";

/// Where the student table is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Full path of the table file
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the data directory if it does not exist yet
    pub fn prepare(&self) -> io::Result<PathBuf> {
        if !self.data_dir.exists() {
            log::info!("Creating data directory {}", self.data_dir.display());
        }
        fs::create_dir_all(&self.data_dir)?;
        Ok(self.data_file())
    }
}
