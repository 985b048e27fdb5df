//! Where comparison videos are written, and how the host refers to them.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Host storage area an output file lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Temp,
    Output,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Temp => "temp",
            StorageType::Output => "output",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-addressable handle to a written file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewReference {
    pub filename: String,
    pub storage: StorageType,
    pub subfolder: String,
}

impl ViewReference {
    /// Retrieval path the frontend loads the file from
    pub fn url(&self) -> String {
        format!(
            "/view?filename={}&type={}&subfolder={}",
            self.filename, self.storage, self.subfolder
        )
    }
}

/// Resolves output locations for encoded comparison videos
///
/// Hosts provide their own implementation; [`TempDirLocator`] covers
/// standalone use and tests.
pub trait OutputLocator {
    /// Directory new files are written into
    fn output_dir(&self) -> &Path;

    fn storage_type(&self) -> StorageType {
        StorageType::Temp
    }

    fn subfolder(&self) -> &str {
        ""
    }

    /// Full path for a file name inside [`output_dir`](Self::output_dir)
    fn path_for(&self, filename: &str) -> PathBuf {
        self.output_dir().join(filename)
    }

    /// Reference the host uses to serve `filename`
    fn reference(&self, filename: &str) -> ViewReference {
        ViewReference {
            filename: filename.to_string(),
            storage: self.storage_type(),
            subfolder: self.subfolder().to_string(),
        }
    }
}

/// Writes into a plain directory, the OS temp dir unless told otherwise
#[derive(Debug, Clone)]
pub struct TempDirLocator {
    dir: PathBuf,
    subfolder: String,
}

impl TempDirLocator {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            subfolder: String::new(),
        }
    }

    pub fn with_subfolder<S: Into<String>>(mut self, subfolder: S) -> Self {
        self.subfolder = subfolder.into();
        self
    }
}

impl Default for TempDirLocator {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl OutputLocator for TempDirLocator {
    fn output_dir(&self) -> &Path {
        &self.dir
    }

    fn subfolder(&self) -> &str {
        &self.subfolder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_url() {
        let locator = TempDirLocator::new("/tmp/out");
        let reference = locator.reference("video_compare_a_1234abcd.mp4");

        assert_eq!(
            reference.url(),
            "/view?filename=video_compare_a_1234abcd.mp4&type=temp&subfolder="
        );
    }

    #[test]
    fn test_subfolder_and_path() {
        let locator = TempDirLocator::new("/tmp/out").with_subfolder("compare");
        assert_eq!(locator.path_for("x.mp4"), PathBuf::from("/tmp/out/x.mp4"));
        assert!(locator.reference("x.mp4").url().ends_with("&subfolder=compare"));
    }
}
