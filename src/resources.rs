// ABOUTME: Resource handling for the premark application
// ABOUTME: Resolves inline text, file paths and open streams to text, and locates bundled package data

use crate::errors::{PremarkError, Result};
use log::{debug, info};
use std::env;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Prefix used in config values to reference files in the package data directory.
pub const PACKAGE_PLACEHOLDER: &str = "{{premark}}";

/// Environment variable that relocates the package data directory.
pub const DATA_DIR_ENV: &str = "PREMARK_DATA_DIR";

/// Something that can be turned into text content: literal text, a file on
/// disk, or an already-open reader.
pub enum FileSource {
    InlineText(String),
    FilePath(PathBuf),
    OpenStream(Box<dyn Read>),
}

impl FileSource {
    pub fn path<P: Into<PathBuf>>(path: P) -> Self {
        FileSource::FilePath(path.into())
    }

    pub fn text<S: Into<String>>(text: S) -> Self {
        FileSource::InlineText(text.into())
    }

    pub fn stream<R: Read + 'static>(reader: R) -> Self {
        FileSource::OpenStream(Box::new(reader))
    }

    /// The on-disk path, if this source is backed by one.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            FileSource::FilePath(path) => Some(path),
            _ => None,
        }
    }

    /// Read the complete contents. File handles are opened and closed within
    /// this call.
    pub fn read_contents(self) -> Result<String> {
        match self {
            FileSource::InlineText(text) => Ok(text),
            FileSource::FilePath(path) => read_local_content(&path),
            FileSource::OpenStream(mut reader) => {
                let mut contents = String::new();
                reader.read_to_string(&mut contents)?;
                Ok(contents)
            }
        }
    }
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSource::InlineText(text) => f.debug_tuple("InlineText").field(text).finish(),
            FileSource::FilePath(path) => f.debug_tuple("FilePath").field(path).finish(),
            FileSource::OpenStream(_) => f.write_str("OpenStream(..)"),
        }
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        FileSource::FilePath(path)
    }
}

impl From<&PathBuf> for FileSource {
    fn from(path: &PathBuf) -> Self {
        FileSource::FilePath(path.clone())
    }
}

impl From<&Path> for FileSource {
    fn from(path: &Path) -> Self {
        FileSource::FilePath(path.to_path_buf())
    }
}

/// Read content from a local file
pub fn read_local_content(path: &Path) -> Result<String> {
    info!("Reading local resource: {:?}", path);
    if !path.exists() {
        return Err(PremarkError::PathNotFoundError(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(PremarkError::FileReadError)
}

/// Copies of the package data compiled into the binary.
const BUNDLED_RESOURCES: &[(&str, &str)] = &[
    ("default.html", include_str!("../data/default.html")),
    ("default.css", include_str!("../data/default.css")),
];

/// Location of the files shipped with the package (default template and stylesheet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageData {
    root: PathBuf,
}

impl Default for PackageData {
    /// The source tree's `data/` when present, else `data/` next to the executable.
    fn default() -> Self {
        let built = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let root = if built.is_dir() {
            built
        } else {
            env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|dir| dir.join("data")))
                .unwrap_or(built)
        };
        Self { root }
    }
}

impl PackageData {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Use `PREMARK_DATA_DIR` if set, otherwise the bundled data directory.
    pub fn from_env() -> Self {
        match env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a `/`-separated resource path inside the data directory.
    pub fn resource(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    /// Rewrite `{{premark}}` or `{{premark}}/<path>` to an on-disk path.
    /// Returns `None` for strings that don't use the placeholder.
    pub fn interpolate(&self, value: &str) -> Option<PathBuf> {
        let rest = value.strip_prefix(PACKAGE_PLACEHOLDER)?;
        let resolved = if rest.is_empty() {
            self.root.clone()
        } else {
            self.resource(rest.strip_prefix('/')?)
        };
        debug!("Replacing config value {} with {:?}", value, resolved);
        Some(resolved)
    }

    /// Read a file. A missing file that names one of the bundled resources
    /// under this data directory is served from the compiled-in copy.
    pub fn read(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            if let Some(content) = self.bundled(path) {
                info!("{:?} not found, using built-in copy", path);
                return Ok(content.to_string());
            }
        }
        read_local_content(path)
    }

    fn bundled(&self, path: &Path) -> Option<&'static str> {
        let relative = path.strip_prefix(&self.root).ok()?;
        BUNDLED_RESOURCES
            .iter()
            .find(|(name, _)| relative == Path::new(name))
            .map(|(_, content)| *content)
    }
}
