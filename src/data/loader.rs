use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

use crate::models::Question;

const DEFAULT_QUESTIONS_PATH: &str = "questions.json";

/// Error loading a question set from disk.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The file is not valid question JSON.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Read { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LoadError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Read { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
        }
    }
}

/// Load the question set from the default `questions.json`.
pub fn load_questions() -> Result<Vec<Question>, LoadError> {
    load_questions_from_json(DEFAULT_QUESTIONS_PATH)
}

/// Load a question set from a JSON file: an array of objects with a
/// `prompt` and a `choices` array of `{label, correct}` objects.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();

    let json = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&json).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
