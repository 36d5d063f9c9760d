// ABOUTME: Error types for the premark application
// ABOUTME: Provides structured error handling for config loading, section assembly and rendering

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PremarkError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Invalid configuration: {0}")]
    ConfigParseError(String),

    #[error("Unexpected key '{key}' found in {context}")]
    UnexpectedKeyError { key: String, context: String },

    #[error("Missing required field '{field}' in {context}")]
    MissingFieldError { field: String, context: String },

    #[error("Conflicting arguments: {0}")]
    ConflictingArgumentsError(String),

    #[error("Type mismatch: {0}")]
    TypeMismatchError(String),

    #[error("Cannot concatenate incompatible presentations: {0}")]
    ConcatenationError(String),

    #[error("Configuration key not found: {0}")]
    KeyNotFoundError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),
}

impl From<serde_yaml::Error> for PremarkError {
    fn from(err: serde_yaml::Error) -> Self {
        PremarkError::ConfigParseError(format!("invalid YAML: {}", err))
    }
}

impl From<minijinja::Error> for PremarkError {
    fn from(err: minijinja::Error) -> Self {
        PremarkError::TemplateError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PremarkError>;
