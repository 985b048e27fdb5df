use thiserror::Error;

/// Main error type for the video-compare library
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidMode(#[from] InvalidModeError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Frame sequences or request parameters that cannot be compared
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Frame sequence must be rank 4 (frames, height, width, channels), got rank {rank}")]
    NotRank4 { rank: usize },

    #[error("Sample buffer holds {actual} values but shape {shape:?} needs {expected}")]
    DataLength {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Frame {index} is {actual} but the sequence is {expected}")]
    InconsistentFrame {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("Frame counts differ ({a} vs {b}) and synchronization is disabled")]
    LengthMismatch { a: usize, b: usize },

    #[error("Sequences must share a shape: {a} vs {b}")]
    ShapeMismatch { a: String, b: String },

    #[error("Invalid parameter: {details}")]
    InvalidParameter { details: String },
}

/// Unrecognized comparison mode string
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown comparison mode '{mode}' (expected one of: {expected})")]
pub struct InvalidModeError {
    pub mode: String,
    pub expected: String,
}

/// Failures of the video encoding collaborator
#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("FFmpeg not found. Please install FFmpeg and make sure it is on PATH.")]
    FfmpegNotFound,

    #[error("Nothing to encode: the frame sequence is empty")]
    EmptySequence,

    #[error("Cannot encode frames shaped {details}")]
    UnsupportedShape { details: String },

    #[error("Failed to run FFmpeg: {reason}")]
    ProcessFailed { reason: String },

    #[error("FFmpeg exited with {status}: {stderr}")]
    FfmpegFailed { status: String, stderr: String },

    #[error("Failed to finalize {path}: {reason}")]
    FinalizeFailed { path: String, reason: String },
}

/// CLI input loading errors
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to load input: {path}")]
    LoadFailed { path: String },

    #[error("No frames found in: {path}")]
    NoFramesFound { path: String },

    #[error("Unsupported input: {path}")]
    Unsupported { path: String },

    #[error("Failed to decode {path}: {reason}")]
    DecodeFailed { path: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using CompareError
pub type Result<T> = std::result::Result<T, CompareError>;

impl ValidationError {
    pub fn parameter<S: Into<String>>(details: S) -> Self {
        Self::InvalidParameter {
            details: details.into(),
        }
    }
}

impl CompareError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidMode(err) => {
                format!("'{}' is not a comparison mode. Try one of: {}", err.mode, err.expected)
            }
            Self::Encoding(EncodingError::FfmpegNotFound) => {
                "FFmpeg is required to write comparison videos but was not found on PATH.".to_string()
            }
            Self::Input(InputError::LoadFailed { path }) => {
                format!("Could not load '{}'. Please check the path exists and is a supported format.", path)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_names_value() {
        let err: CompareError = InvalidModeError {
            mode: "unknown".to_string(),
            expected: "concat, blend, split".to_string(),
        }
        .into();

        assert!(err.to_string().contains("'unknown'"));
        assert!(err.user_message().contains("concat, blend, split"));
    }

    #[test]
    fn test_validation_wraps() {
        let err: CompareError = ValidationError::NotRank4 { rank: 3 }.into();
        assert!(matches!(err, CompareError::Validation(ValidationError::NotRank4 { rank: 3 })));
        assert!(err.to_string().contains("rank 3"));
    }
}
