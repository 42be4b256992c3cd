use std::path::PathBuf;

pub type TintResult<T> = Result<T, TintError>;

#[derive(thiserror::Error, Debug)]
pub enum TintError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid color format: {0}")]
    InvalidColor(String),

    #[error("source image not found: '{}'", path.display())]
    SourceImageNotFound { path: PathBuf },

    #[error("decode error for '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("write error for '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TintError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }
}
