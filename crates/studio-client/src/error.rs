use thiserror::Error;

pub type StudioResult<T> = Result<T, StudioError>;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("No per-user config directory is available on this platform")]
    NoConfigDir,
    #[error("Config file error ({0})")]
    ConfigIo(#[from] std::io::Error),
    #[error("Decode error ({0})")]
    Decode(Box<str>),
}

impl From<serde_json::Error> for StudioError {
    fn from(e: serde_json::Error) -> Self {
        StudioError::Decode(e.to_string().into_boxed_str())
    }
}
