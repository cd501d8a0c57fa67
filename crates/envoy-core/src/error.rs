use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvoyError {
    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error("invalid skill name '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSkillName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EnvoyError>;
