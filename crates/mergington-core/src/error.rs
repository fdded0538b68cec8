use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Activity not found")]
    ActivityNotFound(String),

    #[error("Student is already signed up for this activity")]
    AlreadySignedUp { activity: String, email: String },

    #[error("Student is not signed up for this activity")]
    NotSignedUp { activity: String, email: String },

    #[error("Activity is full")]
    ActivityFull(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl RegistryError {
    /// True for rejections a client caused by asking for an impossible
    /// transition, as opposed to configuration or I/O failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RegistryError::ActivityNotFound(_)
                | RegistryError::AlreadySignedUp { .. }
                | RegistryError::NotSignedUp { .. }
                | RegistryError::ActivityFull(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
