use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Sub-breed list unavailable for '{breed}': {message}")]
    TaxonomyUnavailable { breed: String, message: String },

    #[error("Image unavailable for '{target}': {message}")]
    ImageUnavailable { target: String, message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No breed selected")]
    NoBreedSelected,

    #[error("Sub-breeds of '{breed}' are not loaded yet")]
    SubBreedsNotLoaded { breed: String },

    #[error("'{sub_breed}' is not a sub-breed of '{breed}'")]
    UnknownSubBreed { breed: String, sub_breed: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Selection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BrowserError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BrowserError::TaxonomyUnavailable { .. }
            | BrowserError::ImageUnavailable { .. }
            | BrowserError::ApiError(_) => ErrorCategory::Network,
            BrowserError::IoError(_) | BrowserError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            BrowserError::ConfigError { .. } | BrowserError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            BrowserError::NoBreedSelected
            | BrowserError::SubBreedsNotLoaded { .. }
            | BrowserError::UnknownSubBreed { .. } => ErrorCategory::Selection,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Selection => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BrowserError::TaxonomyUnavailable { breed, .. } => {
                format!("Could not load sub-breeds for {}", breed)
            }
            BrowserError::ImageUnavailable { target, .. } => {
                format!("Could not load an image for {}", target)
            }
            BrowserError::ApiError(_) => "The breed service could not be reached".to_string(),
            BrowserError::IoError(e) => format!("Favorites could not be saved: {}", e),
            BrowserError::SerializationError(_) => {
                "Favorites could not be serialized".to_string()
            }
            BrowserError::ConfigError { message } => format!("Invalid configuration: {}", message),
            BrowserError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and the --api-base endpoint, then select again",
            ErrorCategory::Storage => "Make sure the favorites directory exists and is writable",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
            ErrorCategory::Selection => "Select a breed first and pick sub-breeds from its list",
        }
    }
}

pub type Result<T> = std::result::Result<T, BrowserError>;
