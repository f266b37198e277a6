pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{http::DogApiClient, storage::JsonFileStore, storage::MemoryStore};
pub use crate::config::Settings;
pub use crate::core::browser::{BreedBrowser, BrowserSnapshot};
pub use crate::domain::model::{Breed, FavoritesSet, ImageRef, SubBreed};
pub use crate::utils::error::{BrowserError, Result};
