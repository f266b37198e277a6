pub mod browser;
pub mod favorites;
pub mod gallery;
pub mod resolver;
pub mod selection;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{Breed, FavoritesSet, ImageRef, SubBreed};
pub use crate::domain::ports::{ConfigProvider, FavoritesStore, TaxonomyService};
pub use crate::utils::error::Result;
