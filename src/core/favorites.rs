use crate::domain::model::{FavoritesSet, ImageRef};
use crate::domain::ports::FavoritesStore;
use crate::utils::error::Result;

/// Sole owner of the favorites and sole writer of the store.
///
/// Every mutation updates memory first and then writes the whole set through
/// to the store before returning.
pub struct FavoritesController<S: FavoritesStore> {
    store: S,
    favorites: FavoritesSet,
}

impl<S: FavoritesStore> FavoritesController<S> {
    pub fn load(store: S) -> Self {
        let favorites = store.load();
        tracing::debug!("Loaded {} favorites", favorites.len());
        Self { store, favorites }
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub fn is_favorite(&self, image: &ImageRef) -> bool {
        self.favorites.contains(image)
    }

    /// Returns the membership after the toggle.
    pub fn toggle(&mut self, image: &ImageRef) -> Result<bool> {
        let now_favorite = if self.favorites.remove(image) {
            tracing::info!("💔 Removed favorite: {}", image);
            false
        } else {
            self.favorites.insert(image.clone());
            tracing::info!("⭐ Added favorite: {}", image);
            true
        };
        self.persist()?;
        Ok(now_favorite)
    }

    /// Returns `false` if `image` was not a favorite; the store is rewritten either way.
    pub fn remove(&mut self, image: &ImageRef) -> Result<bool> {
        let removed = self.favorites.remove(image);
        if removed {
            tracing::info!("💔 Removed favorite: {}", image);
        }
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.favorites).map_err(|e| {
            tracing::error!("❌ Failed to persist {} favorites: {}", self.favorites.len(), e);
            e
        })
    }
}
