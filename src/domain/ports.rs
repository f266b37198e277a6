use crate::domain::model::{Breed, FavoritesSet, ImageRef, SubBreed};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote breed/image catalogue. Calls are idempotent and side-effect free.
#[async_trait]
pub trait TaxonomyService: Send + Sync {
    async fn list_breeds(&self) -> Result<Vec<Breed>>;

    /// An empty list is a valid answer meaning "no sub-breeds".
    async fn list_sub_breeds(&self, breed: &Breed) -> Result<Vec<SubBreed>>;

    async fn random_image(&self, breed: &Breed, sub_breed: Option<&SubBreed>) -> Result<ImageRef>;
}

/// A single named record holding the serialized favorites.
pub trait FavoritesStore: Send + Sync {
    /// 讀不到或格式錯誤時回傳空集合，不會失敗
    fn load(&self) -> FavoritesSet;

    fn save(&self, favorites: &FavoritesSet) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn favorites_dir(&self) -> &str;
    fn favorites_key(&self) -> &str;
}
