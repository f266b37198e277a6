use crate::core::favorites::FavoritesController;
use crate::core::resolver;
use crate::core::selection::{Display, ImageRequest, SelectionMachine, SelectionState};
use crate::domain::model::{Breed, FavoritesSet, ImageRef, SubBreed};
use crate::domain::ports::{FavoritesStore, TaxonomyService};
use crate::utils::error::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Point-in-time copy of everything a front end needs to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSnapshot {
    pub state: SelectionState,
    pub breed: Option<Breed>,
    pub sub_breeds: Vec<SubBreed>,
    pub selection: Vec<SubBreed>,
    pub display: Display,
    pub has_navigation: bool,
    pub current_image: Option<ImageRef>,
    pub current_is_favorite: bool,
}

/// Executes the selection machine's requests against the taxonomy service.
///
/// Methods take `&self` so that several interactions can be in flight at
/// once; locks are never held across an `.await`, and late answers are
/// filtered by the machine's generation stamps.
pub struct BreedBrowser<T, S>
where
    T: TaxonomyService + ?Sized + 'static,
    S: FavoritesStore,
{
    taxonomy: Arc<T>,
    machine: Mutex<SelectionMachine>,
    favorites: Mutex<FavoritesController<S>>,
}

impl<T, S> BreedBrowser<T, S>
where
    T: TaxonomyService + ?Sized + 'static,
    S: FavoritesStore,
{
    pub fn new(taxonomy: Arc<T>, store: S) -> Self {
        Self {
            taxonomy,
            machine: Mutex::new(SelectionMachine::new()),
            favorites: Mutex::new(FavoritesController::load(store)),
        }
    }

    fn machine(&self) -> MutexGuard<'_, SelectionMachine> {
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn favorites_controller(&self) -> MutexGuard<'_, FavoritesController<S>> {
        self.favorites.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All breeds, or an empty list when the service is unreachable.
    pub async fn breeds(&self) -> Vec<Breed> {
        match self.taxonomy.list_breeds().await {
            Ok(breeds) => breeds,
            Err(e) => {
                tracing::warn!("⚠️ {}", e);
                Vec::new()
            }
        }
    }

    pub async fn select_breed(&self, breed: Breed) {
        let request = self.machine().select_breed(breed);
        let outcome = self.taxonomy.list_sub_breeds(&request.breed).await;

        let next = self.machine().apply_sub_breeds(request.generation, outcome);
        if let Some(image_request) = next {
            self.resolve(image_request).await;
        }
    }

    pub async fn set_sub_breeds(&self, selection: Vec<SubBreed>) -> Result<()> {
        let request = self.machine().set_sub_breed_selection(selection)?;
        self.resolve(request).await;
        Ok(())
    }

    pub async fn toggle_sub_breed(&self, sub_breed: SubBreed) -> Result<()> {
        let request = self.machine().toggle_sub_breed(sub_breed)?;
        self.resolve(request).await;
        Ok(())
    }

    async fn resolve(&self, request: ImageRequest) {
        let resolution = resolver::resolve(Arc::clone(&self.taxonomy), &request).await;
        self.machine().apply_resolution(request.generation, resolution);
    }

    pub fn next(&self) {
        self.machine().next();
    }

    pub fn previous(&self) {
        self.machine().previous();
    }

    /// Toggles the displayed image. `None` when nothing is displayed.
    pub fn toggle_current_favorite(&self) -> Result<Option<bool>> {
        let current = self.machine().current_image().cloned();
        match current {
            Some(image) => self.toggle_favorite(&image).map(Some),
            None => Ok(None),
        }
    }

    pub fn toggle_favorite(&self, image: &ImageRef) -> Result<bool> {
        self.favorites_controller().toggle(image)
    }

    pub fn remove_favorite(&self, image: &ImageRef) -> Result<bool> {
        self.favorites_controller().remove(image)
    }

    pub fn is_favorite(&self, image: &ImageRef) -> bool {
        self.favorites_controller().is_favorite(image)
    }

    pub fn favorites(&self) -> FavoritesSet {
        self.favorites_controller().favorites().clone()
    }

    pub fn snapshot(&self) -> BrowserSnapshot {
        let machine = self.machine();
        let current_image = machine.current_image().cloned();
        let current_is_favorite = current_image
            .as_ref()
            .is_some_and(|image| self.is_favorite(image));

        BrowserSnapshot {
            state: machine.state(),
            breed: machine.breed().cloned(),
            sub_breeds: machine.sub_breeds().to_vec(),
            selection: machine.selection().to_vec(),
            display: machine.display().clone(),
            has_navigation: machine.has_navigation(),
            current_image,
            current_is_favorite,
        }
    }
}
