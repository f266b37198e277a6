use crate::core::gallery::Gallery;
use crate::domain::model::{Breed, ImageRef, SubBreed};
use crate::utils::error::{BrowserError, Result};

/// Stamp carried by every outgoing request. A response is applied only while
/// its stamp still equals the machine's current one.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NoBreed,
    BreedSelectedNoSubBreedsLoaded,
    BreedSelectedReady,
}

/// Sub-breed list query for the breed that was just selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubBreedRequest {
    pub generation: Generation,
    pub breed: Breed,
}

/// Image-set resolution for a (breed, selection) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub generation: Generation,
    pub breed: Breed,
    pub sub_breeds: Vec<SubBreed>,
}

/// Result of one image-set resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// One image per selected sub-breed, in selection order. Failed slots are omitted.
    Images(Vec<ImageRef>),
    /// The breed has no sub-breeds.
    Default(ImageRef),
    /// The breed has sub-breeds but none is selected.
    ChooseSubBreed,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Display {
    NoBreed,
    Loading,
    ChooseSubBreed,
    DefaultImage(ImageRef),
    Gallery(Gallery),
    Unavailable,
}

/// Owns the current breed, sub-breed selection, derived image set and cursor.
///
/// Transitions never perform I/O. They return the request the caller has to
/// execute, and the matching `apply_*` method folds the answer back in,
/// dropping answers whose generation has been superseded.
#[derive(Debug)]
pub struct SelectionMachine {
    breed: Option<Breed>,
    sub_breeds: Option<Vec<SubBreed>>,
    selection: Vec<SubBreed>,
    display: Display,
    breed_generation: Generation,
    image_generation: Generation,
}

impl Default for SelectionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self {
            breed: None,
            sub_breeds: None,
            selection: Vec::new(),
            display: Display::NoBreed,
            breed_generation: 0,
            image_generation: 0,
        }
    }

    pub fn state(&self) -> SelectionState {
        match (&self.breed, &self.sub_breeds) {
            (None, _) => SelectionState::NoBreed,
            (Some(_), None) => SelectionState::BreedSelectedNoSubBreedsLoaded,
            (Some(_), Some(_)) => SelectionState::BreedSelectedReady,
        }
    }

    pub fn breed(&self) -> Option<&Breed> {
        self.breed.as_ref()
    }

    /// Sub-breeds of the current breed; empty until the list resolves.
    pub fn sub_breeds(&self) -> &[SubBreed] {
        self.sub_breeds.as_deref().unwrap_or(&[])
    }

    pub fn selection(&self) -> &[SubBreed] {
        &self.selection
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn is_loading(&self) -> bool {
        self.display == Display::Loading
    }

    pub fn selection_generation(&self) -> Generation {
        self.image_generation
    }

    pub fn select_breed(&mut self, breed: Breed) -> SubBreedRequest {
        tracing::info!("🐕 Breed selected: {}", breed);

        self.breed_generation += 1;
        self.breed = Some(breed.clone());
        self.sub_breeds = None;
        self.selection.clear();
        self.invalidate_images();

        SubBreedRequest {
            generation: self.breed_generation,
            breed,
        }
    }

    /// Folds in the sub-breed list for a [`SubBreedRequest`].
    ///
    /// A failed query counts as an empty list. Returns the image resolution to
    /// run next, or `None` when the answer was stale.
    pub fn apply_sub_breeds(
        &mut self,
        generation: Generation,
        outcome: Result<Vec<SubBreed>>,
    ) -> Option<ImageRequest> {
        if generation != self.breed_generation {
            tracing::debug!(
                "Discarding stale sub-breed list (generation {} != {})",
                generation,
                self.breed_generation
            );
            return None;
        }

        let sub_breeds = match outcome {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("⚠️ {}", e);
                Vec::new()
            }
        };

        tracing::debug!(
            "Loaded {} sub-breeds for {:?}",
            sub_breeds.len(),
            self.breed.as_ref().map(Breed::as_str)
        );

        self.selection = sub_breeds.first().cloned().into_iter().collect();
        self.sub_breeds = Some(sub_breeds);
        self.invalidate_images();
        self.image_request()
    }

    pub fn set_sub_breed_selection(&mut self, selection: Vec<SubBreed>) -> Result<ImageRequest> {
        let breed = self.breed.as_ref().ok_or(BrowserError::NoBreedSelected)?;
        let known = self
            .sub_breeds
            .as_ref()
            .ok_or_else(|| BrowserError::SubBreedsNotLoaded {
                breed: breed.to_string(),
            })?;

        let mut deduped: Vec<SubBreed> = Vec::with_capacity(selection.len());
        for sub_breed in selection {
            if !known.contains(&sub_breed) {
                return Err(BrowserError::UnknownSubBreed {
                    breed: breed.to_string(),
                    sub_breed: sub_breed.to_string(),
                });
            }
            if !deduped.contains(&sub_breed) {
                deduped.push(sub_breed);
            }
        }

        self.selection = deduped;
        self.invalidate_images();
        self.image_request().ok_or(BrowserError::NoBreedSelected)
    }

    /// Checkbox semantics: unchecks a selected sub-breed, otherwise appends it.
    pub fn toggle_sub_breed(&mut self, sub_breed: SubBreed) -> Result<ImageRequest> {
        let mut selection = self.selection.clone();
        if let Some(pos) = selection.iter().position(|s| *s == sub_breed) {
            selection.remove(pos);
        } else {
            selection.push(sub_breed);
        }
        self.set_sub_breed_selection(selection)
    }

    /// Publishes a finished resolution. Returns `false` if it was stale.
    pub fn apply_resolution(&mut self, generation: Generation, resolution: Resolution) -> bool {
        if generation != self.image_generation {
            tracing::debug!(
                "Discarding stale image set (generation {} != {})",
                generation,
                self.image_generation
            );
            return false;
        }

        self.display = match resolution {
            Resolution::Images(images) if images.is_empty() => Display::Unavailable,
            Resolution::Images(images) => Display::Gallery(Gallery::new(images)),
            Resolution::Default(image) => Display::DefaultImage(image),
            Resolution::ChooseSubBreed => Display::ChooseSubBreed,
            Resolution::Unavailable => Display::Unavailable,
        };
        true
    }

    pub fn current_image(&self) -> Option<&ImageRef> {
        match &self.display {
            Display::Gallery(gallery) => gallery.current(),
            Display::DefaultImage(image) => Some(image),
            _ => None,
        }
    }

    pub fn has_navigation(&self) -> bool {
        matches!(&self.display, Display::Gallery(g) if g.has_navigation())
    }

    pub fn next(&mut self) {
        if let Display::Gallery(gallery) = &mut self.display {
            gallery.next();
        }
    }

    pub fn previous(&mut self) {
        if let Display::Gallery(gallery) = &mut self.display {
            gallery.previous();
        }
    }

    // 任何 breed 或 selection 變動都讓舊的圖片集合失效
    fn invalidate_images(&mut self) {
        self.image_generation += 1;
        self.display = Display::Loading;
    }

    fn image_request(&self) -> Option<ImageRequest> {
        let breed = self.breed.clone()?;
        Some(ImageRequest {
            generation: self.image_generation,
            breed,
            sub_breeds: self.selection.clone(),
        })
    }
}
