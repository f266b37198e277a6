//! In-memory taxonomy used by the core tests.

use crate::domain::model::{Breed, ImageRef, SubBreed};
use crate::domain::ports::TaxonomyService;
use crate::utils::error::{BrowserError, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct FakeTaxonomy {
    breeds: BTreeMap<String, Vec<String>>,
    sub_breed_delays: HashMap<String, u64>,
    image_delays: HashMap<String, u64>,
    failing_sub_breeds: HashSet<String>,
    failing_images: HashSet<String>,
    sub_breed_queries: Mutex<usize>,
    completed_images: Mutex<Vec<String>>,
}

impl FakeTaxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_breed(mut self, breed: &str, subs: &[&str]) -> Self {
        self.breeds
            .insert(breed.to_string(), subs.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_sub_breed_delay(mut self, breed: &str, millis: u64) -> Self {
        self.sub_breed_delays.insert(breed.to_string(), millis);
        self
    }

    /// Delay keyed by sub-breed name, or by breed name for default images.
    pub fn with_image_delay(mut self, name: &str, millis: u64) -> Self {
        self.image_delays.insert(name.to_string(), millis);
        self
    }

    pub fn with_failing_sub_breeds(mut self, breed: &str) -> Self {
        self.failing_sub_breeds.insert(breed.to_string());
        self
    }

    pub fn with_failing_image(mut self, name: &str) -> Self {
        self.failing_images.insert(name.to_string());
        self
    }

    pub fn sub_breed_queries(&self) -> usize {
        *self.sub_breed_queries.lock().unwrap()
    }

    pub fn completed_images(&self) -> Vec<String> {
        self.completed_images.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaxonomyService for FakeTaxonomy {
    async fn list_breeds(&self) -> Result<Vec<Breed>> {
        Ok(self.breeds.keys().map(|b| Breed::from(b.as_str())).collect())
    }

    async fn list_sub_breeds(&self, breed: &Breed) -> Result<Vec<SubBreed>> {
        *self.sub_breed_queries.lock().unwrap() += 1;
        if let Some(millis) = self.sub_breed_delays.get(breed.as_str()) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }

        if self.failing_sub_breeds.contains(breed.as_str()) {
            return Err(BrowserError::TaxonomyUnavailable {
                breed: breed.to_string(),
                message: "simulated outage".to_string(),
            });
        }

        self.breeds
            .get(breed.as_str())
            .map(|subs| subs.iter().map(|s| SubBreed::from(s.as_str())).collect())
            .ok_or_else(|| BrowserError::TaxonomyUnavailable {
                breed: breed.to_string(),
                message: "Breed not found".to_string(),
            })
    }

    async fn random_image(&self, breed: &Breed, sub_breed: Option<&SubBreed>) -> Result<ImageRef> {
        let key = sub_breed.map(SubBreed::as_str).unwrap_or(breed.as_str());
        let target = match sub_breed {
            Some(sub) => format!("{}/{}", breed, sub),
            None => breed.to_string(),
        };

        if let Some(millis) = self.image_delays.get(key) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }

        if self.failing_images.contains(key) || !self.breeds.contains_key(breed.as_str()) {
            return Err(BrowserError::ImageUnavailable {
                target,
                message: "simulated outage".to_string(),
            });
        }

        self.completed_images.lock().unwrap().push(target.clone());
        Ok(ImageRef::new(format!(
            "https://img/{}.jpg",
            target.replace('/', "-")
        )))
    }
}
