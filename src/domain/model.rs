use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// 頂層分類，例如 `hound`
    Breed
);
string_id!(
    /// 隸屬於某個 [`Breed`] 的子分類，例如 `hound` 底下的 `afghan`
    SubBreed
);
string_id!(
    /// 單張圖片的 URL，以值比較
    ImageRef
);

/// Ordered favorites with set semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ImageRef>", into = "Vec<ImageRef>")]
pub struct FavoritesSet {
    images: Vec<ImageRef>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, image: &ImageRef) -> bool {
        self.images.contains(image)
    }

    /// Appends `image`; returns `false` when it was already present.
    pub fn insert(&mut self, image: ImageRef) -> bool {
        if self.contains(&image) {
            return false;
        }
        self.images.push(image);
        true
    }

    pub fn remove(&mut self, image: &ImageRef) -> bool {
        let before = self.images.len();
        self.images.retain(|fav| fav != image);
        self.images.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRef> {
        self.images.iter()
    }

    pub fn as_slice(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl From<Vec<ImageRef>> for FavoritesSet {
    fn from(images: Vec<ImageRef>) -> Self {
        images.into_iter().collect()
    }
}

impl From<FavoritesSet> for Vec<ImageRef> {
    fn from(set: FavoritesSet) -> Self {
        set.images
    }
}

impl FromIterator<ImageRef> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = ImageRef>>(iter: I) -> Self {
        let mut set = FavoritesSet::new();
        for image in iter {
            set.insert(image);
        }
        set
    }
}
