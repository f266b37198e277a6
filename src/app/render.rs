use crate::core::browser::BrowserSnapshot;
use crate::core::selection::Display;
use crate::domain::model::{Breed, FavoritesSet, SubBreed};

/// Capitalises the first letter: `afghan` -> `Afghan`.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render_breeds(breeds: &[Breed]) -> String {
    if breeds.is_empty() {
        return "No breeds available.".to_string();
    }
    breeds
        .iter()
        .map(|b| display_name(b.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_sub_breeds(sub_breeds: &[SubBreed], selection: &[SubBreed]) -> String {
    sub_breeds
        .iter()
        .map(|s| {
            let mark = if selection.contains(s) { "x" } else { " " };
            format!("[{}] {}", mark, display_name(s.as_str()))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn star(is_favorite: bool) -> &'static str {
    if is_favorite {
        "★"
    } else {
        "☆"
    }
}

pub fn render_snapshot(snapshot: &BrowserSnapshot) -> String {
    let breed = match &snapshot.breed {
        Some(breed) => breed,
        None => return "Select a breed to start.".to_string(),
    };

    let mut lines = vec![format!("Breed: {}", display_name(breed.as_str()))];
    if !snapshot.sub_breeds.is_empty() {
        lines.push(format!(
            "Sub-breeds: {}",
            render_sub_breeds(&snapshot.sub_breeds, &snapshot.selection)
        ));
    }

    match &snapshot.display {
        Display::NoBreed => {}
        Display::Loading => lines.push("Loading...".to_string()),
        Display::ChooseSubBreed => lines.push("Please choose at least one sub-breed!".to_string()),
        Display::Unavailable => lines.push("No image available for this selection.".to_string()),
        Display::DefaultImage(image) => {
            lines.push(format!("Image: {} {}", image, star(snapshot.current_is_favorite)));
        }
        Display::Gallery(gallery) => {
            if let Some(image) = gallery.current() {
                lines.push(format!(
                    "Image {}/{}: {} {}",
                    gallery.cursor() + 1,
                    gallery.len(),
                    image,
                    star(snapshot.current_is_favorite)
                ));
            }
            if snapshot.has_navigation {
                lines.push("(prev / next to browse)".to_string());
            }
        }
    }

    lines.join("\n")
}

pub fn render_favorites(favorites: &FavoritesSet) -> String {
    if favorites.is_empty() {
        return "No favorites yet.".to_string();
    }
    favorites
        .iter()
        .enumerate()
        .map(|(i, image)| format!("{:>3}. {}", i + 1, image))
        .collect::<Vec<_>>()
        .join("\n")
}
