use crate::core::selection::{ImageRequest, Resolution};
use crate::domain::model::ImageRef;
use crate::domain::ports::TaxonomyService;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Resolves the image set for one [`ImageRequest`].
///
/// The breed's sub-breed list is queried on every resolution, independently
/// of the selection, to decide between the default image and the
/// "choose a sub-breed" prompt. Taxonomy failures never abort the
/// resolution; they only leave slots empty.
pub async fn resolve<T>(taxonomy: Arc<T>, request: &ImageRequest) -> Resolution
where
    T: TaxonomyService + ?Sized + 'static,
{
    let breed = &request.breed;

    let has_sub_breeds = match taxonomy.list_sub_breeds(breed).await {
        Ok(list) => Some(!list.is_empty()),
        Err(e) => {
            tracing::warn!("⚠️ {}", e);
            None
        }
    };

    if !request.sub_breeds.is_empty() {
        let images = fetch_sub_breed_images(taxonomy, request).await;
        tracing::info!(
            "🖼️ Resolved {}/{} images for {}",
            images.len(),
            request.sub_breeds.len(),
            breed
        );
        return Resolution::Images(images);
    }

    match has_sub_breeds {
        Some(false) => match taxonomy.random_image(breed, None).await {
            Ok(image) => {
                tracing::info!("🖼️ Default image for {}: {}", breed, image);
                Resolution::Default(image)
            }
            Err(e) => {
                tracing::warn!("⚠️ {}", e);
                Resolution::Unavailable
            }
        },
        Some(true) => Resolution::ChooseSubBreed,
        None => Resolution::Unavailable,
    }
}

// 併發請求每個子品種的圖片，完成後依原本選擇順序排列
async fn fetch_sub_breed_images<T>(taxonomy: Arc<T>, request: &ImageRequest) -> Vec<ImageRef>
where
    T: TaxonomyService + ?Sized + 'static,
{
    let mut tasks = JoinSet::new();
    for (index, sub_breed) in request.sub_breeds.iter().cloned().enumerate() {
        let taxonomy = Arc::clone(&taxonomy);
        let breed = request.breed.clone();
        tasks.spawn(async move {
            let outcome = taxonomy.random_image(&breed, Some(&sub_breed)).await;
            (index, outcome)
        });
    }

    let mut slots: Vec<Option<ImageRef>> = vec![None; request.sub_breeds.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(image))) => slots[index] = Some(image),
            Ok((index, Err(e))) => {
                tracing::warn!("⚠️ Skipping {}: {}", request.sub_breeds[index], e);
            }
            Err(e) => tracing::warn!("⚠️ Image task failed: {}", e),
        }
    }

    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::FakeTaxonomy;
    use crate::domain::model::{Breed, SubBreed};

    fn request(breed: &str, subs: &[&str]) -> ImageRequest {
        ImageRequest {
            generation: 1,
            breed: Breed::from(breed),
            sub_breeds: subs.iter().map(|s| SubBreed::from(*s)).collect(),
        }
    }

    #[tokio::test]
    async fn test_images_follow_selection_order_not_arrival_order() {
        let taxonomy = Arc::new(
            FakeTaxonomy::new()
                .with_breed("hound", &["afghan", "basset"])
                .with_image_delay("afghan", 60),
        );

        let resolution = resolve(Arc::clone(&taxonomy), &request("hound", &["afghan", "basset"])).await;

        assert_eq!(
            resolution,
            Resolution::Images(vec![
                ImageRef::from("https://img/hound-afghan.jpg"),
                ImageRef::from("https://img/hound-basset.jpg"),
            ])
        );
        // basset finished first even though afghan is listed first
        assert_eq!(
            taxonomy.completed_images(),
            vec!["hound/basset".to_string(), "hound/afghan".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_slot_is_omitted() {
        let taxonomy = Arc::new(
            FakeTaxonomy::new()
                .with_breed("hound", &["afghan", "basset", "blood"])
                .with_failing_image("basset"),
        );

        let resolution = resolve(taxonomy, &request("hound", &["afghan", "basset", "blood"])).await;

        assert_eq!(
            resolution,
            Resolution::Images(vec![
                ImageRef::from("https://img/hound-afghan.jpg"),
                ImageRef::from("https://img/hound-blood.jpg"),
            ])
        );
    }

    #[tokio::test]
    async fn test_breed_without_sub_breeds_gets_default_image() {
        let taxonomy = Arc::new(FakeTaxonomy::new().with_breed("akita", &[]));

        let resolution = resolve(Arc::clone(&taxonomy), &request("akita", &[])).await;

        assert_eq!(resolution, Resolution::Default(ImageRef::from("https://img/akita.jpg")));
        assert_eq!(taxonomy.sub_breed_queries(), 1);
    }

    #[tokio::test]
    async fn test_empty_selection_with_sub_breeds_asks_for_choice() {
        let taxonomy = Arc::new(FakeTaxonomy::new().with_breed("hound", &["afghan"]));

        let resolution = resolve(Arc::clone(&taxonomy), &request("hound", &[])).await;

        assert_eq!(resolution, Resolution::ChooseSubBreed);
        assert!(taxonomy.completed_images().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_breed_is_unavailable() {
        let taxonomy = Arc::new(FakeTaxonomy::new());

        let resolution = resolve(taxonomy, &request("unicorn", &[])).await;

        assert_eq!(resolution, Resolution::Unavailable);
    }

    #[tokio::test]
    async fn test_selection_still_resolves_when_sub_breed_check_fails() {
        let taxonomy = Arc::new(
            FakeTaxonomy::new()
                .with_breed("hound", &["afghan"])
                .with_failing_sub_breeds("hound"),
        );

        let resolution = resolve(taxonomy, &request("hound", &["afghan"])).await;

        assert_eq!(
            resolution,
            Resolution::Images(vec![ImageRef::from("https://img/hound-afghan.jpg")])
        );
    }
}
