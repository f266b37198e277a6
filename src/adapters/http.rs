use crate::domain::model::{Breed, ImageRef, SubBreed};
use crate::domain::ports::{ConfigProvider, TaxonomyService};
use crate::utils::error::{BrowserError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_ENDPOINT: &str = "https://dog.ceo/api";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Envelope used by every endpoint: `{ "message": ..., "status": "success" }`.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    message: T,
    #[serde(default)]
    status: Option<String>,
}

/// Taxonomy service backed by the dog.ceo HTTP API.
#[derive(Debug, Clone)]
pub struct DogApiClient {
    client: Client,
    base_url: Url,
}

impl DogApiClient {
    pub fn new(api_endpoint: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(api_endpoint).map_err(|e| BrowserError::InvalidConfigValueError {
            field: "source.endpoint".to_string(),
            value: api_endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BrowserError::InvalidConfigValueError {
                field: "source.endpoint".to_string(),
                value: api_endpoint.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.api_endpoint(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    /// 以 path segment 組 URL，品種名稱會被正確編碼
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> std::result::Result<T, String> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await.map_err(|e| e.to_string())?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(format!("HTTP {}", status));
        }

        let body: ApiResponse<T> = response.json().await.map_err(|e| e.to_string())?;
        match body.status.as_deref() {
            None | Some("success") => Ok(body.message),
            Some(other) => Err(format!("service reported status '{}'", other)),
        }
    }
}

#[async_trait]
impl TaxonomyService for DogApiClient {
    async fn list_breeds(&self) -> Result<Vec<Breed>> {
        let url = self.endpoint(&["breeds", "list", "all"]);
        let catalogue: BTreeMap<String, Vec<String>> =
            self.fetch(url)
                .await
                .map_err(|message| BrowserError::TaxonomyUnavailable {
                    breed: "all breeds".to_string(),
                    message,
                })?;

        tracing::debug!("Fetched {} breeds", catalogue.len());
        Ok(catalogue.into_keys().map(Breed::from).collect())
    }

    async fn list_sub_breeds(&self, breed: &Breed) -> Result<Vec<SubBreed>> {
        let url = self.endpoint(&["breed", breed.as_str(), "list"]);
        let subs: Vec<String> =
            self.fetch(url)
                .await
                .map_err(|message| BrowserError::TaxonomyUnavailable {
                    breed: breed.to_string(),
                    message,
                })?;

        Ok(subs.into_iter().map(SubBreed::from).collect())
    }

    async fn random_image(&self, breed: &Breed, sub_breed: Option<&SubBreed>) -> Result<ImageRef> {
        let (url, target) = match sub_breed {
            Some(sub) => (
                self.endpoint(&["breed", breed.as_str(), sub.as_str(), "images", "random"]),
                format!("{}/{}", breed, sub),
            ),
            None => (
                self.endpoint(&["breed", breed.as_str(), "images", "random"]),
                breed.to_string(),
            ),
        };

        let image: String = self
            .fetch(url)
            .await
            .map_err(|message| BrowserError::ImageUnavailable {
                target: target.clone(),
                message,
            })?;

        if image.trim().is_empty() {
            return Err(BrowserError::ImageUnavailable {
                target,
                message: "service returned no image".to_string(),
            });
        }

        Ok(ImageRef::from(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> DogApiClient {
        DogApiClient::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_breeds_returns_sorted_keys() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/breeds/list/all");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "message": {"hound": ["afghan", "basset"], "akita": [], "bulldog": ["french"]},
                    "status": "success"
                }));
        });

        let breeds = client(&server).list_breeds().await.unwrap();

        api_mock.assert();
        assert_eq!(
            breeds,
            vec![Breed::from("akita"), Breed::from("bulldog"), Breed::from("hound")]
        );
    }

    #[tokio::test]
    async fn test_list_sub_breeds() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/breed/hound/list");
            then.status(200)
                .json_body(serde_json::json!({"message": ["afghan", "basset"], "status": "success"}));
        });

        let subs = client(&server).list_sub_breeds(&Breed::from("hound")).await.unwrap();

        api_mock.assert();
        assert_eq!(subs, vec![SubBreed::from("afghan"), SubBreed::from("basset")]);
    }

    #[tokio::test]
    async fn test_empty_sub_breed_list_is_not_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/breed/akita/list");
            then.status(200)
                .json_body(serde_json::json!({"message": [], "status": "success"}));
        });

        let subs = client(&server).list_sub_breeds(&Breed::from("akita")).await.unwrap();
        assert!(subs.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_breed_is_taxonomy_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/breed/unicorn/list");
            then.status(404).json_body(serde_json::json!({
                "status": "error",
                "message": "Breed not found (main breed does not exist)",
                "code": 404
            }));
        });

        let err = client(&server)
            .list_sub_breeds(&Breed::from("unicorn"))
            .await
            .unwrap_err();
        assert!(matches!(err, BrowserError::TaxonomyUnavailable { ref breed, .. } if breed == "unicorn"));
    }

    #[tokio::test]
    async fn test_random_image_for_sub_breed() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/breed/hound/afghan/images/random");
            then.status(200).json_body(serde_json::json!({
                "message": "https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg",
                "status": "success"
            }));
        });

        let image = client(&server)
            .random_image(&Breed::from("hound"), Some(&SubBreed::from("afghan")))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(
            image.as_str(),
            "https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg"
        );
    }

    #[tokio::test]
    async fn test_random_image_for_breed() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/breed/akita/images/random");
            then.status(200).json_body(serde_json::json!({
                "message": "https://images.dog.ceo/breeds/akita/512px-Ainu-Dog.jpg",
                "status": "success"
            }));
        });

        let image = client(&server)
            .random_image(&Breed::from("akita"), None)
            .await
            .unwrap();

        api_mock.assert();
        assert!(image.as_str().ends_with("512px-Ainu-Dog.jpg"));
    }

    #[tokio::test]
    async fn test_empty_image_is_image_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/breed/akita/images/random");
            then.status(200)
                .json_body(serde_json::json!({"message": "", "status": "success"}));
        });

        let err = client(&server)
            .random_image(&Breed::from("akita"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, BrowserError::ImageUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_server_error_is_image_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/breed/hound/basset/images/random");
            then.status(500);
        });

        let err = client(&server)
            .random_image(&Breed::from("hound"), Some(&SubBreed::from("basset")))
            .await
            .unwrap_err();
        assert!(
            matches!(err, BrowserError::ImageUnavailable { ref target, .. } if target == "hound/basset")
        );
    }

    #[test]
    fn test_endpoint_joins_segments_onto_base_path() {
        let client = DogApiClient::new("https://dog.ceo/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint(&["breed", "hound", "list"]).as_str(),
            "https://dog.ceo/api/breed/hound/list"
        );

        let client = DogApiClient::new("https://dog.ceo/api", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint(&["breed", "german shepherd", "list"]).as_str(),
            "https://dog.ceo/api/breed/german%20shepherd/list"
        );
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(DogApiClient::new("not a url", Duration::from_secs(1)).is_err());
        assert!(DogApiClient::new("mailto:dogs@example.com", Duration::from_secs(1)).is_err());
    }
}
