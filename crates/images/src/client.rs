//! Pixabay image search.

use std::future::Future;

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{ImageCandidate, CANDIDATES_PER_QUERY};

/// Anything that can turn a word into image candidates.
pub trait ImageSearch {
    /// Up to [`CANDIDATES_PER_QUERY`] candidates for `query`, in random order.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<ImageCandidate>, SearchError>> + Send;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

impl SearchResponse {
    fn into_candidates(self) -> Vec<ImageCandidate> {
        self.hits.into_iter().map(ImageCandidate::from).collect()
    }
}

#[derive(Debug, Deserialize)]
struct Hit {
    id: u64,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "previewURL", default)]
    preview_url: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    user: String,
    #[serde(rename = "pageURL", default)]
    page_url: String,
}

impl From<Hit> for ImageCandidate {
    fn from(hit: Hit) -> Self {
        ImageCandidate {
            id: hit.id,
            image_url: hit.webformat_url,
            preview_url: hit.preview_url,
            tags: hit.tags,
            user: hit.user,
            page_url: hit.page_url,
        }
    }
}

/// Decode a search response body.
pub fn parse_hits(body: &str) -> Result<Vec<ImageCandidate>, SearchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.into_candidates())
}

/// Pick up to `amount` distinct candidates at random.
pub fn sample_candidates<R: Rng + ?Sized>(
    hits: &[ImageCandidate],
    amount: usize,
    rng: &mut R,
) -> Vec<ImageCandidate> {
    hits.choose_multiple(rng, amount).cloned().collect()
}

pub struct PixabayClient {
    http: Client,
    config: SearchConfig,
}

impl PixabayClient {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl ImageSearch for PixabayClient {
    async fn search(&self, query: &str) -> Result<Vec<ImageCandidate>, SearchError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingApiKey)?;
        let per_page = self.config.per_page.to_string();

        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("key", key),
                ("q", query),
                ("image_type", "photo"),
                ("per_page", per_page.as_str()),
                ("safesearch", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let hits = response.json::<SearchResponse>().await?.into_candidates();
        debug!("{:?}: {} hits", query, hits.len());

        Ok(sample_candidates(&hits, CANDIDATES_PER_QUERY, &mut rand::rng()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const BODY: &str = r#"{
        "total": 3,
        "totalHits": 3,
        "hits": [
            {"id": 1, "webformatURL": "https://cdn/1.jpg", "previewURL": "https://cdn/1s.jpg",
             "tags": "cat, pet", "user": "ann", "pageURL": "https://pixabay.com/photos/1", "likes": 5},
            {"id": 2, "webformatURL": "https://cdn/2.jpg", "user": "bob"},
            {"id": 3, "webformatURL": "https://cdn/3.jpg", "previewURL": "", "tags": "",
             "user": "cy", "pageURL": "https://pixabay.com/photos/3"}
        ]
    }"#;

    fn hits(n: u64) -> Vec<ImageCandidate> {
        (0..n)
            .map(|id| ImageCandidate {
                id,
                image_url: format!("https://cdn/{}.jpg", id),
                ..ImageCandidate::default()
            })
            .collect()
    }

    #[test]
    fn test_parse_hits_maps_fields() {
        let parsed = parse_hits(BODY).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].image_url, "https://cdn/1.jpg");
        assert_eq!(parsed[0].preview_url, "https://cdn/1s.jpg");
        assert_eq!(parsed[0].tags, "cat, pet");
        assert_eq!(parsed[0].credit().page_url, "https://pixabay.com/photos/1");
        assert_eq!(parsed[1].user, "bob");
        assert_eq!(parsed[1].page_url, "");
    }

    #[test]
    fn test_parse_hits_without_hits_field() {
        assert!(parse_hits(r#"{"total": 0}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_hits_rejects_garbage() {
        assert!(matches!(
            parse_hits("<html>rate limited</html>"),
            Err(SearchError::Json(_))
        ));
    }

    #[test]
    fn test_sample_is_distinct_and_bounded() {
        let mut rng = StdRng::seed_from_u64(9);
        let all = hits(20);
        for _ in 0..50 {
            let picked = sample_candidates(&all, CANDIDATES_PER_QUERY, &mut rng);
            assert_eq!(picked.len(), 3);
            let ids: HashSet<u64> = picked.iter().map(|c| c.id).collect();
            assert_eq!(ids.len(), 3);
        }
    }

    #[test]
    fn test_sample_fewer_than_requested() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_candidates(&hits(2), 3, &mut rng).len(), 2);
        assert!(sample_candidates(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn test_missing_key_fails_before_request() {
        let client = PixabayClient::new(SearchConfig::default()).unwrap();
        let result = tokio_test::block_on(client.search("cat"));
        assert!(matches!(result, Err(SearchError::MissingApiKey)));
    }
}
