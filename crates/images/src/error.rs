use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("PIXABAY_API_KEY is not set")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(Box<reqwest::Error>),

    #[error("image service returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        SearchError::Http(Box::new(error))
    }
}
