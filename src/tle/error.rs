use thiserror::Error;

#[derive(Debug, Error)]
pub enum TleError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no usable TLE for catalog number {0} in response")]
    NotFound(u32),
}
