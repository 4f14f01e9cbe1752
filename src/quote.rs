//! Motivational quote for the side panel.
//!
//! The fetch itself is fallible; [`QuoteSource::get_quote`] is not. Every
//! failure collapses into [`FALLBACK_QUOTE`].

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_QUOTE_URL: &str = "https://zenquotes.io/api/random";
/// Shown for every kind of fetch failure: transport error, non-success status
/// or unusable payload.
pub const FALLBACK_QUOTE: &str = "💬 Stay positive and keep going!";

/// Errors raised while fetching a quote.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("quote endpoint answered {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed quote payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("quote payload had no entries")]
    Empty,
}

/// One quote with its attribution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quote {
    #[serde(rename = "q")]
    pub text: String,
    #[serde(rename = "a")]
    pub author: String,
}

impl Quote {
    pub fn display(&self) -> String {
        format!("💬 {} — {}", self.text, self.author)
    }
}

/// Parse the endpoint body: a JSON array whose first element carries `q` and `a`.
pub fn parse_payload(body: &str) -> Result<Quote, FetchError> {
    let quotes: Vec<Quote> = serde_json::from_str(body)?;
    quotes.into_iter().next().ok_or(FetchError::Empty)
}

/// Anything that can fill the side panel.
pub trait QuoteSource {
    /// Always returns something displayable.
    fn get_quote(&self) -> String;
}

/// Quote fetched from a remote endpoint, one request per call.
#[derive(Debug, Clone)]
pub struct QuoteProvider {
    url: String,
    client: Client,
}

impl QuoteProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            url: url.into(),
            client,
        }
    }

    /// Single GET with no retry.
    pub fn fetch(&self) -> Result<Quote, FetchError> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.text()?;
        parse_payload(&body)
    }
}

impl QuoteSource for QuoteProvider {
    fn get_quote(&self) -> String {
        match self.fetch() {
            Ok(quote) => {
                debug!(author = %quote.author, "fetched quote");
                quote.display()
            }
            Err(e) => {
                warn!(error = %e, url = %self.url, "quote fetch failed, using fallback");
                FALLBACK_QUOTE.to_string()
            }
        }
    }
}

/// Fixed quote for offline use.
#[derive(Debug, Clone)]
pub struct StaticQuote(pub String);

impl Default for StaticQuote {
    fn default() -> Self {
        StaticQuote(FALLBACK_QUOTE.to_string())
    }
}

impl QuoteSource for StaticQuote {
    fn get_quote(&self) -> String {
        self.0.clone()
    }
}
