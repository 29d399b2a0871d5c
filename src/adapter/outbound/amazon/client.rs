//! Amazon product page scraper.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::{Client as HttpClient, StatusCode};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use super::parse::{extract_asin, parse_product_page, PageError};
use super::settings::AmazonConfig;
use crate::domain::{parse_price, PriceParseError, RawItem, SourceKind};
use crate::error::SourceError;
use crate::port::outbound::source::{ItemSource, Query};

const KIND: SourceKind = SourceKind::Amazon;

/// Live scraper for single Amazon product pages.
///
/// Each query target is one product URL (absolute, or a path relative to
/// `base_url`). Every request is preceded by a random politeness pause;
/// 5xx responses, timeouts and connection failures are retried with
/// exponential backoff.
pub struct AmazonSource {
    http: HttpClient,
    base_url: Url,
    config: AmazonConfig,
}

impl AmazonSource {
    /// Build the scraper from configuration.
    ///
    /// # Errors
    ///
    /// Fails when `base_url` is not a valid URL.
    pub fn from_config(config: AmazonConfig) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(&config.base_url)?;
        let http = HttpClient::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &AmazonConfig {
        &self.config
    }

    fn resolve(&self, target: &str) -> Result<Url, SourceError> {
        let target = target.trim();
        Url::parse(target)
            .or_else(|_| self.base_url.join(target))
            .map_err(|e| SourceError::unavailable(KIND, format!("invalid product URL '{target}': {e}")))
    }

    /// Politeness delay in milliseconds, uniform in `[min_delay_ms, max_delay_ms]`.
    fn jitter_ms(&self) -> u64 {
        let (min, max) = (self.config.min_delay_ms, self.config.max_delay_ms);
        if max > min {
            rand::thread_rng().gen_range(min..=max)
        } else {
            min
        }
    }

    async fn pause(&self) {
        let delay = self.jitter_ms();
        if delay > 0 {
            sleep(Duration::from_millis(delay)).await;
        }
    }

    async fn get_page(&self, url: &Url) -> Result<String, SourceError> {
        let mut attempt = 0;
        let max_attempts = self.config.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            self.pause().await;

            let failure = match self.http.get(url.clone()).send().await {
                Err(err) => Failure::from_request(&err),
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
                        return Err(SourceError::NotFound {
                            query: url.to_string(),
                        });
                    }
                    if status.is_success() {
                        match response.text().await {
                            Ok(body) => return Ok(body),
                            Err(err) => Failure::from_request(&err),
                        }
                    } else {
                        Failure {
                            reason: format!("HTTP {status}"),
                            transient: status.is_server_error(),
                        }
                    }
                }
            };

            if !failure.transient || attempt >= max_attempts {
                return Err(SourceError::unavailable(KIND, failure.reason));
            }

            let backoff = self.config.backoff(attempt);
            warn!(
                attempt,
                max_attempts,
                backoff_ms = backoff.as_millis() as u64,
                error = %failure.reason,
                "Page request failed, retrying"
            );
            sleep(backoff).await;
        }
    }
}

/// One failed attempt and whether retrying could help.
struct Failure {
    reason: String,
    transient: bool,
}

impl Failure {
    fn from_request(err: &reqwest::Error) -> Self {
        Self {
            reason: err.to_string(),
            transient: err.is_timeout() || err.is_connect(),
        }
    }
}

#[async_trait]
impl ItemSource for AmazonSource {
    fn kind(&self) -> SourceKind {
        KIND
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<RawItem>, SourceError> {
        let url = self.resolve(&query.target)?;
        let asin = extract_asin(url.as_str()).unwrap_or_else(|| "unknown".into());
        info!(asin = %asin, url = %url, "Fetching product page");

        let html = self.get_page(&url).await?;
        let listing = parse_product_page(&html).map_err(|e| match e {
            PageError::RobotCheck => SourceError::unavailable(KIND, "robot check page served"),
            PageError::MissingTitle => SourceError::unavailable(KIND, "page layout not recognized"),
            PageError::MissingPrice => SourceError::PriceParse(PriceParseError { raw: String::new() }),
        })?;

        debug!(
            asin = %asin,
            title = %listing.title,
            price = %listing.price_text,
            availability = listing.availability.as_deref().unwrap_or("unknown"),
            "Parsed product page"
        );

        let price = parse_price(&listing.price_text)?;
        let item = RawItem::try_new(KIND, listing.title, price, Some(url.to_string()))
            .map_err(|e| SourceError::unavailable(KIND, e.to_string()))?
            .with_name_override(query.name_override.as_deref());

        Ok(vec![item])
    }
}
