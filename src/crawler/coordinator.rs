//! Crawl coordinator - main crawl orchestration logic
//!
//! Walks the listing pages in order, fetching and extracting every
//! discovered ad, and accumulates the resulting records. Failure policy:
//! a listing-page fetch error ends the whole run (keeping what was already
//! collected), a single ad's fetch error only skips that ad.

use crate::config::Config;
use crate::crawler::ad::extract_record;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::listing::{extract_ad_links, has_next_page, PAGE_QUERY_PARAM};
use crate::record::PropertyRecord;
use crate::RadarError;
use reqwest::Client;
use std::time::Duration;

/// Drives one crawl run over the configured listing
pub struct Coordinator {
    config: Config,
    client: Client,
    records: Vec<PropertyRecord>,
}

impl Coordinator {
    /// Creates a coordinator with a fresh HTTP client
    pub fn new(config: Config) -> Result<Self, RadarError> {
        let client = build_http_client(&config.http)?;
        Ok(Self {
            config,
            client,
            records: Vec::new(),
        })
    }

    /// Runs the crawl and returns every record collected
    ///
    /// The run itself never fails: network errors either stop pagination
    /// (listing page) or skip one ad, and whatever was accumulated up to
    /// that point is returned.
    pub async fn run(mut self) -> Vec<PropertyRecord> {
        let max_pages = self.config.crawler.max_pages;
        let delay = Duration::from_millis(self.config.crawler.ad_delay_ms);

        for page in 1..=max_pages {
            let page_url = self.listing_url(page);
            tracing::info!("Fetching listing page {} of {}", page, max_pages);

            let html = match fetch_page(&self.client, &page_url).await {
                Ok(html) => html,
                Err(e) => {
                    // Hard stop: without the listing there is nothing left to walk
                    tracing::error!("Failed to fetch listing page {}: {}", page, e);
                    break;
                }
            };

            let links = extract_ad_links(&html);
            tracing::info!("Page {}: discovered {} ads", page, links.len());

            for link in &links {
                match self.process_ad(link).await {
                    Ok(record) => {
                        self.records.push(record);
                        tokio::time::sleep(delay).await;
                    }
                    Err(e) => {
                        tracing::error!("Failed to scrape {}: {}", link, e);
                    }
                }
            }

            if !has_next_page(&html, page) {
                tracing::info!("No further pages after page {}", page);
                break;
            }
        }

        tracing::info!("Crawl finished with {} records", self.records.len());
        self.records
    }

    /// Builds the URL of a listing page
    ///
    /// Page 1 is the configured URL unqualified; later pages append the
    /// page-number query parameter.
    fn listing_url(&self, page: u32) -> String {
        let base = &self.config.crawler.listing_url;
        if page == 1 {
            base.clone()
        } else {
            format!("{}?{}={}", base, PAGE_QUERY_PARAM, page)
        }
    }

    /// Fetches one ad page and extracts its record
    async fn process_ad(&self, url: &str) -> Result<PropertyRecord, RadarError> {
        let html = fetch_page(&self.client, url).await?;
        Ok(extract_record(&html, url))
    }
}

/// Runs a complete crawl with the given configuration
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(Vec<PropertyRecord>)` - The accumulated records, in discovery order
/// * `Err(RadarError)` - The HTTP client could not be constructed
pub async fn run_crawl(config: Config) -> Result<Vec<PropertyRecord>, RadarError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
