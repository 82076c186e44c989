//! Listing page parser
//!
//! A listing page shows a batch of ad summaries plus pagination controls.
//! This module extracts the individual ad URLs (from the anchors the site
//! marks as ad-title links) and answers whether a further page exists.

use scraper::{Html, Selector};
use std::collections::HashSet;

/// Anchors the site marks as the title link of an individual ad
const AD_TITLE_SELECTOR: &str = "a[data-lurker-detail='title']";

/// Query parameter carrying the listing page number
pub const PAGE_QUERY_PARAM: &str = "o";

/// Extracts the ad URLs from a listing page
///
/// Only fully-qualified URLs are kept, the query component is stripped, and
/// duplicates are removed while preserving first-seen order. Each URL is
/// fetched at most once per page scan.
///
/// # Arguments
///
/// * `html` - The listing page markup
///
/// # Returns
///
/// The deduplicated ad URLs in discovery order
pub fn extract_ad_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse(AD_TITLE_SELECTOR) {
        Ok(sel) => sel,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) => h,
            None => continue,
        };

        if !href.starts_with("http") {
            continue;
        }

        // Canonical ad address: drop tracking parameters and the like
        let canonical = href.split('?').next().unwrap_or(href).to_string();

        if seen.insert(canonical.clone()) {
            links.push(canonical);
        }
    }

    links
}

/// Returns true when the raw markup references the next listing page
///
/// The site renders pagination links with a `?o=N` query; a marker for
/// `page + 1` anywhere in the markup means there is more to crawl.
pub fn has_next_page(html: &str, page: u32) -> bool {
    html.contains(&format!("?{}={}", PAGE_QUERY_PARAM, page + 1))
}
