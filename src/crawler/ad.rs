//! Ad page parser
//!
//! Turns one ad page into a [`PropertyRecord`]. The embedded
//! `application/ld+json` block is the preferred source: when it parses to an
//! object, all of its keys are merged into the record first. CSS-selector
//! heuristics then fill in `title`, `price`, `location` and `description`
//! only where still absent. A selector miss leaves the key out; extraction
//! itself never fails.

use crate::record::{FieldValue, PropertyRecord};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

const STRUCTURED_DATA_SELECTOR: &str = r#"script[type="application/ld+json"]"#;
const TITLE_SELECTOR: &str = "h1";
const PRICE_SELECTOR: &str = "h2";
const LOCATION_SELECTOR: &str = "span.sc-ge2uzh-0";
const DESCRIPTION_SELECTOR: &str = "div.sc-1sj73kh-0";

/// Extracts a property record from an ad page
///
/// # Arguments
///
/// * `html` - The ad page markup
/// * `url` - The canonical ad URL (query already stripped)
pub fn extract_record(html: &str, url: &str) -> PropertyRecord {
    let document = Html::parse_document(html);
    let mut record = PropertyRecord::new(url);

    // Structured data first so it wins over every fallback below
    if let Some(data) = parse_structured_data(&document, url) {
        record.merge_structured(data);
    }

    if let Some(title) = select_text(&document, TITLE_SELECTOR) {
        record.insert_first("title", FieldValue::Text(title));
    }

    if let Some(raw_price) = select_text(&document, PRICE_SELECTOR) {
        let digits = normalize_price(&raw_price);
        if !digits.is_empty() {
            record.insert_first("price", FieldValue::Text(digits));
        }
    }

    if let Some(location) = select_text(&document, LOCATION_SELECTOR) {
        record.insert_first("location", FieldValue::Text(location));
    }

    if let Some(description) = select_joined_text(&document, DESCRIPTION_SELECTOR) {
        record.insert_first("description", FieldValue::Text(description));
    }

    record
}

/// Parses the first embedded structured-data block of the page
///
/// Malformed JSON and non-object payloads are ignored: the parse error is
/// logged at debug level and extraction falls back to the heuristics.
fn parse_structured_data(
    document: &Html,
    url: &str,
) -> Option<serde_json::Map<String, Value>> {
    let selector = Selector::parse(STRUCTURED_DATA_SELECTOR).ok()?;
    let script = document.select(&selector).next()?;
    let raw = script.text().collect::<String>();

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Ignoring malformed structured data on {}: {}", url, e);
            None
        }
    }
}

/// Text of the first element matching the selector, trimmed
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .map(collect_text)
        .filter(|s| !s.is_empty())
}

/// Like [`select_text`] but with internal whitespace collapsed
fn select_joined_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .map(|el| {
            el.text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|s| !s.is_empty())
}

fn collect_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Strips every non-digit character from a price string
///
/// `"R$ 350.000"` becomes `"350000"`. Thousands and decimal separators are
/// both removed, matching the downstream consumer contract.
fn normalize_price(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
