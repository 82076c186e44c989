//! Dashboard report generation
//!
//! Reads the persisted JSON document back and renders a static HTML
//! dashboard with two aggregate charts: listing count per neighborhood and
//! average price per neighborhood. The neighborhood is derived from the
//! record's `location` field (text before the first `" - "`); records
//! without a location fall into a single fallback group.

use crate::config::OutputConfig;
use crate::output::{load_records, OutputError};
use crate::record::{FieldValue, PropertyRecord};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Grouping key used for records that carry no location
const FALLBACK_NEIGHBORHOOD: &str = "N/A";

/// Errors that can occur while generating the report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No persisted data at {0}; run the crawl first")]
    MissingData(String),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Aggregates feeding the two dashboard charts
#[derive(Debug, Default, PartialEq)]
pub struct DashboardSummary {
    /// Listing count per neighborhood, sorted by neighborhood name
    pub counts: Vec<(String, u64)>,

    /// Average price per neighborhood, restricted to neighborhoods with at
    /// least one numeric price
    pub average_prices: Vec<(String, f64)>,
}

/// Generates the HTML dashboard from the persisted JSON document
///
/// # Arguments
///
/// * `config` - Output locations (JSON source and report destination)
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written report
/// * `Err(ReportError)` - Data missing, unreadable, or report unwritable
pub fn generate_report(config: &OutputConfig) -> Result<PathBuf, ReportError> {
    let json_path = config.json_path();
    if !json_path.exists() {
        return Err(ReportError::MissingData(json_path.display().to_string()));
    }

    let records = load_records(&json_path)?;
    tracing::info!("Loaded {} records from {}", records.len(), json_path.display());

    let summary = summarize(&records);
    let html = render_dashboard(&summary);

    let report_path = PathBuf::from(&config.report_path);
    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&report_path, html)?;

    Ok(report_path)
}

/// Derives the neighborhood grouping key of a record
fn neighborhood_of(record: &PropertyRecord) -> String {
    record
        .get("location")
        .and_then(FieldValue::as_text)
        .map(|loc| loc.split(" - ").next().unwrap_or(loc).trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_NEIGHBORHOOD.to_string())
}

/// Numeric price of a record, if coercible
fn price_of(record: &PropertyRecord) -> Option<f64> {
    record.get("price").and_then(FieldValue::as_number)
}

/// Groups the records by neighborhood and computes the chart aggregates
pub fn summarize(records: &[PropertyRecord]) -> DashboardSummary {
    let mut groups: BTreeMap<String, (u64, f64, u64)> = BTreeMap::new();

    for record in records {
        let entry = groups.entry(neighborhood_of(record)).or_default();
        entry.0 += 1;
        if let Some(price) = price_of(record) {
            entry.1 += price;
            entry.2 += 1;
        }
    }

    let counts = groups
        .iter()
        .map(|(name, (count, _, _))| (name.clone(), *count))
        .collect();

    let average_prices = groups
        .iter()
        .filter(|(_, (_, _, priced))| *priced > 0)
        .map(|(name, (_, sum, priced))| (name.clone(), sum / *priced as f64))
        .collect();

    DashboardSummary {
        counts,
        average_prices,
    }
}

/// Renders the full dashboard document
pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang='pt-BR'>\n<head>\n");
    html.push_str("    <meta charset='utf-8'>\n");
    html.push_str("    <title>Dashboard OLX</title>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str("    <h1>Dashboard OLX Imóveis - João Pessoa</h1>\n");

    let counts: Vec<(String, f64)> = summary
        .counts
        .iter()
        .map(|(name, count)| (name.clone(), *count as f64))
        .collect();
    html.push_str(&render_bar_chart("Número de casas por bairro", &counts));
    html.push_str(&render_bar_chart(
        "Preço médio por bairro",
        &summary.average_prices,
    ));

    html.push_str(&format!(
        "    <p><small>Gerado em {}</small></p>\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    ));
    html.push_str("</body>\n</html>\n");

    html
}

/// Renders one horizontal bar chart as inline SVG
fn render_bar_chart(title: &str, bars: &[(String, f64)]) -> String {
    const BAR_HEIGHT: u32 = 24;
    const BAR_GAP: u32 = 8;
    const LABEL_WIDTH: u32 = 200;
    const CHART_WIDTH: u32 = 420;

    let mut chart = String::new();
    chart.push_str(&format!("    <h2>{}</h2>\n", escape_html(title)));

    if bars.is_empty() {
        chart.push_str("    <p>Sem dados</p>\n");
        return chart;
    }

    let max = bars.iter().map(|(_, v)| *v).fold(f64::MIN, f64::max);
    let height = bars.len() as u32 * (BAR_HEIGHT + BAR_GAP);

    chart.push_str(&format!(
        "    <svg width='{}' height='{}' role='img'>\n",
        LABEL_WIDTH + CHART_WIDTH + 110,
        height
    ));

    for (i, (name, value)) in bars.iter().enumerate() {
        let y = i as u32 * (BAR_HEIGHT + BAR_GAP);
        let width = if max > 0.0 {
            ((value / max) * CHART_WIDTH as f64).round() as u32
        } else {
            0
        };

        chart.push_str(&format!(
            "        <text x='{}' y='{}' text-anchor='end' font-size='13'>{}</text>\n",
            LABEL_WIDTH - 8,
            y + BAR_HEIGHT / 2 + 4,
            escape_html(name)
        ));
        chart.push_str(&format!(
            "        <rect x='{}' y='{}' width='{}' height='{}' fill='#4c78a8'></rect>\n",
            LABEL_WIDTH, y, width, BAR_HEIGHT
        ));
        chart.push_str(&format!(
            "        <text x='{}' y='{}' font-size='13'>{:.0}</text>\n",
            LABEL_WIDTH + width + 6,
            y + BAR_HEIGHT / 2 + 4,
            value
        ));
    }

    chart.push_str("    </svg>\n");
    chart
}

/// Escapes scraped text for embedding in the HTML document
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&#39;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::write_json;
    use tempfile::tempdir;

    fn record(url: &str, location: Option<&str>, price: Option<&str>) -> PropertyRecord {
        let mut record = PropertyRecord::new(url);
        if let Some(location) = location {
            record.insert_first("location", FieldValue::Text(location.to_string()));
        }
        if let Some(price) = price {
            record.insert_first("price", FieldValue::Text(price.to_string()));
        }
        record
    }

    #[test]
    fn test_neighborhood_is_prefix_of_location() {
        let record = record("u1", Some("Manaíra - João Pessoa"), None);
        assert_eq!(neighborhood_of(&record), "Manaíra");
    }

    #[test]
    fn test_missing_location_falls_back_to_single_group() {
        let records = vec![
            record("u1", None, Some("100000")),
            record("u2", None, None),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.counts, vec![("N/A".to_string(), 2)]);
    }

    #[test]
    fn test_summarize_counts_and_averages() {
        let records = vec![
            record("u1", Some("Bessa - João Pessoa"), Some("200000")),
            record("u2", Some("Bessa - João Pessoa"), Some("400000")),
            record("u3", Some("Centro - João Pessoa"), Some("abc")),
        ];
        let summary = summarize(&records);

        assert_eq!(
            summary.counts,
            vec![
                ("Bessa".to_string(), 2),
                ("Centro".to_string(), 1),
            ]
        );
        // Centro has no numeric price, so only Bessa gets an average
        assert_eq!(summary.average_prices.len(), 1);
        assert_eq!(summary.average_prices[0].0, "Bessa");
        assert!((summary.average_prices[0].1 - 300000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_numeric_price_field_is_coerced() {
        let mut with_number = PropertyRecord::new("u1");
        with_number.insert_first("price", FieldValue::Number(150000.0));
        assert_eq!(price_of(&with_number), Some(150000.0));
    }

    #[test]
    fn test_render_dashboard_contains_both_charts() {
        let summary = summarize(&[record("u1", Some("Bessa - JP"), Some("100000"))]);
        let html = render_dashboard(&summary);
        assert!(html.contains("Número de casas por bairro"));
        assert!(html.contains("Preço médio por bairro"));
        assert!(html.contains("<svg"));
        assert!(html.contains("Bessa"));
    }

    #[test]
    fn test_generate_report_requires_persisted_data() {
        let dir = tempdir().unwrap();
        let config = OutputConfig {
            data_dir: dir.path().to_string_lossy().into_owned(),
            basename: "ads".to_string(),
            report_path: dir.path().join("dash.html").to_string_lossy().into_owned(),
        };

        let err = generate_report(&config).unwrap_err();
        assert!(matches!(err, ReportError::MissingData(_)));
    }

    #[test]
    fn test_generate_report_writes_html() {
        let dir = tempdir().unwrap();
        let config = OutputConfig {
            data_dir: dir.path().to_string_lossy().into_owned(),
            basename: "ads".to_string(),
            report_path: dir.path().join("dash.html").to_string_lossy().into_owned(),
        };

        let records = vec![record("u1", Some("Bessa - JP"), Some("100000"))];
        write_json(&records, &config.json_path()).unwrap();

        let path = generate_report(&config).unwrap();
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Gerado em"));
    }
}
