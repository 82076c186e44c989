use serde::Deserialize;

/// Main configuration structure for Imovel-Radar
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            http: HttpConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Listing URL for page 1; later pages get the page-number query appended
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// Maximum number of listing pages to walk
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Politeness delay between ad fetches (milliseconds)
    #[serde(rename = "ad-delay-ms")]
    pub ad_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://www.olx.com.br/imoveis/estado-pb/paraiba/joao-pessoa"
                .to_string(),
            max_pages: 5,
            ad_delay_ms: 1000,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent on every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/126.0 Safari/537.36"
                .to_string(),
            timeout_secs: 30,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the persisted documents
    #[serde(rename = "data-dir")]
    pub data_dir: String,

    /// Base name of the JSON/CSV document pair
    pub basename: String,

    /// Path of the generated HTML dashboard
    #[serde(rename = "report-path")]
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            basename: "olx_properties".to_string(),
            report_path: "data/dashboard.html".to_string(),
        }
    }
}

impl OutputConfig {
    /// Path of the persisted JSON document
    pub fn json_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join(format!("{}.json", self.basename))
    }

    /// Path of the persisted CSV document
    pub fn csv_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join(format!("{}.csv", self.basename))
    }
}
