use serde::Deserialize;
use std::fmt;

use vw_core::{Article, Error, Result};

const HEADLINES_URL: &str = "https://api.thenewsapi.com/v1/news/top";

/// Placeholder shown when a vendor record carries no usable image.
pub const DEFAULT_NEWS_IMAGE: &str = "https://picsum.photos/seed/voicewire-news/800/450";

/// One raw vendor headline. Every field is optional; the vendor is assumed
/// well-formed but not trusted to be.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Deserialize)]
struct VendorResponse {
    #[serde(default)]
    data: Vec<VendorArticle>,
}

#[derive(Debug, Clone)]
pub struct HeadlineQuery {
    pub topic: String,
    pub section: String,
    pub limit: u32,
    pub country: String,
    pub lang: String,
}

impl Default for HeadlineQuery {
    fn default() -> Self {
        Self {
            topic: "news".to_string(),
            section: "general".to_string(),
            limit: 10,
            country: "us".to_string(),
            lang: "en".to_string(),
        }
    }
}

pub struct NewsClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl NewsClient {
    pub fn new(api_key: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Config("News API key must not be empty".to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: HEADLINES_URL.to_string(),
        })
    }

    /// Fetch current headlines, already normalized. Unlike the generation
    /// path, any failure here is logged and swallowed to an empty list.
    pub async fn top_headlines(&self, query: &HeadlineQuery) -> Vec<Article> {
        match self.fetch(query).await {
            Ok(records) => records
                .iter()
                .enumerate()
                .map(|(index, record)| normalize_vendor(record, index))
                .collect(),
            Err(e) => {
                tracing::warn!("News vendor request failed, returning no headlines: {e}");
                Vec::new()
            }
        }
    }

    async fn fetch(&self, query: &HeadlineQuery) -> Result<Vec<VendorArticle>> {
        let response = self
            .client
            .get(&self.base_url)
            .header("x-api-key", &self.api_key)
            .query(&[
                ("topic", query.topic.clone()),
                ("section", query.section.clone()),
                ("limit", query.limit.to_string()),
                ("country", query.country.clone()),
                ("lang", query.lang.clone()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let envelope: VendorResponse = response.json().await?;
        Ok(envelope.data)
    }
}

/// Straight field remap into the uniform article shape. No derivation
/// heuristics here; only the image gets a fallback.
pub fn normalize_vendor(record: &VendorArticle, index: usize) -> Article {
    let title = record.title.clone().unwrap_or_default();
    let summary = record.description.clone().unwrap_or_default();

    Article {
        id: (index + 1).to_string(),
        title: title.clone(),
        original_title: title,
        summary: summary.clone(),
        original_summary: summary,
        image_url: record
            .image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_NEWS_IMAGE)
            .to_string(),
        published_at: record.published_at.clone().unwrap_or_default(),
        original_url: record.url.clone().unwrap_or_default(),
        source: record.source.clone().unwrap_or_default(),
        person_name: String::new(),
        ai_generated: false,
        full_generated_text: None,
    }
}
