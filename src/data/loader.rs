//! Asynchronous loading of the feature collection and the centroid lookup.
//!
//! Every fetch is bounded by a timeout. A failed or timed out feature fetch, or an
//! unparseable document, switches to the built-in demonstration dataset; a failed
//! centroid fetch yields an empty lookup. Neither is ever returned as an error.

use crate::data::{centroids::CenterLookup, demo, geojson::FeatureCollection};
use crate::spatial::index::BoundingBoxIndexer;
use crate::traits::DataSource;
use crate::{MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::time::Duration;

/// Shared HTTP client; building it once avoids TLS and connection pool setup for
/// every request.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("yieldmap/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
});

/// Plain HTTP GET
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch_text(&self) -> Result<String> {
        let response = HTTP_CLIENT.get(&self.url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Local file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn fetch_text(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Picks [`HttpSource`] for `http(s)://` locations and [`FileSource`] otherwise
pub fn source_for(location: &str) -> Box<dyn DataSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// In-memory document, or a fixed failure
pub struct StaticSource {
    label: String,
    body: std::result::Result<String, String>,
}

impl StaticSource {
    pub fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: Ok(body.into()),
        }
    }

    pub fn failing(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: Err(reason.into()),
        }
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn fetch_text(&self) -> Result<String> {
        self.body.clone().map_err(MapError::DataLoad)
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Which dataset ended up loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    Primary,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub collection: FeatureCollection,
    pub origin: DatasetOrigin,
    pub source: String,
}

async fn fetch_with_timeout(source: &dyn DataSource, timeout: Duration) -> Result<String> {
    tokio::time::timeout(timeout, source.fetch_text())
        .await
        .map_err(|_| MapError::Timeout(timeout))?
}

/// Loads and indexes the feature collection, falling back to the demonstration
/// dataset on any failure.
pub async fn load_features(source: &dyn DataSource, timeout: Duration) -> LoadedDataset {
    let origin = source.describe();
    let parsed = fetch_with_timeout(source, timeout)
        .await
        .and_then(|text| FeatureCollection::from_json_str(&text));

    let (collection, origin_kind) = match parsed {
        Ok(collection) => {
            log::info!("loaded {} features from {}", collection.len(), origin);
            (collection, DatasetOrigin::Primary)
        }
        Err(e) => {
            log::warn!(
                "data load failure from {}: {}; using the demonstration dataset",
                origin,
                e
            );
            (demo::fallback_collection(), DatasetOrigin::Fallback)
        }
    };
    BoundingBoxIndexer::index(&collection);

    LoadedDataset {
        collection,
        origin: origin_kind,
        source: origin,
    }
}

/// Loads the centroid lookup. No source, a failed fetch or a bad document all give
/// an empty lookup.
pub async fn load_center_lookup(source: Option<&dyn DataSource>, timeout: Duration) -> CenterLookup {
    let Some(source) = source else {
        return CenterLookup::new();
    };
    let parsed = fetch_with_timeout(source, timeout)
        .await
        .and_then(|text| CenterLookup::from_json_str(&text));
    match parsed {
        Ok(lookup) => {
            log::info!("loaded {} centroids from {}", lookup.len(), source.describe());
            lookup
        }
        Err(e) => {
            let e = MapError::LookupUnavailable(format!("{}: {}", source.describe(), e));
            log::warn!("{}; falling back to computed centers", e);
            CenterLookup::new()
        }
    }
}

/// Fetches features and centroids concurrently
pub async fn load_all(
    features: &dyn DataSource,
    centroids: Option<&dyn DataSource>,
    timeout: Duration,
) -> (LoadedDataset, CenterLookup) {
    futures::join!(
        load_features(features, timeout),
        load_center_lookup(centroids, timeout)
    )
}
