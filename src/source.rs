use std::path::PathBuf;

use async_trait::async_trait;
use url::Url;

use crate::error::{LoadError, LoadResult};
use crate::types::RawRecord;

/// Where raw catalog records come from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the whole raw record array.
    async fn fetch(&self) -> LoadResult<Vec<RawRecord>>;
    /// Human readable location, for logs.
    fn describe(&self) -> String;
}

/// Decode a payload that must be a JSON array. Elements are not validated.
pub fn parse_records(bytes: &[u8]) -> LoadResult<Vec<RawRecord>> {
    Ok(serde_json::from_slice::<Vec<RawRecord>>(bytes)?)
}

pub struct HttpSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: Url, user_agent: &str) -> LoadResult<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch(&self) -> LoadResult<Vec<RawRecord>> {
        let resp = self.client.get(self.url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status { url: self.url.to_string(), status: status.as_u16() });
        }
        let bytes = resp.bytes().await?;
        parse_records(&bytes)
    }

    fn describe(&self) -> String { self.url.to_string() }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

#[async_trait]
impl CatalogSource for FileSource {
    async fn fetch(&self) -> LoadResult<Vec<RawRecord>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io { path: self.path.clone(), source })?;
        parse_records(&bytes)
    }

    fn describe(&self) -> String { self.path.display().to_string() }
}

/// Records held in memory; useful for embedding a fixed catalog.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<RawRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<RawRecord>) -> Self { Self { records } }
}

#[async_trait]
impl CatalogSource for MemorySource {
    async fn fetch(&self) -> LoadResult<Vec<RawRecord>> { Ok(self.records.clone()) }

    fn describe(&self) -> String { format!("memory ({} records)", self.records.len()) }
}

/// Pick a source for `location`: http(s) URLs go over the network, `file://`
/// URLs and anything else are read from disk.
pub fn source_for_location(location: &str, user_agent: &str) -> LoadResult<Box<dyn CatalogSource>> {
    let loc = location.trim();
    if loc.is_empty() {
        return Err(LoadError::InvalidLocation("empty location".to_string()));
    }
    let lower = loc.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        let url = Url::parse(loc).map_err(|e| LoadError::InvalidLocation(format!("{loc}: {e}")))?;
        return Ok(Box::new(HttpSource::new(url, user_agent)?));
    }
    if lower.starts_with("file://") {
        let url = Url::parse(loc).map_err(|e| LoadError::InvalidLocation(format!("{loc}: {e}")))?;
        let path = url
            .to_file_path()
            .map_err(|_| LoadError::InvalidLocation(format!("{loc}: not a local path")))?;
        return Ok(Box::new(FileSource::new(path)));
    }
    Ok(Box::new(FileSource::new(loc)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_non_arrays() {
        assert!(matches!(parse_records(br#"{"title": "A"}"#), Err(LoadError::Parse(_))));
        assert!(matches!(parse_records(b"not json"), Err(LoadError::Parse(_))));
        assert_eq!(parse_records(b"[]").unwrap().len(), 0);
    }

    #[test]
    fn location_dispatch() {
        let s = source_for_location("https://example.com/movies.json", "t").unwrap();
        assert_eq!(s.describe(), "https://example.com/movies.json");
        let f = source_for_location("data/movies.json", "t").unwrap();
        assert_eq!(f.describe(), "data/movies.json");
        assert!(matches!(source_for_location("  ", "t"), Err(LoadError::InvalidLocation(_))));
        assert!(matches!(source_for_location("http://", "t"), Err(LoadError::InvalidLocation(_))));
    }

    #[tokio::test]
    async fn file_source_reads_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");
        std::fs::write(&path, br#"[{"title": "A"}, {"name": "B"}]"#).unwrap();
        let recs = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(recs.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("nope.json")).fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
