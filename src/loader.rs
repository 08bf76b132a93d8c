use std::time::Duration;

use tracing::{debug, info};

use crate::error::{LoadError, LoadResult};
use crate::mapping::normalize_all;
use crate::source::CatalogSource;
use crate::types::Item;

/// Loader owns a source and turns its raw records into items.
/// It never touches catalog state; the browser applies the result.
pub struct CatalogLoader {
    source: Box<dyn CatalogSource>,
    timeout: Option<Duration>,
}

impl CatalogLoader {
    pub fn new(source: Box<dyn CatalogSource>) -> Self { Self { source, timeout: None } }

    /// `None` or a zero duration waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|d| !d.is_zero());
        self
    }

    pub fn source(&self) -> &dyn CatalogSource { self.source.as_ref() }

    pub async fn load(&self) -> LoadResult<Vec<Item>> {
        let location = self.source.describe();
        debug!(%location, timeout = ?self.timeout, "fetching catalog");
        let raws = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.source.fetch())
                .await
                .map_err(|_| LoadError::Timeout(limit))??,
            None => self.source.fetch().await?,
        };
        let items = normalize_all(&raws);
        info!(%location, count = items.len(), "catalog loaded");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::types::{ItemKind, RawRecord};
    use async_trait::async_trait;

    struct Hung;

    #[async_trait]
    impl CatalogSource for Hung {
        async fn fetch(&self) -> LoadResult<Vec<RawRecord>> {
            std::future::pending::<()>().await;
            Ok(Vec::new())
        }
        fn describe(&self) -> String { "hung".into() }
    }

    #[tokio::test]
    async fn normalizes_every_record_in_order() {
        let src = MemorySource::new(vec![
            RawRecord::new().with("title", "A").with("year", 2000),
            RawRecord::new().with("name", "B").with("creationDate", "2020"),
        ]);
        let items = CatalogLoader::new(Box::new(src)).load().await.unwrap();
        assert_eq!(items.iter().map(|i| i.kind).collect::<Vec<_>>(), vec![ItemKind::Media, ItemKind::Technology]);
        assert_eq!(items.iter().map(|i| i.year.as_str()).collect::<Vec<_>>(), vec!["2000", "2020"]);
    }

    #[tokio::test]
    async fn hung_source_times_out() {
        let loader = CatalogLoader::new(Box::new(Hung)).with_timeout(Some(Duration::from_millis(20)));
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Timeout(d) if d == Duration::from_millis(20)));
    }

    #[test]
    fn zero_timeout_disables_the_limit() {
        let loader = CatalogLoader::new(Box::new(Hung)).with_timeout(Some(Duration::ZERO));
        assert!(loader.timeout.is_none());
    }
}
