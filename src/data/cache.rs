use std::path::Path;
use std::sync::Arc;

use super::error::{LoadError, SchemaMismatch};
use super::loader;
use super::model::DealTable;

// ---------------------------------------------------------------------------
// Single-entry source cache
// ---------------------------------------------------------------------------

/// Process-wide cache for the loaded source, keyed on the source path.
///
/// Empty at startup, populated by the first successful load, never
/// invalidated within a run (the source is immutable for a session's
/// lifetime). Requesting a different source replaces the entry.
#[derive(Debug, Default)]
pub struct SourceCache {
    entry: Option<CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    source: String,
    table: Arc<DealTable>,
    schema_warning: Option<SchemaMismatch>,
}

impl SourceCache {
    pub fn new() -> Self {
        SourceCache { entry: None }
    }

    /// Return the cached table for `path`, loading it on the first request.
    /// A failed load leaves the cache unchanged.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<DealTable>, LoadError> {
        let source = path.to_string_lossy().into_owned();

        if let Some(entry) = &self.entry {
            if entry.source == source {
                log::debug!("cache hit for {source}");
                return Ok(Arc::clone(&entry.table));
            }
        }

        let outcome = loader::load_file(path)?;
        let table = Arc::new(outcome.table);
        self.entry = Some(CacheEntry {
            source,
            table: Arc::clone(&table),
            schema_warning: outcome.schema_warning,
        });
        Ok(table)
    }

    /// The schema warning raised by the cached load, if any.
    pub fn schema_warning(&self) -> Option<&SchemaMismatch> {
        self.entry.as_ref().and_then(|e| e.schema_warning.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CSV: &str = "year,country,industry,investor,amount_usd_millions\n\
                       2020,Nigeria,Fintech,A,10\n";

    #[test]
    fn test_second_request_does_not_reread_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deals.csv");
        fs::write(&path, CSV).unwrap();

        let mut cache = SourceCache::new();
        let first = cache.get_or_load(&path).unwrap();
        assert_eq!(first.len(), 1);

        // Rewrite the file on disk; the cached table must win.
        fs::write(
            &path,
            "year,country,industry,investor,amount_usd_millions\n\
             2021,Kenya,Health,B,5\n\
             2022,Egypt,Energy,C,7\n",
        )
        .unwrap();

        let second = cache.get_or_load(&path).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second.deals[0].country, "Nigeria");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_failed_load_leaves_cache_empty() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.csv");

        let mut cache = SourceCache::new();
        assert!(cache.get_or_load(&missing).is_err());
        assert!(cache.schema_warning().is_none());

        // A later good load still populates the cache.
        let path = dir.path().join("deals.csv");
        fs::write(&path, CSV).unwrap();
        assert!(cache.get_or_load(&path).is_ok());
    }

    #[test]
    fn test_different_source_replaces_the_entry() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, CSV).unwrap();
        fs::write(
            &b,
            "year,country,industry,investor,amount_usd_millions\n\
             2021,Kenya,Health,B,5\n",
        )
        .unwrap();

        let mut cache = SourceCache::new();
        assert_eq!(cache.get_or_load(&a).unwrap().deals[0].country, "Nigeria");
        assert_eq!(cache.get_or_load(&b).unwrap().deals[0].country, "Kenya");
    }

    #[test]
    fn test_schema_warning_is_retained() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.csv");
        fs::write(&path, "year,country,amount_usd_millions\n2020,Nigeria,10\n").unwrap();

        let mut cache = SourceCache::new();
        cache.get_or_load(&path).unwrap();
        let warning = cache.schema_warning().unwrap();
        assert_eq!(warning.missing, vec!["industry", "investor"]);
    }
}
