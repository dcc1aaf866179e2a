//! Per-realm hierarchy cache
//!
//! Hierarchies are built lazily the first time a realm rewrites a route and kept
//! for the life of the process.

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::error::ScopeResult;
use crate::hierarchy::{HierarchyGraph, ScopeDeclaration};

/// Statistics about cache performance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Total number of entries in cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe map from realm to its built hierarchy
#[derive(Debug, Default)]
pub struct HierarchyCache {
    /// Built graphs keyed by realm
    graphs: DashMap<String, Arc<HierarchyGraph>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl HierarchyCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the realm's hierarchy, building it from `declaration` on first use
    ///
    /// A build failure is returned and nothing is cached, so the next call
    /// fails the same way.
    pub fn get_or_build(
        &self,
        realm: &str,
        declaration: &ScopeDeclaration,
    ) -> ScopeResult<Arc<HierarchyGraph>> {
        if let Some(graph) = self.graphs.get(realm) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(graph.value()));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(realm, "Building scope hierarchy for realm");

        let graph = Arc::new(HierarchyGraph::build(declaration)?);
        let entry = self
            .graphs
            .entry(realm.to_string())
            .or_insert_with(|| Arc::clone(&graph));

        Ok(Arc::clone(entry.value()))
    }

    /// Returns true if a hierarchy is cached for the realm
    pub fn contains(&self, realm: &str) -> bool {
        self.graphs.contains_key(realm)
    }

    /// Returns the number of cached hierarchies
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Returns true if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Drops every cached hierarchy and resets statistics
    pub fn clear(&self) {
        self.graphs.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Returns cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.graphs.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScopeError;
    use crate::fixtures::scope_options;
    use crate::hierarchy::ScopeItem;

    #[test]
    fn test_builds_once_per_realm() {
        let cache = HierarchyCache::new();
        let options = scope_options();

        let first = cache.get_or_build("default", &options).unwrap();
        let second = cache.get_or_build("default", &options).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
        assert!((cache.stats().hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_realms_are_isolated() {
        let cache = HierarchyCache::new();

        let full = cache.get_or_build("api", &scope_options()).unwrap();
        let small = cache
            .get_or_build("admin", &ScopeDeclaration::new(vec![ScopeItem::name("admin")]))
            .unwrap();

        assert_eq!(full.len(), 11);
        assert_eq!(small.len(), 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cached_graph_is_not_rebuilt_from_new_options() {
        let cache = HierarchyCache::new();
        cache.get_or_build("default", &scope_options()).unwrap();

        let graph = cache
            .get_or_build("default", &ScopeDeclaration::default())
            .unwrap();
        assert!(graph.contains("admin"));
    }

    #[test]
    fn test_failed_build_is_not_cached() {
        let cache = HierarchyCache::new();
        let invalid = ScopeDeclaration::new(vec!["dup".into(), "dup".into()]);

        assert_eq!(
            cache.get_or_build("default", &invalid).map(|_| ()),
            Err(ScopeError::DuplicateScope("dup".to_string()))
        );
        assert!(!cache.contains("default"));
    }

    #[test]
    fn test_clear() {
        let cache = HierarchyCache::new();
        cache.get_or_build("default", &scope_options()).unwrap();

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_concurrent_access() {
        use std::thread;

        let cache = Arc::new(HierarchyCache::new());
        let mut handles = vec![];

        for i in 0..10 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                let realm = format!("realm-{}", i % 2);
                cache.get_or_build(&realm, &scope_options()).unwrap().len()
            }));
        }

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 11);
        }

        let stats = cache.stats();
        assert_eq!(stats.hits + stats.misses, 10);
        assert_eq!(stats.entries, 2);
    }
}
