use hashbrown::HashMap as FastHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::path::normalize_template;
use crate::route::{ParsedRoute, TemplateResult, compile_template};

/// Compiled routes keyed by normalized template, so `/a/{id}`, `a/{id}` and `a/{id}?x`
/// share one entry.
///
/// Entries are never evicted. Lookups take the read lock only; a miss re-checks under the
/// write lock so each template is compiled at most once.
#[derive(Debug, Default)]
pub struct TemplateCache {
    map: RwLock<FastHashMap<Box<str>, Arc<ParsedRoute>>>,
    stats: CacheStats,
    debug: bool,
}

impl TemplateCache {
    pub fn new(debug: bool) -> Self {
        Self {
            map: RwLock::new(FastHashMap::new()),
            stats: CacheStats::default(),
            debug,
        }
    }

    pub fn get(&self, template: &str) -> Option<Arc<ParsedRoute>> {
        self.map.read().get(normalize_template(template)).cloned()
    }

    pub fn get_or_compile(&self, template: &str) -> TemplateResult<Arc<ParsedRoute>> {
        if let Some(route) = self.get(template) {
            self.record_hit(template);
            return Ok(route);
        }

        let key = normalize_template(template);
        let mut map = self.map.write();
        if let Some(route) = map.get(key) {
            self.record_hit(template);
            return Ok(route.clone());
        }

        self.stats.record_miss();
        if self.debug {
            tracing::event!(
                tracing::Level::DEBUG,
                cache = "miss",
                template = %template,
                "route template cache miss"
            );
        }

        let route = Arc::new(compile_template(template)?);
        map.insert(key.into(), route.clone());
        Ok(route)
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn record_hit(&self, template: &str) {
        self.stats.record_hit();
        if self.debug {
            tracing::event!(
                tracing::Level::DEBUG,
                cache = "hit",
                template = %template,
                "route template cache hit"
            );
        }
    }
}

#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStats {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// `(hits, misses)`
    pub fn snapshot(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}
