//! Per-viewer list cache with generation-based invalidation.
//!
//! Every mutation bumps the generation for its entity kind, so cached list
//! results from before the mutation can never be served again (at-least-once
//! refresh, not transactional consistency).

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value as JsonValue;

use campana_auth::ScopeKind;
use campana_core::ProfileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    kind: ScopeKind,
    viewer_id: ProfileId,
}

#[derive(Debug, Clone)]
struct CachedList {
    generation: u64,
    rows: Vec<JsonValue>,
}

/// List-result cache keyed by (entity kind, viewer).
#[derive(Debug, Default)]
pub struct ListCache {
    entries: RwLock<HashMap<CacheKey, CachedList>>,
    generations: RwLock<HashMap<ScopeKind, u64>>,
}

impl ListCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn generation(&self, kind: ScopeKind) -> u64 {
        self.generations
            .read()
            .ok()
            .and_then(|gens| gens.get(&kind).copied())
            .unwrap_or(0)
    }

    /// A cached list, if one exists from the current generation.
    pub fn get(&self, kind: ScopeKind, viewer_id: ProfileId) -> Option<Vec<JsonValue>> {
        let generation = self.generation(kind);
        let entries = self.entries.read().ok()?;
        entries
            .get(&CacheKey { kind, viewer_id })
            .filter(|cached| cached.generation == generation)
            .map(|cached| cached.rows.clone())
    }

    pub fn put(&self, kind: ScopeKind, viewer_id: ProfileId, rows: Vec<JsonValue>) {
        let generation = self.generation(kind);
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                CacheKey { kind, viewer_id },
                CachedList { generation, rows },
            );
        }
    }

    /// Drop every cached list for `kind` by bumping its generation.
    pub fn invalidate(&self, kind: ScopeKind) {
        if let Ok(mut gens) = self.generations.write() {
            *gens.entry(kind).or_insert(0) += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn put_then_get_roundtrips() {
        let cache = ListCache::new();
        let viewer = ProfileId::new();
        cache.put(ScopeKind::Alert, viewer, vec![json!({ "id": "a1" })]);

        let rows = cache.get(ScopeKind::Alert, viewer).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn invalidation_drops_cached_lists_for_the_kind() {
        let cache = ListCache::new();
        let viewer = ProfileId::new();
        cache.put(ScopeKind::Alert, viewer, vec![json!({ "id": "a1" })]);
        cache.put(ScopeKind::Task, viewer, vec![json!({ "id": "t1" })]);

        cache.invalidate(ScopeKind::Alert);

        assert!(cache.get(ScopeKind::Alert, viewer).is_none());
        // Other kinds are untouched.
        assert!(cache.get(ScopeKind::Task, viewer).is_some());
    }

    #[test]
    fn caches_are_per_viewer() {
        let cache = ListCache::new();
        cache.put(ScopeKind::Voter, ProfileId::new(), vec![json!({ "id": "v1" })]);
        assert!(cache.get(ScopeKind::Voter, ProfileId::new()).is_none());
    }
}
