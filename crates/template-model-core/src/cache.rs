// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-source memoization of the derived template maps.
//!
//! [`TemplateCache`] holds two independent get-or-compute tables keyed by
//! [`SourceKey`]: type → template and template → subtypes. Entries are never
//! evicted; once a source is scanned its maps stay valid for the lifetime of
//! the cache.
//!
//! # Concurrency
//!
//! A lookup takes a read lock; a miss computes the map with no lock held and
//! then inserts under a write lock. Two callers racing on the same cold key may
//! both compute, but only the first insertion is retained and every caller
//! receives that retained map. Computations for different keys never wait on
//! each other.
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::ident::SourceKey;
use crate::index::{InheritanceMap, TypeTemplateMap};
use crate::source::MetadataSource;

/// Build counters, for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Type → template maps computed (retained or discarded after a race).
    pub type_map_builds: usize,
    /// Inheritance maps computed (retained or discarded after a race).
    pub inheritance_map_builds: usize,
}

/// Shareable, thread-safe cache of derived template maps.
#[derive(Debug, Default)]
pub struct TemplateCache {
    type_maps: RwLock<FxHashMap<SourceKey, Arc<TypeTemplateMap>>>,
    inheritance_maps: RwLock<FxHashMap<SourceKey, Arc<InheritanceMap>>>,
    type_map_builds: AtomicUsize,
    inheritance_map_builds: AtomicUsize,
}

static SHARED: OnceLock<Arc<TemplateCache>> = OnceLock::new();

impl TemplateCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache, created on first access and kept until exit.
    pub fn shared() -> Arc<Self> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::new())))
    }

    /// Type → template map for `source`, computed on first request.
    pub fn type_map(&self, source: &dyn MetadataSource) -> Arc<TypeTemplateMap> {
        get_or_compute(&self.type_maps, source.key(), || {
            self.type_map_builds.fetch_add(1, Ordering::Relaxed);
            debug!(source = %source.key(), "building type-to-template map");
            TypeTemplateMap::build(source)
        })
    }

    /// Inheritance map for `source`, computed on first request.
    pub fn inheritance_map(&self, source: &dyn MetadataSource) -> Arc<InheritanceMap> {
        get_or_compute(&self.inheritance_maps, source.key(), || {
            self.inheritance_map_builds.fetch_add(1, Ordering::Relaxed);
            debug!(source = %source.key(), "building inheritance map");
            InheritanceMap::build(source)
        })
    }

    /// Returns `true` if both maps for `key` are cached.
    pub fn is_warm(&self, key: SourceKey) -> bool {
        contains(&self.type_maps, &key) && contains(&self.inheritance_maps, &key)
    }

    /// Snapshot of the build counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            type_map_builds: self.type_map_builds.load(Ordering::Relaxed),
            inheritance_map_builds: self.inheritance_map_builds.load(Ordering::Relaxed),
        }
    }
}

// Lock poisoning is recovered: writers only ever insert a fully built `Arc`,
// so a panic elsewhere cannot leave a table half-updated.
fn get_or_compute<K, V, F>(table: &RwLock<FxHashMap<K, Arc<V>>>, key: K, compute: F) -> Arc<V>
where
    K: Eq + Hash,
    F: FnOnce() -> V,
{
    {
        let read = table.read().unwrap_or_else(|e| e.into_inner());
        if let Some(found) = read.get(&key) {
            return Arc::clone(found);
        }
    }
    let computed = Arc::new(compute());
    let mut write = table.write().unwrap_or_else(|e| e.into_inner());
    Arc::clone(write.entry(key).or_insert(computed))
}

fn contains<K: Eq + Hash, V>(table: &RwLock<FxHashMap<K, V>>, key: &K) -> bool {
    table
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .contains_key(key)
}
