// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Metadata source wrapper that counts scans.

use std::sync::atomic::{AtomicUsize, Ordering};
use template_model_core::{DeclaredModel, MetadataSource, SourceKey};

/// Wraps a [`MetadataSource`] and counts `declared_models` calls.
///
/// A warm cache should never scan again, so tests assert on
/// [`scan_count`](Self::scan_count).
pub struct CountingSource<S> {
    inner: S,
    scans: AtomicUsize,
}

impl<S> CountingSource<S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            scans: AtomicUsize::new(0),
        }
    }

    /// Number of scans so far.
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: MetadataSource> MetadataSource for CountingSource<S> {
    fn key(&self) -> SourceKey {
        self.inner.key()
    }

    fn declared_models(&self) -> Vec<DeclaredModel> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        self.inner.declared_models()
    }
}
