// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Process-wide helper slots, one per node type.
//!
//! An application installs its default composition once with
//! [`install_default`]; tests (or anything else) may then swap in another
//! implementation with [`install_override`] and restore the default with
//! [`clear_override`]. [`helper`] resolves the override first, then the
//! default factory.
use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock, RwLock};

use rustc_hash::FxHashMap;

use crate::error::TemplateModelError;
use crate::helper::TemplateModelHelper;

/// Shared helper handle for node type `N`.
pub type SharedHelper<N> = Arc<dyn TemplateModelHelper<N>>;

/// Produces the default helper for node type `N`.
pub type HelperFactory<N> = Arc<dyn Fn() -> SharedHelper<N> + Send + Sync>;

struct Slot<N: 'static> {
    default: Option<HelperFactory<N>>,
    replacement: Option<SharedHelper<N>>,
}

impl<N: 'static> Clone for Slot<N> {
    fn clone(&self) -> Self {
        Self {
            default: self.default.clone(),
            replacement: self.replacement.clone(),
        }
    }
}

impl<N: 'static> Default for Slot<N> {
    fn default() -> Self {
        Self {
            default: None,
            replacement: None,
        }
    }
}

type Slots = RwLock<FxHashMap<TypeId, Box<dyn Any + Send + Sync>>>;

static SLOTS: OnceLock<Slots> = OnceLock::new();

fn slots() -> &'static Slots {
    SLOTS.get_or_init(Slots::default)
}

fn read_slot<N: 'static>() -> Slot<N> {
    let slots = slots().read().unwrap_or_else(|e| e.into_inner());
    slots
        .get(&TypeId::of::<N>())
        .and_then(|slot| slot.downcast_ref::<Slot<N>>())
        .cloned()
        .unwrap_or_default()
}

fn update_slot<N: 'static>(update: impl FnOnce(&mut Slot<N>)) {
    let mut slots = slots().write().unwrap_or_else(|e| e.into_inner());
    let entry = slots
        .entry(TypeId::of::<N>())
        .or_insert_with(|| Box::new(Slot::<N>::default()) as Box<dyn Any + Send + Sync>);
    if let Some(slot) = entry.downcast_mut::<Slot<N>>() {
        update(slot);
    }
}

/// Registers the factory for the default helper of node type `N`,
/// replacing any previous factory.
pub fn install_default<N, F>(factory: F)
where
    N: 'static,
    F: Fn() -> SharedHelper<N> + Send + Sync + 'static,
{
    let factory: HelperFactory<N> = Arc::new(factory);
    update_slot::<N>(|slot| slot.default = Some(factory));
}

/// Routes every traversal on `N` through `helper` until cleared.
pub fn install_override<N: 'static>(helper: SharedHelper<N>) {
    update_slot::<N>(|slot| slot.replacement = Some(helper));
}

/// Removes the override for `N`, returning it if one was installed.
pub fn clear_override<N: 'static>() -> Option<SharedHelper<N>> {
    let mut removed = None;
    update_slot::<N>(|slot| removed = slot.replacement.take());
    removed
}

/// Current helper for node type `N`: the override if set, otherwise a helper
/// from the default factory.
///
/// The factory runs outside the slot lock, so it may itself consult the
/// slots.
pub fn helper<N: 'static>() -> Result<SharedHelper<N>, TemplateModelError> {
    let slot = read_slot::<N>();
    if let Some(replacement) = slot.replacement {
        return Ok(replacement);
    }
    slot.default
        .map(|factory| factory())
        .ok_or_else(|| TemplateModelError::NoHelperInstalled {
            node: std::any::type_name::<N>(),
        })
}
