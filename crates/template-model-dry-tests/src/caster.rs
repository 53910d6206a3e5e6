// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Table-driven `ModelCaster` for [`TreeNode`]s.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use template_model_core::{
    AnyModel, CollaboratorError, ContentItem, ModelCaster, ModelType, TemplateModel,
};

use crate::tree::TreeNode;

type CastFn = Box<dyn Fn(&TreeNode) -> Option<AnyModel> + Send + Sync>;

/// Casts nodes using one registered closure per model type.
///
/// `ContentItem<TreeNode>` is always castable. Types with no registration
/// never cast, which is how tests model "the caster said no".
pub struct FixtureCaster {
    casts: HashMap<TypeId, CastFn>,
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl FixtureCaster {
    /// Caster that only knows `ContentItem<TreeNode>`.
    pub fn new() -> Self {
        let mut casts: HashMap<TypeId, CastFn> = HashMap::new();
        casts.insert(
            TypeId::of::<ContentItem<TreeNode>>(),
            Box::new(|node: &TreeNode| Some(Box::new(ContentItem(node.clone())) as AnyModel)),
        );
        Self {
            casts,
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    /// Register how to build a `T` from a node; `None` rejects the node.
    pub fn with<T, F>(mut self, cast: F) -> Self
    where
        T: TemplateModel,
        F: Fn(&TreeNode) -> Option<T> + Send + Sync + 'static,
    {
        self.casts.insert(
            TypeId::of::<T>(),
            Box::new(move |node: &TreeNode| cast(node).map(|model| Box::new(model) as AnyModel)),
        );
        self
    }

    /// Register a cast that produces an `U` when asked for a `T`.
    ///
    /// Simulates a misbehaving caster; the helper should drop the result.
    pub fn with_mismatch<T, U>(mut self, cast: fn(&TreeNode) -> U) -> Self
    where
        T: TemplateModel,
        U: TemplateModel,
    {
        self.casts.insert(
            TypeId::of::<T>(),
            Box::new(move |node: &TreeNode| Some(Box::new(cast(node)) as AnyModel)),
        );
        self
    }

    /// Cast attempts so far, failed ones included.
    pub fn cast_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent cast fail.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl Default for FixtureCaster {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelCaster<TreeNode> for FixtureCaster {
    fn cast(
        &self,
        node: &TreeNode,
        target: &ModelType,
    ) -> Result<Option<AnyModel>, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(format!("simulated cast failure for {}", node.name()).into());
        }
        Ok(self.casts.get(&target.id()).and_then(|cast| cast(node)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tree::InMemoryContentTree;
    use template_model_core::{SourceKey, TemplateId};

    #[derive(Debug, PartialEq)]
    struct Named(String);
    impl TemplateModel for Named {
        const SOURCE: SourceKey = SourceKey("caster-tests");
    }

    #[test]
    fn registered_and_unregistered_types() {
        let tree = InMemoryContentTree::new();
        let node = tree.add_root("n", TemplateId::NIL);
        let caster = FixtureCaster::new().with(|n: &TreeNode| Some(Named(n.name().to_owned())));

        let named = caster.cast(&node, &Named::model_type()).unwrap().unwrap();
        assert_eq!(*named.downcast::<Named>().unwrap(), Named("n".into()));

        let item = caster
            .cast(&node, &ContentItem::<TreeNode>::model_type())
            .unwrap()
            .unwrap();
        assert_eq!(item.downcast::<ContentItem<TreeNode>>().unwrap().0, node);

        let empty = FixtureCaster::new();
        assert!(empty.cast(&node, &Named::model_type()).unwrap().is_none());
        assert_eq!(caster.cast_count(), 2);
    }

    #[test]
    fn failure_switch() {
        let tree = InMemoryContentTree::new();
        let node = tree.add_root("n", TemplateId::NIL);
        let caster = FixtureCaster::new();
        caster.set_fail(true);
        assert!(caster
            .cast(&node, &ContentItem::<TreeNode>::model_type())
            .is_err());
        assert_eq!(caster.cast_count(), 1);
    }
}
