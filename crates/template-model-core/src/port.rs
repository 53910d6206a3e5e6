// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ports to the content tree and the model caster.
//!
//! Storage, navigation and casting live outside this crate; adapters
//! implement these traits for a concrete content store.
use std::any::Any;

use crate::ident::TemplateId;
use crate::model::ModelType;

/// Error raised by an external collaborator; propagated unchanged.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// A cast model instance with its concrete type erased.
pub type AnyModel = Box<dyn Any + Send>;

/// A raw node handle from the content tree.
pub trait ContentNode {
    /// Template the node was created from.
    fn template_id(&self) -> TemplateId;
}

/// Read-only navigation over the content tree.
pub trait ContentRepository: Send + Sync {
    /// Raw node handle type.
    type Node: ContentNode;

    /// Direct children in tree order.
    fn children(&self, node: &Self::Node) -> Result<Vec<Self::Node>, CollaboratorError>;

    /// Every node below `node`, in tree order.
    fn descendants(&self, node: &Self::Node) -> Result<Vec<Self::Node>, CollaboratorError>;

    /// Ancestor chain, nearest first.
    fn ancestors(&self, node: &Self::Node) -> Result<Vec<Self::Node>, CollaboratorError>;

    /// Direct parent; `None` at the root.
    fn parent(&self, node: &Self::Node) -> Result<Option<Self::Node>, CollaboratorError>;
}

/// Turns raw nodes into typed model instances.
pub trait ModelCaster<N>: Send + Sync {
    /// Casts `node` to `target`.
    ///
    /// `Ok(None)` means the node does not have the shape of `target`, which
    /// is an expected outcome. `Err` is reserved for caster failures. The
    /// returned box must hold a value of the type `target` identifies.
    fn cast(&self, node: &N, target: &ModelType) -> Result<Option<AnyModel>, CollaboratorError>;
}
