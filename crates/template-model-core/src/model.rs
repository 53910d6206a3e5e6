// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Model type identity and the `TemplateModel` trait.
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::ident::SourceKey;

/// Runtime identity of a content-model type.
///
/// Equality and hashing use the Rust [`TypeId`] only; `name`, `source` and
/// `unfiltered` are carried along for lookups, logging and error messages.
#[derive(Clone, Copy)]
pub struct ModelType {
    id: TypeId,
    name: &'static str,
    source: SourceKey,
    unfiltered: bool,
}

impl ModelType {
    /// Identity of the model type `T`.
    pub fn of<T: TemplateModel>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            source: T::SOURCE,
            unfiltered: T::UNFILTERED,
        }
    }

    /// Rust type identity.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Metadata source the type is declared in.
    pub fn source(&self) -> SourceKey {
        self.source
    }

    /// `true` for the general node-handle type, which bypasses template
    /// filtering entirely.
    pub fn is_unfiltered(&self) -> bool {
        self.unfiltered
    }
}

impl PartialEq for ModelType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelType {}

impl Hash for ModelType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelType")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("unfiltered", &self.unfiltered)
            .finish()
    }
}

/// A strongly typed view over a content node.
///
/// Implementors name the metadata source their template declaration lives in.
/// The declaration itself (template id, base templates) is supplied by that
/// source, not by the type.
pub trait TemplateModel: Any + Send + Sized {
    /// Metadata source (model module) this type is declared in.
    const SOURCE: SourceKey;

    /// Set only by general node-handle types; such requests return every
    /// relative without template filtering.
    const UNFILTERED: bool = false;

    /// Runtime identity of this model type.
    fn model_type() -> ModelType {
        ModelType::of::<Self>()
    }
}

/// Source key used by [`ContentItem`]; it never takes part in resolution.
pub const UNFILTERED_SOURCE: SourceKey = SourceKey("template-model::unfiltered");

/// The general node-handle model: any content node, unfiltered.
///
/// Requesting `ContentItem<N>` from a traversal returns every relative as
/// cast by the model caster, regardless of template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem<N>(pub N);

impl<N> ContentItem<N> {
    /// Unwraps the raw node.
    pub fn into_inner(self) -> N {
        self.0
    }

    /// Borrows the raw node.
    pub fn node(&self) -> &N {
        &self.0
    }
}

impl<N: Send + 'static> TemplateModel for ContentItem<N> {
    const SOURCE: SourceKey = UNFILTERED_SOURCE;
    const UNFILTERED: bool = true;
}
