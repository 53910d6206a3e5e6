// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Traversal methods directly on content nodes, routed through the
//! process-wide helper for the node type.
use crate::error::TemplateModelError;
use crate::global;
use crate::helper::TemplateModelHelperExt;
use crate::model::TemplateModel;
use crate::port::ContentNode;

/// `node.children::<Page>()` and friends.
///
/// Each call looks up [`global::helper`] for `Self`, so whatever helper is
/// installed (or overriding) at that moment answers it.
pub trait TemplateNavigation: ContentNode + Sized + 'static {
    /// Children compatible with `T`.
    fn children<T: TemplateModel>(&self) -> Result<Vec<T>, TemplateModelError> {
        global::helper::<Self>()?.children::<T>(Some(self))
    }

    /// Descendants compatible with `T`.
    fn descendants<T: TemplateModel>(&self) -> Result<Vec<T>, TemplateModelError> {
        global::helper::<Self>()?.descendants::<T>(Some(self))
    }

    /// Ancestors compatible with `T`, nearest first.
    fn ancestors<T: TemplateModel>(&self) -> Result<Vec<T>, TemplateModelError> {
        global::helper::<Self>()?.ancestors::<T>(Some(self))
    }

    /// The parent as a `T`, if it casts.
    fn parent<T: TemplateModel>(&self) -> Result<Option<T>, TemplateModelError> {
        global::helper::<Self>()?.parent::<T>(Some(self))
    }

    /// The first child compatible with `T`.
    fn first_child<T: TemplateModel>(&self) -> Result<Option<T>, TemplateModelError> {
        global::helper::<Self>()?.first_child::<T>(Some(self))
    }
}

impl<N: ContentNode + 'static> TemplateNavigation for N {}
