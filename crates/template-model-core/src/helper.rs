// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The traversal contract, in object-safe and typed form.
//!
//! [`TemplateModelHelper`] works on [`ModelType`] values and erased model
//! instances so it can live behind `dyn` (the global helper slot stores it
//! that way). [`TemplateModelHelperExt`] restores static typing on top and is
//! what callers normally use.
use tracing::warn;

use crate::error::TemplateModelError;
use crate::model::{ModelType, TemplateModel};
use crate::port::AnyModel;

/// Relatives of a node that are compatible with a requested model type.
///
/// Every operation treats an absent node as "no relatives". Requests for a
/// general node-handle type are never filtered by template.
pub trait TemplateModelHelper<N>: Send + Sync {
    /// Children whose template is the target's template or a direct subtype.
    fn children_of(
        &self,
        node: Option<&N>,
        target: &ModelType,
    ) -> Result<Vec<AnyModel>, TemplateModelError>;

    /// Descendants whose template matches the target.
    fn descendants_of(
        &self,
        node: Option<&N>,
        target: &ModelType,
    ) -> Result<Vec<AnyModel>, TemplateModelError>;

    /// Ancestors (nearest first) whose template matches the target.
    fn ancestors_of(
        &self,
        node: Option<&N>,
        target: &ModelType,
    ) -> Result<Vec<AnyModel>, TemplateModelError>;

    /// The parent cast to the target. Not filtered by template.
    fn parent_of(
        &self,
        node: Option<&N>,
        target: &ModelType,
    ) -> Result<Option<AnyModel>, TemplateModelError>;

    /// The first matching child.
    fn first_child_of(
        &self,
        node: Option<&N>,
        target: &ModelType,
    ) -> Result<Option<AnyModel>, TemplateModelError>;
}

/// Typed traversal methods for any [`TemplateModelHelper`].
pub trait TemplateModelHelperExt<N>: TemplateModelHelper<N> {
    /// Children compatible with `T`.
    fn children<T: TemplateModel>(&self, node: Option<&N>) -> Result<Vec<T>, TemplateModelError> {
        Ok(downcast_all(self.children_of(node, &T::model_type())?))
    }

    /// Descendants compatible with `T`.
    fn descendants<T: TemplateModel>(
        &self,
        node: Option<&N>,
    ) -> Result<Vec<T>, TemplateModelError> {
        Ok(downcast_all(self.descendants_of(node, &T::model_type())?))
    }

    /// Ancestors compatible with `T`, nearest first.
    fn ancestors<T: TemplateModel>(&self, node: Option<&N>) -> Result<Vec<T>, TemplateModelError> {
        Ok(downcast_all(self.ancestors_of(node, &T::model_type())?))
    }

    /// The parent as a `T`, if it casts.
    fn parent<T: TemplateModel>(&self, node: Option<&N>) -> Result<Option<T>, TemplateModelError> {
        Ok(self
            .parent_of(node, &T::model_type())?
            .and_then(downcast::<T>))
    }

    /// The first child compatible with `T`.
    fn first_child<T: TemplateModel>(
        &self,
        node: Option<&N>,
    ) -> Result<Option<T>, TemplateModelError> {
        Ok(self
            .first_child_of(node, &T::model_type())?
            .and_then(downcast::<T>))
    }
}

impl<N, H: TemplateModelHelper<N> + ?Sized> TemplateModelHelperExt<N> for H {}

fn downcast<T: TemplateModel>(model: AnyModel) -> Option<T> {
    match model.downcast::<T>() {
        Ok(typed) => Some(*typed),
        Err(_) => {
            warn!(
                model = std::any::type_name::<T>(),
                "caster returned an instance of a different type; dropping it"
            );
            None
        }
    }
}

fn downcast_all<T: TemplateModel>(models: Vec<AnyModel>) -> Vec<T> {
    models.into_iter().filter_map(downcast::<T>).collect()
}
