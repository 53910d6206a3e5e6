// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Template filtering and casting of raw traversal results.
use tracing::trace;

use crate::error::TemplateModelError;
use crate::model::ModelType;
use crate::port::{AnyModel, ContentNode, ModelCaster};
use crate::resolver::MatchingTemplates;

/// Whether a traversal restricts nodes by template before casting.
#[derive(Debug, Clone, Copy)]
pub enum TemplateFilter<'a> {
    /// Cast every node.
    Unfiltered,
    /// Cast only nodes whose template is in the set.
    Matching(&'a MatchingTemplates),
}

impl<'a> TemplateFilter<'a> {
    /// Filter for a request of `target`; general node-handle types always get
    /// [`TemplateFilter::Unfiltered`].
    pub fn for_target(target: &ModelType, matching: Option<&'a MatchingTemplates>) -> Self {
        match matching {
            Some(set) if !target.is_unfiltered() => Self::Matching(set),
            _ => Self::Unfiltered,
        }
    }

    /// Returns `true` if `node` passes.
    pub fn admits<N: ContentNode>(&self, node: &N) -> bool {
        match self {
            Self::Unfiltered => true,
            Self::Matching(set) => set.contains(&node.template_id()),
        }
    }
}

/// Filters `nodes` and casts the survivors to `target`, keeping order.
///
/// Nodes the caster cannot turn into `target` are dropped; caster errors
/// abort the whole traversal.
pub fn filter_and_cast<N, C>(
    nodes: &[N],
    filter: TemplateFilter<'_>,
    target: &ModelType,
    caster: &C,
) -> Result<Vec<AnyModel>, TemplateModelError>
where
    N: ContentNode,
    C: ModelCaster<N> + ?Sized,
{
    let mut cast = Vec::with_capacity(nodes.len());
    for node in nodes.iter().filter(|node| filter.admits(*node)) {
        if let Some(model) = cast_one(node, target, caster)? {
            cast.push(model);
        }
    }
    Ok(cast)
}

/// Returns the first node that passes `filter` and casts to `target`.
pub fn first_cast<N, C>(
    nodes: &[N],
    filter: TemplateFilter<'_>,
    target: &ModelType,
    caster: &C,
) -> Result<Option<AnyModel>, TemplateModelError>
where
    N: ContentNode,
    C: ModelCaster<N> + ?Sized,
{
    for node in nodes.iter().filter(|node| filter.admits(*node)) {
        if let Some(model) = cast_one(node, target, caster)? {
            return Ok(Some(model));
        }
    }
    Ok(None)
}

/// Casts a single node without any template check.
pub fn cast_one<N, C>(
    node: &N,
    target: &ModelType,
    caster: &C,
) -> Result<Option<AnyModel>, TemplateModelError>
where
    N: ContentNode,
    C: ModelCaster<N> + ?Sized,
{
    let cast = caster
        .cast(node, target)
        .map_err(TemplateModelError::Caster)?;
    if cast.is_none() {
        trace!(template = %node.template_id(), model = target.name(), "cast produced no result");
    }
    Ok(cast)
}
