// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error type for template model operations.
use thiserror::Error;

use crate::port::CollaboratorError;

/// Errors surfaced by template model traversals.
///
/// Unparseable identifiers and failed casts are not errors; they are dropped
/// silently. Only an unusable model type and collaborator failures reach the
/// caller.
#[derive(Debug, Error)]
pub enum TemplateModelError {
    /// The requested model type has no usable template id.
    #[error("unable to read a template id from model type {model}")]
    UnresolvableTemplate {
        /// Fully qualified name of the requested type.
        model: &'static str,
    },
    /// The content repository failed.
    #[error("content repository error: {0}")]
    Repository(#[source] CollaboratorError),
    /// The model caster failed (as opposed to reporting "no result").
    #[error("model caster error: {0}")]
    Caster(#[source] CollaboratorError),
    /// No helper is installed for the node type.
    #[error("no template model helper installed for node type {node}")]
    NoHelperInstalled {
        /// Fully qualified name of the node type.
        node: &'static str,
    },
}
