// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! template-model-core: template-aware traversal of typed content trees.
//!
//! Model types declare a template id and their base templates in a
//! [`MetadataSource`]. From those declarations the crate derives, per source,
//! a type → template map and a template → subtype map, caches both, and uses
//! them to answer "children / descendants / ancestors / parent / first child
//! of this node that are a `T`", where a node also counts as a `T` when its
//! template declares `T`'s template as a base.
//!
//! Tree navigation and casting are delegated to the [`ContentRepository`] and
//! [`ModelCaster`] ports. Nodes that fail to cast are skipped.
//!
//! ```
//! use std::sync::Arc;
//! use template_model_core::{
//!     AnyModel, CollaboratorError, ContentNode, ContentRepository, ModelCaster, ModelModule,
//!     ModelType, SourceKey, TemplateId, TemplateModel, TemplateModelHelperExt,
//!     TemplateModelService,
//! };
//!
//! const SITE: SourceKey = SourceKey("site");
//! const PAGE: &str = "11111111-1111-1111-1111-111111111111";
//!
//! #[derive(Clone)]
//! struct Node(TemplateId);
//! impl ContentNode for Node {
//!     fn template_id(&self) -> TemplateId {
//!         self.0
//!     }
//! }
//!
//! struct Flat(Vec<Node>);
//! impl ContentRepository for Flat {
//!     type Node = Node;
//!     fn children(&self, _: &Node) -> Result<Vec<Node>, CollaboratorError> {
//!         Ok(self.0.clone())
//!     }
//!     fn descendants(&self, n: &Node) -> Result<Vec<Node>, CollaboratorError> {
//!         self.children(n)
//!     }
//!     fn ancestors(&self, _: &Node) -> Result<Vec<Node>, CollaboratorError> {
//!         Ok(Vec::new())
//!     }
//!     fn parent(&self, _: &Node) -> Result<Option<Node>, CollaboratorError> {
//!         Ok(None)
//!     }
//! }
//!
//! struct Page;
//! impl TemplateModel for Page {
//!     const SOURCE: SourceKey = SITE;
//! }
//!
//! struct Caster;
//! impl ModelCaster<Node> for Caster {
//!     fn cast(&self, _: &Node, _: &ModelType) -> Result<Option<AnyModel>, CollaboratorError> {
//!         Ok(Some(Box::new(Page)))
//!     }
//! }
//!
//! let page = TemplateId::parse(PAGE).unwrap_or_default();
//! let other = TemplateId::parse("33333333-3333-3333-3333-333333333333").unwrap_or_default();
//! let service = TemplateModelService::builder(Flat(vec![Node(page), Node(other)]), Caster)
//!     .source(Arc::new(ModelModule::new(SITE).declare::<Page>(PAGE, None)))
//!     .build();
//!
//! let pages = service.children::<Page>(Some(&Node(page)))?;
//! assert_eq!(pages.len(), 1);
//! # Ok::<(), template_model_core::TemplateModelError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

pub mod cache;
pub mod config;
mod error;
pub mod filter;
pub mod global;
mod helper;
mod ident;
pub mod index;
mod model;
mod nav;
mod port;
pub mod resolver;
mod service;
mod source;

pub use cache::{CacheStats, TemplateCache};
pub use config::{InheritanceDepth, TemplateModelConfig};
pub use error::TemplateModelError;
pub use helper::{TemplateModelHelper, TemplateModelHelperExt};
pub use ident::{SourceKey, TemplateId};
pub use index::{InheritanceMap, ModelDescriptor, TypeTemplateMap};
pub use model::{ContentItem, ModelType, TemplateModel, UNFILTERED_SOURCE};
pub use nav::TemplateNavigation;
pub use port::{AnyModel, CollaboratorError, ContentNode, ContentRepository, ModelCaster};
pub use resolver::MatchingTemplates;
pub use service::{TemplateModelService, TemplateModelServiceBuilder};
pub use source::{DeclaredModel, MetadataSource, ModelModule, TemplateAttribute};
