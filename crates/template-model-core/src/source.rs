// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Metadata sources: where model types declare their templates.
//!
//! A [`MetadataSource`] plays the role of a model module. It yields every
//! model type it declares together with the raw [`TemplateAttribute`] data,
//! exactly as written. Parsing happens later, in the index, and never fails:
//! malformed declarations simply contribute nothing.

use crate::ident::{SourceKey, TemplateId};
use crate::model::{ModelType, TemplateModel};

/// Template declaration attached to a model type, as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateAttribute {
    /// Declared template id (unparsed).
    pub template_id: Option<String>,
    /// Declared base templates, comma separated (unparsed).
    pub base_templates: Option<String>,
}

impl TemplateAttribute {
    /// Builds an attribute from raw declaration strings.
    pub fn new<I, B>(template_id: I, base_templates: B) -> Self
    where
        I: Into<Option<String>>,
        B: Into<Option<String>>,
    {
        Self {
            template_id: template_id.into(),
            base_templates: base_templates.into(),
        }
    }

    /// Parsed template id, or [`TemplateId::NIL`] when unset or unparseable.
    pub fn template_id(&self) -> TemplateId {
        self.template_id
            .as_deref()
            .and_then(TemplateId::parse)
            .unwrap_or_default()
    }

    /// Parsed base templates; unparseable entries are dropped.
    pub fn base_templates(&self) -> Vec<TemplateId> {
        TemplateId::parse_list(self.base_templates.as_deref())
    }
}

/// One model type exposed by a source, with its declaration.
#[derive(Debug, Clone)]
pub struct DeclaredModel {
    /// The declaring type.
    pub model: ModelType,
    /// Its template declaration.
    pub attribute: TemplateAttribute,
}

/// Supplies model declarations for one model module.
pub trait MetadataSource: Send + Sync {
    /// Stable identity of this source; used as the cache key.
    ///
    /// Services share [`TemplateCache::shared`](crate::TemplateCache::shared)
    /// by default, so a key must name the same declarations process-wide.
    fn key(&self) -> SourceKey;

    /// Every model type carrying a template declaration, in declaration order.
    fn declared_models(&self) -> Vec<DeclaredModel>;
}

/// In-memory [`MetadataSource`] assembled by the application.
///
/// ```
/// use template_model_core::{ModelModule, SourceKey, TemplateModel};
///
/// struct Page;
/// impl TemplateModel for Page {
///     const SOURCE: SourceKey = SourceKey("site-models");
/// }
///
/// let module = ModelModule::new(SourceKey("site-models"))
///     .declare::<Page>("11111111-1111-1111-1111-111111111111", None);
/// assert_eq!(module.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ModelModule {
    key: SourceKey,
    models: Vec<DeclaredModel>,
}

impl ModelModule {
    /// Creates an empty module.
    pub fn new(key: SourceKey) -> Self {
        Self {
            key,
            models: Vec::new(),
        }
    }

    /// Declares `T` with a template id and optional comma-separated base
    /// templates.
    pub fn declare<T: TemplateModel>(
        self,
        template_id: &str,
        base_templates: impl Into<Option<&'static str>>,
    ) -> Self {
        let attribute = TemplateAttribute::new(
            template_id.to_owned(),
            base_templates.into().map(str::to_owned),
        );
        self.declare_with::<T>(attribute)
    }

    /// Declares `T` with an explicit attribute value.
    pub fn declare_with<T: TemplateModel>(mut self, attribute: TemplateAttribute) -> Self {
        self.models.push(DeclaredModel {
            model: T::model_type(),
            attribute,
        });
        self
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` if nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl MetadataSource for ModelModule {
    fn key(&self) -> SourceKey {
        self.key
    }

    fn declared_models(&self) -> Vec<DeclaredModel> {
        self.models.clone()
    }
}
