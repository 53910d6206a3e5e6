// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Derived maps over a metadata source: type → template and
//! template → direct subtype templates.
use std::any::TypeId;

use rustc_hash::FxHashMap;

use crate::ident::TemplateId;
use crate::model::ModelType;
use crate::source::{MetadataSource, TemplateAttribute};

/// Parsed declaration of one model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Declared template, `None` when unset or unparseable.
    pub template_id: Option<TemplateId>,
    /// Declared base templates in declaration order.
    pub base_template_ids: Vec<TemplateId>,
}

impl From<&TemplateAttribute> for ModelDescriptor {
    fn from(attr: &TemplateAttribute) -> Self {
        Self {
            template_id: attr.template_id.as_deref().and_then(TemplateId::parse),
            base_template_ids: attr.base_templates(),
        }
    }
}

/// Enumerates the source's declared types with their parsed descriptors.
pub fn collect_descriptors(source: &dyn MetadataSource) -> Vec<(ModelType, ModelDescriptor)> {
    source
        .declared_models()
        .iter()
        .map(|declared| (declared.model, ModelDescriptor::from(&declared.attribute)))
        .collect()
}

/// Model type → template id, for types with a parseable template id.
#[derive(Debug, Clone, Default)]
pub struct TypeTemplateMap {
    entries: FxHashMap<TypeId, TemplateId>,
}

impl TypeTemplateMap {
    /// Scans `source`. A type declared twice keeps its first template id.
    pub fn build(source: &dyn MetadataSource) -> Self {
        let mut entries = FxHashMap::default();
        for (model, descriptor) in collect_descriptors(source) {
            let Some(template_id) = descriptor.template_id else {
                continue;
            };
            entries.entry(model.id()).or_insert(template_id);
        }
        Self { entries }
    }

    /// Template id of `model`, if it has one.
    pub fn get(&self, model: &ModelType) -> Option<TemplateId> {
        self.entries.get(&model.id()).copied()
    }

    /// Number of typed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no type carries a usable template id.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Base template → templates of the types declaring it as a base.
///
/// A template without recorded subtypes has no entry at all.
#[derive(Debug, Clone, Default)]
pub struct InheritanceMap {
    subtypes: FxHashMap<TemplateId, Vec<TemplateId>>,
}

impl InheritanceMap {
    /// Scans `source`, inverting the declared base-template relation.
    ///
    /// Types whose own template id is nil are skipped along with their base
    /// declarations. Subtype lists keep declaration order and hold each
    /// template once.
    pub fn build(source: &dyn MetadataSource) -> Self {
        let mut subtypes: FxHashMap<TemplateId, Vec<TemplateId>> = FxHashMap::default();
        for (_, descriptor) in collect_descriptors(source) {
            let template_id = descriptor.template_id.unwrap_or_default();
            if template_id.is_nil() {
                continue;
            }
            for base in descriptor.base_template_ids {
                let children = subtypes.entry(base).or_default();
                if !children.contains(&template_id) {
                    children.push(template_id);
                }
            }
        }
        Self { subtypes }
    }

    /// Direct subtype templates of `base`; empty when none are recorded.
    pub fn subtypes(&self, base: &TemplateId) -> &[TemplateId] {
        self.subtypes.get(base).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if `base` has at least one recorded subtype.
    pub fn contains(&self, base: &TemplateId) -> bool {
        self.subtypes.contains_key(base)
    }

    /// Number of base templates with recorded subtypes.
    pub fn len(&self) -> usize {
        self.subtypes.len()
    }

    /// Returns `true` if no inheritance was declared.
    pub fn is_empty(&self) -> bool {
        self.subtypes.is_empty()
    }
}
