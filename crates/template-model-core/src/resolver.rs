// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Expansion of a requested model type into its matching template set.
use rustc_hash::FxHashSet;

use crate::config::InheritanceDepth;
use crate::error::TemplateModelError;
use crate::ident::TemplateId;
use crate::index::{InheritanceMap, TypeTemplateMap};
use crate::model::ModelType;

/// Templates accepted for a requested model type: its own template first,
/// then subtype templates in inheritance-map order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingTemplates {
    ids: Vec<TemplateId>,
}

impl MatchingTemplates {
    /// The requested type's own template.
    pub fn primary(&self) -> TemplateId {
        self.ids[0]
    }

    /// Returns `true` if `id` is accepted.
    pub fn contains(&self, id: &TemplateId) -> bool {
        self.ids.contains(id)
    }

    /// Accepted templates as a slice (primary first).
    pub fn as_slice(&self) -> &[TemplateId] {
        &self.ids
    }

    /// Number of accepted templates.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always `false`: the primary template is always present.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Template id of `model`, or [`TemplateId::NIL`] when it has none.
pub fn template_id_of(model: &ModelType, types: &TypeTemplateMap) -> TemplateId {
    types.get(model).unwrap_or_default()
}

/// Resolves the templates a request for `model` should match.
///
/// With [`InheritanceDepth::Direct`] only templates declaring the primary one
/// as a base are added; grandchildren are included only if they name the
/// primary template directly. [`InheritanceDepth::Transitive`] walks the whole
/// map breadth first and visits each template once.
pub fn matching_template_ids(
    model: &ModelType,
    types: &TypeTemplateMap,
    inheritance: &InheritanceMap,
    depth: InheritanceDepth,
) -> Result<MatchingTemplates, TemplateModelError> {
    let primary = template_id_of(model, types);
    if primary.is_nil() {
        return Err(TemplateModelError::UnresolvableTemplate {
            model: model.name(),
        });
    }

    let mut ids = vec![primary];
    match depth {
        InheritanceDepth::Direct => {
            ids.extend(
                inheritance
                    .subtypes(&primary)
                    .iter()
                    .filter(|id| **id != primary),
            );
        }
        InheritanceDepth::Transitive => {
            let mut seen: FxHashSet<TemplateId> = FxHashSet::default();
            seen.insert(primary);
            let mut cursor = 0;
            while cursor < ids.len() {
                let current = ids[cursor];
                cursor += 1;
                for sub in inheritance.subtypes(&current) {
                    if seen.insert(*sub) {
                        ids.push(*sub);
                    }
                }
            }
        }
    }
    Ok(MatchingTemplates { ids })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ident::SourceKey;
    use crate::model::TemplateModel;
    use crate::source::ModelModule;

    const KEY: SourceKey = SourceKey("resolver-tests");
    const PAGE: &str = "11111111-1111-1111-1111-111111111111";
    const NEWS: &str = "22222222-2222-2222-2222-222222222222";
    const BREAKING: &str = "55555555-5555-5555-5555-555555555555";

    struct Page;
    impl TemplateModel for Page {
        const SOURCE: SourceKey = KEY;
    }
    struct News;
    impl TemplateModel for News {
        const SOURCE: SourceKey = KEY;
    }
    struct Breaking;
    impl TemplateModel for Breaking {
        const SOURCE: SourceKey = KEY;
    }
    struct Undeclared;
    impl TemplateModel for Undeclared {
        const SOURCE: SourceKey = KEY;
    }

    fn id(text: &str) -> TemplateId {
        TemplateId::parse(text).unwrap()
    }

    fn maps(module: &ModelModule) -> (TypeTemplateMap, InheritanceMap) {
        (TypeTemplateMap::build(module), InheritanceMap::build(module))
    }

    fn three_generations() -> ModelModule {
        ModelModule::new(KEY)
            .declare::<Page>(PAGE, None)
            .declare::<News>(NEWS, PAGE)
            .declare::<Breaking>(BREAKING, NEWS)
    }

    #[test]
    fn leaf_type_matches_only_itself() {
        let (types, inh) = maps(&three_generations());
        let m = matching_template_ids(&Breaking::model_type(), &types, &inh, InheritanceDepth::Direct)
            .unwrap();
        assert_eq!(m.as_slice(), &[id(BREAKING)]);
        assert_eq!(m.primary(), id(BREAKING));
    }

    #[test]
    fn direct_expansion_is_one_level_and_one_way() {
        let (types, inh) = maps(&three_generations());
        let page =
            matching_template_ids(&Page::model_type(), &types, &inh, InheritanceDepth::Direct)
                .unwrap();
        assert_eq!(page.as_slice(), &[id(PAGE), id(NEWS)]);
        assert!(!page.contains(&id(BREAKING)));

        let news =
            matching_template_ids(&News::model_type(), &types, &inh, InheritanceDepth::Direct)
                .unwrap();
        assert!(!news.contains(&id(PAGE)));
    }

    #[test]
    fn transitive_expansion_reaches_grandchildren() {
        let (types, inh) = maps(&three_generations());
        let page =
            matching_template_ids(&Page::model_type(), &types, &inh, InheritanceDepth::Transitive)
                .unwrap();
        assert_eq!(page.as_slice(), &[id(PAGE), id(NEWS), id(BREAKING)]);
    }

    #[test]
    fn transitive_expansion_survives_cycles() {
        let module = ModelModule::new(KEY)
            .declare::<Page>(PAGE, NEWS)
            .declare::<News>(NEWS, PAGE);
        let (types, inh) = maps(&module);
        let page =
            matching_template_ids(&Page::model_type(), &types, &inh, InheritanceDepth::Transitive)
                .unwrap();
        assert_eq!(page.as_slice(), &[id(PAGE), id(NEWS)]);
    }

    #[test]
    fn self_inheritance_does_not_duplicate_primary() {
        let module = ModelModule::new(KEY).declare::<Page>(PAGE, PAGE);
        let (types, inh) = maps(&module);
        let page =
            matching_template_ids(&Page::model_type(), &types, &inh, InheritanceDepth::Direct)
                .unwrap();
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn undeclared_type_is_unresolvable() {
        let (types, inh) = maps(&three_generations());
        let err =
            matching_template_ids(&Undeclared::model_type(), &types, &inh, InheritanceDepth::Direct)
                .unwrap_err();
        assert!(matches!(err, TemplateModelError::UnresolvableTemplate { model } if model.ends_with("Undeclared")));
        assert!(template_id_of(&Undeclared::model_type(), &types).is_nil());
    }
}
