// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]

use proptest::prelude::*;
use template_model_core::{TemplateAttribute, TemplateId};
use uuid::Uuid;

#[derive(Debug, Clone)]
enum Segment {
    Valid(u128, bool),
    Garbage(String),
}

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        (any::<u128>(), any::<bool>()).prop_map(|(raw, padded)| Segment::Valid(raw, padded)),
        "[g-z]{0,8}".prop_map(Segment::Garbage),
    ]
}

fn render(segment: &Segment) -> String {
    match segment {
        Segment::Valid(raw, true) => format!(" {} ", Uuid::from_u128(*raw)),
        Segment::Valid(raw, false) => Uuid::from_u128(*raw).to_string(),
        Segment::Garbage(text) => text.clone(),
    }
}

proptest! {
    #[test]
    fn base_lists_keep_exactly_the_valid_segments_in_order(
        segments in prop::collection::vec(segment(), 0..12)
    ) {
        let text = segments.iter().map(render).collect::<Vec<_>>().join(",");
        let expected: Vec<TemplateId> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Valid(raw, _) => Some(TemplateId(Uuid::from_u128(*raw))),
                Segment::Garbage(_) => None,
            })
            .collect();

        prop_assert_eq!(TemplateId::parse_list(Some(&text)), expected.clone());
        let attribute = TemplateAttribute::new(None::<String>, Some(text));
        prop_assert_eq!(attribute.base_templates(), expected);
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".{0,64}") {
        let _ = TemplateId::parse(&text);
        let _ = TemplateId::parse_list(Some(&text));
    }
}
