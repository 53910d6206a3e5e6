// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Resolver settings.

use serde::{Deserialize, Serialize};

/// How far subtype expansion follows the inheritance map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritanceDepth {
    /// The requested template plus its direct subtypes only.
    #[default]
    Direct,
    /// The requested template plus every template reachable through the
    /// inheritance map (cycle safe).
    Transitive,
}

/// Settings for a template model service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateModelConfig {
    /// Subtype expansion depth.
    pub inheritance: InheritanceDepth,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_direct_expansion() {
        assert_eq!(TemplateModelConfig::default().inheritance, InheritanceDepth::Direct);
        let parsed: TemplateModelConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, TemplateModelConfig::default());
    }

    #[test]
    fn reads_snake_case_depth() {
        let parsed: TemplateModelConfig =
            serde_json::from_str(r#"{"inheritance":"transitive"}"#).unwrap();
        assert_eq!(parsed.inheritance, InheritanceDepth::Transitive);
    }
}
