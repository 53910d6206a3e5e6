// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Template and metadata-source identifiers.
use std::fmt;

use uuid::Uuid;

/// Strongly typed identifier for a content template (schema).
///
/// `TemplateId` wraps a UUID. [`TemplateId::NIL`] (all zero bits) is the
/// default/empty identifier: it stands for "no usable template" and is never
/// treated as a real template by the resolver.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TemplateId(pub Uuid);

impl TemplateId {
    /// The default/empty template identifier.
    pub const NIL: Self = Self(Uuid::nil());

    /// Parses a single identifier.
    ///
    /// Accepts the hyphenated, simple (32 hex digits), braced `{…}` and
    /// parenthesized `(…)` forms, ignoring surrounding whitespace. The URN
    /// form and the hex-struct form `{0x…,…}` are rejected. Returns `None`
    /// for anything else; never fails loudly.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let bytes = text.as_bytes();
        let candidate = match (bytes.len(), bytes.first(), bytes.last()) {
            (32 | 36, _, _) | (38, Some(b'{'), Some(b'}')) => text,
            (38, Some(b'('), Some(b')')) => text.get(1..37)?,
            _ => return None,
        };
        Uuid::try_parse(candidate).ok().map(Self)
    }

    /// Parses a comma-separated identifier list.
    ///
    /// Segments that do not parse are dropped. `None` and the empty string
    /// both yield an empty list.
    pub fn parse_list(text: Option<&str>) -> Vec<Self> {
        match text {
            Some(text) if !text.is_empty() => text.split(',').filter_map(Self::parse).collect(),
            _ => Vec::new(),
        }
    }

    /// Returns `true` for the default/empty identifier.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for TemplateId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// Stable identity of a metadata source (a model module).
///
/// Caches are keyed by this value, so two sources sharing a key share cached
/// maps.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SourceKey(pub &'static str);

impl SourceKey {
    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
