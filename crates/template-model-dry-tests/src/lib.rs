// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for template-model crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`caster`] - Table-driven model caster with failure injection
//! - [`fixtures`] - Fixture models, their declarations and a sample site
//! - [`source`] - Metadata source wrapper that counts scans
//! - [`tree`] - Arena-backed content tree with call counting

pub mod caster;
pub mod fixtures;
pub mod source;
pub mod tree;

pub use caster::FixtureCaster;
pub use fixtures::{
    sample_site, site_caster, site_module, template, BreakingNews, Foreign, Misdeclared,
    NewsPage, Page, SampleSite, Unrelated, Untemplated, SITE,
};
pub use source::CountingSource;
pub use tree::{InMemoryContentTree, TreeNode};
