// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! A small site used across the test suites.
//!
//! ```text
//! home (HOME)
//! ├── about (PAGE)
//! │   └── team (PAGE)
//! ├── news (NEWS: base PAGE)
//! │   └── breaking (BREAKING: base NEWS)
//! └── archive (UNRELATED)
//! ```

use template_model_core::{ContentNode, ModelModule, SourceKey, TemplateId, TemplateModel};

use crate::caster::FixtureCaster;
use crate::tree::{InMemoryContentTree, TreeNode};

/// Source key every fixture model declares.
pub const SITE: SourceKey = SourceKey("site");
/// Source key nobody registers.
pub const ELSEWHERE: SourceKey = SourceKey("elsewhere");

/// Template of the tree root; no model declares it.
pub const HOME_TEMPLATE: &str = "00000000-0000-0000-0000-0000000000aa";
/// Template declared by [`Page`].
pub const PAGE_TEMPLATE: &str = "11111111-1111-1111-1111-111111111111";
/// Template declared by [`NewsPage`]; lists [`PAGE_TEMPLATE`] as base.
pub const NEWS_TEMPLATE: &str = "22222222-2222-2222-2222-222222222222";
/// Template declared by [`Unrelated`].
pub const UNRELATED_TEMPLATE: &str = "33333333-3333-3333-3333-333333333333";
/// Template declared by [`BreakingNews`]; lists [`NEWS_TEMPLATE`] as base.
pub const BREAKING_TEMPLATE: &str = "44444444-4444-4444-4444-444444444444";

/// Parse one of the template constants above.
pub fn template(text: &str) -> TemplateId {
    TemplateId::parse(text).unwrap_or_default()
}

macro_rules! fixture_model {
    ($(#[$doc:meta])* $name:ident, $source:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            /// Name of the node the model was cast from.
            pub name: String,
        }

        impl TemplateModel for $name {
            const SOURCE: SourceKey = $source;
        }

        impl $name {
            /// Model for the node called `name`.
            pub fn named(name: &str) -> Self {
                Self { name: name.to_owned() }
            }

            fn from_node(node: &TreeNode) -> Self {
                Self::named(node.name())
            }
        }
    };
}

fixture_model!(
    /// Generic page; casts from any node.
    Page,
    SITE
);
fixture_model!(
    /// News page; casts only from news-shaped nodes.
    NewsPage,
    SITE
);
fixture_model!(
    /// Breaking news; a subtype of [`NewsPage`]'s template.
    BreakingNews,
    SITE
);
fixture_model!(
    /// Model on an unrelated template.
    Unrelated,
    SITE
);
fixture_model!(
    /// Model the site module never declares.
    Untemplated,
    SITE
);
fixture_model!(
    /// Model declared with a template id that does not parse.
    Misdeclared,
    SITE
);
fixture_model!(
    /// Model whose source is not registered with the service.
    Foreign,
    ELSEWHERE
);

/// Declarations for the fixture models under [`SITE`].
pub fn site_module() -> ModelModule {
    ModelModule::new(SITE)
        .declare::<Page>(PAGE_TEMPLATE, None)
        .declare::<NewsPage>(NEWS_TEMPLATE, PAGE_TEMPLATE)
        .declare::<BreakingNews>(BREAKING_TEMPLATE, NEWS_TEMPLATE)
        .declare::<Unrelated>(UNRELATED_TEMPLATE, None)
        .declare::<Misdeclared>("not-a-template", None)
}

fn is_news(node: &TreeNode) -> bool {
    let id = node.template_id();
    id == template(NEWS_TEMPLATE) || id == template(BREAKING_TEMPLATE)
}

/// Caster for every fixture model.
pub fn site_caster() -> FixtureCaster {
    FixtureCaster::new()
        .with(|node| Some(Page::from_node(node)))
        .with(|node| is_news(node).then(|| NewsPage::from_node(node)))
        .with(|node| Some(BreakingNews::from_node(node)))
        .with(|node| Some(Unrelated::from_node(node)))
        .with(|node| Some(Untemplated::from_node(node)))
        .with(|node| Some(Misdeclared::from_node(node)))
        .with(|node| Some(Foreign::from_node(node)))
}

/// Handles to the nodes of the fixture site.
#[derive(Clone)]
pub struct SampleSite {
    /// Backing repository.
    pub tree: InMemoryContentTree,
    /// `home`
    pub home: TreeNode,
    /// `about`
    pub about: TreeNode,
    /// `team`
    pub team: TreeNode,
    /// `news`
    pub news: TreeNode,
    /// `breaking`
    pub breaking: TreeNode,
    /// `archive`
    pub archive: TreeNode,
}

/// Build the fixture site.
pub fn sample_site() -> SampleSite {
    let tree = InMemoryContentTree::new();
    let home = tree.add_root("home", template(HOME_TEMPLATE));
    let about = tree.add_child(&home, "about", template(PAGE_TEMPLATE));
    let team = tree.add_child(&about, "team", template(PAGE_TEMPLATE));
    let news = tree.add_child(&home, "news", template(NEWS_TEMPLATE));
    let breaking = tree.add_child(&news, "breaking", template(BREAKING_TEMPLATE));
    let archive = tree.add_child(&home, "archive", template(UNRELATED_TEMPLATE));
    SampleSite {
        tree,
        home,
        about,
        team,
        news,
        breaking,
        archive,
    }
}
