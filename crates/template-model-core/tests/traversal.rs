// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]

use std::sync::Arc;

use template_model_core::{
    ContentItem, InheritanceDepth, TemplateModelConfig, TemplateModelError,
    TemplateModelHelperExt, TemplateModelService,
};
use template_model_dry_tests::fixtures::{NEWS_TEMPLATE, PAGE_TEMPLATE};
use template_model_dry_tests::{
    sample_site, site_caster, site_module, template, BreakingNews, FixtureCaster, Foreign,
    InMemoryContentTree, Misdeclared, NewsPage, Page, SampleSite, TreeNode, Unrelated,
    Untemplated,
};

type Service = TemplateModelService<InMemoryContentTree, FixtureCaster>;

fn service_for(site: &SampleSite, caster: FixtureCaster, config: TemplateModelConfig) -> Service {
    TemplateModelService::builder(site.tree.clone(), caster)
        .source(Arc::new(site_module()))
        .config(config)
        .build()
}

fn setup() -> (SampleSite, Service) {
    let site = sample_site();
    let service = service_for(&site, site_caster(), TemplateModelConfig::default());
    (site, service)
}

fn pages(names: &[&str]) -> Vec<Page> {
    names.iter().map(|n| Page::named(n)).collect()
}

#[test]
fn children_include_direct_subtypes_and_skip_unrelated_templates() {
    let (site, service) = setup();
    // `archive` would cast as a Page, but its template is unrelated.
    let found: Vec<Page> = service.children(Some(&site.home)).unwrap();
    assert_eq!(found, pages(&["about", "news"]));
}

#[test]
fn subtype_requests_only_match_their_own_branch() {
    let (site, service) = setup();
    let found: Vec<NewsPage> = service.children(Some(&site.home)).unwrap();
    assert_eq!(found, vec![NewsPage::named("news")]);

    let unrelated: Vec<Unrelated> = service.children(Some(&site.home)).unwrap();
    assert_eq!(unrelated, vec![Unrelated::named("archive")]);
}

#[test]
fn descendants_expand_one_level_by_default() {
    let (site, service) = setup();
    let found: Vec<Page> = service.descendants(Some(&site.home)).unwrap();
    assert_eq!(found, pages(&["about", "team", "news"]));
}

#[test]
fn transitive_expansion_reaches_grandchild_templates() {
    let site = sample_site();
    let service = service_for(
        &site,
        site_caster(),
        TemplateModelConfig {
            inheritance: InheritanceDepth::Transitive,
        },
    );
    let found: Vec<Page> = service.descendants(Some(&site.home)).unwrap();
    assert_eq!(found, pages(&["about", "team", "news", "breaking"]));
}

#[test]
fn ancestors_are_nearest_first_and_filtered() {
    let (site, service) = setup();
    let found: Vec<Page> = service.ancestors(Some(&site.breaking)).unwrap();
    assert_eq!(found, pages(&["news"]));

    let from_team: Vec<Page> = service.ancestors(Some(&site.team)).unwrap();
    assert_eq!(from_team, pages(&["about"]));
}

#[test]
fn parent_is_cast_without_template_filtering() {
    let (site, service) = setup();
    // `home` has a template no model declares; parent still casts it.
    let parent: Option<Page> = service.parent(Some(&site.about)).unwrap();
    assert_eq!(parent, Some(Page::named("home")));

    // The caster itself may refuse.
    let refused: Option<NewsPage> = service.parent(Some(&site.about)).unwrap();
    assert_eq!(refused, None);

    let none: Option<Page> = service.parent(Some(&site.home)).unwrap();
    assert_eq!(none, None);
}

#[test]
fn parent_of_an_untemplated_model_still_casts() {
    let (site, service) = setup();
    let parent: Option<Untemplated> = service.parent(Some(&site.news)).unwrap();
    assert_eq!(parent, Some(Untemplated::named("home")));
}

#[test]
fn first_child_is_the_first_match_that_casts() {
    let (site, service) = setup();
    let page: Option<Page> = service.first_child(Some(&site.home)).unwrap();
    assert_eq!(page, Some(Page::named("about")));

    let news: Option<NewsPage> = service.first_child(Some(&site.home)).unwrap();
    assert_eq!(news, Some(NewsPage::named("news")));

    let breaking: Option<BreakingNews> = service.first_child(Some(&site.about)).unwrap();
    assert_eq!(breaking, None);
}

#[test]
fn absent_node_yields_nothing_and_never_touches_the_repository() {
    let (site, service) = setup();
    let none: Option<&TreeNode> = None;
    assert!(service.children::<Page>(none).unwrap().is_empty());
    assert!(service.descendants::<Page>(none).unwrap().is_empty());
    assert!(service.ancestors::<Page>(none).unwrap().is_empty());
    assert_eq!(service.parent::<Page>(none).unwrap(), None);
    assert_eq!(service.first_child::<Page>(none).unwrap(), None);
    // Even an unusable model type is fine when there is no node.
    assert!(service.children::<Untemplated>(none).unwrap().is_empty());
    assert_eq!(site.tree.call_count(), 0);
}

#[test]
fn general_node_requests_are_not_filtered() {
    let (site, service) = setup();
    let items: Vec<ContentItem<TreeNode>> = service.children(Some(&site.home)).unwrap();
    let names: Vec<&str> = items.iter().map(|item| item.node().name()).collect();
    assert_eq!(names, ["about", "news", "archive"]);
}

fn item_names(items: &[ContentItem<TreeNode>]) -> Vec<&str> {
    items.iter().map(|item| item.node().name()).collect()
}

#[test]
fn general_node_requests_see_every_relative() {
    let (site, service) = setup();
    let below: Vec<ContentItem<TreeNode>> = service.descendants(Some(&site.home)).unwrap();
    assert_eq!(
        item_names(&below),
        ["about", "team", "news", "breaking", "archive"]
    );

    let above: Vec<ContentItem<TreeNode>> = service.ancestors(Some(&site.breaking)).unwrap();
    assert_eq!(item_names(&above), ["news", "home"]);

    let first: Option<ContentItem<TreeNode>> = service.first_child(Some(&site.home)).unwrap();
    assert_eq!(first.map(ContentItem::into_inner), Some(site.about.clone()));

    let parent: Option<ContentItem<TreeNode>> = service.parent(Some(&site.about)).unwrap();
    assert_eq!(parent.map(ContentItem::into_inner), Some(site.home.clone()));
    let none: Option<ContentItem<TreeNode>> = service.parent(Some(&site.home)).unwrap();
    assert!(none.is_none());
}

#[test]
fn unusable_model_types_fail_before_the_repository_is_called() {
    let (site, service) = setup();
    let err = service.children::<Untemplated>(Some(&site.home)).unwrap_err();
    assert!(matches!(err, TemplateModelError::UnresolvableTemplate { .. }));

    let err = service.descendants::<Misdeclared>(Some(&site.home)).unwrap_err();
    assert!(matches!(err, TemplateModelError::UnresolvableTemplate { .. }));

    let err = service.first_child::<Foreign>(Some(&site.home)).unwrap_err();
    assert!(matches!(err, TemplateModelError::UnresolvableTemplate { .. }));

    assert_eq!(site.tree.call_count(), 0);
}

#[test]
fn unresolvable_error_names_the_model() {
    let (site, service) = setup();
    let err = service.ancestors::<Untemplated>(Some(&site.team)).unwrap_err();
    assert!(err.to_string().contains("Untemplated"));
}

#[test]
fn repository_failures_propagate() {
    let (site, service) = setup();
    site.tree.set_fail(true);
    let err = service.children::<Page>(Some(&site.home)).unwrap_err();
    assert!(matches!(err, TemplateModelError::Repository(_)));
    let err = service.parent::<Page>(Some(&site.about)).unwrap_err();
    assert!(matches!(err, TemplateModelError::Repository(_)));
}

#[test]
fn caster_failures_propagate() {
    let site = sample_site();
    let caster = site_caster();
    caster.set_fail(true);
    let service = service_for(&site, caster, TemplateModelConfig::default());
    let err = service.children::<Page>(Some(&site.home)).unwrap_err();
    assert!(matches!(err, TemplateModelError::Caster(_)));
}

#[test]
fn casts_of_the_wrong_type_are_dropped() {
    let site = sample_site();
    let caster = FixtureCaster::new().with_mismatch::<Page, Unrelated>(|node| {
        Unrelated::named(node.name())
    });
    let service = service_for(&site, caster, TemplateModelConfig::default());
    assert!(service.children::<Page>(Some(&site.home)).unwrap().is_empty());
}

#[test]
fn repeated_calls_return_the_same_sequence() {
    let (site, service) = setup();
    let first: Vec<Page> = service.descendants(Some(&site.home)).unwrap();
    let second: Vec<Page> = service.descendants(Some(&site.home)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn template_queries_reflect_declarations() {
    let (_, service) = setup();
    assert_eq!(service.template_id_of::<Page>(), template(PAGE_TEMPLATE));
    assert!(service.template_id_of::<Untemplated>().is_nil());
    assert!(service.template_id_of::<Foreign>().is_nil());

    let matching = service.matching_template_ids::<Page>().unwrap();
    assert_eq!(matching.primary(), template(PAGE_TEMPLATE));
    assert_eq!(
        matching.as_slice(),
        [template(PAGE_TEMPLATE), template(NEWS_TEMPLATE)]
    );
}
