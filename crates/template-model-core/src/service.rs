// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Default [`TemplateModelHelper`] composition over a repository and caster.
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{instrument, warn};

use crate::cache::TemplateCache;
use crate::config::TemplateModelConfig;
use crate::error::TemplateModelError;
use crate::filter::{cast_one, filter_and_cast, first_cast, TemplateFilter};
use crate::helper::TemplateModelHelper;
use crate::ident::{SourceKey, TemplateId};
use crate::model::{ModelType, TemplateModel};
use crate::port::{AnyModel, ContentRepository, ModelCaster};
use crate::resolver::{self, MatchingTemplates};
use crate::source::MetadataSource;

/// Resolves relatives of content nodes against model types.
///
/// Holds the registered metadata sources and a [`TemplateCache`]. Unless
/// [`TemplateModelServiceBuilder::cache`] says otherwise the cache is
/// [`TemplateCache::shared`], so derived maps outlive any one service and a
/// source is scanned at most once per process.
pub struct TemplateModelService<R, C> {
    repository: R,
    caster: C,
    sources: FxHashMap<SourceKey, Arc<dyn MetadataSource>>,
    cache: Arc<TemplateCache>,
    config: TemplateModelConfig,
}

/// Builder for [`TemplateModelService`].
pub struct TemplateModelServiceBuilder<R, C> {
    repository: R,
    caster: C,
    sources: FxHashMap<SourceKey, Arc<dyn MetadataSource>>,
    cache: Option<Arc<TemplateCache>>,
    config: TemplateModelConfig,
}

impl<R, C> TemplateModelServiceBuilder<R, C> {
    /// Registers a metadata source. A later source with the same key replaces
    /// an earlier one.
    pub fn source(mut self, source: Arc<dyn MetadataSource>) -> Self {
        self.sources.insert(source.key(), source);
        self
    }

    /// Uses `cache` instead of the process-wide one.
    pub fn cache(mut self, cache: Arc<TemplateCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Overrides the default settings.
    pub fn config(mut self, config: TemplateModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Finishes the service.
    pub fn build(self) -> TemplateModelService<R, C> {
        TemplateModelService {
            repository: self.repository,
            caster: self.caster,
            sources: self.sources,
            cache: self.cache.unwrap_or_else(TemplateCache::shared),
            config: self.config,
        }
    }
}

impl<R, C> TemplateModelService<R, C>
where
    R: ContentRepository,
    C: ModelCaster<R::Node>,
{
    /// Starts building a service over `repository` and `caster`.
    pub fn builder(repository: R, caster: C) -> TemplateModelServiceBuilder<R, C> {
        TemplateModelServiceBuilder {
            repository,
            caster,
            sources: FxHashMap::default(),
            cache: None,
            config: TemplateModelConfig::default(),
        }
    }

    /// The cache backing this service.
    pub fn cache(&self) -> &Arc<TemplateCache> {
        &self.cache
    }

    /// Active settings.
    pub fn config(&self) -> TemplateModelConfig {
        self.config
    }

    /// The content repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Template id declared for `T`, or [`TemplateId::NIL`].
    pub fn template_id_of<T: TemplateModel>(&self) -> TemplateId {
        self.template_id_for(&T::model_type())
    }

    /// Templates a request for `T` matches.
    pub fn matching_template_ids<T: TemplateModel>(
        &self,
    ) -> Result<MatchingTemplates, TemplateModelError> {
        self.resolve(&T::model_type())
    }

    fn source_for(&self, target: &ModelType) -> Option<&Arc<dyn MetadataSource>> {
        let found = self.sources.get(&target.source());
        if found.is_none() {
            warn!(
                model = target.name(),
                source = %target.source(),
                "metadata source not registered"
            );
        }
        found
    }

    fn template_id_for(&self, target: &ModelType) -> TemplateId {
        self.source_for(target).map_or(TemplateId::NIL, |source| {
            resolver::template_id_of(target, &self.cache.type_map(source.as_ref()))
        })
    }

    fn resolve(&self, target: &ModelType) -> Result<MatchingTemplates, TemplateModelError> {
        let Some(source) = self.source_for(target) else {
            return Err(TemplateModelError::UnresolvableTemplate {
                model: target.name(),
            });
        };
        let types = self.cache.type_map(source.as_ref());
        let inheritance = self.cache.inheritance_map(source.as_ref());
        resolver::matching_template_ids(target, &types, &inheritance, self.config.inheritance)
    }

    // Resolution happens before the repository is touched, so an unusable
    // model type never yields partial results.
    fn resolve_for_traversal(
        &self,
        target: &ModelType,
    ) -> Result<Option<MatchingTemplates>, TemplateModelError> {
        if target.is_unfiltered() {
            return Ok(None);
        }
        self.resolve(target).map(Some)
    }

    fn collect(
        &self,
        nodes: &[R::Node],
        matching: Option<&MatchingTemplates>,
        target: &ModelType,
    ) -> Result<Vec<AnyModel>, TemplateModelError> {
        let filter = TemplateFilter::for_target(target, matching);
        filter_and_cast(nodes, filter, target, &self.caster)
    }
}

impl<R, C> TemplateModelHelper<R::Node> for TemplateModelService<R, C>
where
    R: ContentRepository,
    C: ModelCaster<R::Node>,
{
    #[instrument(level = "debug", skip_all, fields(model = target.name()))]
    fn children_of(
        &self,
        node: Option<&R::Node>,
        target: &ModelType,
    ) -> Result<Vec<AnyModel>, TemplateModelError> {
        let Some(node) = node else {
            return Ok(Vec::new());
        };
        let matching = self.resolve_for_traversal(target)?;
        let nodes = self
            .repository
            .children(node)
            .map_err(TemplateModelError::Repository)?;
        self.collect(&nodes, matching.as_ref(), target)
    }

    #[instrument(level = "debug", skip_all, fields(model = target.name()))]
    fn descendants_of(
        &self,
        node: Option<&R::Node>,
        target: &ModelType,
    ) -> Result<Vec<AnyModel>, TemplateModelError> {
        let Some(node) = node else {
            return Ok(Vec::new());
        };
        let matching = self.resolve_for_traversal(target)?;
        let nodes = self
            .repository
            .descendants(node)
            .map_err(TemplateModelError::Repository)?;
        self.collect(&nodes, matching.as_ref(), target)
    }

    #[instrument(level = "debug", skip_all, fields(model = target.name()))]
    fn ancestors_of(
        &self,
        node: Option<&R::Node>,
        target: &ModelType,
    ) -> Result<Vec<AnyModel>, TemplateModelError> {
        let Some(node) = node else {
            return Ok(Vec::new());
        };
        let matching = self.resolve_for_traversal(target)?;
        let nodes = self
            .repository
            .ancestors(node)
            .map_err(TemplateModelError::Repository)?;
        self.collect(&nodes, matching.as_ref(), target)
    }

    // Parent is cast directly: no template resolution, no filtering.
    #[instrument(level = "debug", skip_all, fields(model = target.name()))]
    fn parent_of(
        &self,
        node: Option<&R::Node>,
        target: &ModelType,
    ) -> Result<Option<AnyModel>, TemplateModelError> {
        let Some(node) = node else {
            return Ok(None);
        };
        let parent = self
            .repository
            .parent(node)
            .map_err(TemplateModelError::Repository)?;
        match parent {
            Some(parent) => cast_one(&parent, target, &self.caster),
            None => Ok(None),
        }
    }

    #[instrument(level = "debug", skip_all, fields(model = target.name()))]
    fn first_child_of(
        &self,
        node: Option<&R::Node>,
        target: &ModelType,
    ) -> Result<Option<AnyModel>, TemplateModelError> {
        let Some(node) = node else {
            return Ok(None);
        };
        let matching = self.resolve_for_traversal(target)?;
        let nodes = self
            .repository
            .children(node)
            .map_err(TemplateModelError::Repository)?;
        let filter = TemplateFilter::for_target(target, matching.as_ref());
        first_cast(&nodes, filter, target, &self.caster)
    }
}
