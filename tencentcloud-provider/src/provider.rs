//! Resource and data source catalog plus the lifecycle drivers around them
//!
//! A host hands in configuration and prior state as JSON; the [`Provider`] finds the
//! adapter by type name, runs the matching operation and hands back the refreshed
//! [`ResourceData`].

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::config::ProviderConfig;
use crate::context::ProviderContext;
use crate::data_sources;
use crate::error::{ProviderError, ProviderResult};
use crate::resource_data::ResourceData;
use crate::resources;
use crate::schema::Schema;
use crate::traits::{DataSource, Resource};

fn log_failure(type_name: &str, operation: &str, e: &ProviderError) {
    if e.is_expected() {
        log::warn!("[{type_name}] {operation} failed: {e}");
    } else {
        log::error!("[{type_name}] {operation} failed: {e}");
    }
}

fn log_state(operation: &str, d: &ResourceData) {
    log::debug!(
        "[{}] {operation} {} state: {}",
        d.type_name(),
        d.id(),
        d.redacted_state()
    );
}

/// Registry of adapters bound to one [`ProviderContext`]
pub struct Provider {
    ctx: ProviderContext,
    resources: HashMap<&'static str, Arc<dyn Resource>>,
    data_sources: HashMap<&'static str, Arc<dyn DataSource>>,
}

impl Provider {
    /// A provider serving every built-in resource and data source.
    #[must_use]
    pub fn new(ctx: ProviderContext) -> Self {
        let provider = Self::empty(ctx);
        let provider = resources::all()
            .into_iter()
            .fold(provider, Self::with_resource);
        data_sources::all()
            .into_iter()
            .fold(provider, Self::with_data_source)
    }

    /// A provider with no adapters registered.
    #[must_use]
    pub fn empty(ctx: ProviderContext) -> Self {
        Self {
            ctx,
            resources: HashMap::new(),
            data_sources: HashMap::new(),
        }
    }

    /// Validate `config` and build a provider with every built-in adapter.
    pub fn from_config(config: &ProviderConfig) -> ProviderResult<Self> {
        Ok(Self::new(config.build_context()?))
    }

    #[must_use]
    pub fn with_resource(mut self, resource: Arc<dyn Resource>) -> Self {
        self.resources.insert(resource.type_name(), resource);
        self
    }

    #[must_use]
    pub fn with_data_source(mut self, data_source: Arc<dyn DataSource>) -> Self {
        self.data_sources.insert(data_source.type_name(), data_source);
        self
    }

    pub fn context(&self) -> &ProviderContext {
        &self.ctx
    }

    /// Registered resource type names, sorted.
    pub fn resource_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.resources.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Registered data source type names, sorted.
    pub fn data_source_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.data_sources.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn resource_schema(&self, type_name: &str) -> Option<Schema> {
        self.resources.get(type_name).map(|r| r.schema())
    }

    pub fn data_source_schema(&self, type_name: &str) -> Option<Schema> {
        self.data_sources.get(type_name).map(|d| d.schema())
    }

    fn resource(&self, type_name: &str) -> ProviderResult<&Arc<dyn Resource>> {
        self.resources
            .get(type_name)
            .ok_or_else(|| ProviderError::InvalidConfig(format!("unknown resource type '{type_name}'")))
    }

    fn data_source(&self, type_name: &str) -> ProviderResult<&Arc<dyn DataSource>> {
        self.data_sources
            .get(type_name)
            .ok_or_else(|| ProviderError::InvalidConfig(format!("unknown data source '{type_name}'")))
    }

    /// Create a new instance from `config`.
    pub async fn create(&self, type_name: &str, config: Value) -> ProviderResult<ResourceData> {
        let resource = self.resource(type_name)?;
        let mut d = ResourceData::planned(resource.type_name(), resource.schema(), config)?;
        resource
            .create(&self.ctx, &mut d)
            .await
            .inspect_err(|e| log_failure(type_name, "create", e))?;
        log_state("create", &d);
        Ok(d)
    }

    /// Refresh an instance. A result with [`ResourceData::is_gone`] means the remote
    /// object no longer exists.
    pub async fn read(&self, type_name: &str, id: &str, state: Value) -> ProviderResult<ResourceData> {
        let resource = self.resource(type_name)?;
        let mut d = ResourceData::from_state(resource.type_name(), resource.schema(), id, state)?;
        resource
            .read(&self.ctx, &mut d)
            .await
            .inspect_err(|e| log_failure(type_name, "read", e))?;
        log_state("read", &d);
        Ok(d)
    }

    /// Move an instance from `state` to `config`.
    ///
    /// A change to any force-new attribute replaces the instance: the old one is
    /// deleted and a new one created from `config`.
    pub async fn update(
        &self,
        type_name: &str,
        id: &str,
        state: Value,
        config: Value,
    ) -> ProviderResult<ResourceData> {
        let resource = self.resource(type_name)?;
        let mut d = ResourceData::from_state(resource.type_name(), resource.schema(), id, state)?
            .with_config(config.clone())?;

        let replaced = d.force_new_changes();
        if !replaced.is_empty() {
            log::info!("[{type_name}] Replacing {id}: {replaced:?} changed");
            resource
                .delete(&self.ctx, &mut d)
                .await
                .inspect_err(|e| log_failure(type_name, "delete", e))?;
            return self.create(type_name, config).await;
        }

        resource
            .update(&self.ctx, &mut d)
            .await
            .inspect_err(|e| log_failure(type_name, "update", e))?;
        log_state("update", &d);
        Ok(d)
    }

    /// Delete an instance; one already gone counts as success.
    pub async fn delete(&self, type_name: &str, id: &str, state: Value) -> ProviderResult<()> {
        let resource = self.resource(type_name)?;
        let mut d = ResourceData::from_state(resource.type_name(), resource.schema(), id, state)?;
        resource
            .delete(&self.ctx, &mut d)
            .await
            .inspect_err(|e| log_failure(type_name, "delete", e))
    }

    /// Adopt an existing remote object by id.
    pub async fn import(&self, type_name: &str, id: &str) -> ProviderResult<ResourceData> {
        let resource = self.resource(type_name)?;
        if !resource.importable() {
            return Err(ProviderError::InvalidConfig(format!(
                "{type_name} does not support import"
            )));
        }
        let d = self.read(type_name, id, Value::Null).await?;
        if d.is_gone() {
            return Err(ProviderError::not_found(type_name, id));
        }
        Ok(d)
    }

    /// Run a data source query.
    pub async fn read_data_source(&self, type_name: &str, config: Value) -> ProviderResult<ResourceData> {
        let data_source = self.data_source(type_name)?;
        let mut d = ResourceData::planned(data_source.type_name(), data_source.schema(), config)?;
        data_source
            .read(&self.ctx, &mut d)
            .await
            .inspect_err(|e| log_failure(type_name, "read", e))?;
        Ok(d)
    }
}
