//! Managed resource adapter trait

use async_trait::async_trait;

use crate::context::ProviderContext;
use crate::error::ProviderResult;
use crate::resource_data::ResourceData;
use crate::schema::Schema;

/// CRUD adapter of one managed resource type
///
/// Implementations translate [`ResourceData`] into API calls and write the server's
/// view back into it. A `read` that finds nothing clears the id instead of failing.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name, e.g. `tencentcloud_clb_instance`.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Create the remote object, set the id, and refresh state.
    async fn create(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()>;

    /// Refresh state from the remote object.
    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()>;

    /// Push changed attributes. Types whose attributes are all force-new only
    /// refresh.
    async fn update(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()> {
        self.read(ctx, d).await
    }

    /// Delete the remote object; one that is already gone counts as success.
    async fn delete(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()>;

    /// Whether `import <id>` is supported.
    fn importable(&self) -> bool {
        true
    }
}
