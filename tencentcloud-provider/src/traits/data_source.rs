//! Data source adapter trait

use async_trait::async_trait;

use crate::context::ProviderContext;
use crate::error::ProviderResult;
use crate::resource_data::ResourceData;
use crate::schema::Schema;

/// Read-only query of one data source type
#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Fetch the result set into state and set a deterministic id.
    async fn read(&self, ctx: &ProviderContext, d: &mut ResourceData) -> ProviderResult<()>;
}
