use crate::domain::context::EnrichContext;
use crate::domain::model::{CreatorSummary, Label, OrganizationSummary, ResourceSummaryMap};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Resolves the resources referenced by a whole batch of labels in one call.
///
/// Resources the resolver does not know are left out of the map rather than
/// reported as errors.
#[async_trait]
pub trait ResourceResolver: Send + Sync {
    async fn resolve_resource_summaries(
        &self,
        ctx: &EnrichContext,
        labels: &[Label],
    ) -> Result<ResourceSummaryMap>;
}

#[async_trait]
pub trait CreatorResolver: Send + Sync {
    async fn resolve_creator(&self, ctx: &EnrichContext, label: &Label) -> Result<CreatorSummary>;
}

#[async_trait]
pub trait OrganizationResolver: Send + Sync {
    async fn resolve_organization(
        &self,
        ctx: &EnrichContext,
        label: &Label,
    ) -> Result<OrganizationSummary>;
}
