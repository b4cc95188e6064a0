use crate::core::{
    CreatorResolver, EnrichContext, Label, LabelView, OrganizationResolver, ResourceResolver,
};
use crate::utils::error::{EnrichError, Result};

/// Turns stored labels into `LabelView`s.
///
/// Resource summaries are resolved once for the whole batch; creators and
/// organizations are resolved per label. Any failure aborts the batch and no
/// partial output is returned.
pub struct LabelEnricher<R, C, O> {
    resources: R,
    creators: C,
    organizations: O,
}

impl<R, C, O> LabelEnricher<R, C, O>
where
    R: ResourceResolver,
    C: CreatorResolver,
    O: OrganizationResolver,
{
    pub fn new(resources: R, creators: C, organizations: O) -> Self {
        Self {
            resources,
            creators,
            organizations,
        }
    }

    /// Enriches a single label. `None` in gives `None` out.
    pub async fn enrich_one(
        &self,
        ctx: &EnrichContext,
        label: Option<&Label>,
    ) -> Result<Option<LabelView>> {
        let Some(label) = label else {
            return Ok(None);
        };

        let mut views = self
            .enrich_many(ctx, std::slice::from_ref(label))
            .await
            .map_err(|e| EnrichError::within("enrich_one", e))?;

        Ok(views.pop())
    }

    /// Enriches `labels`, preserving their order one-to-one.
    pub async fn enrich_many(&self, ctx: &EnrichContext, labels: &[Label]) -> Result<Vec<LabelView>> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }

        let summaries = self
            .resources
            .resolve_resource_summaries(ctx, labels)
            .await
            .map_err(|e| EnrichError::within("enrich_many", e))?;

        tracing::debug!(
            request_id = %ctx.request_id,
            labels = labels.len(),
            resources = summaries.len(),
            "resolved resource summaries"
        );

        let mut views = Vec::with_capacity(labels.len());
        for label in labels {
            let creator = self.creators.resolve_creator(ctx, label).await?;
            let organization = self.organizations.resolve_organization(ctx, label).await?;

            let resource_ref = label.resource_ref();
            let resource = match summaries.get(&resource_ref) {
                Some(summary) => summary.clone(),
                None => {
                    return Err(EnrichError::ResourceSchemaNotFound {
                        label_uid: label.uid.clone(),
                        resource: resource_ref,
                    })
                }
            };

            views.push(LabelView {
                label_uid: label.uid.clone(),
                resource,
                organization,
                creator,
                resource_type: label.resource_type,
                resource_uid: label.resource_uid.clone(),
                key: label.key.clone(),
                value: label.value.clone(),
                created_at: label.created_at,
            });
        }

        Ok(views)
    }
}

impl<S> LabelEnricher<S, S, S>
where
    S: ResourceResolver + CreatorResolver + OrganizationResolver + Clone,
{
    /// Uses one store for all three lookups.
    pub fn from_store(store: S) -> Self {
        Self::new(store.clone(), store.clone(), store)
    }
}
