pub mod enricher;
pub mod output;
pub mod runner;

pub use crate::domain::context::EnrichContext;
pub use crate::domain::model::{
    ArtifactSummary, ClusterSummary, CreatorSummary, DeploymentSummary, Label, LabelView,
    OrganizationSummary, ProjectSummary, ResourceRef, ResourceSummary, ResourceSummaryMap,
    ResourceType,
};
pub use crate::domain::ports::{CreatorResolver, OrganizationResolver, ResourceResolver, Storage};
pub use crate::utils::error::Result;
