use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Project,
    Cluster,
    Deployment,
    Bento,
    Model,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Project => "project",
            ResourceType::Cluster => "cluster",
            ResourceType::Deployment => "deployment",
            ResourceType::Bento => "bento",
            ResourceType::Model => "model",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a resource. Uids are only unique within a resource type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    pub resource_type: ResourceType,
    pub uid: String,
}

impl ResourceRef {
    pub fn new(resource_type: ResourceType, uid: impl Into<String>) -> Self {
        Self {
            resource_type,
            uid: uid.into(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.uid)
    }
}

/// A key/value tag attached to one resource within one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub uid: String,
    pub resource_type: ResourceType,
    pub resource_uid: String,
    pub key: String,
    pub value: String,
    pub creator_uid: String,
    pub organization_uid: String,
    pub created_at: DateTime<Utc>,
}

impl Label {
    pub fn resource_ref(&self) -> ResourceRef {
        ResourceRef::new(self.resource_type, self.resource_uid.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorSummary {
    pub uid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    pub uid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub uid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub uid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentSummary {
    pub uid: String,
    pub name: String,
    pub cluster: String,
}

/// Shared by bentos and models: both are versioned entries in a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub uid: String,
    pub name: String,
    pub repository: String,
    pub version: String,
}

/// The resource a label points at, discriminated by `resource_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resource_type", rename_all = "snake_case")]
pub enum ResourceSummary {
    Project(ProjectSummary),
    Cluster(ClusterSummary),
    Deployment(DeploymentSummary),
    Bento(ArtifactSummary),
    Model(ArtifactSummary),
}

impl ResourceSummary {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            ResourceSummary::Project(_) => ResourceType::Project,
            ResourceSummary::Cluster(_) => ResourceType::Cluster,
            ResourceSummary::Deployment(_) => ResourceType::Deployment,
            ResourceSummary::Bento(_) => ResourceType::Bento,
            ResourceSummary::Model(_) => ResourceType::Model,
        }
    }

    pub fn uid(&self) -> &str {
        match self {
            ResourceSummary::Project(s) => &s.uid,
            ResourceSummary::Cluster(s) => &s.uid,
            ResourceSummary::Deployment(s) => &s.uid,
            ResourceSummary::Bento(s) | ResourceSummary::Model(s) => &s.uid,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ResourceSummary::Project(s) => &s.name,
            ResourceSummary::Cluster(s) => &s.name,
            ResourceSummary::Deployment(s) => &s.name,
            ResourceSummary::Bento(s) | ResourceSummary::Model(s) => &s.name,
        }
    }

    pub fn resource_ref(&self) -> ResourceRef {
        ResourceRef::new(self.resource_type(), self.uid())
    }
}

/// Resolved resource summaries for one batch, keyed by resource.
pub type ResourceSummaryMap = HashMap<ResourceRef, ResourceSummary>;

/// A label joined with its resource, organization and creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelView {
    pub label_uid: String,
    pub resource: ResourceSummary,
    pub organization: OrganizationSummary,
    pub creator: CreatorSummary,
    pub resource_type: ResourceType,
    pub resource_uid: String,
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
}
