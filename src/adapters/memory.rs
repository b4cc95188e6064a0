use crate::core::{
    CreatorResolver, CreatorSummary, EnrichContext, Label, OrganizationResolver,
    OrganizationSummary, ResourceRef, ResourceResolver, ResourceSummary, ResourceSummaryMap,
};
use crate::utils::error::{EnrichError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Everything the store serves, as read from a JSON or TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub organizations: Vec<OrganizationSummary>,
    #[serde(default)]
    pub creators: Vec<CreatorSummary>,
    #[serde(default)]
    pub resources: Vec<ResourceSummary>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Dataset {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(EnrichError::InvalidConfigValueError {
                field: "dataset".to_string(),
                value: path.display().to_string(),
                reason: "Dataset must be a .json or .toml file".to_string(),
            }),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

struct Indexes {
    organizations: HashMap<String, OrganizationSummary>,
    creators: HashMap<String, CreatorSummary>,
    resources: HashMap<ResourceRef, ResourceSummary>,
    labels: Vec<Label>,
    label_positions: HashMap<String, usize>,
}

/// Serves all three lookups from a loaded `Dataset`. Clones share the data.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<Indexes>,
}

fn index_unique<K, V>(
    entity: &'static str,
    items: impl IntoIterator<Item = V>,
    key: impl Fn(&V) -> K,
) -> Result<HashMap<K, V>>
where
    K: std::hash::Hash + Eq + std::fmt::Display,
{
    let mut index = HashMap::new();
    for item in items {
        let k = key(&item);
        if index.contains_key(&k) {
            return Err(EnrichError::ConfigError {
                message: format!("duplicate {} uid in dataset: {}", entity, k),
            });
        }
        index.insert(k, item);
    }
    Ok(index)
}

impl InMemoryStore {
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        let organizations = index_unique("organization", dataset.organizations, |o| o.uid.clone())?;
        let creators = index_unique("creator", dataset.creators, |c| c.uid.clone())?;
        let resources = index_unique("resource", dataset.resources, |r| r.resource_ref())?;
        let label_positions: HashMap<String, usize> = index_unique(
            "label",
            dataset.labels.iter().enumerate().map(|(i, l)| (l.uid.clone(), i)),
            |(uid, _)| uid.clone(),
        )?
        .into_iter()
        .map(|(uid, (_, position))| (uid, position))
        .collect();

        tracing::debug!(
            organizations = organizations.len(),
            creators = creators.len(),
            resources = resources.len(),
            labels = dataset.labels.len(),
            "indexed dataset"
        );

        Ok(Self {
            inner: Arc::new(Indexes {
                organizations,
                creators,
                resources,
                labels: dataset.labels,
                label_positions,
            }),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_dataset(Dataset::from_file(path)?)
    }

    pub fn labels(&self) -> &[Label] {
        &self.inner.labels
    }

    /// Picks labels by uid, in the order requested.
    pub fn labels_by_uid(&self, uids: &[String]) -> Result<Vec<Label>> {
        uids.iter()
            .map(|uid| {
                self.inner
                    .label_positions
                    .get(uid)
                    .map(|&position| self.inner.labels[position].clone())
                    .ok_or_else(|| EnrichError::NotFound {
                        entity: "label",
                        uid: uid.clone(),
                    })
            })
            .collect()
    }
}

#[async_trait]
impl ResourceResolver for InMemoryStore {
    async fn resolve_resource_summaries(
        &self,
        ctx: &EnrichContext,
        labels: &[Label],
    ) -> Result<ResourceSummaryMap> {
        ctx.check()?;

        let mut summaries = ResourceSummaryMap::new();
        for label in labels {
            let resource_ref = label.resource_ref();
            if summaries.contains_key(&resource_ref) {
                continue;
            }
            if let Some(summary) = self.inner.resources.get(&resource_ref) {
                summaries.insert(resource_ref, summary.clone());
            }
        }
        Ok(summaries)
    }
}

#[async_trait]
impl CreatorResolver for InMemoryStore {
    async fn resolve_creator(&self, ctx: &EnrichContext, label: &Label) -> Result<CreatorSummary> {
        ctx.check()?;
        self.inner
            .creators
            .get(&label.creator_uid)
            .cloned()
            .ok_or_else(|| EnrichError::NotFound {
                entity: "creator",
                uid: label.creator_uid.clone(),
            })
    }
}

#[async_trait]
impl OrganizationResolver for InMemoryStore {
    async fn resolve_organization(
        &self,
        ctx: &EnrichContext,
        label: &Label,
    ) -> Result<OrganizationSummary> {
        ctx.check()?;
        self.inner
            .organizations
            .get(&label.organization_uid)
            .cloned()
            .ok_or_else(|| EnrichError::NotFound {
                entity: "organization",
                uid: label.organization_uid.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResourceType;

    const DATASET: &str = r#"
{
  "organizations": [{"uid": "org-1", "name": "acme"}],
  "creators": [{"uid": "u-1", "name": "alice", "email": "alice@example.com"}],
  "resources": [
    {"resource_type": "cluster", "uid": "c-1", "name": "default"},
    {"resource_type": "model", "uid": "m-1", "name": "iris:v1", "repository": "iris", "version": "v1"}
  ],
  "labels": [
    {"uid": "L1", "resource_type": "cluster", "resource_uid": "c-1", "key": "region", "value": "eu",
     "creator_uid": "u-1", "organization_uid": "org-1", "created_at": "2024-03-01T12:00:00Z"},
    {"uid": "L2", "resource_type": "model", "resource_uid": "m-1", "key": "stage", "value": "prod",
     "creator_uid": "u-1", "organization_uid": "org-1", "created_at": "2024-03-02T12:00:00Z"},
    {"uid": "L3", "resource_type": "cluster", "resource_uid": "c-1", "key": "tier", "value": "gold",
     "creator_uid": "u-1", "organization_uid": "org-1", "created_at": "2024-03-03T12:00:00Z"}
  ]
}
"#;

    fn store() -> InMemoryStore {
        InMemoryStore::from_dataset(Dataset::from_json_str(DATASET).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_resolves_each_resource_once() {
        let store = store();
        let ctx = EnrichContext::default();

        let summaries = store
            .resolve_resource_summaries(&ctx, store.labels())
            .await
            .unwrap();

        assert_eq!(summaries.len(), 2);
        assert!(summaries.contains_key(&ResourceRef::new(ResourceType::Cluster, "c-1")));
        assert!(summaries.contains_key(&ResourceRef::new(ResourceType::Model, "m-1")));
    }

    #[tokio::test]
    async fn test_unknown_resources_are_omitted() {
        let store = store();
        let mut label = store.labels()[0].clone();
        label.resource_uid = "c-404".to_string();

        let summaries = store
            .resolve_resource_summaries(&EnrichContext::default(), &[label])
            .await
            .unwrap();

        assert!(summaries.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_creator_is_not_found() {
        let store = store();
        let mut label = store.labels()[0].clone();
        label.creator_uid = "u-404".to_string();

        let err = store
            .resolve_creator(&EnrichContext::default(), &label)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "creator not found: u-404");
    }

    #[tokio::test]
    async fn test_cancelled_context_fails_lookups() {
        let store = store();
        let ctx = EnrichContext::default();
        ctx.cancel_token.cancel();

        let err = store
            .resolve_organization(&ctx, &store.labels()[0])
            .await
            .unwrap_err();

        assert!(matches!(err, EnrichError::Cancelled));
    }

    #[test]
    fn test_labels_by_uid_keeps_requested_order() {
        let store = store();

        let labels = store
            .labels_by_uid(&["L3".to_string(), "L1".to_string()])
            .unwrap();
        assert_eq!(labels[0].uid, "L3");
        assert_eq!(labels[1].uid, "L1");

        assert!(store.labels_by_uid(&["L9".to_string()]).is_err());
    }

    #[test]
    fn test_duplicate_uids_are_rejected() {
        let mut dataset = Dataset::from_json_str(DATASET).unwrap();
        dataset.creators.push(dataset.creators[0].clone());

        let err = InMemoryStore::from_dataset(dataset).err().unwrap();
        assert!(err.to_string().contains("duplicate creator uid"));
    }

    #[test]
    fn test_toml_dataset() {
        let content = r#"
[[organizations]]
uid = "org-1"
name = "acme"

[[creators]]
uid = "u-1"
name = "alice"

[[resources]]
resource_type = "deployment"
uid = "d-1"
name = "iris-api"
cluster = "default"

[[labels]]
uid = "L1"
resource_type = "deployment"
resource_uid = "d-1"
key = "env"
value = "prod"
creator_uid = "u-1"
organization_uid = "org-1"
created_at = "2024-03-01T12:00:00Z"
"#;

        let dataset = Dataset::from_toml_str(content).unwrap();
        assert_eq!(dataset.resources[0].resource_type(), ResourceType::Deployment);
        assert_eq!(dataset.labels[0].key, "env");
    }
}
