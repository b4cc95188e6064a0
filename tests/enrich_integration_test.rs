use anyhow::Result;
use label_enrich::core::{Label, ResourceType};
use label_enrich::{
    Dataset, EnrichContext, EnrichError, EnrichRunner, InMemoryStore, LabelEnricher,
    LocalStorage, OutputFormat,
};
use std::io::Write;
use std::time::Duration;
use tempfile::{Builder, TempDir};

fn dataset_json() -> serde_json::Value {
    serde_json::json!({
        "organizations": [
            {"uid": "org-1", "name": "acme", "description": "Acme ML platform"},
            {"uid": "org-2", "name": "globex"}
        ],
        "creators": [
            {"uid": "u-1", "name": "alice", "email": "alice@acme.io"},
            {"uid": "u-2", "name": "bob"}
        ],
        "resources": [
            {"resource_type": "project", "uid": "R1", "name": "fraud-detection"},
            {"resource_type": "deployment", "uid": "D1", "name": "fraud-api", "cluster": "eu-west"},
            {"resource_type": "bento", "uid": "B1", "name": "fraud:v7", "repository": "fraud", "version": "v7"}
        ],
        "labels": [
            {"uid": "L1", "resource_type": "project", "resource_uid": "R1", "key": "env", "value": "prod",
             "creator_uid": "u-1", "organization_uid": "org-1", "created_at": "2024-03-01T12:00:00Z"},
            {"uid": "L2", "resource_type": "project", "resource_uid": "R1", "key": "tier", "value": "gold",
             "creator_uid": "u-2", "organization_uid": "org-1", "created_at": "2024-03-02T12:00:00Z"},
            {"uid": "L3", "resource_type": "deployment", "resource_uid": "D1", "key": "region", "value": "eu",
             "creator_uid": "u-1", "organization_uid": "org-2", "created_at": "2024-03-03T12:00:00Z"},
            {"uid": "L4", "resource_type": "bento", "resource_uid": "B1", "key": "stage", "value": "canary",
             "creator_uid": "u-2", "organization_uid": "org-2", "created_at": "2024-03-04T12:00:00Z"}
        ]
    })
}

fn write_dataset(value: &serde_json::Value) -> Result<tempfile::NamedTempFile> {
    let mut file = Builder::new().suffix(".json").tempfile()?;
    file.write_all(serde_json::to_string_pretty(value)?.as_bytes())?;
    Ok(file)
}

fn store() -> Result<InMemoryStore> {
    let file = write_dataset(&dataset_json())?;
    Ok(InMemoryStore::from_file(file.path())?)
}

fn orphan_label(uid: &str, resource_uid: &str) -> Label {
    let mut label: Label = serde_json::from_value(dataset_json()["labels"][0].clone()).unwrap();
    label.uid = uid.to_string();
    label.resource_uid = resource_uid.to_string();
    label
}

#[tokio::test]
async fn test_enrich_full_dataset_preserves_order() -> Result<()> {
    let store = store()?;
    let enricher = LabelEnricher::from_store(store.clone());

    let views = enricher
        .enrich_many(&EnrichContext::default(), store.labels())
        .await?;

    assert_eq!(views.len(), store.labels().len());
    for (view, label) in views.iter().zip(store.labels()) {
        assert_eq!(view.label_uid, label.uid);
        assert_eq!(view.resource_uid, label.resource_uid);
        assert_eq!(view.key, label.key);
        assert_eq!(view.value, label.value);
    }

    assert_eq!(views[0].resource, views[1].resource);
    assert_eq!(views[0].creator.name, "alice");
    assert_eq!(views[1].creator.name, "bob");
    assert_eq!(views[2].organization.name, "globex");
    assert_eq!(views[2].resource.resource_type(), ResourceType::Deployment);
    assert_eq!(views[3].resource.name(), "fraud:v7");

    Ok(())
}

#[tokio::test]
async fn test_enrich_one_equals_first_of_batch() -> Result<()> {
    let store = store()?;
    let enricher = LabelEnricher::from_store(store.clone());
    let ctx = EnrichContext::default();

    for label in store.labels() {
        let one = enricher.enrich_one(&ctx, Some(label)).await?;
        let many = enricher.enrich_many(&ctx, std::slice::from_ref(label)).await?;
        assert_eq!(one, many.into_iter().next());
    }

    assert!(enricher.enrich_one(&ctx, None).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_orphan_label_fails_without_partial_results() -> Result<()> {
    let store = store()?;
    let enricher = LabelEnricher::from_store(store.clone());

    let mut labels = store.labels().to_vec();
    labels.insert(2, orphan_label("L-orphan", "R2"));

    let result = enricher.enrich_many(&EnrichContext::default(), &labels).await;

    match result {
        Err(EnrichError::ResourceSchemaNotFound { label_uid, resource }) => {
            assert_eq!(label_uid, "L-orphan");
            assert_eq!(resource.uid, "R2");
        }
        other => panic!("expected ResourceSchemaNotFound, got {:?}", other.map(|v| v.len())),
    }
    Ok(())
}

#[tokio::test]
async fn test_unknown_creator_aborts_batch() -> Result<()> {
    let store = store()?;
    let enricher = LabelEnricher::from_store(store.clone());

    let mut labels = store.labels().to_vec();
    labels[1].creator_uid = "u-404".to_string();

    let err = enricher
        .enrich_many(&EnrichContext::default(), &labels)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "creator not found: u-404");
    assert!(!err.is_retryable());
    Ok(())
}

#[tokio::test]
async fn test_expired_deadline_aborts_batch() -> Result<()> {
    let store = store()?;
    let enricher = LabelEnricher::from_store(store.clone());
    let ctx = EnrichContext::with_timeout(Duration::from_millis(1));
    tokio::time::sleep(Duration::from_millis(10)).await;

    let err = enricher.enrich_many(&ctx, store.labels()).await.unwrap_err();

    assert!(matches!(err.root(), EnrichError::DeadlineExceeded));
    assert!(err.is_retryable());
    Ok(())
}

#[tokio::test]
async fn test_runner_writes_json_output() -> Result<()> {
    let output_dir = TempDir::new()?;
    let storage = LocalStorage::new(output_dir.path());
    let runner = EnrichRunner::new(store()?, OutputFormat::Json);

    let file_name = runner
        .write_to(
            &EnrichContext::default(),
            &["L4".to_string(), "L1".to_string()],
            &storage,
        )
        .await?;

    let content = std::fs::read_to_string(output_dir.path().join(&file_name))?;
    let parsed: serde_json::Value = serde_json::from_str(&content)?;
    let items = parsed.as_array().unwrap();

    assert_eq!(file_name, "labels.json");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["label_uid"], "L4");
    assert_eq!(items[0]["resource"]["resource_type"], "bento");
    assert_eq!(items[0]["resource"]["version"], "v7");
    assert_eq!(items[1]["label_uid"], "L1");
    assert_eq!(items[1]["organization"]["description"], "Acme ML platform");
    Ok(())
}

#[test]
fn test_dataset_rejects_unknown_extension() -> Result<()> {
    let mut file = Builder::new().suffix(".yaml").tempfile()?;
    file.write_all(b"labels: []")?;

    let err = Dataset::from_file(file.path()).unwrap_err();
    assert!(matches!(err, EnrichError::InvalidConfigValueError { .. }));
    Ok(())
}
