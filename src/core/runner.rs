use crate::adapters::InMemoryStore;
use crate::core::enricher::LabelEnricher;
use crate::core::output::{self, OutputFormat};
use crate::core::{EnrichContext, LabelView, Storage};
use crate::utils::error::Result;

pub struct EnrichRunner {
    store: InMemoryStore,
    enricher: LabelEnricher<InMemoryStore, InMemoryStore, InMemoryStore>,
    format: OutputFormat,
}

impl EnrichRunner {
    pub fn new(store: InMemoryStore, format: OutputFormat) -> Self {
        Self {
            enricher: LabelEnricher::from_store(store.clone()),
            store,
            format,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Enriches the selected labels, or every label when `selected` is empty.
    pub async fn enrich(&self, ctx: &EnrichContext, selected: &[String]) -> Result<Vec<LabelView>> {
        match selected {
            [] => {
                tracing::debug!("Enriching all {} labels", self.store.labels().len());
                self.enricher.enrich_many(ctx, self.store.labels()).await
            }
            [uid] => {
                let label = self.store.labels_by_uid(std::slice::from_ref(uid))?;
                let view = self.enricher.enrich_one(ctx, label.first()).await?;
                Ok(view.into_iter().collect())
            }
            uids => {
                let labels = self.store.labels_by_uid(uids)?;
                tracing::debug!("Enriching {} selected labels", labels.len());
                self.enricher.enrich_many(ctx, &labels).await
            }
        }
    }

    pub async fn render(&self, ctx: &EnrichContext, selected: &[String]) -> Result<String> {
        let views = self.enrich(ctx, selected).await?;
        tracing::debug!("Rendering {} views as {:?}", views.len(), self.format);
        output::render(&views, self.format)
    }

    /// Renders and writes `labels.<ext>` through `storage`; returns the file name.
    pub async fn write_to<S: Storage>(
        &self,
        ctx: &EnrichContext,
        selected: &[String],
        storage: &S,
    ) -> Result<String> {
        let rendered = self.render(ctx, selected).await?;
        let file_name = format!("labels.{}", self.format.extension());

        tracing::debug!("Writing {} bytes to {}", rendered.len(), file_name);
        storage.write_file(&file_name, rendered.as_bytes()).await?;

        Ok(file_name)
    }
}
