use crate::core::Pipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub requested: usize,
    pub stored: usize,
}

pub struct DirectoryEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DirectoryEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 依輸入順序逐一處理，每筆新增後立即寫入
    pub async fn run(&mut self) -> Result<RunSummary> {
        // Extract
        let domains = self.pipeline.extract().await?;
        tracing::info!("Extracted {} domains", domains.len());

        let mut summary = RunSummary {
            requested: domains.len(),
            stored: 0,
        };

        for domain in &domains {
            // Transform
            let record = self.pipeline.transform(domain).await?;
            // Load
            self.pipeline.load(record).await?;
            summary.stored += 1;
            tracing::debug!("Stored {} ({}/{})", domain, summary.stored, summary.requested);
        }

        Ok(summary)
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn into_pipeline(self) -> P {
        self.pipeline
    }
}
