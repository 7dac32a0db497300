use crate::core::{Pipeline, Result};
use crate::domain::model::BatchSummary;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct BatchRun {
    pub summary: BatchSummary,
    pub outputs: Vec<String>,
}

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<BatchRun> {
        let started = Instant::now();
        tracing::info!("Starting batch validation...");

        // Extract
        let lines = self.pipeline.extract()?;
        tracing::info!("📥 Read {} candidate lines", lines.len());

        // Transform
        let report = self.pipeline.transform(lines)?;
        let summary = report.summary.clone();
        tracing::info!(
            "🔎 Validated {} CPFs: {} valid, {} invalid",
            summary.total,
            summary.valid,
            summary.invalid()
        );
        tracing::debug!(
            "Invalid breakdown - incomplete: {}, repeated: {}, checksum: {}",
            summary.incomplete_input,
            summary.repeated_digit_sequence,
            summary.checksum_mismatch
        );

        // Load
        let outputs = self.pipeline.load(report)?;
        for path in &outputs {
            tracing::info!("📁 Report saved to: {}", path);
        }

        tracing::info!("Batch finished in {:?}", started.elapsed());
        Ok(BatchRun { summary, outputs })
    }
}
