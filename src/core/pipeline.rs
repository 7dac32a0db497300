use crate::core::{BatchReport, ConfigProvider, InputLine, Pipeline, Storage};
use crate::domain::cpf;
use crate::domain::model::{BatchSummary, ValidationRecord};
use crate::utils::error::{CpfError, Result};
use chrono::Utc;
use serde::Serialize;
use std::path::Path;

/// Validates every line of an input file and writes CSV/JSON reports.
pub struct BatchPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> BatchPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, extension: &str) -> String {
        let name = format!("{}.{}", self.config.report_filename(), extension);
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    line: usize,
    input: &'a str,
    digits: &'a str,
    masked: &'a str,
    valid: bool,
    reason: &'a str,
}

fn render_csv(records: &[ValidationRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(CsvRow {
            line: record.line,
            input: &record.input,
            digits: &record.digits,
            masked: &record.masked,
            valid: record.valid,
            reason: record.reason.map(|r| r.tag()).unwrap_or(""),
        })?;
    }

    // 沒有資料時仍輸出標頭
    if records.is_empty() {
        writer.write_record(["line", "input", "digits", "masked", "valid", "reason"])?;
    }

    writer.into_inner().map_err(|e| CpfError::ProcessingError {
        message: format!("Failed to flush CSV report: {}", e),
    })
}

impl<S: Storage, C: ConfigProvider> Pipeline for BatchPipeline<S, C> {
    fn extract(&self) -> Result<Vec<InputLine>> {
        tracing::debug!("Reading input from: {}", self.config.input_path());
        let raw = self.storage.read_file(self.config.input_path())?;
        let content = String::from_utf8(raw).map_err(|e| CpfError::ProcessingError {
            message: format!("Input file is not valid UTF-8: {}", e),
        })?;

        // 去除 Windows 匯出檔案開頭的 BOM
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        let lines: Vec<InputLine> = content
            .lines()
            .enumerate()
            .filter_map(|(i, text)| {
                let trimmed = text.trim();
                // 空行與註解略過
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return None;
                }
                Some(InputLine {
                    line: i + 1,
                    text: trimmed.to_string(),
                })
            })
            .collect();

        tracing::debug!("Kept {} candidate lines", lines.len());
        Ok(lines)
    }

    fn transform(&self, lines: Vec<InputLine>) -> Result<BatchReport> {
        let mut summary = BatchSummary::default();
        let mut records = Vec::with_capacity(lines.len());

        for input in lines {
            let outcome = cpf::validate(&input.text);
            summary.record(outcome);

            if self.config.only_invalid() && outcome.is_valid() {
                continue;
            }

            if let Some(reason) = outcome.reason() {
                tracing::debug!("Line {}: {} ({})", input.line, input.text, reason);
            }

            records.push(ValidationRecord {
                line: input.line,
                digits: cpf::normalize(&input.text).to_string(),
                masked: cpf::mask(&input.text),
                valid: outcome.is_valid(),
                reason: outcome.reason(),
                input: input.text,
            });
        }

        Ok(BatchReport {
            generated_at: Utc::now(),
            summary,
            records,
        })
    }

    fn load(&self, report: BatchReport) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let data = match format.as_str() {
                "csv" => render_csv(&report.records)?,
                "json" => serde_json::to_vec_pretty(&report)?,
                other => {
                    return Err(CpfError::InvalidConfigValueError {
                        field: "output.formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format".to_string(),
                    })
                }
            };

            let path = self.output_file(format);
            tracing::debug!("Writing {} report ({} bytes) to {}", format, data.len(), path);
            written.push(self.storage.write_file(&path, &data)?);
        }

        Ok(written)
    }
}
