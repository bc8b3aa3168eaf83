use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use crate::qc::report::collate::collate_input;
use crate::qc::report::error::{ReportError, Result};
use crate::qc::report::flags::compute_tier_flags;
use crate::qc::report::io::excel_write;
use crate::qc::report::merge::merge_analysis;
use crate::qc::report::model::{STYLE_ID_COLUMN, Table};
use crate::qc::report::progress::{ProgressSink, Stage};
use crate::qc::report::summary::{TierSummary, summarize};

/// Number of rows shown in the result preview.
pub const PREVIEW_ROWS: usize = 200;

/// Everything one invocation produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Merged table with the tier verdict columns appended.
    pub table: Table,
    pub summary: Vec<TierSummary>,
    /// Non-fatal findings raised while collating the Input workbook.
    pub warnings: Vec<String>,
}

impl PipelineOutput {
    /// First [`PREVIEW_ROWS`] rows of the final table.
    pub fn preview(&self) -> Table {
        self.table.head(PREVIEW_ROWS)
    }
}

/// Runs collation, merge, tier flags and summary over two uploaded workbooks.
///
/// Fatal conditions stop the run at the point of detection and nothing is
/// returned besides the error.
#[instrument(
    level = "info",
    skip_all,
    fields(input_bytes = input.len(), analysis_bytes = analysis.len())
)]
pub fn run(input: &[u8], analysis: &[u8], progress: &mut dyn ProgressSink) -> Result<PipelineOutput> {
    progress.stage(Stage::ProcessingInput);
    let collated = collate_input(input, progress)?;
    if collated.table.is_empty() {
        return Err(ReportError::EmptyInput);
    }
    if !collated.table.has_column(STYLE_ID_COLUMN) {
        return Err(ReportError::MissingInputStyleId);
    }

    progress.stage(Stage::Merging);
    let mut table = merge_analysis(collated.table, analysis)?;

    progress.stage(Stage::ComputingTierFlags);
    compute_tier_flags(&mut table);
    progress.stage(Stage::Complete);

    let summary = summarize(&table);
    info!(rows = table.len(), columns = table.columns.len(), "pipeline complete");

    Ok(PipelineOutput {
        table,
        summary,
        warnings: collated.warnings,
    })
}

/// Reads both workbooks from disk, runs the pipeline and writes the Master
/// workbook to `output`.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), analysis = %analysis.display(), output = %output.display())
)]
pub fn generate_master(
    input: &Path,
    analysis: &Path,
    output: &Path,
    progress: &mut dyn ProgressSink,
) -> Result<PipelineOutput> {
    let input_bytes = read_upload(input)?;
    let analysis_bytes = read_upload(analysis)?;

    let result = run(&input_bytes, &analysis_bytes, progress)?;
    let bytes = excel_write::write_master_bytes(&result.table)?;
    fs::write(output, &bytes)?;
    info!(bytes = bytes.len(), "master workbook written");
    Ok(result)
}

fn read_upload(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(ReportError::MissingInput(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}
