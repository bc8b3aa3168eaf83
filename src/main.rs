use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use qc_report_tools::io::excel_write::{MASTER_FILE_NAME, XLSX_MIME};
use qc_report_tools::model::Table;
use qc_report_tools::pipeline::{self, PREVIEW_ROWS, PipelineOutput};
use qc_report_tools::progress::TracingProgress;
use qc_report_tools::{ReportError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| ReportError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Merge(args) => execute_merge(args),
    }
}

fn execute_merge(args: MergeArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(MASTER_FILE_NAME));

    let mut progress = TracingProgress;
    let result = pipeline::generate_master(&args.input, &args.analysis, &output, &mut progress)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.preview {
        print_table(&mut out, &result.table.head(args.preview_rows))?;
        writeln!(out)?;
    }
    print_summary(&mut out, &result)?;
    writeln!(out, "wrote {} ({XLSX_MIME})", output.display())?;

    if let Some(path) = &args.summary_json {
        let json = serde_json::to_string_pretty(&result.summary)?;
        std::fs::write(path, json)?;
    }
    Ok(())
}

fn print_table(out: &mut impl Write, table: &Table) -> Result<()> {
    writeln!(out, "{}", table.columns.join("\t"))?;
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|cell| cell.display_text()).collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }
    Ok(())
}

fn print_summary(out: &mut impl Write, result: &PipelineOutput) -> Result<()> {
    for warning in &result.warnings {
        writeln!(out, "warning: {warning}")?;
    }
    writeln!(out, "Summary")?;
    for tier in &result.summary {
        writeln!(
            out,
            "  {:<42} Pass {:>6}  Fail {:>6} / {}",
            tier.tier, tier.pass, tier.fail, tier.total
        )?;
    }
    writeln!(
        out,
        "If a tier shows 'N/A', the required check columns were not found in the uploaded Analysis file."
    )?;
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge failure-report workbooks and compute tier verdicts."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Collate Input.xlsx, join Analysis.xlsx and write the Master workbook.
    Merge(MergeArgs),
}

#[derive(clap::Args)]
struct MergeArgs {
    /// Multi-tab Input workbook.
    #[arg(long)]
    input: PathBuf,

    /// Analysis workbook containing an 'Analysis Results' sheet.
    #[arg(long)]
    analysis: PathBuf,

    /// Output path for the Master workbook.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write the tier summary as JSON.
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Print the first rows of the final table, tab-separated.
    #[arg(long)]
    preview: bool,

    /// Number of rows printed by --preview.
    #[arg(long, default_value_t = PREVIEW_ROWS)]
    preview_rows: usize,
}
