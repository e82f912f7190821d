use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use comfy_table::{Cell, CellAlignment, Table};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{Instrument, debug, info, info_span, trace};

use roster_cli::logging::redact_value;
use roster_cli::sink::JsonlSink;
use roster_import::{CommitOptions, ImportSession};
use roster_ingest::{TEMPLATE_CSV, write_template};
use roster_model::TargetField;

use crate::cli::{ImportArgs, TemplateArgs};
use crate::summary::{self, align_column, apply_table_style, check_cell, header_cell};
use crate::types::ImportOutcome;

pub async fn run_import(args: &ImportArgs) -> Result<ImportOutcome> {
    let file_name = display_file_name(&args.file);

    // =========================================================================
    // Stage 1: Upload and parse
    // =========================================================================
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let mut session = ImportSession::new().with_commit_options(CommitOptions {
        max_in_flight: args.max_in_flight,
    });
    let parse_span = info_span!("parse", file = %file_name);
    parse_span.in_scope(|| session.upload(&file_name, &text))?;
    if let Some(document) = session.document() {
        info!(
            rows = document.row_count(),
            columns = document.headers.len(),
            "file parsed"
        );
    }

    // =========================================================================
    // Stage 2: Column mapping
    // =========================================================================
    for (column, field) in parse_map_overrides(&args.map)? {
        session.map_column(&column, field)?;
        debug!(column = %column, field = %field, "mapping override applied");
    }
    for column in &args.unmap {
        session.clear_column(column)?;
        debug!(column = %column, "column unmapped");
    }
    summary::print_mapping(session.mapping());

    // =========================================================================
    // Stage 3: Validation and preview
    // =========================================================================
    if !session.request_preview()? {
        summary::print_blockers(session.mapping_errors(), session.data_errors());
        return Ok(ImportOutcome::Blocked);
    }
    let records = session.preview_records()?;
    for record in &records {
        trace!(
            name = redact_value(&record.name),
            email = redact_value(&record.email),
            "previewed record"
        );
    }
    summary::print_preview(&records);
    if args.dry_run {
        info!(records = records.len(), "dry run, stopping before commit");
        return Ok(ImportOutcome::DryRun);
    }

    // =========================================================================
    // Stage 4: Commit
    // =========================================================================
    let Some(out) = &args.out else {
        bail!("--out is required to create users (use --dry-run to preview only)");
    };
    let sink = JsonlSink::open(out).await?;
    let bar = progress_bar();
    let ticker = {
        let bar = bar.clone();
        let handle = session.progress_handle();
        tokio::spawn(async move {
            loop {
                bar.set_position(u64::from(handle.percent()));
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        })
    };
    let commit_result = session
        .commit(&sink)
        .instrument(info_span!("commit", file = %file_name))
        .await;
    ticker.abort();
    bar.set_position(u64::from(session.progress()));
    bar.finish_and_clear();
    let batch = commit_result?;
    sink.flush().await?;
    summary::print_batch_summary(&batch, session.report());
    Ok(ImportOutcome::Committed(batch))
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    match &args.out {
        Some(path) => {
            write_template(path).with_context(|| format!("writing {}", path.display()))?;
            println!("Template written to {}", path.display());
        }
        None => print!("{TEMPLATE_CSV}"),
    }
    Ok(())
}

pub fn run_fields() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for field in TargetField::ALL {
        table.add_row(vec![
            Cell::new(field.key()),
            Cell::new(field.label()),
            check_cell(field.is_required()),
        ]);
    }
    println!("{table}");
}

fn parse_map_overrides(overrides: &[String]) -> Result<Vec<(String, TargetField)>> {
    let mut parsed = Vec::with_capacity(overrides.len());
    for entry in overrides {
        let (column, field) = entry
            .split_once('=')
            .with_context(|| format!("--map {entry}: expected COLUMN=FIELD"))?;
        let field = field
            .parse::<TargetField>()
            .map_err(|error| anyhow!("--map {entry}: {error}"))?;
        parsed.push((column.trim().to_string(), field));
    }
    Ok(parsed)
}

fn progress_bar() -> ProgressBar {
    let style = ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos:>3}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let bar = ProgressBar::new(100);
    bar.set_style(style);
    bar
}

fn display_file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
