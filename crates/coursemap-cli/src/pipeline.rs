//! Command handlers: read the workbook, build records, write outputs.
//!
//! Required-column and I/O failures abort before anything is written.

use std::fs;
use std::path::Path;

use anyhow::Context as _;
use coursemap_core::{
    build_records, export_json, AppConfig, BuildOptions, BuildSummary, CourseRecord, CourseType,
    MapTheme,
};
use coursemap_render::{render_document, RenderOptions};
use coursemap_sheet::{
    extract_hyperlinks, read_course_table, CourseTable, HyperlinkIndex, COURSE_COLUMN,
    REEL_COLUMN,
};

/// Everything read from the workbook for one run.
pub(crate) struct Loaded {
    pub table: CourseTable,
    pub records: Vec<CourseRecord>,
    pub summary: BuildSummary,
}

/// Runs both workbook passes and builds the records.
///
/// The hyperlink pass only runs when the tabular pass found a `Reel`
/// column, so its errors are fatal only in that case.
pub(crate) fn load(config: &AppConfig) -> anyhow::Result<Loaded> {
    let input = &config.input_path;
    let table = read_course_table(input, config.sheet_name.as_deref())
        .with_context(|| format!("failed to read course table from {}", input.display()))?;

    let links = if table.columns.has_reel() {
        extract_hyperlinks(input, Some(&table.sheet_name), COURSE_COLUMN, REEL_COLUMN)
            .with_context(|| format!("failed to read hyperlinks from {}", input.display()))?
    } else {
        HyperlinkIndex::default()
    };

    let options = BuildOptions {
        default_state: config.default_state.clone(),
    };
    let (records, summary) = build_records(&table.rows, &links, &options);

    Ok(Loaded {
        table,
        records,
        summary,
    })
}

/// Record count per category, in display order. Empty categories are listed.
pub(crate) fn category_counts(records: &[CourseRecord]) -> Vec<(CourseType, usize)> {
    CourseType::ALL
        .into_iter()
        .map(|t| (t, records.iter().filter(|r| r.course_type() == t).count()))
        .collect()
}

/// Writes `contents` to `path`, creating the parent directory if needed.
pub(crate) fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// `coursemap build`.
///
/// With `dry_run` the workbook is read and validated but nothing is written.
pub(crate) fn run_build(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let loaded = load(config)?;
    let summary = loaded.summary;

    if dry_run {
        println!(
            "dry-run: {} of {} rows would be mapped ({} dropped, {} played, {} with video)",
            summary.records,
            summary.input_rows,
            summary.dropped_rows,
            summary.played,
            summary.with_video
        );
        return Ok(());
    }

    // Render and serialize everything before touching the filesystem.
    let html = render_document(
        &loaded.records,
        &RenderOptions::from(config),
        &MapTheme::default(),
    )
    .context("failed to render map document")?;
    let json = match config.json_output() {
        Some(path) => Some((
            path,
            export_json(&loaded.records).context("failed to serialize course export")?,
        )),
        None => None,
    };

    write_output(&config.html_path, &html)?;
    tracing::info!(path = %config.html_path.display(), courses = summary.records, "wrote map");
    println!(
        "Map created: {} ({} courses)",
        config.html_path.display(),
        summary.records
    );

    if let Some((path, json)) = json {
        write_output(path, &json)?;
        tracing::info!(path = %path.display(), courses = summary.records, "wrote JSON export");
        println!("Exported {} rows to {}", summary.records, path.display());
    }

    Ok(())
}

/// `coursemap check`.
pub(crate) fn run_check(config: &AppConfig) -> anyhow::Result<()> {
    let loaded = load(config)?;
    let summary = loaded.summary;

    println!(
        "{} (sheet \"{}\")",
        config.input_path.display(),
        loaded.table.sheet_name
    );
    println!("  rows:       {}", summary.input_rows);
    println!("  kept:       {}", summary.records);
    println!("  dropped:    {}", summary.dropped_rows);
    println!("  played:     {}", summary.played);
    println!("  with video: {}", summary.with_video);

    let missing = loaded.table.columns.missing_optional();
    if !missing.is_empty() {
        println!("  optional columns absent: {}", missing.join(", "));
    }

    println!("  by type:");
    for (course_type, count) in category_counts(&loaded.records) {
        println!("    {:<14} {count}", course_type.label());
    }

    Ok(())
}
