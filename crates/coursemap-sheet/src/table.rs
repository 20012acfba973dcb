//! Tabular pass: typed rows through calamine.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use coursemap_core::{RawCell, RawCourseRow};

use crate::columns::ColumnMap;
use crate::error::SheetError;

/// Rows of the course sheet, already projected onto column roles.
#[derive(Debug, Clone)]
pub struct CourseTable {
    pub sheet_name: String,
    pub columns: ColumnMap,
    pub rows: Vec<RawCourseRow>,
}

/// Reads the named sheet, or the first sheet when `sheet_name` is `None`.
///
/// The first row of the used range is the header row. Fully blank data
/// rows are skipped; every other row is returned in sheet order.
///
/// # Errors
///
/// Returns [`SheetError::MissingColumns`] if any required column is absent,
/// and other [`SheetError`] variants if the workbook cannot be read.
pub fn read_course_table(path: &Path, sheet_name: Option<&str>) -> Result<CourseTable, SheetError> {
    let open_err = |source: calamine::Error| SheetError::Open {
        path: path.display().to_string(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(open_err)?;
    let names = workbook.sheet_names();
    let sheet = match sheet_name {
        Some(wanted) => names
            .into_iter()
            .find(|name| name == wanted)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: wanted.to_string(),
            })?,
        None => names.into_iter().next().ok_or(SheetError::NoSheets)?,
    };

    let range = workbook.worksheet_range(&sheet).map_err(open_err)?;
    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or_else(|| SheetError::EmptySheet {
            name: sheet.clone(),
        })?
        .iter()
        .map(|cell| raw_cell(cell).text())
        .collect();

    let columns = ColumnMap::from_headers(&header)?;
    for column in columns.missing_optional() {
        tracing::info!(sheet = %sheet, column, "optional column absent; feature disabled");
    }

    let mut skipped = 0usize;
    let mut out = Vec::new();
    for row in rows {
        let cells: Vec<RawCell> = row.iter().map(raw_cell).collect();
        if cells.iter().all(RawCell::is_blank) {
            skipped += 1;
            continue;
        }
        out.push(columns.project(&cells));
    }

    tracing::info!(
        sheet = %sheet,
        rows = out.len(),
        blank_rows = skipped,
        "read course table"
    );

    Ok(CourseTable {
        sheet_name: sheet,
        columns,
        rows: out,
    })
}

/// Collapses calamine's cell type into [`RawCell`].
fn raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Bool(b) => RawCell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        #[allow(clippy::cast_precision_loss)]
        Data::Int(n) => RawCell::Number(*n as f64),
        Data::Float(n) => RawCell::Number(*n),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or_else(|| RawCell::Number(dt.as_f64()), RawCell::DateTime),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
    }
}
