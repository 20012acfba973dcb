//! Cell-level hyperlink recovery.

use std::collections::HashMap;
use std::path::Path;

use coursemap_core::LinkLookup;

use crate::cell_ref::{CellRange, CellRef};
use crate::error::SheetError;
use crate::xlsx;

/// Trimmed key text → resolved link URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HyperlinkIndex(HashMap<String, String>);

impl HyperlinkIndex {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl LinkLookup for HyperlinkIndex {
    fn link_for(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

/// Builds a key → URL index from the hyperlinks in `link_col`, keyed by the
/// text of `key_col` on the same row.
///
/// A cell's hyperlink annotation wins over its display text; a cell with no
/// annotation whose text starts with `http` is used as-is. Rows with a blank
/// key are skipped, and a later row replaces an earlier one with the same
/// key. A workbook without either column yields an empty index.
///
/// Only `.xlsx`/`.xlsm` packages carry hyperlink parts. Other formats yield
/// an empty index.
///
/// # Errors
///
/// Returns [`SheetError`] if the package cannot be opened, a required part
/// is missing or an XML part is malformed.
pub fn extract_hyperlinks(
    path: &Path,
    sheet_name: Option<&str>,
    key_col: &str,
    link_col: &str,
) -> Result<HyperlinkIndex, SheetError> {
    let is_package = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm"));
    if !is_package {
        tracing::warn!(
            path = %path.display(),
            "hyperlink extraction needs an .xlsx package; skipping"
        );
        return Ok(HyperlinkIndex::default());
    }

    let mut archive = xlsx::open_package(path)?;
    let (sheet, part) = xlsx::resolve_sheet_part(&mut archive, sheet_name)?;
    let shared = xlsx::read_shared_strings(&mut archive)?;
    let worksheet = xlsx::read_worksheet(&mut archive, &part, &shared)?;
    let rels = xlsx::read_relationships(&mut archive, &xlsx::rels_part_for(&part))?
        .unwrap_or_default();

    let Some(header_row) = worksheet.cells.keys().next().map(|at| at.row) else {
        tracing::debug!(sheet = %sheet, "sheet has no cells; no hyperlinks");
        return Ok(HyperlinkIndex::default());
    };
    let find_col = |name: &str| {
        worksheet
            .cells
            .range(CellRef { row: header_row, col: 0 }..=CellRef { row: header_row, col: u32::MAX })
            .find(|(_, text)| text.trim() == name)
            .map(|(at, _)| at.col)
    };
    let (Some(key_idx), Some(link_idx)) = (find_col(key_col), find_col(link_col)) else {
        tracing::debug!(
            sheet = %sheet,
            key_col,
            link_col,
            "key or link column absent; no hyperlinks"
        );
        return Ok(HyperlinkIndex::default());
    };

    // Ranges may span the whole sheet, so they stay as ranges.
    let mut annotations: Vec<(CellRange, &str)> = Vec::new();
    for anchor in &worksheet.hyperlinks {
        let Some(rel) = anchor.rel_id.as_deref().and_then(|id| rels.get(id)) else {
            continue;
        };
        if !rel.external {
            continue;
        }
        let target = rel.target.trim();
        if target.is_empty() {
            continue;
        }
        annotations.push((anchor.range, target));
    }

    let last_row = worksheet.cells.keys().map(|at| at.row).max().unwrap_or(header_row);
    let mut index = HashMap::new();
    for row in header_row + 1..=last_row {
        let key = worksheet
            .cells
            .get(&CellRef { row, col: key_idx })
            .map(|s| s.trim())
            .unwrap_or_default();
        if key.is_empty() {
            continue;
        }

        let link_at = CellRef { row, col: link_idx };
        // Later <hyperlink> elements override earlier ones on the same cell.
        let annotated = annotations
            .iter()
            .rev()
            .find(|(range, _)| range.contains(link_at))
            .map(|(_, target)| *target);
        let url = annotated.or_else(|| {
            worksheet
                .cells
                .get(&link_at)
                .map(|s| s.trim())
                .filter(|s| s.to_ascii_lowercase().starts_with("http"))
        });
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            index.insert(key.to_string(), url.to_string());
        }
    }

    tracing::info!(
        sheet = %sheet,
        links = index.len(),
        annotated_ranges = annotations.len(),
        "extracted hyperlinks"
    );
    Ok(HyperlinkIndex(index))
}
