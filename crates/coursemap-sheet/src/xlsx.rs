//! Raw SpreadsheetML package access (zip + XML), used where cell-level
//! metadata is needed that the tabular reader drops.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::cell_ref::{CellRange, CellRef};
use crate::error::SheetError;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// A package relationship (`<Relationship Id=… Target=…>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub target: String,
    pub external: bool,
}

/// A `<hyperlink>` element of a worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HyperlinkAnchor {
    pub range: CellRange,
    /// Relationship id of an external target; `None` for in-workbook links.
    pub rel_id: Option<String>,
}

/// The parts of a worksheet the hyperlink pass needs.
#[derive(Debug, Default)]
pub(crate) struct Worksheet {
    /// Display text of every non-empty cell.
    pub cells: BTreeMap<CellRef, String>,
    pub hyperlinks: Vec<HyperlinkAnchor>,
}

pub(crate) fn open_package(path: &Path) -> Result<ZipArchive<File>, SheetError> {
    let package_err = |source: ZipError| SheetError::Package {
        path: path.display().to_string(),
        source,
    };
    let file = File::open(path).map_err(|e| package_err(ZipError::Io(e)))?;
    ZipArchive::new(file).map_err(package_err)
}

/// Resolves the package path of a worksheet by name, or the first sheet
/// when `sheet_name` is `None`. Returns `(sheet name, part path)`.
pub(crate) fn resolve_sheet_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    sheet_name: Option<&str>,
) -> Result<(String, String), SheetError> {
    let sheets = read_sheet_list(archive)?;
    let (name, rel_id) = match sheet_name {
        Some(wanted) => sheets
            .into_iter()
            .find(|(name, _)| name == wanted)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: wanted.to_string(),
            })?,
        None => sheets.into_iter().next().ok_or(SheetError::NoSheets)?,
    };

    let rels = read_relationships(archive, WORKBOOK_RELS_PART)?.ok_or_else(|| {
        SheetError::MissingPart {
            part: WORKBOOK_RELS_PART.to_string(),
        }
    })?;
    let rel = rels.get(&rel_id).ok_or_else(|| SheetError::MissingPart {
        part: format!("{WORKBOOK_RELS_PART}#{rel_id}"),
    })?;

    Ok((name, resolve_target(WORKBOOK_PART, &rel.target)))
}

/// `(name, r:id)` pairs from `xl/workbook.xml`, in workbook order.
fn read_sheet_list<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Vec<(String, String)>, SheetError> {
    let xml_err = xml_error(WORKBOOK_PART);
    let part = archive
        .by_name(WORKBOOK_PART)
        .map_err(|_| SheetError::MissingPart {
            part: WORKBOOK_PART.to_string(),
        })?;
    let mut reader = Reader::from_reader(BufReader::new(part));

    let mut sheets = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf).map_err(&xml_err)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                let name = attr(&e, b"name").map_err(&xml_err)?.unwrap_or_default();
                let rel_id = attr(&e, b"id").map_err(&xml_err)?.unwrap_or_default();
                sheets.push((name, rel_id));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(sheets)
}

/// Reads a `.rels` part into `Id → Relationship`. Returns `Ok(None)` when
/// the part does not exist.
pub(crate) fn read_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    rels_part: &str,
) -> Result<Option<HashMap<String, Relationship>>, SheetError> {
    let xml_err = xml_error(rels_part);
    let Ok(part) = archive.by_name(rels_part) else {
        return Ok(None);
    };
    let mut reader = Reader::from_reader(BufReader::new(part));

    let mut rels = HashMap::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf).map_err(&xml_err)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attr(&e, b"Id").map_err(&xml_err)?;
                let target = attr(&e, b"Target").map_err(&xml_err)?;
                let mode = attr(&e, b"TargetMode").map_err(&xml_err)?;
                if let (Some(id), Some(target)) = (id, target) {
                    let external = mode.is_some_and(|m| m.eq_ignore_ascii_case("External"));
                    rels.insert(id, Relationship { target, external });
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(Some(rels))
}

/// Reads the shared string table. A workbook without one yields an empty
/// table.
pub(crate) fn read_shared_strings<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Vec<String>, SheetError> {
    let xml_err = xml_error(SHARED_STRINGS_PART);
    let Ok(part) = archive.by_name(SHARED_STRINGS_PART) else {
        return Ok(Vec::new());
    };
    let mut reader = Reader::from_reader(BufReader::new(part));

    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    // Phonetic runs (`<rPh>`) carry reading hints, not display text.
    let mut in_phonetic = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf).map_err(&xml_err)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current.clear(),
                b"t" => in_text = !in_phonetic,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(t) if in_text => current.push_str(&text(&t).map_err(&xml_err)?),
            Event::CData(t) if in_text => current.push_str(&String::from_utf8_lossy(&t)),
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => strings.push(std::mem::take(&mut current)),
                b"t" => in_text = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(strings)
}

/// Which kind of text is being captured inside a `<c>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    None,
    Value,
    Inline,
}

/// In-progress `<c>` element.
#[derive(Debug, Default)]
struct PendingCell {
    at: Option<CellRef>,
    kind: Option<String>,
    value: String,
    inline: String,
}

impl PendingCell {
    fn display_text(&self, shared: &[String]) -> String {
        match self.kind.as_deref() {
            Some("s") => self
                .value
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| shared.get(idx))
                .cloned()
                .unwrap_or_default(),
            Some("inlineStr") => self.inline.clone(),
            Some("b") => match self.value.trim() {
                "1" => "TRUE".to_string(),
                "0" => "FALSE".to_string(),
                other => other.to_string(),
            },
            _ => self.value.clone(),
        }
    }
}

/// Parses a worksheet part: cell display text plus hyperlink anchors.
///
/// Cells and rows that omit their `r` attribute are placed after the
/// previous one, as Excel does.
pub(crate) fn read_worksheet<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    part_path: &str,
    shared: &[String],
) -> Result<Worksheet, SheetError> {
    let xml_err = xml_error(part_path);
    let part = archive
        .by_name(part_path)
        .map_err(|_| SheetError::MissingPart {
            part: part_path.to_string(),
        })?;
    let mut reader = Reader::from_reader(BufReader::new(part));

    let mut sheet = Worksheet::default();
    let mut row: u32 = 0;
    let mut next_row: u32 = 0;
    let mut next_col: u32 = 0;
    let mut pending: Option<PendingCell> = None;
    let mut capture = Capture::None;
    // Inline strings can carry phonetic runs whose `<t>` is not display text.
    let mut in_phonetic = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(&xml_err)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => {
                    row = row_number(&e).map_err(&xml_err)?.unwrap_or(next_row);
                    next_row = row + 1;
                    next_col = 0;
                }
                b"c" => {
                    let at = cell_position(&e, row, next_col).map_err(&xml_err)?;
                    next_col = at.col + 1;
                    pending = Some(PendingCell {
                        at: Some(at),
                        kind: attr(&e, b"t").map_err(&xml_err)?,
                        ..PendingCell::default()
                    });
                }
                b"v" if pending.is_some() => capture = Capture::Value,
                b"t" if pending.is_some() && !in_phonetic => capture = Capture::Inline,
                b"rPh" => {
                    in_phonetic = true;
                    capture = Capture::None;
                }
                b"hyperlink" => push_hyperlink(&mut sheet, &e).map_err(&xml_err)?,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => {
                    row = row_number(&e).map_err(&xml_err)?.unwrap_or(next_row);
                    next_row = row + 1;
                    next_col = 0;
                }
                b"c" => {
                    let at = cell_position(&e, row, next_col).map_err(&xml_err)?;
                    next_col = at.col + 1;
                }
                b"hyperlink" => push_hyperlink(&mut sheet, &e).map_err(&xml_err)?,
                _ => {}
            },
            Event::Text(t) => {
                if let Some(cell) = pending.as_mut() {
                    match capture {
                        Capture::Value => cell.value.push_str(&text(&t).map_err(&xml_err)?),
                        Capture::Inline => cell.inline.push_str(&text(&t).map_err(&xml_err)?),
                        Capture::None => {}
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => capture = Capture::None,
                b"rPh" => in_phonetic = false,
                b"c" => {
                    if let Some(cell) = pending.take() {
                        let text = cell.display_text(shared);
                        if let (Some(at), false) = (cell.at, text.is_empty()) {
                            sheet.cells.insert(at, text);
                        }
                    }
                    capture = Capture::None;
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheet)
}

fn row_number(e: &BytesStart<'_>) -> Result<Option<u32>, quick_xml::Error> {
    Ok(attr(e, b"r")?
        .and_then(|r| r.trim().parse::<u32>().ok())
        .filter(|r| *r > 0)
        .map(|r| r - 1))
}

fn cell_position(e: &BytesStart<'_>, row: u32, next_col: u32) -> Result<CellRef, quick_xml::Error> {
    Ok(attr(e, b"r")?
        .and_then(|r| CellRef::parse(&r))
        .unwrap_or(CellRef { row, col: next_col }))
}

fn push_hyperlink(sheet: &mut Worksheet, e: &BytesStart<'_>) -> Result<(), quick_xml::Error> {
    let Some(range) = attr(e, b"ref")?.and_then(|r| CellRange::parse(&r)) else {
        return Ok(());
    };
    let rel_id = attr(e, b"id")?;
    sheet.hyperlinks.push(HyperlinkAnchor { range, rel_id });
    Ok(())
}

fn text(t: &BytesText<'_>) -> Result<String, quick_xml::Error> {
    Ok(t.unescape()?.into_owned())
}

/// Unescaped value of the attribute whose local name is `local`.
fn attr(e: &BytesStart<'_>, local: &[u8]) -> Result<Option<String>, quick_xml::Error> {
    for a in e.attributes().flatten() {
        if a.key.local_name().as_ref() == local {
            return Ok(Some(a.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn xml_error(part: &str) -> impl Fn(quick_xml::Error) -> SheetError + '_ {
    move |source| SheetError::Xml {
        part: part.to_string(),
        source,
    }
}

/// `.rels` part belonging to `part` (`xl/worksheets/sheet1.xml` →
/// `xl/worksheets/_rels/sheet1.xml.rels`).
pub(crate) fn rels_part_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

/// Resolves a relationship target relative to the part that owns it.
pub(crate) fn resolve_target(owner_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = owner_part
        .rsplit_once('/')
        .map(|(dir, _)| dir.split('/').collect())
        .unwrap_or_default();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
