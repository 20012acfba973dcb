//! Builds small `.xlsx` workbooks on disk for the integration tests.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// A fixture cell. Strings go to the shared string table unless inline.
#[derive(Debug, Clone)]
pub enum Cell {
    Str(&'static str),
    Inline(&'static str),
    /// Inline string followed by a phonetic reading run.
    Phonetic(&'static str, &'static str),
    Num(f64),
    /// Excel serial date, written with a date number format.
    Date(f64),
    Blank,
}

#[derive(Debug, Default)]
pub struct SheetFixture {
    pub name: &'static str,
    pub rows: Vec<Vec<Cell>>,
    /// `(ref, target)` pairs written as external hyperlinks.
    pub hyperlinks: Vec<(&'static str, &'static str)>,
}

impl SheetFixture {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn link(mut self, cell: &'static str, target: &'static str) -> Self {
        self.hyperlinks.push((cell, target));
        self
    }
}

pub fn col_letter(idx: usize) -> char {
    char::from(b'A' + u8::try_from(idx).expect("fixture columns fit in A..Z"))
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Writes `sheets` into `dir/name` and returns the workbook path.
pub fn write_workbook(dir: &Path, name: &str, sheets: &[SheetFixture]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("create fixture file");
    let mut zip = ZipWriter::new(file);
    let opts = SimpleFileOptions::default();

    let mut shared: Vec<&str> = Vec::new();
    let mut sheet_xml = Vec::new();
    for sheet in sheets {
        let mut data = String::new();
        for (r, row) in sheet.rows.iter().enumerate() {
            write!(data, r#"<row r="{}">"#, r + 1).unwrap();
            for (c, cell) in row.iter().enumerate() {
                let at = format!("{}{}", col_letter(c), r + 1);
                match cell {
                    Cell::Str(s) => {
                        let idx = shared.iter().position(|x| x == s).unwrap_or_else(|| {
                            shared.push(*s);
                            shared.len() - 1
                        });
                        write!(data, r#"<c r="{at}" t="s"><v>{idx}</v></c>"#).unwrap();
                    }
                    Cell::Inline(s) => {
                        write!(
                            data,
                            r#"<c r="{at}" t="inlineStr"><is><t>{}</t></is></c>"#,
                            escape(s)
                        )
                        .unwrap();
                    }
                    Cell::Phonetic(s, reading) => {
                        write!(
                            data,
                            r#"<c r="{at}" t="inlineStr"><is><t>{}</t><rPh sb="0" eb="1"><t>{}</t></rPh></is></c>"#,
                            escape(s),
                            escape(reading)
                        )
                        .unwrap();
                    }
                    Cell::Num(n) => write!(data, r#"<c r="{at}"><v>{n}</v></c>"#).unwrap(),
                    Cell::Date(n) => write!(data, r#"<c r="{at}" s="1"><v>{n}</v></c>"#).unwrap(),
                    Cell::Blank => {}
                }
            }
            data.push_str("</row>");
        }

        let mut links = String::new();
        let mut rels = String::new();
        for (i, (cell, target)) in sheet.hyperlinks.iter().enumerate() {
            write!(links, r#"<hyperlink ref="{cell}" r:id="rIdLink{i}"/>"#).unwrap();
            write!(
                rels,
                r#"<Relationship Id="rIdLink{i}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="{}" TargetMode="External"/>"#,
                escape(target)
            )
            .unwrap();
        }
        let links = if links.is_empty() {
            String::new()
        } else {
            format!("<hyperlinks>{links}</hyperlinks>")
        };

        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheetData>{data}</sheetData>{links}</worksheet>"#
        );
        sheet_xml.push((xml, rels));
    }

    let mut content_sheets = String::new();
    let mut wb_sheets = String::new();
    let mut wb_rels = String::new();
    for (i, sheet) in sheets.iter().enumerate() {
        let n = i + 1;
        write!(
            content_sheets,
            r#"<Override PartName="/xl/worksheets/sheet{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        )
        .unwrap();
        write!(
            wb_sheets,
            r#"<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
            escape(sheet.name)
        )
        .unwrap();
        write!(
            wb_rels,
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        )
        .unwrap();
    }
    let extra = sheets.len() + 1;
    write!(
        wb_rels,
        r#"<Relationship Id="rId{extra}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/><Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        extra + 1
    )
    .unwrap();

    let mut put = |name: &str, body: &str| {
        zip.start_file(name, opts).expect("start zip entry");
        zip.write_all(body.as_bytes()).expect("write zip entry");
    };

    put(
        "[Content_Types].xml",
        &format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{content_sheets}<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#
        ),
    );
    put(
        "_rels/.rels",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
    );
    put(
        "xl/workbook.xml",
        &format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{wb_sheets}</sheets></workbook>"#
        ),
    );
    put(
        "xl/_rels/workbook.xml.rels",
        &format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{wb_rels}</Relationships>"#
        ),
    );
    put(
        "xl/styles.xml",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font/></fonts><fills count="1"><fill/></fills><borders count="1"><border/></borders><cellStyleXfs count="1"><xf numFmtId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" xfId="0"/><xf numFmtId="14" xfId="0" applyNumberFormat="1"/></cellXfs></styleSheet>"#,
    );

    let mut sst = String::new();
    for s in &shared {
        write!(sst, "<si><t>{}</t></si>", escape(s)).unwrap();
    }
    put(
        "xl/sharedStrings.xml",
        &format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{sst}</sst>"#,
            shared.len()
        ),
    );

    for (i, (xml, rels)) in sheet_xml.iter().enumerate() {
        let n = i + 1;
        put(&format!("xl/worksheets/sheet{n}.xml"), xml);
        if !rels.is_empty() {
            put(
                &format!("xl/worksheets/_rels/sheet{n}.xml.rels"),
                &format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
                ),
            );
        }
    }

    zip.finish().expect("finish zip");
    path
}

/// The full header row, in the column order most fixtures use.
pub fn full_header() -> Vec<Cell> {
    [
        "Order",
        "Course",
        "Address",
        "City",
        "Type",
        "Region",
        "Lat",
        "Long",
        "1st Played",
        "Reel",
    ]
    .into_iter()
    .map(Cell::Str)
    .collect()
}
