use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to open workbook {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read xlsx package {path}: {source}")]
    Package {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("malformed XML in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: quick_xml::Error,
    },

    #[error("workbook part {part} is missing")]
    MissingPart { part: String },

    #[error("workbook has no worksheets")]
    NoSheets,

    #[error("sheet \"{name}\" not found in workbook")]
    SheetNotFound { name: String },

    #[error("sheet \"{name}\" has no header row")]
    EmptySheet { name: String },

    #[error(
        "missing columns: {}. Required: {}",
        .missing.join(", "),
        .required.join(", ")
    )]
    MissingColumns {
        missing: Vec<String>,
        required: Vec<String>,
    },
}
