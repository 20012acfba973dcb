//! Workbook access for the course map generator.
//!
//! Two independent passes over the same file:
//! - [`table`] reads typed rows through calamine for bulk column access.
//! - [`hyperlinks`] reopens the raw `.xlsx` package to recover cell-level
//!   hyperlink targets, which the tabular reader does not expose.
//!
//! The two are joined by course name, not by row position.

pub mod cell_ref;
pub mod columns;
pub mod error;
pub mod hyperlinks;
pub mod table;
mod xlsx;

pub use columns::{
    ColumnMap, COURSE_COLUMN, OPTIONAL_COLUMNS, REEL_COLUMN, REQUIRED_COLUMNS,
};
pub use error::SheetError;
pub use hyperlinks::{extract_hyperlinks, HyperlinkIndex};
pub use table::{read_course_table, CourseTable};
