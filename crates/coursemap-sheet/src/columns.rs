//! Header validation and column-role mapping.

use coursemap_core::{RawCell, RawCourseRow};

use crate::error::SheetError;

/// Column whose text names a course; the join key between both passes.
pub const COURSE_COLUMN: &str = "Course";

/// Columns every workbook must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COURSE_COLUMN,
    "Address",
    "City",
    "Type",
    "Region",
    "Lat",
    "Long",
];

pub const ORDER_COLUMN: &str = "Order";
pub const FIRST_PLAYED_COLUMN: &str = "1st Played";
pub const REEL_COLUMN: &str = "Reel";

/// Columns whose absence only disables the corresponding feature.
pub const OPTIONAL_COLUMNS: [&str; 3] = [ORDER_COLUMN, FIRST_PLAYED_COLUMN, REEL_COLUMN];

/// Positions of each column role within a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    course: usize,
    address: usize,
    city: usize,
    course_type: usize,
    region: usize,
    lat: usize,
    lng: usize,
    order: Option<usize>,
    first_played: Option<usize>,
    reel: Option<usize>,
}

impl ColumnMap {
    /// Maps trimmed header names to positions. The first occurrence of a
    /// duplicated header wins.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::MissingColumns`] naming every absent required
    /// column.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, SheetError> {
        let find = |name: &str| headers.iter().position(|h| h.as_ref().trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| find(**name).is_none())
            .map(|name| (*name).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SheetError::MissingColumns {
                missing,
                required: REQUIRED_COLUMNS.iter().map(|s| (*s).to_string()).collect(),
            });
        }

        let required = |name: &str| find(name).unwrap_or_default();

        Ok(Self {
            course: required(COURSE_COLUMN),
            address: required("Address"),
            city: required("City"),
            course_type: required("Type"),
            region: required("Region"),
            lat: required("Lat"),
            lng: required("Long"),
            order: find(ORDER_COLUMN),
            first_played: find(FIRST_PLAYED_COLUMN),
            reel: find(REEL_COLUMN),
        })
    }

    #[must_use]
    pub fn has_order(&self) -> bool {
        self.order.is_some()
    }

    #[must_use]
    pub fn has_first_played(&self) -> bool {
        self.first_played.is_some()
    }

    #[must_use]
    pub fn has_reel(&self) -> bool {
        self.reel.is_some()
    }

    /// Names of optional columns absent from the header row.
    #[must_use]
    pub fn missing_optional(&self) -> Vec<&'static str> {
        [
            (ORDER_COLUMN, self.has_order()),
            (FIRST_PLAYED_COLUMN, self.has_first_played()),
            (REEL_COLUMN, self.has_reel()),
        ]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| name)
        .collect()
    }

    /// Picks each role's cell out of a data row. Short rows and absent
    /// optional columns yield [`RawCell::Empty`].
    #[must_use]
    pub fn project(&self, cells: &[RawCell]) -> RawCourseRow {
        let at = |idx: usize| cells.get(idx).cloned().unwrap_or_default();
        let opt = |idx: Option<usize>| idx.map(at).unwrap_or_default();

        RawCourseRow {
            course: at(self.course),
            address: at(self.address),
            city: at(self.city),
            course_type: at(self.course_type),
            region: at(self.region),
            lat: at(self.lat),
            lng: at(self.lng),
            order: opt(self.order),
            first_played: opt(self.first_played),
            reel: opt(self.reel),
        }
    }
}
