//! A1-style cell references (`B7`, `$AA$12`, `H2:H9`).
//!
//! Parsed with manual byte scanning; rows and columns are zero-based.

/// A single cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    /// Parses an A1 reference. `$` anchors are ignored.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();
        let mut i = 0;

        if bytes.get(i) == Some(&b'$') {
            i += 1;
        }
        let col_start = i;
        let mut col: u32 = 0;
        while let Some(b) = bytes.get(i).filter(|b| b.is_ascii_alphabetic()) {
            let digit = u32::from(b.to_ascii_uppercase() - b'A') + 1;
            col = col.checked_mul(26)?.checked_add(digit)?;
            i += 1;
        }
        if i == col_start {
            return None;
        }

        if bytes.get(i) == Some(&b'$') {
            i += 1;
        }
        let digits = s.get(i..)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let row: u32 = digits.parse().ok()?;
        if row == 0 {
            return None;
        }

        Some(Self {
            row: row - 1,
            col: col - 1,
        })
    }

    fn column_letters(col: u32) -> String {
        let mut n = col + 1;
        let mut out = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            out.push(b'A' + u8::try_from(rem).unwrap_or(0));
            n = (n - 1) / 26;
        }
        out.reverse();
        String::from_utf8(out).unwrap_or_default()
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", Self::column_letters(self.col), self.row + 1)
    }
}

/// An inclusive rectangular range of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    /// Parses `A1` or `A1:C3`. Reversed corners are normalized.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (a, b) = match s.split_once(':') {
            Some((a, b)) => (CellRef::parse(a)?, CellRef::parse(b)?),
            None => {
                let single = CellRef::parse(s)?;
                (single, single)
            }
        };
        Some(Self {
            start: CellRef {
                row: a.row.min(b.row),
                col: a.col.min(b.col),
            },
            end: CellRef {
                row: a.row.max(b.row),
                col: a.col.max(b.col),
            },
        })
    }

    #[must_use]
    pub fn contains(&self, at: CellRef) -> bool {
        (self.start.row..=self.end.row).contains(&at.row)
            && (self.start.col..=self.end.col).contains(&at.col)
    }
}
