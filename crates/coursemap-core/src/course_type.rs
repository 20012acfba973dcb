//! Course category enumeration and free-text normalization.
//!
//! Spreadsheet authors type categories by hand ("semi private", "Semi-Pvt",
//! "Muni", "USAF Academy (military)", ...). [`normalize_course_type`] folds
//! every such value into the closed [`CourseType`] set and never fails.

use serde::{Deserialize, Serialize};

/// Closed set of course categories. Declaration order is the display order
/// used by the map layers and the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CourseType {
    Public,
    Private,
    #[serde(rename = "Semi-Private")]
    SemiPrivate,
    Resort,
    Military,
    #[serde(rename = "Other/Unknown")]
    Other,
}

impl CourseType {
    /// Every category, in display order.
    pub const ALL: [CourseType; 6] = [
        CourseType::Public,
        CourseType::Private,
        CourseType::SemiPrivate,
        CourseType::Resort,
        CourseType::Military,
        CourseType::Other,
    ];

    /// Human-readable label; also the value written to the JSON export.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CourseType::Public => "Public",
            CourseType::Private => "Private",
            CourseType::SemiPrivate => "Semi-Private",
            CourseType::Resort => "Resort",
            CourseType::Military => "Military",
            CourseType::Other => "Other/Unknown",
        }
    }

    /// Identifier-safe slug used to build layer ids in the rendered document.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            CourseType::Public => "public",
            CourseType::Private => "private",
            CourseType::SemiPrivate => "semi-private",
            CourseType::Resort => "resort",
            CourseType::Military => "military",
            CourseType::Other => "other",
        }
    }
}

impl std::fmt::Display for CourseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How a keyword is compared against the folded category text.
#[derive(Debug, Clone, Copy)]
enum Match {
    /// Keyword may appear anywhere, including inside a longer word.
    Substring,
    /// Keyword must appear as whole word(s).
    Word,
}

/// Keyword rules, evaluated top to bottom; the first hit wins.
///
/// `semi` must precede `private` so "semi-private" is not read as private.
const RULES: &[(CourseType, Match, &[&str])] = &[
    (CourseType::SemiPrivate, Match::Substring, &["semi"]),
    (
        CourseType::Military,
        Match::Word,
        &[
            "military",
            "army",
            "navy",
            "air force",
            "afb",
            "marine",
            "marines",
            "coast guard",
        ],
    ),
    (CourseType::Resort, Match::Substring, &["resort"]),
    (CourseType::Private, Match::Substring, &["private"]),
    (CourseType::Public, Match::Word, &["public", "municipal", "muni"]),
];

/// Folds a free-text category into a [`CourseType`].
///
/// Comparison is case-insensitive; `-`, `_` and whitespace runs collapse to
/// single spaces. Blank or unmatched input maps to [`CourseType::Other`].
#[must_use]
pub fn normalize_course_type(raw: Option<&str>) -> CourseType {
    let Some(raw) = raw else {
        return CourseType::Other;
    };

    let folded = fold(raw);
    if folded.is_empty() {
        return CourseType::Other;
    }
    let padded = format!(" {folded} ");

    RULES
        .iter()
        .find(|(_, mode, keywords)| {
            keywords.iter().any(|kw| match mode {
                Match::Substring => folded.contains(kw),
                Match::Word => padded.contains(&format!(" {kw} ")),
            })
        })
        .map_or(CourseType::Other, |(course_type, _, _)| *course_type)
}

fn fold(raw: &str) -> String {
    raw.to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
