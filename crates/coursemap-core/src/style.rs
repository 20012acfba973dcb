//! Category colour table and marker styling constants.
//!
//! These are configuration values, handed to the renderer and the filter
//! controller as a [`MapTheme`] rather than read from globals.

use crate::course_type::CourseType;

/// Circle-marker geometry shared by every category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub radius: u32,
    pub weight: u32,
    pub fill_opacity: f64,
}

/// Fully resolved style for one marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPaint {
    pub color: &'static str,
    pub radius: u32,
    pub weight: u32,
    pub fill_opacity: f64,
}

/// Category → colour table plus marker geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MapTheme {
    palette: [(CourseType, &'static str); 6],
    pub marker: MarkerStyle,
}

impl MapTheme {
    /// Colour used for `course_type`.
    #[must_use]
    pub fn color(&self, course_type: CourseType) -> &'static str {
        self.palette
            .iter()
            .find(|(t, _)| *t == course_type)
            .map_or("#7f8c8d", |(_, color)| *color)
    }

    /// Marker style for a category. Depends on nothing but the category.
    #[must_use]
    pub fn marker_for(&self, course_type: CourseType) -> MarkerPaint {
        MarkerPaint {
            color: self.color(course_type),
            radius: self.marker.radius,
            weight: self.marker.weight,
            fill_opacity: self.marker.fill_opacity,
        }
    }

    /// Palette entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = (CourseType, &'static str)> + '_ {
        self.palette.iter().copied()
    }
}

impl Default for MapTheme {
    fn default() -> Self {
        Self {
            palette: [
                (CourseType::Public, "#2ecc71"),
                (CourseType::Private, "#3498db"),
                (CourseType::SemiPrivate, "#9b59b6"),
                (CourseType::Resort, "#f39c12"),
                (CourseType::Military, "#c0392b"),
                (CourseType::Other, "#7f8c8d"),
            ],
            marker: MarkerStyle {
                radius: 6,
                weight: 2,
                fill_opacity: 0.9,
            },
        }
    }
}
