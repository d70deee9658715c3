//! Project configuration and the design-area bounds check.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Aida counts offered when starting a project.
pub const STANDARD_AIDA_COUNTS: [u32; 4] = [11, 14, 16, 18];

/// Strand counts offered when starting a project.
pub const STANDARD_STRAND_COUNTS: [u32; 4] = [1, 2, 3, 6];

const MAX_STRANDS: u32 = 6;

/// Physical project setup. Dimensions are in inches; `aida_count` is stitches per inch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub aida_count: u32,
    pub is_circular: bool,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub strands: u32,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            aida_count: 14,
            is_circular: false,
            width: 5.0,
            height: 7.0,
            radius: 6.0,
            strands: 3,
        }
    }
}

impl ProjectConfig {
    pub fn rectangle(aida_count: u32, width: f64, height: f64, strands: u32) -> Self {
        Self {
            aida_count,
            is_circular: false,
            width,
            height,
            strands,
            ..Self::default()
        }
    }

    pub fn circle(aida_count: u32, radius: f64, strands: u32) -> Self {
        Self {
            aida_count,
            is_circular: true,
            radius,
            strands,
            ..Self::default()
        }
    }

    /// Check the fields the active shape depends on. The inactive shape's
    /// dimensions are carried along but not checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aida_count == 0 {
            return Err(ConfigError::ZeroAidaCount);
        }
        if self.strands == 0 || self.strands > MAX_STRANDS {
            return Err(ConfigError::StrandsOutOfRange(self.strands));
        }

        let dimensions = if self.is_circular {
            vec![("radius", self.radius)]
        } else {
            vec![("width", self.width), ("height", self.height)]
        };
        for (field, value) in dimensions {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { field, value });
            }
        }
        Ok(())
    }

    /// Whether aida and strand counts are among the values offered at project setup.
    pub fn is_standard(&self) -> bool {
        STANDARD_AIDA_COUNTS.contains(&self.aida_count)
            && STANDARD_STRAND_COUNTS.contains(&self.strands)
    }

    pub fn width_in_cells(&self) -> f64 {
        self.width * self.aida_count as f64
    }

    pub fn height_in_cells(&self) -> f64 {
        self.height * self.aida_count as f64
    }

    pub fn radius_in_cells(&self) -> f64 {
        self.radius * self.aida_count as f64
    }

    /// Nominal design size in stitches. A circle occupies its diameter on both axes.
    pub fn design_size_in_cells(&self) -> (f64, f64) {
        if self.is_circular {
            let diameter = 2.0 * self.radius_in_cells();
            (diameter, diameter)
        } else {
            (self.width_in_cells(), self.height_in_cells())
        }
    }

    /// Whether cell `(x, y)` lies inside the design area.
    ///
    /// Circles test the cell's midpoint against a circle centered at
    /// `(radius, radius)` in cell units.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        if self.is_circular {
            let r = self.radius_in_cells();
            let dx = x as f64 + 0.5 - r;
            let dy = y as f64 + 0.5 - r;
            dx * dx + dy * dy <= r * r
        } else {
            x >= 0
                && y >= 0
                && (x as f64) < self.width_in_cells()
                && (y as f64) < self.height_in_cells()
        }
    }
}

/// Bounds check against an optional project. Without a project the canvas is unbounded.
pub fn is_inside(config: Option<&ProjectConfig>, x: i32, y: i32) -> bool {
    config.map_or(true, |config| config.contains(x, y))
}
