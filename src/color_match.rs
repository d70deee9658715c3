//! Nearest reference thread lookup.

use serde::Serialize;

use crate::color::HexColor;
use crate::dmc::{DmcThread, ReferencePalette};

/// The closest reference thread to a requested color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorMatch<'a> {
    pub thread: &'a DmcThread,
    /// Euclidean distance in RGB space.
    pub distance: f64,
}

impl ReferencePalette {
    /// Closest thread by RGB distance. Ties go to the earlier table entry.
    pub fn closest_to(&self, color: HexColor) -> Option<ColorMatch<'_>> {
        let mut best: Option<(&DmcThread, u32)> = None;
        for thread in self.threads() {
            let d = color.distance_squared(&thread.color());
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((thread, d));
                if d == 0 {
                    break;
                }
            }
        }

        best.map(|(thread, d)| ColorMatch {
            thread,
            distance: (d as f64).sqrt(),
        })
    }

    /// Parse `color` and find its closest thread. Malformed colors and empty tables yield `None`.
    pub fn closest(&self, color: &str) -> Option<ColorMatch<'_>> {
        let color = HexColor::parse(color).ok()?;
        self.closest_to(color)
    }
}

/// Closest thread in the built-in DMC table.
pub fn closest_dmc(color: &str) -> Option<ColorMatch<'static>> {
    ReferencePalette::dmc().closest(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primaries() -> ReferencePalette {
        ReferencePalette::from_entries(vec![
            DmcThread::new("1", "Pure Red", HexColor::new(255, 0, 0)),
            DmcThread::new("2", "Pure Green", HexColor::new(0, 255, 0)),
            DmcThread::new("3", "Pure Blue", HexColor::new(0, 0, 255)),
            DmcThread::new("4", "Also Red", HexColor::new(255, 0, 0)),
        ])
    }

    #[test]
    fn exact_match_has_zero_distance() {
        let palette = primaries();
        let found = palette.closest("#FF0000").unwrap();
        assert_eq!(found.thread.code, "1");
        assert_eq!(found.distance, 0.0);
    }

    #[test]
    fn ties_go_to_first_entry() {
        let palette = primaries();
        assert_eq!(palette.closest("ff0000").unwrap().thread.code, "1");

        // Equidistant from red and green.
        let found = palette.closest("#808000").unwrap();
        assert_eq!(found.thread.code, "1");
    }

    #[test]
    fn nearest_by_distance() {
        let palette = primaries();
        let found = palette.closest("#1020F0").unwrap();
        assert_eq!(found.thread.code, "3");
        let expected = ((16.0f64).powi(2) + 32.0f64.powi(2) + 15.0f64.powi(2)).sqrt();
        assert!((found.distance - expected).abs() < 1e-9);
    }

    #[test]
    fn malformed_or_empty_yields_none() {
        assert!(primaries().closest("#F00").is_none());
        assert!(primaries().closest("not a color").is_none());
        assert!(primaries().closest(" #FF0000").is_none());
        assert!(closest_dmc("  #000000 \n").is_none());
        assert!(ReferencePalette::default().closest("#FF0000").is_none());
    }

    #[test]
    fn test_dmc_palette_lookup() {
        // Black should match to DMC 310
        assert_eq!(closest_dmc("#000000").unwrap().thread.code, "310");

        // 336 and 823 share a color; table order wins.
        assert_eq!(closest_dmc("#13294B").unwrap().thread.code, "336");

        let red = closest_dmc("#FF0000").unwrap();
        assert!(red.distance > 0.0);
        assert!(red.thread.rgb[0] > red.thread.rgb[1]);
    }
}
