//! Fabric and thread requirements for a pattern.
//!
//! Stitches are aggregated per reference thread code and converted to meters of
//! floss, then to whole skeins per color. Colors never share a skein.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::color::HexColor;
use crate::dmc::ReferencePalette;
use crate::grid::PatternSnapshot;
use crate::shape::ProjectConfig;

const CM_PER_INCH: f64 = 2.54;

/// Code used for stitches whose color has no reference match.
pub const UNMATCHED_CODE: &str = "Unknown";

/// Floss used per stitch in cm (waste included), by aida count.
const CONSUMPTION_CM_PER_STITCH: &[(u32, f64)] = &[
    (11, 3.5),
    (14, 2.9),
    (16, 2.5),
    (18, 2.2),
    (22, 1.8),
];

/// Tunable estimator constants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatorSettings {
    pub margin_inches_per_side: f64,
    pub skein_length_meters: f64,
    pub strands_per_skein: u32,
    /// Rate for aida counts missing from the consumption table. Defaults to the
    /// highest known rate so estimates err towards buying too much.
    pub fallback_consumption_cm: f64,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            margin_inches_per_side: 3.0,
            skein_length_meters: 8.0,
            strands_per_skein: 6,
            fallback_consumption_cm: 3.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub design_width_inches: f64,
    pub design_height_inches: f64,
    pub design_width_cm: f64,
    pub design_height_cm: f64,
    pub fabric_cut_width_inches: f64,
    pub fabric_cut_height_inches: f64,
    pub fabric_type: String,
}

impl ProjectSummary {
    /// e.g. `5.0" x 7.0"`
    pub fn design_area_inches(&self) -> String {
        format!(
            "{:.1}\" x {:.1}\"",
            self.design_width_inches, self.design_height_inches
        )
    }

    /// e.g. `12.7cm x 17.8cm`
    pub fn design_area_cm(&self) -> String {
        format!(
            "{:.1}cm x {:.1}cm",
            self.design_width_cm, self.design_height_cm
        )
    }

    /// e.g. `11.0" x 13.0"`
    pub fn suggested_fabric_cut_inches(&self) -> String {
        format!(
            "{:.1}\" x {:.1}\"",
            self.fabric_cut_width_inches, self.fabric_cut_height_inches
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRequirement {
    pub dmc_code: String,
    pub name: Option<String>,
    pub hex: Option<String>,
    pub stitch_count: u32,
    /// Rounded to centimeters. Skeins are computed before rounding.
    pub estimated_meters: f64,
    pub skeins_to_buy: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsReport {
    pub summary: ProjectSummary,
    pub materials: Vec<MaterialRequirement>,
    pub total_skeins: u32,
}

/// Floss per stitch for an aida count, and whether the fallback was used.
pub fn consumption_cm_per_stitch(aida_count: u32, settings: &EstimatorSettings) -> (f64, bool) {
    CONSUMPTION_CM_PER_STITCH
        .iter()
        .find(|(count, _)| *count == aida_count)
        .map_or((settings.fallback_consumption_cm, true), |(_, cm)| {
            (*cm, false)
        })
}

/// Meters of floss one skein covers when stitching with `strands` strands.
pub fn effective_skein_yield(strands: u32, settings: &EstimatorSettings) -> f64 {
    settings.skein_length_meters * (settings.strands_per_skein as f64 / strands.max(1) as f64)
}

pub fn summarize(config: &ProjectConfig, settings: &EstimatorSettings) -> ProjectSummary {
    let (width_cells, height_cells) = config.design_size_in_cells();
    let aida = config.aida_count.max(1) as f64;
    let width_in = width_cells / aida;
    let height_in = height_cells / aida;
    let margin = settings.margin_inches_per_side * 2.0;

    ProjectSummary {
        design_width_inches: width_in,
        design_height_inches: height_in,
        design_width_cm: width_in * CM_PER_INCH,
        design_height_cm: height_in * CM_PER_INCH,
        fabric_cut_width_inches: width_in + margin,
        fabric_cut_height_inches: height_in + margin,
        fabric_type: format!("{}-Count Aida", config.aida_count),
    }
}

/// Estimate fabric and floss for the given per-code stitch counts.
pub fn estimate(
    config: &ProjectConfig,
    stitch_counts: &BTreeMap<String, u32>,
    reference: &ReferencePalette,
    settings: &EstimatorSettings,
) -> MaterialsReport {
    let summary = summarize(config, settings);

    let (consumption_cm, fallback) = consumption_cm_per_stitch(config.aida_count, settings);
    if fallback {
        log::warn!(
            "No floss rate for {}-count aida, using {} cm/stitch",
            config.aida_count,
            consumption_cm
        );
    }
    let skein_yield = effective_skein_yield(config.strands, settings);

    let mut materials: Vec<MaterialRequirement> = stitch_counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(code, &count)| {
            let meters = count as f64 * consumption_cm / 100.0;
            let skeins = (meters / skein_yield).ceil() as u32;
            let thread = reference.find_by_code(code);
            MaterialRequirement {
                dmc_code: code.clone(),
                name: thread.map(|t| t.name.clone()),
                hex: thread.map(|t| t.hex.clone()),
                stitch_count: count,
                estimated_meters: (meters * 100.0).round() / 100.0,
                skeins_to_buy: skeins,
            }
        })
        .collect();
    materials.sort_by(|a, b| natural_cmp(&a.dmc_code, &b.dmc_code));

    let total_skeins: u32 = materials.iter().map(|m| m.skeins_to_buy).sum();

    log::info!(
        "Estimated materials: {} colors, {} skeins, fabric cut {}",
        materials.len(),
        total_skeins,
        summary.suggested_fabric_cut_inches()
    );

    MaterialsReport {
        summary,
        materials,
        total_skeins,
    }
}

/// Estimate a pattern against the DMC table with default settings.
pub fn estimate_materials(config: &ProjectConfig, pattern: &PatternSnapshot) -> MaterialsReport {
    let reference = ReferencePalette::dmc();
    let counts = stitch_counts(pattern.values().copied(), reference);
    estimate(config, &counts, reference, &EstimatorSettings::default())
}

/// Count stitches per closest reference thread code.
pub fn stitch_counts(
    stitches: impl IntoIterator<Item = HexColor>,
    reference: &ReferencePalette,
) -> BTreeMap<String, u32> {
    let mut by_color: BTreeMap<HexColor, u32> = BTreeMap::new();
    for color in stitches {
        *by_color.entry(color).or_insert(0) += 1;
    }

    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for (color, count) in by_color {
        let code = match reference.closest_to(color) {
            Some(found) => found.thread.code.clone(),
            None => {
                log::warn!("No reference thread for {color}");
                UNMATCHED_CODE.to_string()
            }
        };
        *counts.entry(code).or_insert(0) += count;
    }
    counts
}

/// Numeric-aware, case-insensitive ordering: `"2" < "10" < "B5200" < "ecru"`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let order = match (l, r) {
                    (Chunk::Number(l), Chunk::Number(r)) => {
                        let l = l.trim_start_matches('0');
                        let r = r.trim_start_matches('0');
                        l.len().cmp(&r.len()).then_with(|| l.cmp(r))
                    }
                    (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
                    (Chunk::Text(l), Chunk::Text(r)) => l
                        .chars()
                        .map(|c| c.to_ascii_lowercase())
                        .cmp(r.chars().map(|c| c.to_ascii_lowercase())),
                };
                if order != Ordering::Equal {
                    return order;
                }
            }
        }
    }
}

enum Chunk<'a> {
    Number(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let numeric = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != numeric)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if numeric {
            Chunk::Number(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}
