//! Editing session: the grid, its history and the active project, held together
//! so every mutation goes through the history log.

use crate::color::HexColor;
use crate::color_match::{closest_dmc, ColorMatch};
use crate::dmc::ReferencePalette;
use crate::error::{ConfigError, LoadError};
use crate::grid::{CellEdit, PatternGrid, PatternSnapshot};
use crate::history::{HistoryLog, Stroke};
use crate::materials::{self, EstimatorSettings, MaterialsReport};
use crate::project::ProjectDocument;
use crate::shape::{is_inside, ProjectConfig};

/// Palette a new session starts with.
pub const DEFAULT_PALETTE: [HexColor; 8] = [
    HexColor::new(0xFF, 0x00, 0x00),
    HexColor::new(0x00, 0xFF, 0x00),
    HexColor::new(0x00, 0x00, 0xFF),
    HexColor::new(0xFF, 0xFF, 0x00),
    HexColor::new(0x00, 0x00, 0x00),
    HexColor::new(0xFF, 0xFF, 0xFF),
    HexColor::new(0xFF, 0xA5, 0x00),
    HexColor::new(0x80, 0x00, 0x80),
];

#[derive(Debug, Clone)]
pub struct EditorSession {
    grid: PatternGrid,
    history: HistoryLog,
    project: Option<ProjectConfig>,
    palette: Vec<HexColor>,
    selected_color: HexColor,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self {
            grid: PatternGrid::new(),
            history: HistoryLog::new(),
            project: None,
            palette: DEFAULT_PALETTE.to_vec(),
            selected_color: DEFAULT_PALETTE[0],
        }
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a persisted document.
    pub fn from_document(document: ProjectDocument) -> Result<Self, LoadError> {
        let mut session = Self::new();
        session.load_state(document)?;
        Ok(session)
    }

    // Queries

    pub fn project_config(&self) -> Option<&ProjectConfig> {
        self.project.as_ref()
    }

    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        is_inside(self.project.as_ref(), x, y)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<HexColor> {
        self.grid.get(x, y)
    }

    pub fn grid(&self) -> &PatternGrid {
        &self.grid
    }

    pub fn snapshot(&self) -> PatternSnapshot {
        self.grid.snapshot()
    }

    pub fn palette(&self) -> &[HexColor] {
        &self.palette
    }

    pub fn selected_color(&self) -> HexColor {
        self.selected_color
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || !self.history.pending().is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo() && self.history.pending().is_empty()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Whether the open stroke holds edits not yet committed.
    pub fn is_stroke_open(&self) -> bool {
        !self.history.pending().is_empty()
    }

    // Editing

    pub fn begin_stroke(&mut self) {
        self.history.begin_stroke();
    }

    /// Paint a cell in the open stroke. Returns `true` if the grid changed.
    pub fn paint(&mut self, x: i32, y: i32, color: HexColor) -> bool {
        let edit = self.grid.paint(x, y, color, self.project.as_ref());
        self.record(edit)
    }

    pub fn paint_selected(&mut self, x: i32, y: i32) -> bool {
        self.paint(x, y, self.selected_color)
    }

    pub fn erase(&mut self, x: i32, y: i32) -> bool {
        let edit = self.grid.erase(x, y);
        self.record(edit)
    }

    pub fn end_stroke(&mut self) -> bool {
        self.history.end_stroke()
    }

    /// Undo the most recent stroke. Pending edits are committed first so they are
    /// what gets undone.
    pub fn undo(&mut self) -> bool {
        self.history.end_stroke();
        self.history.undo(&mut self.grid)
    }

    pub fn redo(&mut self) -> bool {
        self.history.end_stroke();
        self.history.redo(&mut self.grid)
    }

    /// Remove every stitch as one undoable stroke. Callers confirm with the user first.
    pub fn clear(&mut self) -> bool {
        self.history.end_stroke();
        let edits = self.grid.clear();
        let count = edits.len();
        let committed = self.history.commit(Stroke::new(edits));
        if committed {
            log::info!("Cleared {count} stitches");
        }
        committed
    }

    fn record(&mut self, edit: Option<CellEdit>) -> bool {
        match edit {
            Some(edit) => {
                self.history.record_edit(edit);
                true
            }
            None => false,
        }
    }

    // Palette

    pub fn set_color(&mut self, color: HexColor) {
        self.selected_color = color;
    }

    /// Select `color`, appending it to the palette if it is new.
    pub fn add_color(&mut self, color: HexColor) {
        if !self.palette.contains(&color) {
            self.palette.push(color);
        }
        self.selected_color = color;
    }

    // Project lifecycle

    pub fn set_project_config(&mut self, config: ProjectConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if !config.is_standard() {
            log::warn!(
                "Non-standard project: {}ct aida, {} strands",
                config.aida_count,
                config.strands
            );
        }
        log::info!(
            "Project set: {}ct {}, {} strands",
            config.aida_count,
            if config.is_circular {
                format!("circle r={}in", config.radius)
            } else {
                format!("{}in x {}in", config.width, config.height)
            },
            config.strands
        );
        self.project = Some(config);
        Ok(())
    }

    /// Replace pattern, palette and project wholesale. History is reset. On error
    /// the session is untouched.
    pub fn load_state(&mut self, document: ProjectDocument) -> Result<(), LoadError> {
        document.validate()?;
        let ProjectDocument {
            pattern,
            palette,
            project_config,
        } = document;

        log::info!(
            "Loading project: {} stitches, {} palette colors",
            pattern.len(),
            palette.len()
        );
        self.grid = PatternGrid::from_cells(pattern);
        self.palette = palette;
        self.project = Some(project_config);
        self.history.clear();
        Ok(())
    }

    pub fn load_json(&mut self, raw: &str) -> Result<(), LoadError> {
        let document = ProjectDocument::from_json(raw)?;
        self.load_state(document)
    }

    /// The persistable state, or `None` before a project is configured.
    pub fn to_document(&self) -> Option<ProjectDocument> {
        let project_config = self.project.clone()?;
        Some(ProjectDocument {
            pattern: self.grid.snapshot(),
            palette: self.palette.clone(),
            project_config,
        })
    }

    /// Back to a blank session with no project.
    pub fn reset_to_default(&mut self) {
        log::info!("Resetting editor session");
        *self = Self::default();
    }

    // Estimation

    pub fn closest_reference_color(&self, color: &str) -> Option<ColorMatch<'static>> {
        closest_dmc(color)
    }

    /// Materials for the current pattern, or `None` before a project is configured.
    pub fn estimate_materials(&self) -> Option<MaterialsReport> {
        self.estimate_materials_with(ReferencePalette::dmc(), &EstimatorSettings::default())
    }

    pub fn estimate_materials_with(
        &self,
        reference: &ReferencePalette,
        settings: &EstimatorSettings,
    ) -> Option<MaterialsReport> {
        let config = self.project.as_ref()?;
        let counts = materials::stitch_counts(self.grid.iter().map(|(_, color)| color), reference);
        Some(materials::estimate(config, &counts, reference, settings))
    }
}
