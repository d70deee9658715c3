//! Cross-stitch pattern editing and thread estimation.
//!
//! [`EditorSession`] is the entry point for hosts: it owns the sparse stitch grid,
//! the stroke history and the active project. Rendering, file dialogs and storage
//! live in the host and talk to the session through its query and command methods.

pub mod color;
pub mod color_match;
pub mod dmc;
pub mod error;
pub mod grid;
pub mod history;
pub mod materials;
pub mod project;
pub mod session;
pub mod shape;

pub use color::HexColor;
pub use color_match::{closest_dmc, ColorMatch};
pub use dmc::{DmcThread, ReferencePalette};
pub use error::{CellKeyError, ColorParseError, ConfigError, LoadError};
pub use grid::{CellEdit, GridPoint, PatternGrid, PatternSnapshot};
pub use history::{HistoryLog, Stroke};
pub use materials::{
    estimate, estimate_materials, EstimatorSettings, MaterialRequirement, MaterialsReport,
    ProjectSummary,
};
pub use project::ProjectDocument;
pub use session::EditorSession;
pub use shape::{is_inside, ProjectConfig, STANDARD_AIDA_COUNTS, STANDARD_STRAND_COUNTS};
