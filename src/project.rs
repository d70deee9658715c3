//! Persisted project document.
//!
//! ```json
//! {
//!   "pattern": { "3,-2": "#FF0000" },
//!   "palette": ["#FF0000", "#00FF00"],
//!   "projectConfig": { "aidaCount": 14, "isCircular": false, "width": 5, "height": 7, "radius": 6, "strands": 3 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::LoadError;
use crate::grid::PatternSnapshot;
use crate::shape::ProjectConfig;

/// Everything needed to restore an editing session. All three fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub pattern: PatternSnapshot,
    pub palette: Vec<HexColor>,
    pub project_config: ProjectConfig,
}

impl ProjectDocument {
    /// Parse and validate a document. Any malformed cell key, color, missing
    /// field or invalid config rejects the whole payload.
    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        let document: ProjectDocument = serde_json::from_str(raw)?;
        document.validate()?;
        Ok(document)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        self.project_config.validate()?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
