//! Captured-asset data handed over by the capture collaborator.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::data_file::read_data_file;
use crate::types::{DomElement, LocatedColor, LocatedFont};
use crate::Result;

/// Samples extracted from one screenshot or DOM snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureBundle {
    #[serde(default)]
    pub colors: Vec<LocatedColor>,
    #[serde(default)]
    pub fonts: Vec<LocatedFont>,
    /// Absent when the asset is a plain image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dom: Option<Vec<DomElement>>,
}

impl CaptureBundle {
    pub fn load(path: &Path) -> Result<Self> {
        let bundle: CaptureBundle = read_data_file(path)?;
        debug!(
            path = %path.display(),
            colors = bundle.colors.len(),
            fonts = bundle.fonts.len(),
            dom_elements = bundle.dom.as_ref().map_or(0, Vec::len),
            "loaded capture bundle"
        );
        Ok(bundle)
    }

    pub fn dom(&self) -> Option<&[DomElement]> {
        self.dom.as_deref()
    }
}
