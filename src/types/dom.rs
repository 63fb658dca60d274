//! DOM snapshot records from the capture collaborator.
//!
//! Only what the fix resolver needs is modeled: a selector, on-asset bounds
//! and the computed styles map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::core::Bounds;

/// A single captured DOM element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomElement {
    /// CSS selector that uniquely addresses the element
    pub selector: String,
    /// Position and size on the captured asset
    pub bounds: Bounds,
    /// Computed styles keyed by camelCase property name (e.g. `backgroundColor`)
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
}

impl DomElement {
    pub fn new(selector: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            selector: selector.into(),
            bounds,
            styles: BTreeMap::new(),
        }
    }

    pub fn with_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(name.into(), value.into());
        self
    }

    pub fn background_color(&self) -> Option<&str> {
        self.styles.get("backgroundColor").map(String::as_str)
    }

    pub fn color(&self) -> Option<&str> {
        self.styles.get("color").map(String::as_str)
    }
}
