// src/asset.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Size")]
    pub size: i64,
    #[serde(rename = "Owner")]
    pub owner: String,
    #[serde(rename = "AppraisedValue")]
    pub appraised_value: i64,
    /// Side-channel payload. Absent from world-state records; populated
    /// only when a read merges the caller organization's private entry.
    #[serde(
        rename = "asset_properties",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub properties: Option<String>,
}

impl Asset {
    pub fn new(id: &str, color: &str, size: i64, owner: &str, appraised_value: i64) -> Self {
        Self {
            id: id.to_string(),
            color: color.to_string(),
            size,
            owner: owner.to_string(),
            appraised_value,
            properties: None,
        }
    }

    pub fn with_properties(mut self, properties: impl Into<String>) -> Self {
        self.properties = Some(properties.into());
        self
    }
}

/// One value of a full-namespace scan. Records that fail strict decoding
/// come back raw instead of aborting the whole scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScanValue {
    Asset(Asset),
    Raw(String),
}

impl ScanValue {
    pub fn as_asset(&self) -> Option<&Asset> {
        match self {
            Self::Asset(asset) => Some(asset),
            Self::Raw(_) => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}
