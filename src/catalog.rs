use crate::error::{GddError, Result};
use crate::models::CropParameters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../data/crops.yaml");

/// Read-only lookup from crop-variant identifier (`{crop}_{variant}`) to
/// its temperature-response parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropCatalog {
    crops: BTreeMap<String, CropParameters>,
}

impl CropCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog bundled with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| GddError::Config(format!("Failed to parse crop catalog: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GddError::Config(format!("Failed to read crop catalog {:?}: {}", path, e))
        })?;
        let catalog = Self::from_yaml_str(&content)?;
        tracing::info!("Loaded {} crop variants from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn with_crop(mut self, crop_id: impl Into<String>, params: CropParameters) -> Self {
        self.crops.insert(crop_id.into(), params);
        self
    }

    /// Look up a variant. Unknown identifiers are an error; no defaults are substituted.
    pub fn get(&self, crop_id: &str) -> Result<&CropParameters> {
        self.crops
            .get(crop_id)
            .ok_or_else(|| GddError::UnknownCropVariant(crop_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    /// Group variant identifiers by crop name, e.g. `corn -> [dry, wet]`.
    pub fn variants_by_crop(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for id in self.crops.keys() {
            let (crop, variant) = split_crop_id(id);
            grouped
                .entry(crop.to_string())
                .or_default()
                .push(variant.to_string());
        }
        grouped
    }
}

/// Split `{crop}_{variant}` at the last underscore. An id without one is
/// the `default` variant of itself.
pub fn split_crop_id(crop_id: &str) -> (&str, &str) {
    match crop_id.rsplit_once('_') {
        Some((crop, variant)) if !crop.is_empty() && !variant.is_empty() => (crop, variant),
        _ => (crop_id, "default"),
    }
}

/// Human-readable label: underscores to spaces, each word capitalized.
pub fn label(id: &str) -> String {
    id.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
