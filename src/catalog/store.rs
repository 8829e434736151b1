use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::color::{Combination, ReferenceColor};
use crate::core::lab::{Lab, Rgb};
use crate::core::types::{CombinationId, Dataset};
use crate::matching::distance::delta_e;
use crate::utils::validation::{check_record_limit, is_valid_hex};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {dataset} data set from {}: {source}", path.display())]
    ReadError {
        dataset: Dataset,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {dataset} data set: {source}")]
    ParseError {
        dataset: Dataset,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog corrupt: {record}: {reason}")]
    Corrupt { record: String, reason: String },

    #[error("Failed to serialize catalog: {0}")]
    SerializeError(#[from] serde_json::Error),
}

impl CatalogError {
    fn corrupt(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            record: record.into(),
            reason: reason.into(),
        }
    }
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Summary written next to an exported catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    pub version: String,
    pub created_at: String,
    pub colors: usize,
    pub combinations: usize,
}

/// A reference color whose stored Lab disagrees with its hex
#[derive(Debug, Clone, Serialize)]
pub struct LabDrift {
    pub name: String,
    pub hex: String,
    pub stored: Lab,
    pub computed: Lab,
    pub delta_e: f64,
}

/// The reference colors and combinations, validated and indexed.
///
/// Immutable once constructed; share it by reference across searches.
#[derive(Debug)]
pub struct Catalog {
    /// All reference colors, in catalog order
    pub colors: Vec<ReferenceColor>,

    /// All combinations, in catalog order
    pub combinations: Vec<Combination>,

    /// Index: combination ID -> index in combinations vec
    id_to_index: HashMap<CombinationId, usize>,

    /// Index: lowercase color name -> indices in colors vec. Names may repeat.
    name_to_index: HashMap<String, Vec<usize>>,
}

impl Catalog {
    /// Build a catalog from in-memory records, checking referential integrity.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Corrupt` naming the offending record if an ID is
    /// duplicated, a hex value is malformed, a Lab value is not finite, or a
    /// color references a combination that does not exist.
    pub fn new(
        colors: Vec<ReferenceColor>,
        combinations: Vec<Combination>,
    ) -> Result<Self, CatalogError> {
        for (dataset, count) in [
            (Dataset::Colors, colors.len()),
            (Dataset::Combinations, combinations.len()),
        ] {
            if let Some(msg) = check_record_limit(count) {
                return Err(CatalogError::corrupt(dataset.to_string(), msg));
            }
        }

        let mut id_to_index = HashMap::with_capacity(combinations.len());
        for (index, combination) in combinations.iter().enumerate() {
            let record = format!("combination {}", combination.id);
            if id_to_index.insert(combination.id, index).is_some() {
                return Err(CatalogError::corrupt(record, "duplicate id"));
            }
            for color in &combination.colors {
                if !is_valid_hex(&color.hex) {
                    return Err(CatalogError::corrupt(
                        record,
                        format!("color '{}' has invalid hex '{}'", color.name, color.hex),
                    ));
                }
            }
        }

        let mut name_to_index: HashMap<String, Vec<usize>> = HashMap::with_capacity(colors.len());
        for (index, color) in colors.iter().enumerate() {
            let record = format!("color '{}'", color.name);
            if !is_valid_hex(&color.hex) {
                return Err(CatalogError::corrupt(
                    record,
                    format!("invalid hex '{}'", color.hex),
                ));
            }
            if !color.lab.is_finite() {
                return Err(CatalogError::corrupt(record, "lab is not finite"));
            }
            if let Some(missing) = color
                .combination_ids
                .iter()
                .find(|id| !id_to_index.contains_key(*id))
            {
                return Err(CatalogError::corrupt(
                    record,
                    format!("references missing combination {missing}"),
                ));
            }
            name_to_index
                .entry(color.name.to_lowercase())
                .or_default()
                .push(index);
        }

        tracing::debug!(
            colors = colors.len(),
            combinations = combinations.len(),
            "Loaded catalog"
        );

        Ok(Self {
            colors,
            combinations,
            id_to_index,
            name_to_index,
        })
    }

    /// Load the catalog bundled into the binary
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled data fails to parse or validate.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_COLORS: &str = include_str!("../../catalogs/colors.json");
        const EMBEDDED_COMBINATIONS: &str = include_str!("../../catalogs/combinations.json");
        Self::from_json(EMBEDDED_COLORS, EMBEDDED_COMBINATIONS)
    }

    /// Load the two data sets from separate files
    ///
    /// # Errors
    ///
    /// Returns an error if either file is missing, malformed, or fails validation.
    pub fn load_from_files(colors: &Path, combinations: &Path) -> Result<Self, CatalogError> {
        let colors_json = read_dataset(Dataset::Colors, colors)?;
        let combinations_json = read_dataset(Dataset::Combinations, combinations)?;
        Self::from_json(&colors_json, &combinations_json)
    }

    /// Load `colors.json` and `combinations.json` from a directory
    ///
    /// # Errors
    ///
    /// Returns an error if either file is missing, malformed, or fails validation.
    pub fn load_from_dir(dir: &Path) -> Result<Self, CatalogError> {
        Self::load_from_files(
            &dir.join(Dataset::Colors.file_name()),
            &dir.join(Dataset::Combinations.file_name()),
        )
    }

    /// Parse both data sets from JSON strings
    ///
    /// # Errors
    ///
    /// Returns an error if either string is malformed or the result fails validation.
    pub fn from_json(colors_json: &str, combinations_json: &str) -> Result<Self, CatalogError> {
        let colors: Vec<ReferenceColor> =
            serde_json::from_str(colors_json).map_err(|source| CatalogError::ParseError {
                dataset: Dataset::Colors,
                source,
            })?;
        let combinations: Vec<Combination> = serde_json::from_str(combinations_json).map_err(
            |source| CatalogError::ParseError {
                dataset: Dataset::Combinations,
                source,
            },
        )?;
        Self::new(colors, combinations)
    }

    /// Get a combination by ID
    pub fn combination(&self, id: CombinationId) -> Option<&Combination> {
        self.id_to_index.get(&id).map(|&idx| &self.combinations[idx])
    }

    /// Get every reference color with this name (case-insensitive), in catalog order
    pub fn colors_by_name(&self, name: &str) -> Vec<&ReferenceColor> {
        self.name_to_index
            .get(&name.trim().to_lowercase())
            .map(|indices| indices.iter().map(|&idx| &self.colors[idx]).collect())
            .unwrap_or_default()
    }

    /// Export the reference colors in catalog file format
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn colors_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.colors)?)
    }

    /// Export the combinations in catalog file format
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn combinations_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.combinations)?)
    }

    /// Describe this catalog for export
    pub fn manifest(&self) -> CatalogManifest {
        CatalogManifest {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            colors: self.colors.len(),
            combinations: self.combinations.len(),
        }
    }

    /// Reference colors whose stored Lab is more than `tolerance` ΔE away from
    /// the conversion of their hex. Non-empty drift usually means the data was
    /// generated under a different illuminant.
    pub fn lab_drift(&self, tolerance: f64) -> Vec<LabDrift> {
        self.colors
            .iter()
            .filter_map(|color| {
                // Hex validity is checked at construction
                let computed = Rgb::from_hex(&color.hex).ok()?.to_lab();
                let distance = delta_e(&color.lab, &computed);
                (distance > tolerance).then(|| LabDrift {
                    name: color.name.clone(),
                    hex: color.hex.clone(),
                    stored: color.lab,
                    computed,
                    delta_e: distance,
                })
            })
            .collect()
    }

    /// Number of reference colors in catalog
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if catalog has no reference colors
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

fn read_dataset(dataset: Dataset, path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::ReadError {
        dataset,
        path: path.to_path_buf(),
        source,
    })
}
