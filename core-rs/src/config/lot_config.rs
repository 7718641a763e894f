/**
 * lot_config.rs
 * Parser for lot.yaml lot definitions
 *
 * Format:
 * ```yaml
 * apiVersion: lot/v1
 * kind: Lot
 * metadata:
 *   name: downtown
 * spec:
 *   categories:          # optional, defaults to car/bike/truck
 *     car: compact
 *     bike: bike
 *     truck: large
 *   slots:
 *     - prefix: C        # expands to C1, C2, C3
 *       type: compact
 *       count: 3
 *     - id: L1
 *       type: large
 * ```
 *
 * Slots are registered in file order, which fixes the initial FIFO order
 * of each free queue.
 */

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::errors::{LotError, Result};
use crate::lot::{CategoryMap, LotManager, Slot, SlotId, SlotType};

/// File name looked up by `load_from_dir`
pub const LOT_FILE: &str = "lot.yaml";

const API_VERSION: &str = "lot/v1";
const KIND: &str = "Lot";
const SLOT_ID_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9._-]*$";

/// Largest `count` accepted for one prefixed run of slots
pub const MAX_SLOT_RUN: u32 = 10_000;

/// lot.yaml file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LotConfig {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: LotSpec,
}

/// Lot metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Lot specification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LotSpec {
    /// Vehicle category -> slot type table; defaults when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoryMap>,
    pub slots: Vec<SlotEntry>,
}

/// One slot, or a run of slots sharing a prefix
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "type")]
    pub slot_type: SlotType,
}

impl SlotEntry {
    pub fn single(id: impl Into<String>, slot_type: SlotType) -> Self {
        SlotEntry {
            id: Some(id.into()),
            prefix: None,
            count: None,
            slot_type,
        }
    }

    pub fn run(prefix: impl Into<String>, slot_type: SlotType, count: u32) -> Self {
        SlotEntry {
            id: None,
            prefix: Some(prefix.into()),
            count: Some(count),
            slot_type,
        }
    }

    fn ids(&self) -> Vec<String> {
        match (&self.id, &self.prefix, self.count) {
            (Some(id), _, _) => vec![id.clone()],
            (None, Some(prefix), Some(count)) => {
                (1..=count).map(|n| format!("{}{}", prefix, n)).collect()
            }
            _ => Vec::new(),
        }
    }
}

impl LotConfig {
    /// Load lot.yaml from specified path
    ///
    /// # Example
    /// ```no_run
    /// use lot_core::LotConfig;
    ///
    /// let config = LotConfig::load("lot.yaml")?;
    /// let lot = config.build()?;
    /// # Ok::<(), lot_core::LotError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LotError::FileNotFound(path.to_string_lossy().to_string()));
        }

        let content = fs::read_to_string(path)?;

        let config: LotConfig = serde_yaml::from_str(&content)
            .map_err(|e| LotError::ParseError(format!("Invalid lot YAML: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load lot.yaml from a directory
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::load(dir.as_ref().join(LOT_FILE))
    }

    /// Validate lot.yaml structure
    ///
    /// Ensures:
    /// - apiVersion is "lot/v1" and kind is "Lot"
    /// - metadata.name is non-empty
    /// - every slot entry has either `id`, or `prefix` with `count` in
    ///   `1..=MAX_SLOT_RUN`
    /// - slot ids and prefixes are plain identifiers
    pub fn validate(&self) -> Result<()> {
        if self.api_version != API_VERSION {
            return Err(LotError::ValidationError(format!(
                "Invalid apiVersion: expected '{}', got '{}'",
                API_VERSION, self.api_version
            )));
        }

        if self.kind != KIND {
            return Err(LotError::ValidationError(format!(
                "Invalid kind: expected '{}', got '{}'",
                KIND, self.kind
            )));
        }

        if self.metadata.name.is_empty() {
            return Err(LotError::ValidationError(
                "metadata.name cannot be empty".to_string(),
            ));
        }

        let id_pattern = Regex::new(SLOT_ID_PATTERN)?;

        for (n, entry) in self.spec.slots.iter().enumerate() {
            let label = match (&entry.id, &entry.prefix, entry.count) {
                (Some(id), None, None) => id,
                (None, Some(prefix), Some(count)) if (1..=MAX_SLOT_RUN).contains(&count) => prefix,
                (None, Some(_), Some(0)) => {
                    return Err(LotError::ValidationError(format!(
                        "spec.slots[{}]: count must be at least 1",
                        n
                    )))
                }
                (None, Some(_), Some(count)) => {
                    return Err(LotError::ValidationError(format!(
                        "spec.slots[{}]: count {} exceeds limit of {}",
                        n, count, MAX_SLOT_RUN
                    )))
                }
                _ => {
                    return Err(LotError::ValidationError(format!(
                        "spec.slots[{}]: expected either 'id' or 'prefix' with 'count'",
                        n
                    )))
                }
            };

            if !id_pattern.is_match(label) {
                return Err(LotError::ValidationError(format!(
                    "spec.slots[{}]: invalid slot id '{}'",
                    n, label
                )));
            }
        }

        Ok(())
    }

    /// Save lot.yaml to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(|e| {
            LotError::SerializationError(format!("Failed to serialize lot config: {}", e))
        })?;

        fs::write(path.as_ref(), yaml)?;

        Ok(())
    }

    /// Create an empty lot definition with default categories
    pub fn new(name: impl Into<String>) -> Self {
        LotConfig {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: Metadata {
                name: name.into(),
                description: None,
            },
            spec: LotSpec {
                categories: None,
                slots: Vec::new(),
            },
        }
    }

    /// Three compact, two bike and one large slot (C1-C3, B1-B2, L1)
    pub fn sample() -> Self {
        let mut config = LotConfig::new("sample");
        config.metadata.description = Some("Demo lot".to_string());
        config.spec.slots = vec![
            SlotEntry::run("C", SlotType::compact(), 3),
            SlotEntry::run("B", SlotType::bike(), 2),
            SlotEntry::single("L1", SlotType::large()),
        ];
        config
    }

    pub fn categories(&self) -> CategoryMap {
        self.spec.categories.clone().unwrap_or_default()
    }

    /// Expanded (id, type) pairs in registration order
    pub fn slot_specs(&self) -> Vec<(SlotId, SlotType)> {
        self.spec
            .slots
            .iter()
            .flat_map(|entry| {
                entry
                    .ids()
                    .into_iter()
                    .map(move |id| (SlotId::new(id), entry.slot_type.clone()))
            })
            .collect()
    }

    /// Build a LotManager with every slot registered and free
    ///
    /// # Errors
    /// Registration errors (`DuplicateSlotId`, `UnknownSlotType`) from the
    /// first offending entry
    pub fn build(&self) -> Result<LotManager> {
        let mut manager = LotManager::new(self.categories());

        for (id, slot_type) in self.slot_specs() {
            manager.register_slot(Slot::new(id, slot_type))?;
        }

        info!(
            lot = %self.metadata.name,
            slots = manager.len(),
            "lot built from config"
        );

        Ok(manager)
    }
}
