//! The persisted layout artifact
//!
//! The artifact is a JSON object keyed by entity id:
//!
//! ```json
//! {
//!   "Stage_0_8": {"position": [0, 8], "type": "stage"},
//!   "T1": {"position": [0, 0.5], "type": "normal", "displayName": ""}
//! }
//! ```
//!
//! There is exactly one artifact per store. Every successful computation
//! replaces it wholesale; there is no versioning and no locking, so the last
//! writer wins.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::entity::{table_number, EntityType, TableEntity};
use crate::grid::{CellState, Grid};
use crate::warning::LayoutWarning;
use crate::{Error, Result};

/// Mapping id -> entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutResult {
    entities: BTreeMap<String, TableEntity>,
}

impl LayoutResult {
    /// Key entities by their id; a later duplicate replaces an earlier one
    #[must_use]
    pub fn from_entities(entities: impl IntoIterator<Item = TableEntity>) -> Self {
        Self {
            entities: entities
                .into_iter()
                .map(|entity| (entity.id.clone(), entity))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TableEntity> {
        self.entities.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableEntity> {
        self.entities.values()
    }

    /// Entities of one kind, in id order
    pub fn of_kind(&self, kind: EntityType) -> impl Iterator<Item = &TableEntity> {
        self.entities.values().filter(move |e| e.kind == kind)
    }

    #[must_use]
    pub fn normal_count(&self) -> usize {
        self.of_kind(EntityType::Normal).count()
    }

    /// Guest tables sorted by table number rather than by id text
    #[must_use]
    pub fn normal_tables(&self) -> Vec<&TableEntity> {
        let mut tables: Vec<&TableEntity> = self.of_kind(EntityType::Normal).collect();
        tables.sort_by_key(|e| table_number(&e.id).unwrap_or(u32::MAX));
        tables
    }

    /// Set `displayName` on the named entities.
    ///
    /// Ids that are not in the layout are reported and otherwise ignored.
    pub fn apply_display_names(&mut self, names: &BTreeMap<String, String>) -> Vec<LayoutWarning> {
        let mut warnings = Vec::new();
        for (id, name) in names {
            match self.entities.get_mut(id) {
                Some(entity) => entity.display_name = Some(name.clone()),
                None => warnings.push(LayoutWarning::UnknownEntity { id: id.clone() }),
            }
        }
        debug!(
            named = names.len() - warnings.len(),
            unknown = warnings.len(),
            "applied display names"
        );
        warnings
    }

    /// Pretty JSON text of the artifact
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::parse(format!("Failed to serialize layout: {e}")))
    }
}

impl Serialize for LayoutResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.entities.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LayoutResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut entities = BTreeMap::<String, TableEntity>::deserialize(deserializer)?;
        for (id, entity) in &mut entities {
            entity.id.clone_from(id);
        }
        Ok(Self { entities })
    }
}

/// Per-cell state handed to renderers alongside the artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSnapshot {
    pub cols: u32,
    pub rows: u32,
    pub cells: Vec<CellSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellSnapshot {
    pub x: u32,
    pub y: u32,
    pub state: CellState,
}

impl GridSnapshot {
    #[must_use]
    pub fn of(grid: &Grid) -> Self {
        Self {
            cols: grid.cols(),
            rows: grid.rows(),
            cells: grid
                .iter()
                .map(|(cell, state)| CellSnapshot {
                    x: cell.x,
                    y: cell.y,
                    state,
                })
                .collect(),
        }
    }
}

/// The single shared artifact file
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    path: PathBuf,
}

impl ArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the artifact with `result`.
    ///
    /// The JSON goes to a uniquely named sibling temporary file that is then
    /// persisted over the target, so readers see either the old or the new
    /// layout and concurrent writers never share a temporary file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be written.
    pub fn overwrite(&self, result: &LayoutResult) -> Result<()> {
        let json = result.to_json_pretty()?;

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::io(format!(
                        "Failed to create directory {}: {e}",
                        parent.display()
                    ))
                })?;
                parent
            }
            None => Path::new("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{}.", self.file_name()))
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| {
                Error::io(format!(
                    "Failed to create temp file in {}: {e}",
                    dir.display()
                ))
            })?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| Error::io(format!("Failed to write {}: {e}", tmp.path().display())))?;
        tmp.persist(&self.path).map_err(|e| {
            Error::io(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e.error
            ))
        })?;

        info!(
            path = %self.path.display(),
            entities = result.len(),
            tables = result.normal_count(),
            "layout artifact overwritten"
        );
        Ok(())
    }

    /// Read the current artifact
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` when no layout has been written yet,
    /// `Error::Io` when it cannot be read and `Error::Parse` when it is not a
    /// valid artifact.
    pub fn load(&self) -> Result<LayoutResult> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::not_found(format!(
                "no layout artifact at {}; run `seating generate` first",
                self.path.display()
            )),
            _ => Error::io(format!("Failed to read {}: {e}", self.path.display())),
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::parse(format!(
                "Failed to parse layout artifact {}: {e}",
                self.path.display()
            ))
        })
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| "layout".into(), |n| n.to_string_lossy().into_owned())
    }
}
