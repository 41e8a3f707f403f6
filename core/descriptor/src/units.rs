//! FILENAME: core/descriptor/src/units.rs
//! PURPOSE: Unit conversion tables attached to numeric descriptors.
//! CONTEXT: A table lists related units with their factor relative to the
//! reference unit (factor 1.0), e.g. mm = 0.001, m = 1. Tables are kept
//! sorted by ascending factor. The bank of well-known tables lives outside
//! this crate and is reached through the `UnitBank` trait.

use serde::{Deserialize, Serialize};

use crate::error::{Result, XdataError};

/// One entry of a conversion table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEntry {
    pub unit: String,
    pub factor: f64,
}

impl UnitEntry {
    pub fn new(unit: impl Into<String>, factor: f64) -> Self {
        UnitEntry {
            unit: unit.into(),
            factor,
        }
    }
}

/// How a caller specifies the unit of a numeric dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnitSpec {
    /// A single unit, which becomes its own reference.
    Single(String),
    /// (unit, factor) pairs; exactly one factor must be 1.0.
    Table(Vec<(String, f64)>),
}

impl UnitSpec {
    /// Rebuilds a spec from an existing table (used to copy data descriptors).
    pub fn from_entries(entries: &[UnitEntry]) -> Self {
        UnitSpec::Table(
            entries
                .iter()
                .map(|e| (e.unit.clone(), e.factor))
                .collect(),
        )
    }

    /// Resolves the spec into (reference unit, table sorted by factor).
    pub fn resolve(&self) -> Result<(String, Vec<UnitEntry>)> {
        match self {
            UnitSpec::Single(unit) => Ok((unit.clone(), vec![UnitEntry::new(unit.clone(), 1.0)])),
            UnitSpec::Table(pairs) => build_table(pairs),
        }
    }
}

impl From<&str> for UnitSpec {
    fn from(unit: &str) -> Self {
        UnitSpec::Single(unit.to_string())
    }
}

impl From<String> for UnitSpec {
    fn from(unit: String) -> Self {
        UnitSpec::Single(unit)
    }
}

impl From<Vec<(&str, f64)>> for UnitSpec {
    fn from(pairs: Vec<(&str, f64)>) -> Self {
        UnitSpec::Table(pairs.into_iter().map(|(u, f)| (u.to_string(), f)).collect())
    }
}

fn build_table(pairs: &[(String, f64)]) -> Result<(String, Vec<UnitEntry>)> {
    if pairs.is_empty() {
        return Err(XdataError::InvalidArgumentType(
            "there must be at least one unit".to_string(),
        ));
    }

    let mut reference: Option<&str> = None;
    for (unit, factor) in pairs {
        if !factor.is_finite() || *factor <= 0.0 {
            return Err(XdataError::InvalidArgumentType(format!(
                "conversion factor of '{}' must be a finite positive number, got {}",
                unit, factor
            )));
        }
        if *factor == 1.0 {
            if let Some(existing) = reference {
                return Err(XdataError::InvalidArgumentType(format!(
                    "units '{}' and '{}' both have factor 1; only one reference is allowed",
                    existing, unit
                )));
            }
            reference = Some(unit);
        }
    }

    let reference = reference.ok_or_else(|| {
        XdataError::InvalidArgumentType(
            "one of the conversion factors must be equal to 1 to define a reference".to_string(),
        )
    })?;

    let mut table: Vec<UnitEntry> = pairs
        .iter()
        .map(|(unit, factor)| UnitEntry::new(unit.clone(), *factor))
        .collect();
    // Stable sort keeps insertion order between equal factors
    table.sort_by(|a, b| a.factor.total_cmp(&b.factor));

    Ok((reference.to_string(), table))
}

// ============================================================================
// UNIT BANK
// ============================================================================

/// Source of canonical conversion tables, keyed by any unit they contain.
pub trait UnitBank {
    fn lookup(&self, unit: &str) -> Option<Vec<UnitEntry>>;
}

/// Bank stub: knows no table, so callers always fall back to a single unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUnitBank;

impl UnitBank for NoUnitBank {
    fn lookup(&self, _unit: &str) -> Option<Vec<UnitEntry>> {
        None
    }
}
