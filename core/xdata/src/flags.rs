//! FILENAME: core/xdata/src/flags.rs
//! PURPOSE: Tags naming the kind of mutation that was applied.
//! CONTEXT: Requests are carried by `RowUpdate`, `AxisUpdate` and
//! `DimensionUpdate`, whose variants hold their own payloads. The plain tags
//! below report the effective operation back to the caller (an `All` update
//! that leaves the header untouched comes back as `DataChg`) and parse the
//! textual tokens used by filter layers ("chg&new", "dim_perm", ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use descriptor::XdataError;

/// Per-axis mutation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateFlag {
    All,
    DataChg,
    DimChg,
    Chg,
    New,
    Remove,
    Perm,
    ChgNew,
    ChgRm,
}

impl UpdateFlag {
    pub fn token(&self) -> &'static str {
        match self {
            UpdateFlag::All => "all",
            UpdateFlag::DataChg => "data_chg",
            UpdateFlag::DimChg => "dim_chg",
            UpdateFlag::Chg => "chg",
            UpdateFlag::New => "new",
            UpdateFlag::Remove => "remove",
            UpdateFlag::Perm => "perm",
            UpdateFlag::ChgNew => "chg&new",
            UpdateFlag::ChgRm => "chg&rm",
        }
    }
}

impl fmt::Display for UpdateFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for UpdateFlag {
    type Err = XdataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(UpdateFlag::All),
            "data_chg" => Ok(UpdateFlag::DataChg),
            "dim_chg" => Ok(UpdateFlag::DimChg),
            "chg" => Ok(UpdateFlag::Chg),
            "new" => Ok(UpdateFlag::New),
            "remove" => Ok(UpdateFlag::Remove),
            "perm" => Ok(UpdateFlag::Perm),
            "chg&new" => Ok(UpdateFlag::ChgNew),
            "chg&rm" => Ok(UpdateFlag::ChgRm),
            other => Err(XdataError::UnknownFlag(other.to_string())),
        }
    }
}

/// Whole-structure mutation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionFlag {
    Global,
    DimChg,
    DimInsert,
    DimRm,
    DimPerm,
}

impl DimensionFlag {
    pub fn token(&self) -> &'static str {
        match self {
            DimensionFlag::Global => "global",
            DimensionFlag::DimChg => "dim_chg",
            DimensionFlag::DimInsert => "dim_insert",
            DimensionFlag::DimRm => "dim_rm",
            DimensionFlag::DimPerm => "dim_perm",
        }
    }
}

impl fmt::Display for DimensionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DimensionFlag {
    type Err = XdataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(DimensionFlag::Global),
            "dim_chg" => Ok(DimensionFlag::DimChg),
            "dim_insert" => Ok(DimensionFlag::DimInsert),
            "dim_rm" => Ok(DimensionFlag::DimRm),
            "dim_perm" => Ok(DimensionFlag::DimPerm),
            other => Err(XdataError::UnknownFlag(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_flag_tokens() {
        for flag in [
            UpdateFlag::All,
            UpdateFlag::DataChg,
            UpdateFlag::DimChg,
            UpdateFlag::Chg,
            UpdateFlag::New,
            UpdateFlag::Remove,
            UpdateFlag::Perm,
            UpdateFlag::ChgNew,
            UpdateFlag::ChgRm,
        ] {
            assert_eq!(flag.token().parse::<UpdateFlag>(), Ok(flag));
        }
    }

    #[test]
    fn test_unknown_tokens() {
        assert_eq!(
            "rm".parse::<UpdateFlag>(),
            Err(XdataError::UnknownFlag("rm".to_string()))
        );
        assert!("dim_swap".parse::<DimensionFlag>().is_err());
        assert_eq!("dim_insert".parse::<DimensionFlag>(), Ok(DimensionFlag::DimInsert));
    }
}
