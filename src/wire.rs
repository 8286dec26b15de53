//! Small wire-level building blocks shared by both API dialects.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::json;

/// A generic `{quantity, unit}` pair.
///
/// The node uses this shape for sync progress, blockchain heights, NTP
/// drift and (in the v2 dialect) monetary fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityUnitBlock {
    pub quantity: u64,
    pub unit: String,
}

impl QuantityUnitBlock {
    pub(crate) fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;
        let quantity = json::req_u64(obj, path, "quantity")?;
        let unit = json::req_str(obj, path, "unit")?;
        if unit.is_empty() {
            return Err(Error::invalid_field(
                json::join(path, "unit"),
                "non-empty string",
                "empty string",
            ));
        }
        Ok(Self { quantity, unit })
    }
}

/// Direction of a transfer relative to the wallet it was fetched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxDirection {
    Incoming,
    Outgoing,
}

impl TxDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxDirection::Incoming => "incoming",
            TxDirection::Outgoing => "outgoing",
        }
    }

    pub(crate) fn from_json(path: &str, value: &Value) -> Result<Self> {
        let raw = value
            .as_str()
            .ok_or_else(|| Error::invalid_field(path, "string", json::type_name(value)))?;
        match raw.to_ascii_lowercase().as_str() {
            "incoming" => Ok(TxDirection::Incoming),
            "outgoing" => Ok(TxDirection::Outgoing),
            other => Err(Error::invalid_field(
                path,
                "\"incoming\" or \"outgoing\"",
                format!("\"{}\"", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quantity_unit_block() {
        let block =
            QuantityUnitBlock::from_json("nodeInfo.syncProgress", &json!({"quantity": 99, "unit": "percent"}))
                .unwrap();
        assert_eq!(block.quantity, 99);
        assert_eq!(block.unit, "percent");
    }

    #[test]
    fn test_quantity_unit_block_missing_unit() {
        let err =
            QuantityUnitBlock::from_json("nodeInfo.syncProgress", &json!({"quantity": 99})).unwrap_err();
        assert!(err.to_string().contains("nodeInfo.syncProgress.unit"));
    }

    #[test]
    fn test_direction_lowercases() {
        assert_eq!(
            TxDirection::from_json("tx.direction", &json!("Outgoing")).unwrap(),
            TxDirection::Outgoing
        );
        assert!(TxDirection::from_json("tx.direction", &json!("sideways")).is_err());
    }
}
