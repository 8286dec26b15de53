//! Response models for the cardano-wallet v2 dialect.
//!
//! The v2 dialect renders monetary fields as `{quantity, unit}` blocks,
//! carries native-asset holdings alongside the base currency, and drops
//! the v1 account axis entirely. These models share nothing with their v1
//! namesakes beyond the parsing conventions.

use serde_json::Value;

use crate::amount::LovelaceAmount;
use crate::error::{Error, Result};
use crate::ids::{Address, Hash64, PolicyId, WalletId};
use crate::json::{self, FromJson};
use crate::list::PagedList;
use crate::validate;
use crate::wire::{QuantityUnitBlock, TxDirection};

/// List of wallets (v2 endpoints carry no pagination).
pub type WalletsList = PagedList<WalletInfo>;
/// List of addresses.
pub type AddressesList = PagedList<AddressInfo>;
/// List of transactions.
pub type TransactionsList = PagedList<Transaction>;

/// One native-asset holding: a policy, an asset name under it, and a
/// quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHolding {
    pub policy_id: PolicyId,
    pub asset_name: String,
    pub quantity: u64,
}

impl FromJson for AssetHolding {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let policy_id =
            PolicyId::from_json(&json::join(path, "policy_id"), json::get(obj, path, "policy_id")?)?;

        let asset_name = json::req_str(obj, path, "asset_name")?;
        if asset_name.is_empty() {
            return Err(Error::invalid_field(
                json::join(path, "asset_name"),
                "non-empty string",
                "empty string",
            ));
        }

        let quantity = json::req_u64(obj, path, "quantity")?;

        Ok(Self {
            policy_id,
            asset_name,
            quantity,
        })
    }
}

/// The three balances a v2 wallet reports.
#[derive(Debug, Clone)]
pub struct WalletBalance {
    pub available: LovelaceAmount,
    pub reward: LovelaceAmount,
    pub total: LovelaceAmount,
}

impl FromJson for WalletBalance {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;
        Ok(Self {
            available: LovelaceAmount::from_json_block(
                &json::join(path, "available"),
                json::get(obj, path, "available")?,
            )?,
            reward: LovelaceAmount::from_json_block(
                &json::join(path, "reward"),
                json::get(obj, path, "reward")?,
            )?,
            total: LovelaceAmount::from_json_block(
                &json::join(path, "total"),
                json::get(obj, path, "total")?,
            )?,
        })
    }
}

/// Native-asset holdings of a wallet, split like the balance.
#[derive(Debug, Clone, Default)]
pub struct WalletAssets {
    pub available: Vec<AssetHolding>,
    pub total: Vec<AssetHolding>,
}

impl FromJson for WalletAssets {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;
        Ok(Self {
            available: parse_assets(&json::join(path, "available"), json::get(obj, path, "available")?)?,
            total: parse_assets(&json::join(path, "total"), json::get(obj, path, "total")?)?,
        })
    }
}

fn parse_assets(path: &str, value: &Value) -> Result<Vec<AssetHolding>> {
    let array = value
        .as_array()
        .ok_or_else(|| Error::invalid_field(path, "array", json::type_name(value)))?;
    let mut assets = Vec::with_capacity(array.len());
    for (i, asset) in array.iter().enumerate() {
        assets.push(AssetHolding::from_json(&json::index(path, i), asset)?);
    }
    Ok(assets)
}

/// v2 wallet synchronization state: a free-form status plus an optional
/// progress block while syncing.
#[derive(Debug, Clone)]
pub struct WalletSyncState {
    pub status: String,
    pub progress: Option<QuantityUnitBlock>,
}

impl FromJson for WalletSyncState {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let status = json::req_str(obj, path, "status")?;
        if status.is_empty() {
            return Err(Error::invalid_field(
                json::join(path, "status"),
                "non-empty string",
                "empty string",
            ));
        }

        let progress = match json::opt_object(obj, path, "progress")? {
            Some(_) => Some(QuantityUnitBlock::from_json(
                &json::join(path, "progress"),
                json::get(obj, path, "progress")?,
            )?),
            None => None,
        };

        Ok(Self { status, progress })
    }
}

/// Snapshot of a v2 wallet's server-side state.
#[derive(Debug, Clone)]
pub struct WalletInfo {
    pub id: WalletId,
    pub name: String,
    pub address_pool_gap: u64,
    pub balance: WalletBalance,
    pub assets: WalletAssets,
    pub state: WalletSyncState,
    pub passphrase_last_updated_at: Option<String>,
}

impl FromJson for WalletInfo {
    /// Field checks run in declaration order: `id`, `name`,
    /// `address_pool_gap`, `balance`, `assets`, `state`, `passphrase`.
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let id = WalletId::from_json(&json::join(path, "id"), json::get(obj, path, "id")?)?;

        let name = json::req_str(obj, path, "name")?;
        if !validate::wallet_name(&name) {
            return Err(Error::invalid_field(
                json::join(path, "name"),
                "wallet name of 3-32 word characters",
                format!("\"{}\"", name),
            ));
        }

        let address_pool_gap = json::req_u64(obj, path, "address_pool_gap")?;
        let balance = WalletBalance::from_json(
            &json::join(path, "balance"),
            json::get(obj, path, "balance")?,
        )?;

        // Older node versions predate native assets; treat absence as empty.
        let assets = match json::opt_object(obj, path, "assets")? {
            Some(_) => WalletAssets::from_json(
                &json::join(path, "assets"),
                json::get(obj, path, "assets")?,
            )?,
            None => WalletAssets::default(),
        };

        let state = WalletSyncState::from_json(
            &json::join(path, "state"),
            json::get(obj, path, "state")?,
        )?;

        let passphrase_last_updated_at = match json::opt_object(obj, path, "passphrase")? {
            Some(passphrase) => Some(json::req_str(
                passphrase,
                &json::join(path, "passphrase"),
                "last_updated_at",
            )?),
            None => None,
        };

        Ok(Self {
            id,
            name,
            address_pool_gap,
            balance,
            assets,
            state,
            passphrase_last_updated_at,
        })
    }
}

/// Usage state of a v2 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressState {
    Used,
    Unused,
}

impl AddressState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressState::Used => "used",
            AddressState::Unused => "unused",
        }
    }
}

/// One address of a v2 wallet.
#[derive(Debug, Clone)]
pub struct AddressInfo {
    pub id: Address,
    pub state: AddressState,
}

impl FromJson for AddressInfo {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let id = Address::from_json(&json::join(path, "id"), json::get(obj, path, "id")?)?;

        let state_raw = json::req_str(obj, path, "state")?;
        let state = match state_raw.as_str() {
            "used" => AddressState::Used,
            "unused" => AddressState::Unused,
            other => {
                return Err(Error::invalid_field(
                    json::join(path, "state"),
                    "\"used\" or \"unused\"",
                    format!("\"{}\"", other),
                ))
            }
        };

        Ok(Self { id, state })
    }
}

/// v2 transaction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    InLedger,
    Expired,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Pending => "pending",
            TxStatus::InLedger => "in_ledger",
            TxStatus::Expired => "expired",
        }
    }

    fn from_wire(status: &str) -> Option<Self> {
        match status {
            "pending" => Some(TxStatus::Pending),
            "in_ledger" => Some(TxStatus::InLedger),
            "expired" => Some(TxStatus::Expired),
            _ => None,
        }
    }
}

/// One output of a v2 transaction.
///
/// Foreign outputs may omit the address, and pending transactions may omit
/// amounts; absence means "unknown", never zero.
#[derive(Debug, Clone)]
pub struct TxOutput {
    pub address: Option<Address>,
    pub amount: Option<LovelaceAmount>,
    pub assets: Vec<AssetHolding>,
}

impl FromJson for TxOutput {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let address = match obj.get("address") {
            None | Some(Value::Null) => None,
            Some(address) => Some(Address::from_json(&json::join(path, "address"), address)?),
        };

        let amount = match obj.get("amount") {
            None | Some(Value::Null) => None,
            Some(amount) => Some(LovelaceAmount::from_json_block(
                &json::join(path, "amount"),
                amount,
            )?),
        };

        let assets = match obj.get("assets") {
            None | Some(Value::Null) => Vec::new(),
            Some(_) => parse_assets(&json::join(path, "assets"), json::get(obj, path, "assets")?)?,
        };

        Ok(Self {
            address,
            amount,
            assets,
        })
    }
}

/// One input of a v2 transaction: the source output plus the outpoint
/// (`id`, `index`) it spends.
#[derive(Debug, Clone)]
pub struct TxInput {
    pub id: Hash64,
    pub index: u64,
    pub address: Option<Address>,
    pub amount: Option<LovelaceAmount>,
    pub assets: Vec<AssetHolding>,
}

impl FromJson for TxInput {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let output = TxOutput::from_json(path, value)?;
        let obj = json::as_object(path, value)?;

        let id = Hash64::from_json(&json::join(path, "id"), json::get(obj, path, "id")?)?;
        let index = json::req_u64(obj, path, "index")?;

        Ok(Self {
            id,
            index,
            address: output.address,
            amount: output.amount,
            assets: output.assets,
        })
    }
}

/// A submitted or historical v2 transfer.
///
/// The status says which timeline fields are semantically meaningful, but
/// none of them is required by status: an absent field is "unknown".
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Hash64,
    pub status: TxStatus,
    pub direction: TxDirection,
    pub amount: Option<LovelaceAmount>,
    pub fee: Option<LovelaceAmount>,
    pub deposit: Option<LovelaceAmount>,
    /// Ledger inclusion time, when known.
    pub inserted_at: Option<String>,
    /// Time-to-live boundary, when one was set.
    pub expires_at: Option<String>,
    pub pending_since: Option<String>,
    pub depth: Option<QuantityUnitBlock>,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
}

impl FromJson for Transaction {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let id = Hash64::from_json(&json::join(path, "id"), json::get(obj, path, "id")?)?;
        let tx_path = format!("tx[{}...]", &id.as_str()[..6]);

        let status_raw = json::req_str(obj, &tx_path, "status")?;
        let status = TxStatus::from_wire(&status_raw).ok_or_else(|| {
            Error::invalid_field(
                json::join(&tx_path, "status"),
                "one of pending/in_ledger/expired",
                format!("\"{}\"", status_raw),
            )
        })?;

        let direction = TxDirection::from_json(
            &json::join(&tx_path, "direction"),
            json::get(obj, &tx_path, "direction")?,
        )?;

        let amount = opt_amount_block(obj, &tx_path, "amount")?;
        let fee = opt_amount_block(obj, &tx_path, "fee")?;
        let deposit = opt_amount_block(obj, &tx_path, "deposit")?;

        let inserted_at = opt_timeline(obj, &tx_path, "inserted_at")?;
        let expires_at = opt_timeline(obj, &tx_path, "expires_at")?;
        let pending_since = opt_timeline(obj, &tx_path, "pending_since")?;

        let depth = match json::opt_object(obj, &tx_path, "depth")? {
            Some(_) => Some(QuantityUnitBlock::from_json(
                &json::join(&tx_path, "depth"),
                json::get(obj, &tx_path, "depth")?,
            )?),
            None => None,
        };

        let inputs_path = json::join(&tx_path, "inputs");
        let inputs_raw = json::req_array(obj, &tx_path, "inputs")?;
        let mut inputs = Vec::with_capacity(inputs_raw.len());
        for (i, input) in inputs_raw.iter().enumerate() {
            inputs.push(TxInput::from_json(&json::index(&inputs_path, i), input)?);
        }

        let outputs_path = json::join(&tx_path, "outputs");
        let outputs_raw = json::req_array(obj, &tx_path, "outputs")?;
        let mut outputs = Vec::with_capacity(outputs_raw.len());
        for (i, output) in outputs_raw.iter().enumerate() {
            outputs.push(TxOutput::from_json(&json::index(&outputs_path, i), output)?);
        }

        Ok(Self {
            id,
            status,
            direction,
            amount,
            fee,
            deposit,
            inserted_at,
            expires_at,
            pending_since,
            depth,
            inputs,
            outputs,
        })
    }
}

fn opt_amount_block(
    obj: &serde_json::Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<Option<LovelaceAmount>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(LovelaceAmount::from_json_block(
            &json::join(path, key),
            value,
        )?)),
    }
}

/// Timeline markers come as `{time, ...}` blocks; they normalize to the
/// `time` field.
fn opt_timeline(
    obj: &serde_json::Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<Option<String>> {
    match json::opt_object(obj, path, key)? {
        Some(block) => Ok(Some(json::req_str(block, &json::join(path, key), "time")?)),
        None => Ok(None),
    }
}

/// Network status snapshot from `/v2/network/information`.
#[derive(Debug, Clone)]
pub struct NetworkInformation {
    pub sync_progress: WalletSyncState,
    /// Height block of the node's current tip, when reported.
    pub node_tip_height: Option<QuantityUnitBlock>,
    pub node_era: Option<String>,
}

impl FromJson for NetworkInformation {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let sync_progress = WalletSyncState::from_json(
            &json::join(path, "sync_progress"),
            json::get(obj, path, "sync_progress")?,
        )?;

        let node_tip_height = match json::opt_object(obj, path, "node_tip")? {
            Some(node_tip) => {
                let tip_path = json::join(path, "node_tip");
                Some(QuantityUnitBlock::from_json(
                    &json::join(&tip_path, "height"),
                    json::get(node_tip, &tip_path, "height")?,
                )?)
            }
            None => None,
        };

        let node_era = json::opt_str(obj, path, "node_era")?;

        Ok(Self {
            sync_progress,
            node_tip_height,
            node_era,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lovelace(quantity: u64) -> Value {
        json!({"quantity": quantity, "unit": "lovelace"})
    }

    fn wallet_json() -> Value {
        json!({
            "id": "2512a00e9653fe49a44a5886202e24d77eeb998f",
            "name": "Shared wallet",
            "address_pool_gap": 20,
            "balance": {
                "available": lovelace(500000),
                "reward": lovelace(0),
                "total": lovelace(500000)
            },
            "assets": {
                "available": [{
                    "policy_id": "65ab82542b0ca20391caaf66a4d4d7897d281f9c136cd3513136945b",
                    "asset_name": "7453554e444145",
                    "quantity": 300
                }],
                "total": []
            },
            "state": {"status": "ready"},
            "passphrase": {"last_updated_at": "2021-06-11T09:10:20Z"}
        })
    }

    #[test]
    fn test_wallet_info_parses() {
        let info = WalletInfo::from_json("wallet", &wallet_json()).unwrap();
        assert_eq!(info.id.as_str(), "2512a00e9653fe49a44a5886202e24d77eeb998f");
        assert_eq!(info.address_pool_gap, 20);
        assert_eq!(info.balance.available.lovelace(), 500_000);
        assert_eq!(info.assets.available.len(), 1);
        assert_eq!(info.state.status, "ready");
        assert!(info.passphrase_last_updated_at.is_some());
    }

    #[test]
    fn test_wallet_info_missing_balance_total() {
        let mut payload = wallet_json();
        payload["balance"].as_object_mut().unwrap().remove("total");
        let err = WalletInfo::from_json("wallet", &payload).unwrap_err();
        assert!(matches!(err, Error::MissingField(ref f) if f == "wallet.balance.total"));
    }

    #[test]
    fn test_wallet_info_wrong_unit() {
        let mut payload = wallet_json();
        payload["balance"]["reward"]["unit"] = json!("block");
        let err = WalletInfo::from_json("wallet", &payload).unwrap_err();
        assert!(err.to_string().contains("wallet.balance.reward.unit"));
    }

    #[test]
    fn test_wallet_info_without_assets_block() {
        let mut payload = wallet_json();
        payload.as_object_mut().unwrap().remove("assets");
        let info = WalletInfo::from_json("wallet", &payload).unwrap();
        assert!(info.assets.available.is_empty());
    }

    #[test]
    fn test_asset_holding_rejects_bad_policy() {
        let err = AssetHolding::from_json(
            "asset",
            &json!({"policy_id": "deadbeef", "asset_name": "ff00", "quantity": 1}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("asset.policy_id"));
    }

    #[test]
    fn test_asset_holding_rejects_negative_quantity() {
        let err = AssetHolding::from_json(
            "asset",
            &json!({
                "policy_id": "65ab82542b0ca20391caaf66a4d4d7897d281f9c136cd3513136945b",
                "asset_name": "ff00",
                "quantity": -5
            }),
        )
        .unwrap_err();
        assert!(err.to_string().contains("asset.quantity"));
    }

    fn tx_json() -> Value {
        json!({
            "id": "1423856bc91c49e928f6f30f4e8d665d53eb4ab6028bd0ac971809d514c92db1",
            "status": "in_ledger",
            "direction": "outgoing",
            "amount": lovelace(1500000),
            "fee": lovelace(170000),
            "deposit": lovelace(0),
            "inserted_at": {"time": "2021-06-11T09:10:20Z", "block": {"height": {"quantity": 5, "unit": "block"}}},
            "depth": {"quantity": 50, "unit": "block"},
            "inputs": [{
                "id": "9b34a5e1a1e2faebc08cbb0c2e0dcb79b275a1e5ba8a1e1e5dc6b05cdb8c0b7a",
                "index": 0,
                "address": "addr1qxyz0abcdefgh",
                "amount": lovelace(1700000)
            }],
            "outputs": [{
                "address": "addr1qabc9zyxwvuts",
                "amount": lovelace(1500000),
                "assets": [{
                    "policy_id": "65ab82542b0ca20391caaf66a4d4d7897d281f9c136cd3513136945b",
                    "asset_name": "7453554e444145",
                    "quantity": 25
                }]
            }]
        })
    }

    #[test]
    fn test_transaction_parses() {
        let tx = Transaction::from_json("transaction", &tx_json()).unwrap();
        assert_eq!(tx.status, TxStatus::InLedger);
        assert_eq!(tx.direction, TxDirection::Outgoing);
        assert_eq!(tx.amount.unwrap().lovelace(), 1_500_000);
        assert_eq!(tx.inserted_at.as_deref(), Some("2021-06-11T09:10:20Z"));
        assert!(tx.expires_at.is_none());
        assert_eq!(tx.inputs[0].index, 0);
        assert_eq!(tx.outputs[0].assets[0].quantity, 25);
    }

    #[test]
    fn test_transaction_rejects_v1_status() {
        let mut payload = tx_json();
        payload["status"] = json!("persisted");
        let err = Transaction::from_json("transaction", &payload).unwrap_err();
        assert!(err.to_string().contains("status"));
    }

    #[test]
    fn test_transaction_bad_output_names_index() {
        let mut payload = tx_json();
        payload["outputs"][0]["amount"]["quantity"] = json!(-1);
        let err = Transaction::from_json("transaction", &payload).unwrap_err();
        assert!(err.to_string().contains("tx[142385...].outputs[0].amount"));
    }

    #[test]
    fn test_address_info() {
        let info = AddressInfo::from_json(
            "addresses[0]",
            &json!({"id": "addr1qxyz0abcdefgh", "state": "unused"}),
        )
        .unwrap();
        assert_eq!(info.state, AddressState::Unused);

        let err = AddressInfo::from_json(
            "addresses[0]",
            &json!({"id": "addr1qxyz0abcdefgh", "state": "fresh"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("addresses[0].state"));
    }

    #[test]
    fn test_network_information() {
        let info = NetworkInformation::from_json(
            "networkInformation",
            &json!({
                "sync_progress": {"status": "syncing", "progress": {"quantity": 98, "unit": "percent"}},
                "node_tip": {"height": {"quantity": 3587765, "unit": "block"}},
                "node_era": "shelley"
            }),
        )
        .unwrap();
        assert_eq!(info.sync_progress.status, "syncing");
        assert_eq!(info.sync_progress.progress.as_ref().unwrap().quantity, 98);
        assert_eq!(info.node_tip_height.unwrap().quantity, 3_587_765);
        assert_eq!(info.node_era.as_deref(), Some("shelley"));
    }
}
