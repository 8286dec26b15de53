//! Response models for the legacy Cardano-SL v1 dialect.
//!
//! Every model parses a raw payload sub-tree into an immutable record,
//! failing with the exact field path when a key is missing or malformed.

use serde_json::Value;

use crate::amount::LovelaceAmount;
use crate::config::AssuranceLevel;
use crate::error::{Error, Result};
use crate::ids::{AccountIndex, Address, Hash64, WalletId};
use crate::json::{self, FromJson};
use crate::list::PagedList;
use crate::validate;
use crate::wire::{QuantityUnitBlock, TxDirection};

/// List of wallets with its pagination block.
pub type WalletsList = PagedList<WalletInfo>;
/// List of accounts with its pagination block.
pub type AccountsList = PagedList<AccountInfo>;
/// List of transactions with its pagination block.
pub type TransactionsList = PagedList<Transaction>;
/// List of addresses; pagination is absent when the list is embedded in an
/// account record.
pub type AddressesList = PagedList<AddressInfo>;

/// v1 wallet sync-state tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStateTag {
    Restoring,
    Synced,
}

impl SyncStateTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStateTag::Restoring => "restoring",
            SyncStateTag::Synced => "synced",
        }
    }
}

/// Blockchain-synchronization state of a wallet.
///
/// The progress sub-blocks are populated only while the wallet is
/// restoring; a synced wallet carries none of them.
#[derive(Debug, Clone)]
pub struct WalletSyncState {
    pub tag: SyncStateTag,
    pub estimated_completion_time: Option<QuantityUnitBlock>,
    pub percentage: Option<QuantityUnitBlock>,
    pub throughput: Option<QuantityUnitBlock>,
}

impl FromJson for WalletSyncState {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let tag_raw = json::req_str(obj, path, "tag")?;
        let tag = match tag_raw.as_str() {
            "restoring" => SyncStateTag::Restoring,
            "synced" => SyncStateTag::Synced,
            other => {
                return Err(Error::invalid_field(
                    json::join(path, "tag"),
                    "\"restoring\" or \"synced\"",
                    format!("\"{}\"", other),
                ))
            }
        };

        let data = json::opt_object(obj, path, "data")?;
        if tag == SyncStateTag::Restoring && data.is_none() {
            return Err(Error::missing(json::join(path, "data")));
        }

        let (estimated_completion_time, percentage, throughput) = match data {
            Some(data) => {
                let data_path = json::join(path, "data");
                (
                    Some(QuantityUnitBlock::from_json(
                        &json::join(&data_path, "estimatedCompletionTime"),
                        json::get(data, &data_path, "estimatedCompletionTime")?,
                    )?),
                    Some(QuantityUnitBlock::from_json(
                        &json::join(&data_path, "percentage"),
                        json::get(data, &data_path, "percentage")?,
                    )?),
                    Some(QuantityUnitBlock::from_json(
                        &json::join(&data_path, "throughput"),
                        json::get(data, &data_path, "throughput")?,
                    )?),
                )
            }
            None => (None, None, None),
        };

        Ok(Self {
            tag,
            estimated_completion_time,
            percentage,
            throughput,
        })
    }
}

/// Snapshot of a wallet's server-side state.
#[derive(Debug, Clone)]
pub struct WalletInfo {
    pub id: WalletId,
    pub assurance_level: AssuranceLevel,
    pub balance: LovelaceAmount,
    pub created_at: String,
    pub has_spending_password: bool,
    pub name: String,
    pub spending_password_last_update: Option<String>,
    pub sync_state: WalletSyncState,
    /// The payload's `type` field (`regular` for ordinary wallets).
    pub kind: String,
}

impl FromJson for WalletInfo {
    /// Field checks run in declaration order: `id`, `assuranceLevel`,
    /// `balance`, `createdAt`, `hasSpendingPassword`, `name`,
    /// `spendingPasswordLastUpdate`, `syncState`, `type`.
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let id = WalletId::from_json(&json::join(path, "id"), json::get(obj, path, "id")?)?;

        let assurance_raw = json::req_str(obj, path, "assuranceLevel")?;
        let assurance_level = AssuranceLevel::from_wire(&assurance_raw).ok_or_else(|| {
            Error::invalid_field(
                json::join(path, "assuranceLevel"),
                "\"normal\" or \"strict\"",
                format!("\"{}\"", assurance_raw),
            )
        })?;

        let balance =
            LovelaceAmount::from_json_int(&json::join(path, "balance"), json::get(obj, path, "balance")?)?;
        let created_at = json::req_str(obj, path, "createdAt")?;
        let has_spending_password = json::req_bool(obj, path, "hasSpendingPassword")?;

        let name = json::req_str(obj, path, "name")?;
        if !validate::wallet_name(&name) {
            return Err(Error::invalid_field(
                json::join(path, "name"),
                "wallet name of 3-32 word characters",
                format!("\"{}\"", name),
            ));
        }

        let spending_password_last_update =
            json::opt_str(obj, path, "spendingPasswordLastUpdate")?;
        let sync_state = WalletSyncState::from_json(
            &json::join(path, "syncState"),
            json::get(obj, path, "syncState")?,
        )?;
        let kind = json::req_str(obj, path, "type")?;

        Ok(Self {
            id,
            assurance_level,
            balance,
            created_at,
            has_spending_password,
            name,
            spending_password_last_update,
            sync_state,
            kind,
        })
    }
}

/// Ownership marker on a listed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressOwnership {
    IsOurs,
    AmbiguousOwnership,
}

impl AddressOwnership {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressOwnership::IsOurs => "isOurs",
            AddressOwnership::AmbiguousOwnership => "ambiguousOwnership",
        }
    }
}

/// One address known to the node.
#[derive(Debug, Clone)]
pub struct AddressInfo {
    pub id: Address,
    pub ownership: AddressOwnership,
    pub used: bool,
    pub change_address: bool,
}

impl FromJson for AddressInfo {
    /// Field checks run in declaration order: `id`, `ownership`, `used`,
    /// `changeAddress`.
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let id = Address::from_json(&json::join(path, "id"), json::get(obj, path, "id")?)?;

        let ownership_raw = json::req_str(obj, path, "ownership")?;
        let ownership = match ownership_raw.as_str() {
            "isOurs" => AddressOwnership::IsOurs,
            "ambiguousOwnership" => AddressOwnership::AmbiguousOwnership,
            other => {
                return Err(Error::invalid_field(
                    json::join(path, "ownership"),
                    "\"isOurs\" or \"ambiguousOwnership\"",
                    format!("\"{}\"", other),
                ))
            }
        };

        let used = json::req_bool(obj, path, "used")?;
        let change_address = json::req_bool(obj, path, "changeAddress")?;

        Ok(Self {
            id,
            ownership,
            used,
            change_address,
        })
    }
}

/// One account inside a wallet.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    pub amount: LovelaceAmount,
    pub addresses: AddressesList,
    pub index: AccountIndex,
    pub name: String,
    pub wallet_id: WalletId,
}

impl AccountInfo {
    /// Field checks run in declaration order: `amount`, `addresses`,
    /// `index`, `name`, `walletId`.
    ///
    /// `pagination` is attached to the embedded address list when the
    /// account was fetched directly (the endpoint paginates addresses).
    pub(crate) fn parse(
        path: &str,
        value: &Value,
        pagination: Option<crate::envelope::Pagination>,
    ) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let amount =
            LovelaceAmount::from_json_int(&json::join(path, "amount"), json::get(obj, path, "amount")?)?;
        let addresses = AddressesList::from_json(
            &json::join(path, "addresses"),
            json::get(obj, path, "addresses")?,
            pagination,
        )?;
        let index =
            AccountIndex::from_json(&json::join(path, "index"), json::get(obj, path, "index")?)?;

        let name = json::req_str(obj, path, "name")?;
        if !validate::account_name(&name) {
            return Err(Error::invalid_field(
                json::join(path, "name"),
                "account name of 1-32 word characters",
                format!("\"{}\"", name),
            ));
        }

        let wallet_id =
            WalletId::from_json(&json::join(path, "walletId"), json::get(obj, path, "walletId")?)?;

        Ok(Self {
            amount,
            addresses,
            index,
            name,
            wallet_id,
        })
    }
}

impl FromJson for AccountInfo {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        Self::parse(path, value, None)
    }
}

/// v1 transaction state tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatusTag {
    Applying,
    InNewestBlocks,
    Persisted,
    WontApply,
    Creating,
}

impl TxStatusTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatusTag::Applying => "applying",
            TxStatusTag::InNewestBlocks => "inNewestBlocks",
            TxStatusTag::Persisted => "persisted",
            TxStatusTag::WontApply => "wontApply",
            TxStatusTag::Creating => "creating",
        }
    }

    fn from_wire(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "applying" => Some(TxStatusTag::Applying),
            "innewestblocks" => Some(TxStatusTag::InNewestBlocks),
            "persisted" => Some(TxStatusTag::Persisted),
            "wontapply" => Some(TxStatusTag::WontApply),
            "creating" => Some(TxStatusTag::Creating),
            _ => None,
        }
    }
}

/// Tagged v1 transaction status; `data` is the tag's raw companion block.
#[derive(Debug, Clone)]
pub struct TxStatus {
    pub tag: TxStatusTag,
    pub data: Option<Value>,
}

impl FromJson for TxStatus {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;
        let tag_raw = json::req_str(obj, path, "tag")?;
        let tag = TxStatusTag::from_wire(&tag_raw).ok_or_else(|| {
            Error::invalid_field(
                json::join(path, "tag"),
                "one of applying/inNewestBlocks/persisted/wontApply/creating",
                format!("\"{}\"", tag_raw),
            )
        })?;
        let data = match obj.get("data") {
            None | Some(Value::Null) => None,
            Some(other) => Some(other.clone()),
        };
        Ok(Self { tag, data })
    }
}

/// One side of a v1 transaction: an address and its amount.
#[derive(Debug, Clone)]
pub struct TxInOut {
    pub address: Address,
    pub amount: LovelaceAmount,
}

impl FromJson for TxInOut {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;
        let address =
            Address::from_json(&json::join(path, "address"), json::get(obj, path, "address")?)?;
        let amount =
            LovelaceAmount::from_json_int(&json::join(path, "amount"), json::get(obj, path, "amount")?)?;
        Ok(Self { address, amount })
    }
}

/// v1 transaction locality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxType {
    Local,
    Foreign,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Local => "local",
            TxType::Foreign => "foreign",
        }
    }
}

/// A submitted or historical v1 transfer.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Hash64,
    pub amount: LovelaceAmount,
    pub confirmations: u64,
    pub creation_time: String,
    pub direction: TxDirection,
    pub inputs: Vec<TxInOut>,
    pub outputs: Vec<TxInOut>,
    pub status: TxStatus,
    pub kind: TxType,
}

impl FromJson for Transaction {
    /// After the id check, error paths switch to a `tx[abcdef...]` prefix
    /// built from the first six characters of the transaction id, so a bad
    /// field inside a large list is still attributable to its transaction.
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let id = Hash64::from_json(&json::join(path, "id"), json::get(obj, path, "id")?)?;
        let tx_path = format!("tx[{}...]", &id.as_str()[..6]);

        let amount = LovelaceAmount::from_json_int(
            &json::join(&tx_path, "amount"),
            json::get(obj, &tx_path, "amount")?,
        )?;
        let confirmations = json::req_u64(obj, &tx_path, "confirmations")?;
        let creation_time = json::req_str(obj, &tx_path, "creationTime")?;
        let direction = TxDirection::from_json(
            &json::join(&tx_path, "direction"),
            json::get(obj, &tx_path, "direction")?,
        )?;

        let kind_raw = json::req_str(obj, &tx_path, "type")?;
        let kind = match kind_raw.to_ascii_lowercase().as_str() {
            "local" => TxType::Local,
            "foreign" => TxType::Foreign,
            other => {
                return Err(Error::invalid_field(
                    json::join(&tx_path, "type"),
                    "\"local\" or \"foreign\"",
                    format!("\"{}\"", other),
                ))
            }
        };

        let inputs_path = json::join(&tx_path, "inputs");
        let inputs_raw = json::req_array(obj, &tx_path, "inputs")?;
        let mut inputs = Vec::with_capacity(inputs_raw.len());
        for (i, input) in inputs_raw.iter().enumerate() {
            inputs.push(TxInOut::from_json(&json::index(&inputs_path, i), input)?);
        }

        let outputs_path = json::join(&tx_path, "outputs");
        let outputs_raw = json::req_array(obj, &tx_path, "outputs")?;
        let mut outputs = Vec::with_capacity(outputs_raw.len());
        for (i, output) in outputs_raw.iter().enumerate() {
            outputs.push(TxInOut::from_json(&json::index(&outputs_path, i), output)?);
        }

        let status = TxStatus::from_json(
            &json::join(&tx_path, "status"),
            json::get(obj, &tx_path, "status")?,
        )?;

        Ok(Self {
            id,
            amount,
            confirmations,
            creation_time,
            direction,
            inputs,
            outputs,
            status,
            kind,
        })
    }
}

/// Local clock information reported by the node.
#[derive(Debug, Clone)]
pub struct LocalTimeInformation {
    pub difference_from_ntp_server: QuantityUnitBlock,
}

/// Node status snapshot.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    pub sync_progress: QuantityUnitBlock,
    pub blockchain_height: QuantityUnitBlock,
    pub local_blockchain_height: QuantityUnitBlock,
    pub local_time_information: LocalTimeInformation,
    /// Raw per-peer subscription map; must be a non-empty object.
    pub subscription_status: Value,
}

impl FromJson for NodeInfo {
    fn from_json(path: &str, value: &Value) -> Result<Self> {
        let obj = json::as_object(path, value)?;

        let sync_progress = QuantityUnitBlock::from_json(
            &json::join(path, "syncProgress"),
            json::get(obj, path, "syncProgress")?,
        )?;
        let blockchain_height = QuantityUnitBlock::from_json(
            &json::join(path, "blockchainHeight"),
            json::get(obj, path, "blockchainHeight")?,
        )?;
        let local_blockchain_height = QuantityUnitBlock::from_json(
            &json::join(path, "localBlockchainHeight"),
            json::get(obj, path, "localBlockchainHeight")?,
        )?;

        let lti_path = json::join(path, "localTimeInformation");
        let lti = json::req_object(obj, path, "localTimeInformation")?;
        let difference_from_ntp_server = QuantityUnitBlock::from_json(
            &json::join(&lti_path, "differenceFromNtpServer"),
            json::get(lti, &lti_path, "differenceFromNtpServer")?,
        )?;

        let subscription_status = json::req_object(obj, path, "subscriptionStatus")?;
        if subscription_status.is_empty() {
            return Err(Error::missing(json::join(path, "subscriptionStatus")));
        }

        Ok(Self {
            sync_progress,
            blockchain_height,
            local_blockchain_height,
            local_time_information: LocalTimeInformation {
                difference_from_ntp_server,
            },
            subscription_status: Value::Object(subscription_status.clone()),
        })
    }
}
