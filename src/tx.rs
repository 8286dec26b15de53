//! Client-side accumulator for outgoing transfers.

use serde_json::{json, Value};

use crate::amount::LovelaceAmount;
use crate::config::GroupingPolicy;
use crate::error::{Error, Result};
use crate::ids::{Address, PolicyId};
use crate::validate;

/// One native-asset transfer attached to a payee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTransfer {
    pub policy_id: PolicyId,
    /// Hex-encoded asset name.
    pub asset_name: String,
    pub quantity: u64,
}

/// One accumulated output: a destination address with its native amount
/// and any asset transfers.
#[derive(Debug, Clone)]
pub struct TxPayee {
    pub address: Address,
    pub amount: LovelaceAmount,
    pub assets: Vec<AssetTransfer>,
}

/// Accumulates the outputs of an outgoing transaction before submission.
///
/// Outputs are keyed by destination address and kept in first-insertion
/// order. Adding a second native transfer for an address that already has
/// one REPLACES the earlier amount (last write wins) rather than summing;
/// callers wanting accumulation must sum on their side before calling
/// [`RawTransaction::native_transfer`]. Asset transfers behave the same
/// way, keyed by `(address, policy id)`.
///
/// All argument validation happens at the call that introduces the value,
/// never at serialization time.
#[derive(Debug, Default)]
pub struct RawTransaction {
    payees: Vec<TxPayee>,
    grouping_policy: Option<GroupingPolicy>,
}

impl RawTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or replaces) the native-currency transfer for `address`.
    pub fn native_transfer(&mut self, address: &str, amount: LovelaceAmount) -> Result<&mut Self> {
        let address = Address::new(address)
            .map_err(|_| Error::invalid_argument("address", "malformed destination address"))?;
        let payee = self.payee_entry(address);
        payee.amount = amount;
        Ok(self)
    }

    /// Sets (or replaces) the asset transfer for `(address, policy_id)`.
    pub fn asset_transfer(
        &mut self,
        address: &str,
        policy_id: &str,
        asset_name: &str,
        quantity: u64,
    ) -> Result<&mut Self> {
        let address = Address::new(address)
            .map_err(|_| Error::invalid_argument("address", "malformed destination address"))?;
        let policy_id = PolicyId::new(policy_id)
            .map_err(|_| Error::invalid_argument("policy_id", "must be 56 hex characters"))?;
        if !validate::asset_name_hex(asset_name) {
            return Err(Error::invalid_argument(
                "asset_name",
                "must be a hex-encoded string",
            ));
        }

        let payee = self.payee_entry(address);
        match payee.assets.iter_mut().find(|a| a.policy_id == policy_id) {
            Some(existing) => {
                existing.asset_name = asset_name.to_string();
                existing.quantity = quantity;
            }
            None => payee.assets.push(AssetTransfer {
                policy_id,
                asset_name: asset_name.to_string(),
                quantity,
            }),
        }
        Ok(self)
    }

    /// v1 input-selection hint.
    pub fn grouping_policy(&mut self, policy: GroupingPolicy) -> &mut Self {
        self.grouping_policy = Some(policy);
        self
    }

    /// The selected grouping policy, when any.
    pub fn grouping(&self) -> Option<GroupingPolicy> {
        self.grouping_policy
    }

    /// Accumulated outputs in first-insertion order of distinct addresses.
    ///
    /// A payee created only through asset transfers carries a zero native
    /// amount.
    pub fn outputs(&self) -> &[TxPayee] {
        &self.payees
    }

    pub fn is_empty(&self) -> bool {
        self.payees.is_empty()
    }

    /// v1 wire form: `[{address, amount}]` with bare integer Lovelace.
    ///
    /// Fails when any payee carries asset transfers, which the v1 dialect
    /// cannot express.
    pub fn to_v1_destinations(&self) -> Result<Value> {
        for payee in &self.payees {
            if !payee.assets.is_empty() {
                return Err(Error::invalid_argument(
                    "assets",
                    format!(
                        "asset transfers to \"{}\" cannot be carried in a v1 payment",
                        payee.address
                    ),
                ));
            }
        }

        Ok(Value::Array(
            self.payees
                .iter()
                .map(|p| json!({"address": p.address.as_str(), "amount": p.amount.lovelace()}))
                .collect(),
        ))
    }

    /// v2 wire form: `[{address, amount: {quantity, unit}, assets?}]`.
    pub fn to_v2_payments(&self) -> Value {
        Value::Array(
            self.payees
                .iter()
                .map(|p| {
                    let mut payment = json!({
                        "address": p.address.as_str(),
                        "amount": {"quantity": p.amount.lovelace(), "unit": "lovelace"},
                    });
                    if !p.assets.is_empty() {
                        payment["assets"] = Value::Array(
                            p.assets
                                .iter()
                                .map(|a| {
                                    json!({
                                        "policy_id": a.policy_id.as_str(),
                                        "asset_name": a.asset_name,
                                        "quantity": a.quantity,
                                    })
                                })
                                .collect(),
                        );
                    }
                    payment
                })
                .collect(),
        )
    }

    fn payee_entry(&mut self, address: Address) -> &mut TxPayee {
        let idx = match self.payees.iter().position(|p| p.address == address) {
            Some(idx) => idx,
            None => {
                self.payees.push(TxPayee {
                    address,
                    amount: LovelaceAmount::ZERO,
                    assets: Vec::new(),
                });
                self.payees.len() - 1
            }
        };
        &mut self.payees[idx]
    }
}
