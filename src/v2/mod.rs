//! cardano-wallet v2 API surface (`/v2/...`).
//!
//! The v2 dialect has no account axis and no per-handle state beyond the
//! wallet id, so the surface is one method per endpoint rather than a
//! handle registry.

pub mod models;

use std::sync::Arc;

use bip39::Mnemonic;
use serde_json::{json, Value};

use crate::envelope::{expect_no_content_v2, unwrap_v2};
use crate::error::{Error, Result};
use crate::ids::{Hash64, WalletId};
use crate::json::FromJson;
use crate::tx::RawTransaction;
use crate::validate;
use crate::NodeInner;

use models::{
    AddressesList, NetworkInformation, Transaction, TransactionsList, WalletInfo, WalletsList,
};

/// Entry point to the v2 dialect.
pub struct V2Api {
    node: Arc<NodeInner>,
}

impl V2Api {
    pub(crate) fn new(node: Arc<NodeInner>) -> Self {
        Self { node }
    }

    /// Creates (or restores) a wallet from a 15-24 word mnemonic sentence.
    ///
    /// `address_pool_gap` falls back to the node default when `None`.
    pub async fn create_wallet(
        &self,
        name: &str,
        mnemonic: &Mnemonic,
        passphrase: Option<&str>,
        address_pool_gap: Option<u32>,
    ) -> Result<WalletInfo> {
        let name = name.trim();
        if !validate::wallet_name(name) {
            return Err(Error::invalid_argument(
                "name",
                "wallet name must be 3-32 word characters",
            ));
        }

        let words: Vec<&str> = mnemonic.words().collect();
        if !matches!(words.len(), 15 | 18 | 21 | 24) {
            return Err(Error::invalid_argument(
                "mnemonic",
                format!(
                    "v2 wallets require a 15-24 word mnemonic sentence, got {}",
                    words.len()
                ),
            ));
        }

        let mut payload = json!({
            "name": name,
            "mnemonic_sentence": words,
        });
        if let Some(passphrase) = passphrase {
            if !(10..=255).contains(&passphrase.len()) {
                return Err(Error::invalid_argument(
                    "passphrase",
                    "must be 10-255 characters",
                ));
            }
            payload["passphrase"] = json!(passphrase);
        }
        if let Some(gap) = address_pool_gap {
            payload["address_pool_gap"] = json!(gap);
        }

        let res = self.node.transport.post("/v2/wallets", Some(&payload)).await?;
        let body = unwrap_v2(&res)?;
        WalletInfo::from_json("wallet", &body)
    }

    /// Lists all wallets known to the node.
    pub async fn wallets(&self) -> Result<WalletsList> {
        let res = self.node.transport.get("/v2/wallets", None).await?;
        let body = unwrap_v2(&res)?;
        WalletsList::from_json("wallets", &body, None)
    }

    /// Fetches one wallet.
    pub async fn wallet(&self, wallet_id: &str) -> Result<WalletInfo> {
        let id = WalletId::new(wallet_id)?;
        let res = self
            .node
            .transport
            .get(&format!("/v2/wallets/{}", id), None)
            .await?;
        let body = unwrap_v2(&res)?;
        WalletInfo::from_json("wallet", &body)
    }

    /// Deletes a wallet; the node answers 204 with no body.
    pub async fn delete_wallet(&self, wallet_id: &str) -> Result<()> {
        let id = WalletId::new(wallet_id)?;
        let res = self
            .node
            .transport
            .delete(&format!("/v2/wallets/{}", id), None)
            .await?;
        expect_no_content_v2(&res)
    }

    /// Renames a wallet.
    pub async fn rename_wallet(&self, wallet_id: &str, name: &str) -> Result<WalletInfo> {
        let id = WalletId::new(wallet_id)?;
        if !validate::wallet_name(name) {
            return Err(Error::invalid_argument(
                "name",
                "wallet name must be 3-32 word characters",
            ));
        }

        let payload = json!({"name": name});
        let res = self
            .node
            .transport
            .put(&format!("/v2/wallets/{}", id), Some(&payload))
            .await?;
        let body = unwrap_v2(&res)?;
        WalletInfo::from_json("wallet", &body)
    }

    /// Changes a wallet's passphrase; the node answers 204 with no body.
    pub async fn change_passphrase(
        &self,
        wallet_id: &str,
        old_passphrase: &str,
        new_passphrase: &str,
    ) -> Result<()> {
        let id = WalletId::new(wallet_id)?;
        if !(10..=255).contains(&new_passphrase.len()) {
            return Err(Error::invalid_argument(
                "new_passphrase",
                "must be 10-255 characters",
            ));
        }

        let payload = json!({
            "old_passphrase": old_passphrase,
            "new_passphrase": new_passphrase,
        });
        let res = self
            .node
            .transport
            .put(&format!("/v2/wallets/{}/passphrase", id), Some(&payload))
            .await?;
        expect_no_content_v2(&res)
    }

    /// Lists a wallet's addresses.
    pub async fn addresses(&self, wallet_id: &str) -> Result<AddressesList> {
        let id = WalletId::new(wallet_id)?;
        let res = self
            .node
            .transport
            .get(&format!("/v2/wallets/{}/addresses", id), None)
            .await?;
        let body = unwrap_v2(&res)?;
        AddressesList::from_json("addresses", &body, None)
    }

    /// Inspects one address; the payload shape varies with the node
    /// version, so the raw body is returned.
    pub async fn address(&self, address: &str) -> Result<Value> {
        if !validate::address(address) {
            return Err(Error::invalid_argument("address", "malformed address"));
        }
        let res = self
            .node
            .transport
            .get(&format!("/v2/addresses/{}", address), None)
            .await?;
        unwrap_v2(&res)
    }

    /// Fetches a wallet's transaction history.
    pub async fn transactions(&self, wallet_id: &str) -> Result<TransactionsList> {
        let id = WalletId::new(wallet_id)?;
        let res = self
            .node
            .transport
            .get(&format!("/v2/wallets/{}/transactions", id), None)
            .await?;
        let body = unwrap_v2(&res)?;
        TransactionsList::from_json("transactions", &body, None)
    }

    /// Fetches one transaction of a wallet.
    pub async fn transaction(&self, wallet_id: &str, tx_id: &str) -> Result<Transaction> {
        let id = WalletId::new(wallet_id)?;
        let tx_id = Hash64::new(tx_id)?;
        let res = self
            .node
            .transport
            .get(&format!("/v2/wallets/{}/transactions/{}", id, tx_id), None)
            .await?;
        let body = unwrap_v2(&res)?;
        Transaction::from_json("transaction", &body)
    }

    /// Submits the accumulated transfers, unlocking with `passphrase`.
    pub async fn submit_transaction(
        &self,
        wallet_id: &str,
        passphrase: &str,
        tx: &RawTransaction,
    ) -> Result<Transaction> {
        let id = WalletId::new(wallet_id)?;
        if tx.is_empty() {
            return Err(Error::invalid_argument(
                "transaction",
                "no outputs accumulated",
            ));
        }

        let payload = json!({
            "passphrase": passphrase,
            "payments": tx.to_v2_payments(),
        });
        let res = self
            .node
            .transport
            .post(&format!("/v2/wallets/{}/transactions", id), Some(&payload))
            .await?;
        let body = unwrap_v2(&res)?;
        Transaction::from_json("transaction", &body)
    }

    /// Fetches the node's network status.
    pub async fn network_information(&self) -> Result<NetworkInformation> {
        let res = self
            .node
            .transport
            .get("/v2/network/information", None)
            .await?;
        let body = unwrap_v2(&res)?;
        NetworkInformation::from_json("networkInformation", &body)
    }
}
