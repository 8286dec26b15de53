//! Legacy Cardano-SL v1 API surface (`/api/v1/...`).

pub mod models;

use std::collections::HashMap;
use std::sync::Arc;

use bip39::Mnemonic;
use dashmap::DashMap;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::config::AssuranceLevel;
use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::ids::{AccountIndex, Hash64, WalletId};
use crate::json::FromJson;
use crate::tx::RawTransaction;
use crate::validate;
use crate::NodeInner;

use models::{
    AccountInfo, AccountsList, AddressInfo, AddressesList, NodeInfo, Transaction,
    TransactionsList, WalletInfo, WalletsList,
};

fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Optional filters for the v1 transaction history endpoint.
#[derive(Debug, Clone, Default)]
pub struct TxQuery {
    /// Filter by transaction id.
    pub id: Option<String>,
    /// Filter by creation time.
    pub created_at: Option<String>,
    /// Server-side sort expression.
    pub sort_by: Option<String>,
}

/// Entry point to the v1 dialect.
pub struct V1Api {
    node: Arc<NodeInner>,
    wallets: Wallets,
}

impl V1Api {
    pub(crate) fn new(node: Arc<NodeInner>) -> Self {
        Self {
            wallets: Wallets::new(node.clone()),
            node,
        }
    }

    /// The wallets hub, with its handle registry.
    pub fn wallets(&self) -> &Wallets {
        &self.wallets
    }

    /// Lists addresses known to the node.
    pub async fn addresses(&self, page: u64, per_page: u64) -> Result<AddressesList> {
        let payload = json!({"page": page, "per_page": per_page});
        let res = self
            .node
            .transport
            .get("/api/v1/addresses", Some(&payload))
            .await?;
        let env = Envelope::parse(&res)?;
        AddressesList::from_json("addressesList", env.data(), Some(env.pagination()))
    }

    /// Fetches ownership information for one address.
    pub async fn address_info(&self, address: &str) -> Result<AddressInfo> {
        if !validate::address(address) {
            return Err(Error::invalid_argument("address", "malformed address"));
        }
        let res = self
            .node
            .transport
            .get(&format!("/api/v1/addresses/{}", address), None)
            .await?;
        let env = Envelope::parse(&res)?;
        AddressInfo::from_json("addressInfo", env.data())
    }

    /// Fetches the node status snapshot.
    pub async fn node_info(&self) -> Result<NodeInfo> {
        let res = self.node.transport.get("/api/v1/node-info", None).await?;
        let env = Envelope::parse(&res)?;
        NodeInfo::from_json("nodeInfo", env.data())
    }
}

/// Wallet operations plus an explicit handle registry.
///
/// Handles are cached by wallet id so that per-handle state (the cached
/// info snapshot, the spending password, the deleted flag) survives
/// repeated lookups; [`Wallets::evict`] drops a cached handle.
pub struct Wallets {
    node: Arc<NodeInner>,
    instances: DashMap<String, Arc<Mutex<Wallet>>>,
}

impl Wallets {
    fn new(node: Arc<NodeInner>) -> Self {
        Self {
            node,
            instances: DashMap::new(),
        }
    }

    /// Get-or-create the cached handle for `wallet_id`.
    pub fn wallet(&self, wallet_id: &str) -> Result<Arc<Mutex<Wallet>>> {
        let id = WalletId::new(wallet_id)?;
        if let Some(existing) = self.instances.get(id.as_str()) {
            return Ok(existing.value().clone());
        }
        let handle = Arc::new(Mutex::new(Wallet::new(self.node.clone(), id.clone())));
        self.instances.insert(id.as_str().to_string(), handle.clone());
        Ok(handle)
    }

    /// Drops any cached handle for `wallet_id`.
    pub fn evict(&self, wallet_id: &str) {
        self.instances.remove(wallet_id);
    }

    /// Replaces any cached handle with a fresh one.
    pub fn refresh(&self, wallet_id: &str) -> Result<Arc<Mutex<Wallet>>> {
        self.evict(wallet_id);
        self.wallet(wallet_id)
    }

    /// Lists wallets known to the node.
    pub async fn list(&self, page: u64, per_page: u64) -> Result<WalletsList> {
        let payload = json!({"page": page, "per_page": per_page});
        let res = self
            .node
            .transport
            .get("/api/v1/wallets", Some(&payload))
            .await?;
        let env = Envelope::parse(&res)?;
        WalletsList::from_json("walletsList", env.data(), Some(env.pagination()))
    }

    /// Creates a brand-new wallet from a 12-word mnemonic sentence.
    pub async fn create(
        &self,
        name: &str,
        mnemonic: &Mnemonic,
        password: Option<&str>,
        assurance_level: AssuranceLevel,
    ) -> Result<Arc<Mutex<Wallet>>> {
        self.create_or_restore("create", name, mnemonic, password, assurance_level)
            .await
    }

    /// Restores an existing wallet from its 12-word mnemonic sentence.
    pub async fn restore(
        &self,
        name: &str,
        mnemonic: &Mnemonic,
        password: Option<&str>,
        assurance_level: AssuranceLevel,
    ) -> Result<Arc<Mutex<Wallet>>> {
        self.create_or_restore("restore", name, mnemonic, password, assurance_level)
            .await
    }

    async fn create_or_restore(
        &self,
        operation: &str,
        name: &str,
        mnemonic: &Mnemonic,
        password: Option<&str>,
        assurance_level: AssuranceLevel,
    ) -> Result<Arc<Mutex<Wallet>>> {
        let name = name.trim();
        if !validate::wallet_name(name) {
            return Err(Error::invalid_argument(
                "name",
                "wallet name must be 3-32 word characters",
            ));
        }

        let words: Vec<&str> = mnemonic.words().collect();
        if words.len() != 12 {
            return Err(Error::invalid_argument(
                "mnemonic",
                format!("v1 wallets require exactly 12 mnemonic words, got {}", words.len()),
            ));
        }

        let mut payload = json!({
            "assuranceLevel": assurance_level.as_str(),
            "backupPhrase": words,
            "name": name,
            "operation": operation,
        });

        if let Some(password) = password {
            let encoded = hex::encode(password.as_bytes());
            if !validate::base16_password(&encoded) {
                return Err(Error::invalid_argument(
                    "password",
                    "hex-encoded spending password must be 16-64 hexits",
                ));
            }
            payload["spendingPassword"] = Value::String(encoded);
        }

        let res = self
            .node
            .transport
            .post("/api/v1/wallets", Some(&payload))
            .await?;
        let env = Envelope::parse(&res)?;
        let info = WalletInfo::from_json("walletInfo", env.data())?;

        let wallet = Wallet::with_info(self.node.clone(), info);
        let id = wallet.id.as_str().to_string();
        let handle = Arc::new(Mutex::new(wallet));
        self.instances.insert(id, handle.clone());
        Ok(handle)
    }
}

/// Handle to one server-side wallet.
///
/// The handle caches the last fetched [`WalletInfo`] snapshot and refreshes
/// it on demand; once [`Wallet::delete`] succeeds, every further operation
/// fails with [`Error::WalletDeleted`].
pub struct Wallet {
    node: Arc<NodeInner>,
    id: WalletId,
    info: Option<WalletInfo>,
    spending_password: Option<Hash64>,
    accounts: HashMap<u32, Account>,
    deleted: bool,
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("id", &self.id)
            .field("info", &self.info)
            .field("accounts", &self.accounts)
            .field("deleted", &self.deleted)
            .finish()
    }
}

impl Wallet {
    fn new(node: Arc<NodeInner>, id: WalletId) -> Self {
        Self {
            node,
            id,
            info: None,
            spending_password: None,
            accounts: HashMap::new(),
            deleted: false,
        }
    }

    fn with_info(node: Arc<NodeInner>, info: WalletInfo) -> Self {
        let mut wallet = Self::new(node, info.id.clone());
        wallet.info = Some(info);
        wallet
    }

    pub fn id(&self) -> &WalletId {
        &self.id
    }

    pub fn has_info_loaded(&self) -> bool {
        self.info.is_some()
    }

    fn ensure_not_deleted(&self) -> Result<()> {
        if self.deleted {
            Err(Error::WalletDeleted(self.id.as_str().to_string()))
        } else {
            Ok(())
        }
    }

    /// The wallet's server-side state, fetched on first use and cached.
    pub async fn info(&mut self, force_reload: bool) -> Result<WalletInfo> {
        self.ensure_not_deleted()?;

        if force_reload || self.info.is_none() {
            let res = self
                .node
                .transport
                .get(&format!("/api/v1/wallets/{}", self.id), None)
                .await?;
            let env = Envelope::parse(&res)?;
            self.info = Some(WalletInfo::from_json("walletInfo", env.data())?);
        }

        self.info
            .clone()
            .ok_or_else(|| Error::Other(anyhow::anyhow!("wallet info unavailable")))
    }

    /// Updates the wallet's assurance level and name.
    pub async fn update(
        &mut self,
        assurance_level: AssuranceLevel,
        name: &str,
    ) -> Result<WalletInfo> {
        self.ensure_not_deleted()?;

        if !validate::wallet_name(name) {
            return Err(Error::invalid_argument(
                "name",
                "wallet name must be 3-32 word characters",
            ));
        }

        let payload = json!({
            "assuranceLevel": assurance_level.as_str(),
            "name": name,
        });
        let res = self
            .node
            .transport
            .put(&format!("/api/v1/wallets/{}", self.id), Some(&payload))
            .await?;
        let env = Envelope::parse(&res)?;
        let info = WalletInfo::from_json("walletInfo", env.data())?;
        self.info = Some(info.clone());
        Ok(info)
    }

    /// Deletes the wallet server-side and marks this handle dead.
    pub async fn delete(&mut self) -> Result<()> {
        self.ensure_not_deleted()?;

        let res = self
            .node
            .transport
            .delete(&format!("/api/v1/wallets/{}", self.id), None)
            .await?;
        Envelope::expect_no_content(&res)?;
        self.deleted = true;
        Ok(())
    }

    /// Changes the wallet's spending password.
    ///
    /// Passwords are sha256-hashed to the wire form unless `hash_passwords`
    /// is false, in which case both values must already be 64 hexits. A
    /// wallet without a password uses the empty string as its old value.
    pub async fn change_password(
        &mut self,
        new_password: &str,
        old_password: Option<&str>,
        hash_passwords: bool,
    ) -> Result<WalletInfo> {
        self.ensure_not_deleted()?;

        let new = if hash_passwords {
            sha256_hex(new_password)
        } else {
            new_password.to_string()
        };
        if !validate::hash64(&new) {
            return Err(Error::invalid_argument(
                "new_password",
                "must be a 32 byte hexadecimal string (64 hexits)",
            ));
        }

        let old = match old_password {
            None => String::new(),
            Some(old_password) => {
                let old = if hash_passwords {
                    sha256_hex(old_password)
                } else {
                    old_password.to_string()
                };
                if !validate::hash64(&old) {
                    return Err(Error::invalid_argument(
                        "old_password",
                        "must be a 32 byte hexadecimal string (64 hexits)",
                    ));
                }
                old
            }
        };

        let payload = json!({"new": new, "old": old});
        let res = self
            .node
            .transport
            .put(&format!("/api/v1/wallets/{}/password", self.id), Some(&payload))
            .await?;
        let env = Envelope::parse(&res)?;
        let info = WalletInfo::from_json("walletInfo", env.data())?;
        self.info = Some(info.clone());
        Ok(info)
    }

    /// Arms this handle with the spending password used by payment and
    /// address-creation calls.
    pub fn spending_password(&mut self, password: &str, hash_password: bool) -> Result<&mut Self> {
        self.ensure_not_deleted()?;

        let encoded = if hash_password {
            sha256_hex(password)
        } else {
            password.to_string()
        };
        let hash = Hash64::new(encoded).map_err(|_| {
            Error::invalid_argument(
                "spending_password",
                "must be a 32 byte hexadecimal string (64 hexits)",
            )
        })?;
        self.spending_password = Some(hash);
        Ok(self)
    }

    /// Lists the wallet's accounts.
    pub async fn accounts(&self, page: u64, per_page: u64) -> Result<AccountsList> {
        self.ensure_not_deleted()?;

        let payload = json!({"page": page, "per_page": per_page});
        let res = self
            .node
            .transport
            .get(&format!("/api/v1/wallets/{}/accounts", self.id), Some(&payload))
            .await?;
        let env = Envelope::parse(&res)?;
        AccountsList::from_json("accountsList", env.data(), Some(env.pagination()))
    }

    /// Get-or-create the handle for one account of this wallet.
    pub fn account(&mut self, index: u32) -> Result<&mut Account> {
        self.ensure_not_deleted()?;
        let index = AccountIndex::new(index)?;

        Ok(self
            .accounts
            .entry(index.value())
            .or_insert_with(|| Account::new(self.node.clone(), self.id.clone(), index)))
    }

    /// Drops any cached handle for `index`.
    pub fn evict_account(&mut self, index: u32) {
        self.accounts.remove(&index);
    }

    /// Creates a new account in this wallet.
    pub async fn create_account(&mut self, name: &str) -> Result<AccountInfo> {
        self.ensure_not_deleted()?;

        if !validate::account_name(name) {
            return Err(Error::invalid_argument(
                "name",
                "account name must be 1-32 word characters",
            ));
        }

        let mut payload = json!({"name": name});
        if let Some(password) = &self.spending_password {
            payload["spendingPassword"] = json!(password.as_str());
        }

        let res = self
            .node
            .transport
            .post(&format!("/api/v1/wallets/{}/accounts", self.id), Some(&payload))
            .await?;
        let env = Envelope::parse(&res)?;
        AccountInfo::from_json("accountInfo", env.data())
    }

    /// Deletes one account and drops its cached handle.
    pub async fn delete_account(&mut self, index: u32) -> Result<()> {
        self.ensure_not_deleted()?;
        let index = AccountIndex::new(index)?;

        let res = self
            .node
            .transport
            .delete(
                &format!("/api/v1/wallets/{}/accounts/{}", self.id, index),
                None,
            )
            .await?;
        Envelope::expect_no_content(&res)?;
        self.accounts.remove(&index.value());
        Ok(())
    }

    /// Creates a new receive address under one account.
    ///
    /// When the cached wallet info says a spending password is set, the
    /// handle must have been armed with [`Wallet::spending_password`]
    /// first.
    pub async fn create_address(&mut self, account_index: u32) -> Result<AddressInfo> {
        self.ensure_not_deleted()?;
        let account_index = AccountIndex::new(account_index)?;

        if let Some(info) = &self.info {
            if info.has_spending_password && self.spending_password.is_none() {
                return Err(Error::invalid_argument(
                    "spending_password",
                    "wallet has a spending password but none is set on this handle",
                ));
            }
        }

        let mut payload = json!({
            "accountIndex": account_index.value(),
            "walletId": self.id.as_str(),
        });
        if let Some(password) = &self.spending_password {
            payload["spendingPassword"] = json!(password.as_str());
        }

        let res = self
            .node
            .transport
            .post("/api/v1/addresses", Some(&payload))
            .await?;
        let env = Envelope::parse(&res)?;
        AddressInfo::from_json("addressInfo", env.data())
    }

    /// Fetches the wallet's transaction history.
    pub async fn transactions(
        &self,
        page: u64,
        per_page: u64,
        query: &TxQuery,
    ) -> Result<TransactionsList> {
        self.ensure_not_deleted()?;

        let mut payload = json!({
            "wallet_id": self.id.as_str(),
            "page": page,
            "per_page": per_page,
        });
        if let Some(id) = &query.id {
            payload["id"] = json!(id);
        }
        if let Some(created_at) = &query.created_at {
            payload["created_at"] = json!(created_at);
        }
        if let Some(sort_by) = &query.sort_by {
            payload["sort_by"] = json!(sort_by);
        }

        let res = self
            .node
            .transport
            .get("/api/v1/transactions", Some(&payload))
            .await?;
        let env = Envelope::parse(&res)?;
        TransactionsList::from_json("transactionsList", env.data(), Some(env.pagination()))
    }

    /// Submits the accumulated transfers from one account of this wallet.
    pub async fn pay(
        &mut self,
        account_index: u32,
        tx: &RawTransaction,
    ) -> Result<Transaction> {
        self.ensure_not_deleted()?;
        let account_index = AccountIndex::new(account_index)?;

        if tx.is_empty() {
            return Err(Error::invalid_argument(
                "transaction",
                "no outputs accumulated",
            ));
        }

        let mut payload = json!({
            "destinations": tx.to_v1_destinations()?,
            "source": {
                "accountIndex": account_index.value(),
                "walletId": self.id.as_str(),
            },
        });
        if let Some(policy) = tx.grouping() {
            payload["groupingPolicy"] = json!(policy.as_str());
        }
        if let Some(password) = &self.spending_password {
            payload["spendingPassword"] = json!(password.as_str());
        }

        let res = self
            .node
            .transport
            .post("/api/v1/transactions", Some(&payload))
            .await?;
        let env = Envelope::parse(&res)?;
        Transaction::from_json("transaction", env.data())
    }
}

/// Handle to one account of a wallet.
pub struct Account {
    node: Arc<NodeInner>,
    wallet_id: WalletId,
    index: AccountIndex,
    info: Option<AccountInfo>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("wallet_id", &self.wallet_id)
            .field("index", &self.index)
            .field("info", &self.info)
            .finish()
    }
}

impl Account {
    fn new(node: Arc<NodeInner>, wallet_id: WalletId, index: AccountIndex) -> Self {
        Self {
            node,
            wallet_id,
            index,
            info: None,
        }
    }

    pub fn index(&self) -> AccountIndex {
        self.index
    }

    pub fn wallet_id(&self) -> &WalletId {
        &self.wallet_id
    }

    /// The account's server-side state, fetched on first use and cached.
    ///
    /// The embedded address list carries the endpoint's pagination block.
    pub async fn info(&mut self, force_reload: bool) -> Result<AccountInfo> {
        if force_reload || self.info.is_none() {
            let res = self
                .node
                .transport
                .get(
                    &format!("/api/v1/wallets/{}/accounts/{}", self.wallet_id, self.index),
                    None,
                )
                .await?;
            let env = Envelope::parse(&res)?;
            self.info = Some(AccountInfo::parse(
                "accountInfo",
                env.data(),
                Some(env.pagination()),
            )?);
        }

        self.info
            .clone()
            .ok_or_else(|| Error::Other(anyhow::anyhow!("account info unavailable")))
    }

    /// Renames the account.
    pub async fn rename(&mut self, name: &str) -> Result<AccountInfo> {
        if !validate::account_name(name) {
            return Err(Error::invalid_argument(
                "name",
                "account name must be 1-32 word characters",
            ));
        }

        let payload = json!({"name": name});
        let res = self
            .node
            .transport
            .put(
                &format!("/api/v1/wallets/{}/accounts/{}", self.wallet_id, self.index),
                Some(&payload),
            )
            .await?;
        let env = Envelope::parse(&res)?;
        let info = AccountInfo::parse("accountInfo", env.data(), Some(env.pagination()))?;
        self.info = Some(info.clone());
        Ok(info)
    }
}
