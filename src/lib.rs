//! # WalletD Cardano Node
//!
//! Typed client for a Cardano wallet node's REST API.
//!
//! ## Features
//!
//! - Both wire dialects behind explicit selectors: the legacy Cardano-SL
//!   v1 API (`/api/v1/...`) and the cardano-wallet v2 API (`/v2/...`)
//! - Strict response validation: every payload is parsed into typed
//!   records, and a missing or malformed field fails with its exact path
//! - Exact Lovelace/ADA conversion with integer arithmetic only
//! - Wallet lifecycle, accounts, addresses, transaction history and
//!   submission, node/network status
//!
//! ## Example
//!
//! ```rust,no_run
//! use walletd_cardano_node::{Cardano, LovelaceAmount, RawTransaction};
//!
//! #[tokio::main]
//! async fn main() -> walletd_cardano_node::Result<()> {
//!     let cardano = Cardano::new("localhost", 8090)?;
//!
//!     let node_info = cardano.v1().node_info().await?;
//!     println!("chain height: {}", node_info.blockchain_height.quantity);
//!
//!     let wallet = cardano.v1().wallets().wallet("Ae2tdPwUPEZ8uEsGhfB6")?;
//!     let mut wallet = wallet.lock().await;
//!     wallet.spending_password("your-passphrase", true)?;
//!
//!     let mut tx = RawTransaction::new();
//!     let payee = "Ae2tdPwUPEZFRbyhz3cpfC2CumGzNkFBN2L42rcUc2yjQpEkxDbkPodpMAi";
//!     tx.native_transfer(payee, LovelaceAmount::from_ada("1.5")?)?;
//!     let submitted = wallet.pay(2_147_483_648, &tx).await?;
//!     println!("submitted {}", submitted.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Note on the two dialects
//!
//! The v1 and v2 dialects are modeled separately on purpose. A v1
//! response without its `meta.pagination` block is malformed, while the
//! same absence is normal for v2; amounts are bare Lovelace integers in
//! v1 but `{quantity, unit}` blocks in v2. Nothing in this crate guesses
//! the dialect from payload shape.

use std::fmt;
use std::sync::Arc;

pub mod amount;
pub mod config;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod list;
pub mod transport;
pub mod tx;
pub mod v1;
pub mod v2;
pub mod validate;
pub mod wire;

mod json;

pub use amount::LovelaceAmount;
pub use config::{
    AssuranceLevel, GroupingPolicy, LOVELACE_PER_ADA, MAX_ACCOUNT_INDEX, MAX_LOVELACE,
    MIN_ACCOUNT_INDEX, SCALE,
};
pub use envelope::Pagination;
pub use error::{Error, Result};
pub use ids::{AccountIndex, Address, Hash64, PolicyId, WalletId};
pub use list::PagedList;
pub use transport::{HttpResponse, HttpTransport, Method, NodeTransport, TlsConfig};
pub use tx::RawTransaction;
pub use wire::{QuantityUnitBlock, TxDirection};

pub(crate) struct NodeInner {
    pub(crate) transport: Arc<dyn HttpTransport>,
    pub(crate) host: String,
    pub(crate) port: u16,
}

/// Handle to one Cardano wallet node.
pub struct Cardano {
    inner: Arc<NodeInner>,
    v1: v1::V1Api,
    v2: v2::V2Api,
}

impl Cardano {
    /// Connects to `host:port` over plain HTTP.
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let transport = NodeTransport::new(host, port)?;
        Ok(Self::with_transport(host, port, Arc::new(transport)))
    }

    /// Connects to `host:port` over HTTPS with the given TLS settings.
    pub fn with_tls(host: &str, port: u16, tls: TlsConfig) -> Result<Self> {
        let transport = NodeTransport::with_tls(host, port, Some(tls))?;
        Ok(Self::with_transport(host, port, Arc::new(transport)))
    }

    /// Uses a caller-provided transport (tests, instrumentation).
    pub fn with_transport(host: &str, port: u16, transport: Arc<dyn HttpTransport>) -> Self {
        let inner = Arc::new(NodeInner {
            transport,
            host: host.to_string(),
            port,
        });
        Self {
            v1: v1::V1Api::new(inner.clone()),
            v2: v2::V2Api::new(inner.clone()),
            inner,
        }
    }

    pub fn host(&self) -> &str {
        &self.inner.host
    }

    pub fn port(&self) -> u16 {
        self.inner.port
    }

    /// The legacy Cardano-SL v1 API.
    pub fn v1(&self) -> &v1::V1Api {
        &self.v1
    }

    /// The cardano-wallet v2 API.
    pub fn v2(&self) -> &v2::V2Api {
        &self.v2
    }
}

impl fmt::Debug for Cardano {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cardano node \"{}\"", self.inner.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale() {
        assert_eq!(SCALE, 6);
        assert_eq!(LOVELACE_PER_ADA, 1_000_000);
    }

    #[test]
    fn test_max_lovelace_is_45_billion_ada() {
        assert_eq!(MAX_LOVELACE, 45_000_000_000 * LOVELACE_PER_ADA);
    }

    #[test]
    fn test_node_handle() {
        let cardano = Cardano::new("localhost", 8090).unwrap();
        assert_eq!(cardano.host(), "localhost");
        assert_eq!(cardano.port(), 8090);
        assert_eq!(format!("{:?}", cardano), "Cardano node \"localhost\"");
    }
}
