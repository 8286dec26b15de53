//! Shared test plumbing: an in-memory transport serving canned responses.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use walletd_cardano_node::{Cardano, Error, HttpResponse, HttpTransport, Method, Result};

/// One request as the client issued it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub endpoint: String,
    pub payload: Option<Value>,
}

/// Transport double: pops queued responses and records every call.
pub struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn push(&self, http_code: u16, payload: Value) {
        self.responses.lock().unwrap().push_back(HttpResponse {
            http_code,
            payload,
            headers: None,
            raw_body: None,
        });
    }

    pub fn push_empty(&self, http_code: u16) {
        self.push(http_code, Value::Null);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no calls recorded")
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn call(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
    ) -> Result<HttpResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            endpoint: endpoint.to_string(),
            payload: payload.cloned(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Transport("no response queued for request".to_string()))
    }
}

/// A node handle wired to a fresh mock transport.
pub fn mock_node() -> (Cardano, Arc<MockTransport>) {
    let transport = MockTransport::new();
    let cardano = Cardano::with_transport("localhost", 8090, transport.clone());
    (cardano, transport)
}

/// Wraps `data` in a successful v1 envelope with a pagination block.
pub fn v1_ok(data: Value) -> Value {
    v1_ok_paged(data, 1, 1, 10, 1)
}

pub fn v1_ok_paged(data: Value, total_pages: u64, page: u64, per_page: u64, total_entries: u64) -> Value {
    json!({
        "status": "success",
        "data": data,
        "meta": {
            "pagination": {
                "totalPages": total_pages,
                "page": page,
                "perPage": per_page,
                "totalEntries": total_entries
            }
        }
    })
}

pub const WALLET_ID: &str = "Ae2tdPwUPEZ8uEsGhfB6";
pub const ADDR_A: &str = "Ae2tdPwUPEZFRbyhz3cpfC2CumGzNkFBN2L42rcUc2yjQpEkxDbkPodpMAi";
pub const ADDR_B: &str = "Ae2tdPwUPEZCanmBz5g2GEwFqKTKpNJcGYPKfDxoNeKZ8bRHr8366kseiK2";
pub const ACCOUNT_INDEX: u32 = 2_147_483_648;

/// A complete, valid v1 wallet record.
pub fn v1_wallet(id: &str) -> Value {
    json!({
        "id": id,
        "assuranceLevel": "normal",
        "balance": 1_500_000,
        "createdAt": "2019-03-12T11:32:04.000Z",
        "hasSpendingPassword": true,
        "name": "Main wallet",
        "spendingPasswordLastUpdate": "2019-03-12T11:32:04.000Z",
        "syncState": {"tag": "synced"},
        "type": "regular"
    })
}

/// A complete, valid v2 wallet record.
pub fn v2_wallet(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Shared wallet",
        "address_pool_gap": 20,
        "balance": {
            "available": {"quantity": 500_000, "unit": "lovelace"},
            "reward": {"quantity": 0, "unit": "lovelace"},
            "total": {"quantity": 500_000, "unit": "lovelace"}
        },
        "assets": {"available": [], "total": []},
        "state": {"status": "ready"},
        "passphrase": {"last_updated_at": "2021-06-11T09:10:20Z"}
    })
}
