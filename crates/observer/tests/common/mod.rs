// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared helpers for the observer integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use balance_observer::client::{ClientError, EvmClient, StorageKey, StorageStream, SubstrateClient};
use balance_observer::{BalanceItem, BalanceSink};
use futures::StreamExt;
use futures::channel::mpsc::{UnboundedSender, unbounded};
use primitive_types::U256;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
pub const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";
pub const EVM_ALICE: &str = "0xd43593c715fdd31c61141abd04a99fd6822c8558";
pub const EVM_BOB: &str = "0x8eaf04151687736326c9fea17e25fc5287613693";

type Update = Result<Vec<Option<Vec<u8>>>, ClientError>;

/// Substrate client serving a fixed storage snapshot. Every subscription
/// receives that snapshot once and then stays open.
#[derive(Default)]
pub struct FakeSubstrate {
    storage: Mutex<HashMap<String, Vec<u8>>>,
    failing: Mutex<Vec<String>>,
    open: Mutex<Vec<UnboundedSender<Update>>>,
    subscriptions: Mutex<usize>,
}

impl FakeSubstrate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, key: &str, value: Vec<u8>) {
        self.storage.lock().unwrap().insert(key.to_string(), value);
    }

    /// Subscriptions over any key containing `pattern` fail.
    pub fn fail(&self, pattern: &str) {
        self.failing.lock().unwrap().push(pattern.to_string());
    }

    pub fn subscriptions(&self) -> usize {
        *self.subscriptions.lock().unwrap()
    }

    pub fn open_subscriptions(&self) -> usize {
        let mut open = self.open.lock().unwrap();
        open.retain(|tx| !tx.is_closed());
        open.len()
    }
}

#[async_trait]
impl SubstrateClient for FakeSubstrate {
    async fn wait_ready(&self) -> Result<(), ClientError> {
        Ok(())
    }

    async fn has_storage(&self, _pallet: &str, _entry: &str) -> bool {
        false
    }

    async fn subscribe_storage(&self, keys: Vec<StorageKey>) -> Result<StorageStream, ClientError> {
        *self.subscriptions.lock().unwrap() += 1;
        let keys: Vec<String> = keys.iter().map(ToString::to_string).collect();

        let failing = self.failing.lock().unwrap();
        if let Some(key) = keys.iter().find(|k| failing.iter().any(|p| k.contains(p.as_str()))) {
            return Err(ClientError::StorageUnavailable(key.clone()));
        }

        let storage = self.storage.lock().unwrap();
        let snapshot: Vec<Option<Vec<u8>>> = keys.iter().map(|k| storage.get(k).cloned()).collect();
        let (tx, rx) = unbounded::<Update>();
        let _ = tx.unbounded_send(Ok(snapshot));
        self.open.lock().unwrap().push(tx);
        Ok(rx.boxed())
    }

    async fn contract_call(&self, contract: &str, _caller: &str, _input: Vec<u8>) -> Result<Vec<u8>, ClientError> {
        Err(ClientError::Contract(format!("no contract at {contract}")))
    }

    async fn calculate_reply(&self, program: &str, _origin: &str, _payload: Vec<u8>) -> Result<Vec<u8>, ClientError> {
        Err(ClientError::Contract(format!("no program at {program}")))
    }
}

/// EVM client with canned `eth_getBalance` and `eth_call` results.
#[derive(Default)]
pub struct FakeEvm {
    balances: Mutex<HashMap<String, U256>>,
    calls: Mutex<HashMap<(String, Vec<u8>), Vec<u8>>>,
    requests: Mutex<usize>,
}

impl FakeEvm {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_balance(&self, address: &str, balance: u128) {
        self.balances.lock().unwrap().insert(address.to_string(), U256::from(balance));
    }

    pub fn set_call(&self, to: &str, data: Vec<u8>, reply: Vec<u8>) {
        self.calls.lock().unwrap().insert((to.to_string(), data), reply);
    }

    pub fn requests(&self) -> usize {
        *self.requests.lock().unwrap()
    }
}

#[async_trait]
impl EvmClient for FakeEvm {
    async fn wait_ready(&self) -> Result<(), ClientError> {
        Ok(())
    }

    async fn balance(&self, address: &str) -> Result<U256, ClientError> {
        *self.requests.lock().unwrap() += 1;
        self.balances
            .lock()
            .unwrap()
            .get(address)
            .copied()
            .ok_or_else(|| ClientError::Rpc(format!("unknown account {address}")))
    }

    async fn call(&self, to: &str, data: Vec<u8>) -> Result<Vec<u8>, ClientError> {
        *self.requests.lock().unwrap() += 1;
        self.calls
            .lock()
            .unwrap()
            .get(&(to.to_string(), data))
            .cloned()
            .ok_or_else(|| ClientError::Rpc("execution reverted".to_string()))
    }
}

/// Sink recording every delivered batch.
#[derive(Clone, Default)]
pub struct Recorder {
    batches: Arc<Mutex<Vec<Vec<BalanceItem>>>>,
}

impl Recorder {
    pub fn sink(&self) -> BalanceSink {
        let batches = self.batches.clone();
        Arc::new(move |items| batches.lock().unwrap().push(items))
    }

    pub fn batches(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    pub fn items(&self) -> Vec<BalanceItem> {
        self.batches.lock().unwrap().iter().flatten().cloned().collect()
    }

    pub fn latest(&self, address: &str, token: &str) -> Option<BalanceItem> {
        self.items()
            .into_iter()
            .rev()
            .find(|item| item.address == address && item.token_slug == token)
    }
}

pub fn abi_word(value: u128) -> Vec<u8> {
    let mut word = vec![0u8; 16];
    word.extend_from_slice(&value.to_be_bytes());
    word
}

/// Give spawned routers and feeds a chance to run.
pub async fn settle() {
    for _ in 0..50 {
        tokio::task::yield_now().await;
    }
}
