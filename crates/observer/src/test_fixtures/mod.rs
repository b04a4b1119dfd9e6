//! In-memory chain clients for feed and dispatcher tests.
//!
//! `MockSubstrateClient` keeps a key/value view of storage addressed by the
//! `Display` form of `StorageKey` (e.g. `System.Account(5Grw...)`). Writing a
//! value pushes a fresh snapshot to every subscription that covers the key.

use crate::client::{ClientError, EvmClient, StorageKey, StorageStream, SubstrateClient};
use crate::feeds::{FeedRequest, FeedSettings, FeedSink};
use crate::handle::SubscriptionHandle;
use crate::types::{AssetDescriptor, BalanceItem, ChainDescriptor};
use async_trait::async_trait;
use futures::StreamExt;
use futures::channel::mpsc::{UnboundedSender, unbounded};
use primitive_types::U256;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
pub const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";
pub const EVM_ALICE: &str = "0xd43593c715fdd31c61141abd04a99fd6822c8558";
pub const EVM_BOB: &str = "0x8eaf04151687736326c9fea17e25fc5287613693";

type Update = Result<Vec<Option<Vec<u8>>>, ClientError>;

struct Subscriber {
    keys: Vec<String>,
    tx: UnboundedSender<Update>,
}

#[derive(Default)]
struct SubstrateState {
    not_ready: Option<ClientError>,
    storage: HashMap<String, Vec<u8>>,
    entries: HashSet<String>,
    failing_keys: Vec<String>,
    subscribers: Vec<Subscriber>,
    contract_replies: HashMap<(String, String), Result<Vec<u8>, ClientError>>,
    gear_replies: HashMap<(String, String), Result<Vec<u8>, ClientError>>,
    subscribed_keys: Vec<Vec<String>>,
    contract_calls: usize,
}

#[derive(Default)]
pub struct MockSubstrateClient {
    state: Mutex<SubstrateState>,
}

impl MockSubstrateClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_not_ready(&self, error: ClientError) {
        self.state.lock().unwrap().not_ready = Some(error);
    }

    /// Declare `pallet.entry` present in the runtime metadata.
    pub fn enable_storage(&self, pallet: &str, entry: &str) {
        self.state.lock().unwrap().entries.insert(format!("{pallet}.{entry}"));
    }

    /// Subscriptions covering a key containing `pattern` fail to open.
    pub fn fail_subscription(&self, pattern: &str) {
        self.state.lock().unwrap().failing_keys.push(pattern.to_string());
    }

    pub fn set_storage(&self, key: &str, value: Option<Vec<u8>>) {
        let mut state = self.state.lock().unwrap();
        match value {
            Some(value) => state.storage.insert(key.to_string(), value),
            None => state.storage.remove(key),
        };

        let state = &mut *state;
        let storage = &state.storage;
        state.subscribers.retain(|subscriber| {
            if !subscriber.keys.iter().any(|k| k == key) {
                return !subscriber.tx.is_closed();
            }
            let snapshot: Vec<Option<Vec<u8>>> = subscriber.keys.iter().map(|k| storage.get(k).cloned()).collect();
            subscriber.tx.unbounded_send(Ok(snapshot)).is_ok()
        });
    }

    /// Push an error into every open subscription.
    pub fn break_subscriptions(&self, error: ClientError) {
        let mut state = self.state.lock().unwrap();
        for subscriber in state.subscribers.drain(..) {
            let _ = subscriber.tx.unbounded_send(Err(error.clone()));
        }
    }

    pub fn set_contract_reply(&self, contract: &str, caller: &str, reply: Result<Vec<u8>, ClientError>) {
        self.state
            .lock()
            .unwrap()
            .contract_replies
            .insert((contract.to_string(), caller.to_string()), reply);
    }

    pub fn set_gear_reply(&self, program: &str, origin: &str, reply: Result<Vec<u8>, ClientError>) {
        self.state
            .lock()
            .unwrap()
            .gear_replies
            .insert((program.to_string(), origin.to_string()), reply);
    }

    /// Keys of every subscription opened so far, in call order.
    pub fn subscribed_keys(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().subscribed_keys.clone()
    }

    pub fn contract_calls(&self) -> usize {
        self.state.lock().unwrap().contract_calls
    }

    pub fn open_subscriptions(&self) -> usize {
        let mut state = self.state.lock().unwrap();
        state.subscribers.retain(|subscriber| !subscriber.tx.is_closed());
        state.subscribers.len()
    }
}

#[async_trait]
impl SubstrateClient for MockSubstrateClient {
    async fn wait_ready(&self) -> Result<(), ClientError> {
        match &self.state.lock().unwrap().not_ready {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn has_storage(&self, pallet: &str, entry: &str) -> bool {
        self.state.lock().unwrap().entries.contains(&format!("{pallet}.{entry}"))
    }

    async fn subscribe_storage(&self, keys: Vec<StorageKey>) -> Result<StorageStream, ClientError> {
        let keys: Vec<String> = keys.iter().map(ToString::to_string).collect();
        let mut state = self.state.lock().unwrap();
        state.subscribed_keys.push(keys.clone());

        if let Some(key) = keys
            .iter()
            .find(|key| state.failing_keys.iter().any(|pattern| key.contains(pattern.as_str())))
        {
            return Err(ClientError::StorageUnavailable(key.clone()));
        }

        let (tx, rx) = unbounded::<Update>();
        let snapshot: Vec<Option<Vec<u8>>> = keys.iter().map(|k| state.storage.get(k).cloned()).collect();
        let _ = tx.unbounded_send(Ok(snapshot));
        state.subscribers.push(Subscriber { keys, tx });
        Ok(rx.boxed())
    }

    async fn contract_call(&self, contract: &str, caller: &str, _input: Vec<u8>) -> Result<Vec<u8>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.contract_calls += 1;
        state
            .contract_replies
            .get(&(contract.to_string(), caller.to_string()))
            .cloned()
            .unwrap_or_else(|| Err(ClientError::Contract(format!("no reply for {contract}"))))
    }

    async fn calculate_reply(&self, program: &str, origin: &str, _payload: Vec<u8>) -> Result<Vec<u8>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.contract_calls += 1;
        state
            .gear_replies
            .get(&(program.to_string(), origin.to_string()))
            .cloned()
            .unwrap_or_else(|| Err(ClientError::Contract(format!("no reply for {program}"))))
    }
}

#[derive(Default)]
struct EvmState {
    not_ready: Option<ClientError>,
    balances: HashMap<String, Result<U256, ClientError>>,
    call_replies: HashMap<(String, Vec<u8>), Result<Vec<u8>, ClientError>>,
    stalled_contracts: HashSet<String>,
    calls: usize,
}

#[derive(Default)]
pub struct MockEvmClient {
    state: Mutex<EvmState>,
}

impl MockEvmClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_not_ready(&self, error: ClientError) {
        self.state.lock().unwrap().not_ready = Some(error);
    }

    pub fn set_balance(&self, address: &str, balance: Result<U256, ClientError>) {
        self.state.lock().unwrap().balances.insert(address.to_string(), balance);
    }

    pub fn set_call_reply(&self, to: &str, data: Vec<u8>, reply: Result<Vec<u8>, ClientError>) {
        self.state.lock().unwrap().call_replies.insert((to.to_string(), data), reply);
    }

    /// Calls to `to` never resolve.
    pub fn stall_contract(&self, to: &str) {
        self.state.lock().unwrap().stalled_contracts.insert(to.to_string());
    }

    /// Number of `balance` and `call` requests served.
    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }
}

#[async_trait]
impl EvmClient for MockEvmClient {
    async fn wait_ready(&self) -> Result<(), ClientError> {
        match &self.state.lock().unwrap().not_ready {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn balance(&self, address: &str) -> Result<U256, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        state
            .balances
            .get(address)
            .cloned()
            .unwrap_or_else(|| Err(ClientError::Rpc(format!("unknown account {address}"))))
    }

    async fn call(&self, to: &str, data: Vec<u8>) -> Result<Vec<u8>, ClientError> {
        let stalled = {
            let mut state = self.state.lock().unwrap();
            state.calls += 1;
            state.stalled_contracts.contains(to)
        };
        if stalled {
            return std::future::pending().await;
        }

        let state = self.state.lock().unwrap();
        state
            .call_replies
            .get(&(to.to_string(), data))
            .cloned()
            .unwrap_or_else(|| Err(ClientError::Rpc(format!("execution reverted at {to}"))))
    }
}

/// Big-endian ABI word holding `value`.
pub fn abi_word(value: u128) -> Vec<u8> {
    let mut word = vec![0u8; 16];
    word.extend_from_slice(&value.to_be_bytes());
    word
}

/// Sink that records every batch it receives.
#[derive(Clone, Default)]
pub struct RecordingSink {
    batches: Arc<Mutex<Vec<Vec<BalanceItem>>>>,
}

impl RecordingSink {
    pub fn sink(&self) -> crate::feeds::BalanceSink {
        let batches = self.batches.clone();
        Arc::new(move |items| batches.lock().unwrap().push(items))
    }

    pub fn batches(&self) -> Vec<Vec<BalanceItem>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn items(&self) -> Vec<BalanceItem> {
        self.batches().into_iter().flatten().collect()
    }

    /// Most recent item for `(address, token)`.
    pub fn latest(&self, address: &str, token: &str) -> Option<BalanceItem> {
        self.items()
            .into_iter()
            .rev()
            .find(|item| item.address == address && item.token_slug == token)
    }
}

/// Request for one feed with default settings and no operation context.
pub fn feed_request(
    chain: ChainDescriptor,
    tokens: Vec<AssetDescriptor>,
    addresses: &[&str],
    substrate: Option<Arc<dyn SubstrateClient>>,
    evm: Option<Arc<dyn EvmClient>>,
    sink: &RecordingSink,
) -> FeedRequest {
    FeedRequest {
        chain: Arc::new(chain),
        tokens,
        addresses: addresses.iter().map(|a| a.to_string()).collect(),
        substrate,
        evm,
        sink: FeedSink::new(sink.sink(), SubscriptionHandle::new()),
        context: None,
        settings: FeedSettings::default(),
    }
}

/// Let spawned tasks run until they are all parked.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
