// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-token storage subscriptions shared by the pallet feeds.

use super::{Adapter, FeedError, FeedRequest};
use crate::client::StorageKey;
use crate::metrics::registry as metrics;
use crate::runtime_queries::DecodeError;
use crate::types::{AssetDescriptor, BalanceItem, OperationContext};
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Storage layout of one pallet that keeps a balance per (token, address).
pub(crate) trait TokenStorage: Send + Sync + 'static {
    /// One key per address, in address order.
    fn keys(&self, token: &AssetDescriptor, addresses: &[String]) -> Result<Vec<StorageKey>, FeedError>;

    fn normalize(
        &self,
        token: &AssetDescriptor,
        address: &str,
        raw: Option<&[u8]>,
        context: Option<&OperationContext>,
    ) -> Result<BalanceItem, DecodeError>;
}

/// Subscribe every token independently. A token whose subscription cannot
/// be opened, or fails after opening, reports zero balances and stops; the
/// other tokens keep streaming. Reconnecting is left to the client.
pub(crate) async fn run<S: TokenStorage>(
    adapter: Adapter,
    request: FeedRequest,
    storage: Arc<S>,
) -> Result<(), FeedError> {
    let client = request.substrate_client(adapter)?;
    let mut tokens = JoinSet::new();

    for token in request.tokens.iter().cloned() {
        let client = client.clone();
        let storage = storage.clone();
        let request = request.clone();

        tokens.spawn(async move {
            let name = adapter.name();
            let chain = request.chain.slug.as_str();
            let addresses = &request.addresses;

            let stream = match storage.keys(&token, addresses) {
                Ok(keys) => client.subscribe_storage(keys).await.map_err(FeedError::from),
                Err(e) => Err(e),
            };
            let mut stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::warn!(chain, token = %token.slug, adapter = name, error = %e, "Failed to subscribe token balance");
                    metrics::record_feed_failure(name);
                    request.sink.emit_zero(name, &token, addresses);
                    return;
                }
            };

            while let Some(update) = stream.next().await {
                let values = match update {
                    Ok(values) => values,
                    Err(e) => {
                        tracing::warn!(chain, token = %token.slug, adapter = name, error = %e, "Token balance subscription failed");
                        metrics::record_feed_failure(name);
                        request.sink.emit_zero(name, &token, addresses);
                        return;
                    }
                };

                let items = addresses
                    .iter()
                    .enumerate()
                    .map(|(i, address)| {
                        let raw = values.get(i).and_then(|value| value.as_deref());
                        storage
                            .normalize(&token, address, raw, request.context.as_ref())
                            .unwrap_or_else(|e| {
                                tracing::warn!(chain, token = %token.slug, address = %address, error = %e, "Failed to decode token balance");
                                metrics::record_feed_failure(name);
                                BalanceItem::zero(address.as_str(), token.slug.as_str())
                            })
                    })
                    .collect();
                request.sink.emit(name, items);
            }

            tracing::debug!(chain, token = %token.slug, adapter = name, "Token balance subscription ended");
        });
    }

    while let Some(result) = tokens.join_next().await {
        if let Err(e) = result {
            if e.is_panic() {
                tracing::error!(chain = %request.chain.slug, adapter = adapter.name(), error = %e, "Token feed panicked");
                metrics::record_feed_failure(adapter.name());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, SubstrateClient};
    use crate::feeds::assets::OrmlTokensPallet;
    use crate::test_fixtures::{ALICE, MockSubstrateClient, RecordingSink, feed_request, settle};
    use crate::types::{AssetType, ChainDescriptor, ItemState};
    use parity_scale_codec::Encode;
    use serde_json::json;

    fn orml_token(symbol: &str, id: u32) -> AssetDescriptor {
        let mut token = AssetDescriptor::new(format!("centrifuge-LOCAL-{symbol}"), "centrifuge", AssetType::Local);
        token.on_chain_info = Some(json!({ "ForeignAsset": id }));
        token
    }

    fn request(client: &Arc<MockSubstrateClient>, sink: &RecordingSink) -> FeedRequest {
        feed_request(
            ChainDescriptor::new("centrifuge"),
            vec![orml_token("USDT", 1), orml_token("DOT", 2)],
            &[ALICE],
            Some(client.clone() as Arc<dyn SubstrateClient>),
            None,
            sink,
        )
    }

    #[tokio::test]
    async fn test_failed_open_isolated_to_token() {
        let client = MockSubstrateClient::new();
        client.fail_subscription(r#"{"ForeignAsset":1}"#);
        client.set_storage(
            &format!(r#"OrmlTokens.Accounts({ALICE}, {{"ForeignAsset":2}})"#),
            Some((300u128, 0u128, 0u128).encode()),
        );

        let sink = RecordingSink::default();
        let feed = tokio::spawn(run(Adapter::OrmlTokens, request(&client, &sink), Arc::new(OrmlTokensPallet)));
        settle().await;

        assert_eq!(sink.latest(ALICE, "centrifuge-LOCAL-USDT").unwrap().free, "0");
        assert_eq!(sink.latest(ALICE, "centrifuge-LOCAL-DOT").unwrap().free, "300");
        assert_eq!(client.open_subscriptions(), 1);
        feed.abort();
    }

    #[tokio::test]
    async fn test_broken_subscription_reports_zero() {
        let client = MockSubstrateClient::new();
        client.set_storage(
            &format!(r#"OrmlTokens.Accounts({ALICE}, {{"ForeignAsset":1}})"#),
            Some((500u128, 0u128, 0u128).encode()),
        );

        let sink = RecordingSink::default();
        let feed = tokio::spawn(run(Adapter::OrmlTokens, request(&client, &sink), Arc::new(OrmlTokensPallet)));
        settle().await;
        assert_eq!(sink.latest(ALICE, "centrifuge-LOCAL-USDT").unwrap().free, "500");

        client.break_subscriptions(ClientError::Rpc("connection reset".to_string()));
        settle().await;

        let item = sink.latest(ALICE, "centrifuge-LOCAL-USDT").unwrap();
        assert_eq!(item.free, "0");
        assert_eq!(item.state, ItemState::Ready);
        assert_eq!(sink.latest(ALICE, "centrifuge-LOCAL-DOT").unwrap().free, "0");

        // Every token task has ended, so the feed itself returns
        assert!(feed.await.unwrap().is_ok());
    }
}
