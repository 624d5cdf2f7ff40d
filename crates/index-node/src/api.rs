//! # Request Router
//!
//! One JSON request in, one JSON response out.
//!
//! ```json
//! {"method": "index_block", "caller": "0x…", "now": 12, "params": {"height": 1000, …}}
//! {"ok": true, "result": 1}
//! {"ok": false, "error": {"error_type": "invalid_block_sequence", "code": 101, "message": "…"}}
//! ```
//!
//! ## Methods
//!
//! | Group | Methods |
//! |-------|---------|
//! | registry | `register`, `get_indexer` |
//! | ingestion | `index_block`, `index_transaction`, `index_event`, `index_token_transfer`, `index_contract`, `batch_index_transactions`, `store_stats` |
//! | metered queries | `query_blocks_by_height_range`, `premium_query`, `query_address_activity`, `query_events`, `query_token_transfers` |
//! | result store | `cache_put` (configured result store only, paused with queries) |
//! | unmetered | `query_contract_info`, `query_digest`, `cache_get`, `query_stats`, `metering_stats` |
//! | admin | `update_fees`, `toggle_indexer`, `withdraw_fees`, `set_paused`, `trigger_analytics_report` |

use crate::errors::NodeError;
use crate::node::IndexNode;
use li_01_indexer_registry::IndexerType;
use li_03_ingestion::{
    BlockSubmission, ContractSubmission, EventSubmission, TokenTransferSubmission,
    TransactionSubmission,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{hex::Hex, serde_as};
use shared_types::{
    query_digest, Amount, CallContext, ErrorPayload, Hash, Height, Identity, Name64,
    QueryKey, Timestamp,
};
use tracing::debug;

/// An incoming request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRequest {
    pub method: String,
    pub caller: Identity,
    pub now: Timestamp,
    #[serde(default)]
    pub params: Value,
}

/// Outcome of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl NodeResponse {
    pub fn success(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: ErrorPayload) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Deserialize)]
struct RegisterParams {
    name: Name64,
    indexer_type: IndexerType,
}

#[derive(Deserialize)]
struct IndexerParams {
    indexer: Identity,
}

#[derive(Deserialize)]
struct BatchParams {
    transactions: Vec<TransactionSubmission>,
}

#[derive(Deserialize)]
struct RangeParams {
    start: Height,
    end: Height,
}

#[serde_as]
#[derive(Deserialize)]
struct PremiumParams {
    query_type: Name64,
    #[serde_as(as = "Hex")]
    #[serde(default)]
    params: Vec<u8>,
    max_results: u64,
}

#[serde_as]
#[derive(Deserialize)]
struct DigestParams {
    query_type: Name64,
    #[serde_as(as = "Hex")]
    #[serde(default)]
    params: Vec<u8>,
}

#[derive(Deserialize)]
struct AddressParams {
    address: Identity,
}

#[derive(Deserialize)]
struct EventQueryParams {
    contract: Identity,
    #[serde(default)]
    event_type: Option<Name64>,
    from_block: Height,
    to_block: Height,
}

#[derive(Deserialize)]
struct TransferQueryParams {
    token: Identity,
    #[serde(default)]
    from: Option<Identity>,
    #[serde(default)]
    to: Option<Identity>,
    from_block: Height,
    to_block: Height,
}

#[serde_as]
#[derive(Deserialize)]
struct CachePutParams {
    #[serde_as(as = "Hex")]
    key: QueryKey,
    #[serde_as(as = "Hex")]
    result_digest: Hash,
    result_count: u64,
}

#[serde_as]
#[derive(Deserialize)]
struct CacheKeyParams {
    #[serde_as(as = "Hex")]
    key: QueryKey,
}

#[derive(Deserialize)]
struct StatsParams {
    #[serde(default)]
    reader: Option<Identity>,
}

#[derive(Deserialize)]
struct FeeParams {
    basic_fee: Amount,
    premium_fee: Amount,
}

#[derive(Deserialize)]
struct WithdrawParams {
    amount: Amount,
    recipient: Identity,
}

#[derive(Deserialize)]
struct PauseParams {
    paused: bool,
}

fn parse<T: DeserializeOwned>(method: &str, params: Value) -> Result<T, NodeError> {
    serde_json::from_value(params).map_err(|e| NodeError::InvalidParams {
        method: method.to_string(),
        reason: e.to_string(),
    })
}

fn encode<T: Serialize>(value: T) -> Result<Value, NodeError> {
    serde_json::to_value(value).map_err(|e| NodeError::Serialization(e.to_string()))
}

/// Route one request to the node.
pub fn dispatch(node: &IndexNode, request: NodeRequest) -> Result<Value, NodeError> {
    let ctx = CallContext::new(request.caller, request.now);
    let method = request.method.as_str();
    let params = request.params;

    match method {
        // Registry
        "register" => {
            let p: RegisterParams = parse(method, params)?;
            encode(node.register(ctx, p.name, p.indexer_type)?)
        }
        "get_indexer" => {
            let p: IndexerParams = parse(method, params)?;
            encode(node.indexer(&p.indexer))
        }

        // Ingestion
        "index_block" => {
            let block: BlockSubmission = parse(method, params)?;
            encode(node.index_block(ctx, block)?)
        }
        "index_transaction" => {
            let tx: TransactionSubmission = parse(method, params)?;
            encode(node.index_transaction(ctx, tx)?)
        }
        "index_event" => {
            let event: EventSubmission = parse(method, params)?;
            encode(node.index_event(ctx, event)?)
        }
        "index_token_transfer" => {
            let transfer: TokenTransferSubmission = parse(method, params)?;
            encode(node.index_token_transfer(ctx, transfer)?)
        }
        "index_contract" => {
            let contract: ContractSubmission = parse(method, params)?;
            encode(node.index_contract(ctx, contract)?)
        }
        "batch_index_transactions" => {
            let p: BatchParams = parse(method, params)?;
            encode(node.batch_index_transactions(ctx, p.transactions)?)
        }
        "store_stats" => encode(node.store_stats()),

        // Metered queries
        "query_blocks_by_height_range" => {
            let p: RangeParams = parse(method, params)?;
            encode(node.query_blocks_by_height_range(ctx, p.start, p.end)?)
        }
        "premium_query" => {
            let p: PremiumParams = parse(method, params)?;
            encode(node.premium_query(ctx, p.query_type, &p.params, p.max_results)?)
        }
        "query_address_activity" => {
            let p: AddressParams = parse(method, params)?;
            encode(node.query_address_activity(ctx, p.address)?)
        }
        "query_events" => {
            let p: EventQueryParams = parse(method, params)?;
            encode(node.query_events(ctx, p.contract, p.event_type, p.from_block, p.to_block)?)
        }
        "query_token_transfers" => {
            let p: TransferQueryParams = parse(method, params)?;
            encode(node.query_token_transfers(
                ctx,
                p.token,
                p.from,
                p.to,
                p.from_block,
                p.to_block,
            )?)
        }

        // Unmetered
        "query_contract_info" => {
            let p: AddressParams = parse(method, params)?;
            encode(node.query_contract_info(&p.address))
        }
        "query_digest" => {
            let p: DigestParams = parse(method, params)?;
            encode(hex_key(query_digest(p.query_type.as_str(), &p.params)))
        }
        "cache_put" => {
            let p: CachePutParams = parse(method, params)?;
            encode(node.cache_put(ctx, p.key, p.result_digest, p.result_count)?)
        }
        "cache_get" => {
            let p: CacheKeyParams = parse(method, params)?;
            encode(node.cache_get(ctx.now, &p.key))
        }
        "query_stats" => {
            let p: StatsParams = parse(method, params)?;
            encode(node.query_stats(&p.reader.unwrap_or(ctx.caller)))
        }
        "metering_stats" => encode(node.metering_stats()),

        // Administration
        "update_fees" => {
            let p: FeeParams = parse(method, params)?;
            encode(node.update_fees(ctx, p.basic_fee, p.premium_fee)?)
        }
        "toggle_indexer" => {
            let p: IndexerParams = parse(method, params)?;
            encode(node.toggle_indexer(ctx, &p.indexer)?)
        }
        "withdraw_fees" => {
            let p: WithdrawParams = parse(method, params)?;
            encode(node.withdraw_fees(ctx, p.amount, &p.recipient)?)
        }
        "set_paused" => {
            let p: PauseParams = parse(method, params)?;
            encode(node.set_paused(ctx, p.paused)?)
        }
        "trigger_analytics_report" => encode(node.trigger_analytics_report(ctx)?),

        _ => Err(NodeError::UnknownMethod(method.to_string())),
    }
}

fn hex_key(key: QueryKey) -> String {
    hex::encode(key)
}

/// Route one request and wrap the outcome.
pub fn handle_request(node: &IndexNode, request: NodeRequest) -> NodeResponse {
    let method = request.method.clone();
    match dispatch(node, request) {
        Ok(result) => NodeResponse::success(result),
        Err(e) => {
            debug!(%method, error = %e, "request failed");
            NodeResponse::failure(ErrorPayload::from_error(&e))
        }
    }
}

/// Parse and handle one line of input.
pub fn handle_line(node: &IndexNode, line: &str) -> NodeResponse {
    match serde_json::from_str::<NodeRequest>(line) {
        Ok(request) => handle_request(node, request),
        Err(e) => NodeResponse::failure(ErrorPayload::from_error(&NodeError::MalformedRequest(
            e.to_string(),
        ))),
    }
}
