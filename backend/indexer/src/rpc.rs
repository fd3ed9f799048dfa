//! Soroban RPC client: polls `getEvents` and decodes Seedlot events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.
//!
//! ## Payload formats
//!
//! Events are requested with `xdrFormat: "json"`, so topics and data arrive as
//! `topicJson` / `valueJson`. Older RPC nodes ignore the flag and send
//! base64 XDR instead; those values are decoded with `stellar-xdr` into the
//! same JSON shape before flattening.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use stellar_xdr::curr::{Limits, ReadXdr, ScVal};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, SeedlotEvent, Subject};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawEvent {
    /// Base64 XDR topic list
    #[serde(default)]
    pub topic: Vec<Value>,
    /// Base64 XDR event data
    #[serde(default)]
    pub value: Value,
    #[serde(rename = "topicJson")]
    pub topic_json: Option<Vec<Value>>,
    #[serde(rename = "valueJson")]
    pub value_json: Option<Value>,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

impl RawEvent {
    fn topics(&self) -> Vec<Value> {
        match &self.topic_json {
            Some(topics) => topics.iter().map(plain).collect(),
            None => self.topic.iter().map(plain_or_xdr).collect(),
        }
    }

    fn data(&self) -> Value {
        match &self.value_json {
            Some(value) => plain(value),
            None => plain_or_xdr(&self.value),
        }
    }
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

struct Backoff {
    secs: u64,
}

impl Backoff {
    fn new() -> Self {
        Self {
            secs: INITIAL_BACKOFF_SECS,
        }
    }

    async fn wait(&mut self, reason: &str) {
        warn!("{reason} (will retry in {}s)", self.secs);
        tokio::time::sleep(Duration::from_secs(self.secs)).await;
        self.secs = (self.secs * 2).min(MAX_BACKOFF_SECS);
    }
}

/// Fetch a page of events from the RPC.
///
/// * `start_ledger`: the ledger sequence to scan from (inclusive).
/// * `cursor`: optional opaque pagination cursor from a previous response.
/// * `limit`: maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let mut backoff = Backoff::new();
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getEvents",
        "params": build_params(contract_id, start_ledger, cursor, limit),
    });

    loop {
        let resp = match client.post(rpc_url).json(&request).send().await {
            Ok(resp) => resp,
            Err(e) => {
                backoff.wait(&format!("RPC request failed: {e}")).await;
                continue;
            }
        };
        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            backoff.wait("Rate-limited by RPC").await;
            continue;
        }

        let body: RpcResponse = resp.json().await?;
        if let Some(err) = body.error {
            // Invalid request / unknown method will never succeed.
            if err.code == -32600 || err.code == -32601 {
                return Err(IndexerError::Rpc {
                    code: err.code,
                    message: err.message,
                });
            }
            backoff
                .wait(&format!("RPC soft error {}: {}", err.code, err.message))
                .await;
            continue;
        }

        let result = body.result.ok_or_else(|| {
            IndexerError::EventParse("Empty result from getEvents".to_string())
        })?;
        debug!(
            "Fetched {} events (latest_ledger={:?})",
            result.events.len(),
            result.latest_ledger
        );
        return Ok((result.events, result.cursor, result.latest_ledger));
    }
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        },
        "xdrFormat": "json"
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`SeedlotEvent`] structs.
///
/// Events from failed contract calls are dropped.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<SeedlotEvent> {
    raw.iter()
        .enumerate()
        .filter(|(_, e)| e.in_successful_contract_call != Some(false))
        .filter_map(|(position, e)| decode_single(e, contract_id, position))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str, position: usize) -> Option<SeedlotEvent> {
    let topics = raw.topics();
    let kind = EventKind::from_topic(topics.first()?.as_str()?);
    let data = raw.data();

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);
    let tx_hash = raw.tx_hash.as_deref().and_then(normalize_tx_hash);

    let mut event = SeedlotEvent {
        event_id: raw
            .id
            .clone()
            .or_else(|| raw.paging_token.clone())
            .unwrap_or_else(|| {
                format!(
                    "{ledger}-{}-{position}",
                    tx_hash.as_deref().unwrap_or("none")
                )
            }),
        event_type: kind.as_str().to_string(),
        offer_index: None,
        lot_index: None,
        manager: None,
        actor: None,
        amount: None,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash,
    };

    let subject = topics.get(1);
    match kind.subject() {
        Subject::Offer => event.offer_index = subject.and_then(as_index),
        Subject::Lot => event.lot_index = subject.and_then(as_index),
        Subject::Manager => event.manager = subject.and_then(as_text),
        Subject::None => {}
    }
    decode_data(&mut event, kind, &data);
    Some(event)
}

/// Fill in the fields carried by the event's data struct.
fn decode_data(event: &mut SeedlotEvent, kind: EventKind, data: &Value) {
    match kind {
        EventKind::ContractInitialized => {
            event.actor = field(data, "admin");
        }
        EventKind::OfferAdded => {}
        EventKind::OrderPlaced => {
            event.actor = field(data, "investor");
            event.amount = field(data, "amount");
        }
        EventKind::ManagerCertified | EventKind::ManagerDecertified => {
            if event.manager.is_none() {
                event.manager = field(data, "manager");
            }
        }
        EventKind::LotsPrepared => {
            event.offer_index = data.get("offer_index").and_then(as_index);
            event.manager = field(data, "manager");
            event.actor = field(data, "investor");
            event.amount = field(data, "amount");
        }
        EventKind::LotConfirmed | EventKind::LotDenied => {
            event.manager = field(data, "manager");
            event.amount = field(data, "amount");
        }
        EventKind::HarvestPaid => {
            event.actor = field(data, "payer");
            event.amount = ["investor_amount", "manager_amount", "admin_amount"]
                .iter()
                .map(|key| field(data, key).and_then(|s| s.parse::<i128>().ok()))
                .sum::<Option<i128>>()
                .map(|total| total.to_string());
        }
        EventKind::LotTransferred | EventKind::LotBurned => {
            event.actor = field(data, "from");
            event.amount = field(data, "amount");
        }
        EventKind::DebtRecorded | EventKind::DebtRepaid => {
            if event.manager.is_none() {
                event.manager = field(data, "manager");
            }
            event.amount = field(data, "amount");
        }
        EventKind::Unknown => {}
    }
}

fn field(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(as_text)
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_index(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

// ─────────────────────────────────────────────────────────
// ScVal flattening
// ─────────────────────────────────────────────────────────

/// Flatten an ScVal in any of the JSON shapes RPC nodes produce into plain
/// JSON: scalars become strings or numbers, maps become objects keyed by
/// their symbol.
///
/// Handles `{"type":"symbol","value":"init"}`, `{"symbol":"init"}` and
/// `{"map":[{"key":…,"val":…}]}`.
fn plain(value: &Value) -> Value {
    let Value::Object(obj) = value else {
        return value.clone();
    };
    if let (Some(_), Some(inner)) = (obj.get("type"), obj.get("value")) {
        return plain(inner);
    }
    if obj.len() == 1 {
        if let Some((tag, inner)) = obj.iter().next() {
            match tag.as_str() {
                "map" => return plain_map(inner),
                "vec" => {
                    let items = inner
                        .as_array()
                        .map(|a| a.iter().map(plain).collect::<Vec<_>>());
                    return Value::Array(items.unwrap_or_default());
                }
                "void" => return Value::Null,
                "i128" | "u128" => return plain_wide(inner),
                "symbol" | "string" | "address" | "bool" | "u32" | "i32" | "u64" | "i64"
                | "bytes" => return plain(inner),
                _ => {}
            }
        }
    }
    Value::Object(obj.iter().map(|(k, v)| (k.clone(), plain(v))).collect())
}

fn plain_map(entries: &Value) -> Value {
    let mut out = Map::new();
    for entry in entries.as_array().into_iter().flatten() {
        let key = entry.get("key").map(plain);
        let val = entry.get("val").map(plain);
        if let (Some(Value::String(key)), Some(val)) = (key, val) {
            out.insert(key, val);
        }
    }
    Value::Object(out)
}

/// 128-bit integers come either as a decimal string or as `{hi, lo}` parts.
fn plain_wide(inner: &Value) -> Value {
    let parts = inner
        .get("hi")
        .and_then(as_index)
        .zip(inner.get("lo").and_then(|v| as_text(v)?.parse::<u64>().ok()));
    match parts {
        Some((hi, lo)) => Value::String((((hi as i128) << 64) | lo as i128).to_string()),
        None => plain(inner),
    }
}

/// Top-level values may still be base64 XDR when the node ignores `xdrFormat`.
fn plain_or_xdr(value: &Value) -> Value {
    if let Value::String(s) = value {
        if let Ok(parsed) = serde_json::from_str::<Value>(s) {
            if parsed.is_object() {
                return plain(&parsed);
            }
        }
        if let Some(decoded) = decode_xdr(s) {
            return plain(&decoded);
        }
    }
    plain(value)
}

/// Decode a base64 XDR ScVal into the JSON shape RPC uses for `xdrFormat: "json"`.
fn decode_xdr(s: &str) -> Option<Value> {
    let bytes = STANDARD.decode(s).ok()?;
    let scval = ScVal::from_xdr(bytes, Limits::none()).ok()?;
    serde_json::to_value(&scval).ok()
}

/// Transaction hashes are stored as lowercase hex of exactly 32 bytes.
fn normalize_tx_hash(s: &str) -> Option<String> {
    let bytes = hex::decode(s).ok()?;
    (bytes.len() == 32).then(|| hex::encode(bytes))
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
