//! Typed request builders for the node's HTTP APIs.
//!
//! One method per logical operation. Each method resolves the surface
//! URL, shapes the snake_case wire body, reshapes the response into the
//! domain types from `grindesk-types`, and classifies failures. Slates
//! stay opaque JSON values; the node owns all cryptographic wallet logic.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use grindesk_types::{Amount, OutputInfo, SessionToken, Transaction, TxKind, WalletSummary};

use crate::endpoint::{ApiSurface, EndpointResolver};
use crate::error::ClientError;
use crate::settings::ConnectionSettings;
use crate::transport::{HttpTransport, RestMethod, Transport};

/// Fee base transmitted with fee estimation and send requests.
const FEE_BASE: u64 = 1_000_000;

/// Input selection strategy for spends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionStrategy {
    Smallest,
    All,
    Custom,
}

impl SelectionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smallest => "SMALLEST",
            Self::All => "ALL",
            Self::Custom => "CUSTOM",
        }
    }
}

/// Arguments for the owner RPC `send` operation.
#[derive(Clone, Debug)]
pub struct SendArgs {
    /// Display units; scaled to base units at request construction.
    pub amount_grins: f64,
    pub strategy: SelectionStrategy,
    /// Commitments to spend; cleared on the wire for
    /// [`SelectionStrategy::Smallest`], transmitted for every other
    /// strategy.
    pub inputs: Vec<String>,
    pub message: Option<String>,
    pub address: Option<String>,
}

/// Result of creating a fresh wallet.
#[derive(Clone, Debug)]
pub struct NewWallet {
    pub username: String,
    pub token: SessionToken,
    /// Seed phrase, split into ordered words for the confirmation flow.
    pub seed_words: Vec<String>,
}

/// Result of restoring a wallet from its seed phrase.
#[derive(Clone, Debug)]
pub struct RestoredWallet {
    pub username: String,
    pub token: SessionToken,
}

/// Node status as reported by the node API.
#[derive(Clone, Debug, Deserialize)]
pub struct NodeStatus {
    #[serde(default)]
    pub sync_status: String,
    #[serde(default)]
    pub header_height: u64,
    #[serde(default)]
    pub chain: ChainStatus,
    #[serde(default)]
    pub network: NetworkStatus,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChainStatus {
    #[serde(default)]
    pub height: u64,
    #[serde(default)]
    pub hash: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NetworkStatus {
    #[serde(default)]
    pub num_inbound: u32,
    #[serde(default)]
    pub num_outbound: u32,
}

/// Fee estimate for a spend.
#[derive(Clone, Debug, Deserialize)]
pub struct FeeEstimate {
    pub fee: Amount,
    #[serde(default)]
    pub inputs: Vec<OutputInfo>,
}

// ── Wire DTOs ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SummaryDto {
    #[serde(default)]
    amount_currently_spendable: u64,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    amount_immature: u64,
    #[serde(default)]
    amount_awaiting_confirmation: u64,
    #[serde(default)]
    amount_locked: u64,
    #[serde(default)]
    transactions: Vec<TransactionDto>,
}

#[derive(Debug, Deserialize)]
struct TransactionDto {
    id: i64,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    creation_date_time: i64,
    #[serde(default)]
    amount_credited: u64,
    #[serde(default)]
    amount_debited: u64,
    #[serde(rename = "type")]
    kind: TxKind,
    #[serde(default)]
    confirmed_height: u64,
    #[serde(default)]
    fee: u64,
    #[serde(default)]
    slate_id: Option<String>,
    #[serde(default)]
    slate_message: Option<String>,
    #[serde(default)]
    outputs: Vec<OutputInfo>,
}

impl From<TransactionDto> for Transaction {
    fn from(dto: TransactionDto) -> Self {
        Self {
            id: dto.id,
            address: dto.address,
            creation_date: dto.creation_date_time,
            amount_credited: Amount::new(dto.amount_credited),
            amount_debited: Amount::new(dto.amount_debited),
            kind: dto.kind,
            confirmed_height: dto.confirmed_height,
            fee: Amount::new(dto.fee),
            slate_id: dto.slate_id,
            slate_message: dto.slate_message,
            outputs: dto.outputs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateWalletDto {
    session_token: String,
    wallet_seed: String,
}

#[derive(Debug, Deserialize)]
struct RestoreWalletDto {
    session_token: String,
}

#[derive(Debug, Deserialize)]
struct OutputsDto {
    #[serde(default)]
    outputs: Vec<OutputInfo>,
}

// ── NodeClient ─────────────────────────────────────────────────────────

/// Typed client for the node's owner, foreign, and node API surfaces.
pub struct NodeClient<T = HttpTransport> {
    resolver: EndpointResolver,
    transport: T,
}

impl NodeClient<HttpTransport> {
    /// Create a client backed by a real HTTP transport.
    pub fn new(settings: ConnectionSettings) -> Result<Self, ClientError> {
        Ok(Self {
            resolver: EndpointResolver::new(settings),
            transport: HttpTransport::new()?,
        })
    }
}

impl<T: Transport> NodeClient<T> {
    /// Create a client over a caller-supplied transport (tests use
    /// [`crate::nullable::NullTransport`]).
    pub fn with_transport(settings: ConnectionSettings, transport: T) -> Self {
        Self {
            resolver: EndpointResolver::new(settings),
            transport,
        }
    }

    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn node(&self, path: &str) -> String {
        format!("{}/{}", self.resolver.url(ApiSurface::Node), path)
    }

    fn owner(&self, path: &str) -> String {
        format!("{}/{}", self.resolver.url(ApiSurface::Owner), path)
    }

    fn token_header(token: &SessionToken) -> Vec<(String, String)> {
        vec![("session_token".to_string(), token.as_str().to_string())]
    }

    fn credential_headers(username: &str, password: &str) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ]
    }

    fn selection_strategy(strategy: SelectionStrategy, inputs: Vec<String>) -> Value {
        // The node picks its own inputs for SMALLEST; every other strategy
        // passes the caller's commitments through.
        let inputs = match strategy {
            SelectionStrategy::Smallest => Vec::new(),
            _ => inputs,
        };
        json!({ "strategy": strategy.as_str(), "inputs": inputs })
    }

    // ── Node surface ───────────────────────────────────────────────────

    /// Fetch the node's sync state.
    pub async fn node_status(&self) -> Result<NodeStatus, ClientError> {
        let body = self
            .transport
            .rest(&self.node("status"), RestMethod::Get, &[], None)
            .await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::Protocol(format!("invalid status response: {e}")))
    }

    /// List currently connected peers (opaque entries).
    pub async fn connected_peers(&self) -> Result<Vec<Value>, ClientError> {
        let body = self
            .transport
            .rest(&self.node("peers/connected"), RestMethod::Get, &[], None)
            .await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::Protocol(format!("invalid peers response: {e}")))
    }

    /// Ask the node to resync the chain from scratch. Best-effort.
    pub async fn resync_node(&self) -> bool {
        match self
            .transport
            .rest(&self.node("resync"), RestMethod::Get, &[], None)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                debug!("resync request failed: {e}");
                false
            }
        }
    }

    /// Ask the node process to shut down. Best-effort.
    pub async fn shutdown_node(&self) -> bool {
        match self
            .transport
            .rest(&self.node("shutdown"), RestMethod::Get, &[], None)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                debug!("shutdown request failed: {e}");
                false
            }
        }
    }

    // ── Owner REST surface ─────────────────────────────────────────────

    /// Fetch the wallet summary.
    ///
    /// The node returns transactions in chronological order; the summary
    /// holds them most-recent-first. An unparseable body yields
    /// `Ok(None)`: callers treat it as "no update this cycle", not a
    /// fatal condition.
    pub async fn wallet_summary(
        &self,
        token: &SessionToken,
    ) -> Result<Option<WalletSummary>, ClientError> {
        let body = self
            .transport
            .rest(
                &self.owner("retrieve_summary_info"),
                RestMethod::Get,
                &Self::token_header(token),
                None,
            )
            .await?;
        let dto: SummaryDto = match serde_json::from_str(&body) {
            Ok(dto) => dto,
            Err(e) => {
                debug!("unparseable wallet summary: {e}");
                return Ok(None);
            }
        };
        let mut transactions: Vec<Transaction> =
            dto.transactions.into_iter().map(Transaction::from).collect();
        transactions.reverse();
        Ok(Some(WalletSummary {
            spendable: Amount::new(dto.amount_currently_spendable),
            total: Amount::new(dto.total),
            immature: Amount::new(dto.amount_immature),
            unconfirmed: Amount::new(dto.amount_awaiting_confirmation),
            locked: Amount::new(dto.amount_locked),
            transactions,
        }))
    }

    /// Create a fresh wallet.
    ///
    /// An unparseable body propagates as [`ClientError::Node`] carrying
    /// the node's literal response text (e.g. "username already exists").
    pub async fn create_wallet(
        &self,
        username: &str,
        password: &str,
    ) -> Result<NewWallet, ClientError> {
        let body = self
            .transport
            .rest(
                &self.owner("create_wallet"),
                RestMethod::Post,
                &Self::credential_headers(username, password),
                None,
            )
            .await?;
        let dto: CreateWalletDto =
            serde_json::from_str(&body).map_err(|_| ClientError::Node(body.clone()))?;
        Ok(NewWallet {
            username: username.to_string(),
            token: SessionToken::new(dto.session_token),
            seed_words: dto.wallet_seed.split_whitespace().map(str::to_string).collect(),
        })
    }

    /// Restore a wallet from its seed phrase.
    pub async fn restore_wallet(
        &self,
        username: &str,
        password: &str,
        seed: &str,
    ) -> Result<RestoredWallet, ClientError> {
        let body = self
            .transport
            .rest(
                &self.owner("restore_wallet"),
                RestMethod::Post,
                &Self::credential_headers(username, password),
                Some(json!({ "wallet_seed": seed })),
            )
            .await?;
        let dto: RestoreWalletDto =
            serde_json::from_str(&body).map_err(|_| ClientError::Node(body.clone()))?;
        Ok(RestoredWallet {
            username: username.to_string(),
            token: SessionToken::new(dto.session_token),
        })
    }

    /// Invalidate the session on the node. Best-effort: the node-side
    /// session expires on its own if this fails.
    pub async fn logout(&self, token: &SessionToken) -> bool {
        match self
            .transport
            .rest(
                &self.owner("logout"),
                RestMethod::Post,
                &Self::token_header(token),
                None,
            )
            .await
        {
            Ok(_) => true,
            Err(e) => {
                debug!("logout request failed: {e}");
                false
            }
        }
    }

    /// Trigger a full wallet rescan (`update_wallet`). Best-effort.
    pub async fn rescan(&self, token: &SessionToken) -> bool {
        match self
            .transport
            .rest(
                &self.owner("update_wallet"),
                RestMethod::Post,
                &Self::token_header(token),
                None,
            )
            .await
        {
            Ok(_) => true,
            Err(e) => {
                debug!("rescan request failed: {e}");
                false
            }
        }
    }

    /// Estimate the fee for a spend.
    ///
    /// `amount_grins` is in display units and is scaled to base units
    /// here, at the request-construction boundary. Response amounts are
    /// never scaled.
    pub async fn estimate_fee(
        &self,
        token: &SessionToken,
        amount_grins: f64,
        strategy: SelectionStrategy,
        inputs: Vec<String>,
        message: &str,
    ) -> Result<FeeEstimate, ClientError> {
        let body = json!({
            "amount": Amount::from_grins(amount_grins).raw(),
            "fee_base": FEE_BASE,
            "selection_strategy": Self::selection_strategy(strategy, inputs),
            "message": message,
        });
        let response = self
            .transport
            .rest(
                &self.owner("estimate_fee"),
                RestMethod::Post,
                &Self::token_header(token),
                Some(body),
            )
            .await?;
        serde_json::from_str(&response).map_err(|_| ClientError::Node(response.clone()))
    }

    /// Cancel a transaction.
    ///
    /// Returns the node's response body unchanged: empty means success,
    /// any text is a human-readable warning to surface verbatim.
    pub async fn cancel_tx(&self, token: &SessionToken, tx_id: i64) -> Result<String, ClientError> {
        let url = format!("{}?id={}", self.owner("cancel_tx"), tx_id);
        self.transport
            .rest(&url, RestMethod::Post, &Self::token_header(token), None)
            .await
    }

    /// Repost a stuck transaction. Same response contract as
    /// [`NodeClient::cancel_tx`].
    pub async fn repost_tx(&self, token: &SessionToken, tx_id: i64) -> Result<String, ClientError> {
        let url = format!("{}?id={}", self.owner("repost_tx"), tx_id);
        self.transport
            .rest(&url, RestMethod::Post, &Self::token_header(token), None)
            .await
    }

    /// List wallet accounts. Malformed JSON propagates as a protocol
    /// error; listings have no degraded fallback.
    pub async fn accounts(&self) -> Result<Vec<String>, ClientError> {
        let body = self
            .transport
            .rest(&self.owner("accounts"), RestMethod::Get, &[], None)
            .await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::Protocol(format!("invalid accounts response: {e}")))
    }

    /// List the wallet's outputs. Same failure policy as
    /// [`NodeClient::accounts`].
    pub async fn outputs(&self, token: &SessionToken) -> Result<Vec<OutputInfo>, ClientError> {
        let body = self
            .transport
            .rest(
                &self.owner("retrieve_outputs"),
                RestMethod::Get,
                &Self::token_header(token),
                None,
            )
            .await?;
        let dto: OutputsDto = serde_json::from_str(&body)
            .map_err(|e| ClientError::Protocol(format!("invalid outputs response: {e}")))?;
        Ok(dto.outputs)
    }

    // ── Owner RPC surface ──────────────────────────────────────────────

    async fn owner_rpc_call(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        let envelope = self
            .transport
            .rpc(&self.resolver.url(ApiSurface::OwnerRpc), method, params)
            .await?;
        Self::rpc_result(method, envelope)
    }

    fn rpc_result(method: &str, envelope: Value) -> Result<Value, ClientError> {
        if let Some(error) = envelope.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown RPC error");
            return Err(ClientError::Node(message.to_string()));
        }
        envelope
            .get("result")
            .cloned()
            .ok_or_else(|| ClientError::Protocol(format!("{method} response has no result")))
    }

    /// Log in against an existing wallet.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionToken, ClientError> {
        let result = self
            .owner_rpc_call("login", json!({ "username": username, "password": password }))
            .await?;
        let token = result
            .get("session_token")
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::Protocol("login response has no session_token".to_string()))?;
        Ok(SessionToken::new(token))
    }

    /// Build and send a transaction; returns the slate as an opaque value.
    pub async fn send(&self, token: &SessionToken, args: SendArgs) -> Result<Value, ClientError> {
        let params = json!({
            "session_token": token.as_str(),
            "amount": Amount::from_grins(args.amount_grins).raw(),
            "fee_base": FEE_BASE,
            "selection_strategy": Self::selection_strategy(args.strategy, args.inputs),
            "message": args.message,
            "address": args.address,
        });
        self.owner_rpc_call("send", params).await
    }

    /// Receive a counterparty's slate; returns the signed slate.
    pub async fn receive_slate(
        &self,
        token: &SessionToken,
        slate: Value,
    ) -> Result<Value, ClientError> {
        self.owner_rpc_call("receive", json!({ "session_token": token.as_str(), "slate": slate }))
            .await
    }

    /// Finalize a slate and broadcast the transaction.
    pub async fn finalize_slate(
        &self,
        token: &SessionToken,
        slate: Value,
    ) -> Result<Value, ClientError> {
        self.owner_rpc_call("finalize", json!({ "session_token": token.as_str(), "slate": slate }))
            .await
    }

    /// The wallet's Tor onion address, if the node has one configured.
    pub async fn tor_address(&self, token: &SessionToken) -> Result<Option<String>, ClientError> {
        let result = self
            .owner_rpc_call("tor_address", json!({ "session_token": token.as_str() }))
            .await?;
        Ok(result
            .get("tor_address")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    // ── Foreign RPC surface ────────────────────────────────────────────

    /// Transaction details by slate id, from the foreign API.
    pub async fn tx_details(&self, slate_id: &str) -> Result<Value, ClientError> {
        let envelope = self
            .transport
            .rpc(
                &self.resolver.url(ApiSurface::ForeignRpc),
                "tx_details",
                json!({ "slate_id": slate_id }),
            )
            .await?;
        Self::rpc_result("tx_details", envelope)
    }
}
