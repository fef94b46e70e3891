//! Wallet session synchronization.
//!
//! One `SessionSync` instance exists per wallet session. It is the sole
//! owner of the session token and the wallet summary; everything else
//! reads cloned snapshots. Consistency rules:
//!
//! - at most one summary fetch is in flight at a time; the poll timer
//!   skips a tick rather than queueing behind a slow call
//! - a fetch result is applied only if the session epoch is unchanged
//!   since the call started, so responses that resolve after logout (or
//!   after a re-login) are discarded instead of clobbering fresh state
//! - the summary is replaced wholesale on success and retained untouched
//!   on failure

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use grindesk_client::{
    ClientError, FeeEstimate, NodeClient, SelectionStrategy, SendArgs, Transport,
};
use grindesk_types::{SessionToken, Transaction, WalletSummary};

use crate::error::SessionError;
use crate::views::{filter_transactions, TxFilter};

/// Default wallet summary poll interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Session tuning knobs.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Coarse session state, derived for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    LoggedOut,
    Polling,
    Mutating,
}

#[derive(Default)]
struct SessionState {
    token: Option<SessionToken>,
    username: Option<String>,
    summary: Option<WalletSummary>,
    /// Selected transaction by id only; re-resolved against the summary
    /// on every read so a superseded transaction can never be shown.
    selected_tx: Option<i64>,
    /// Bumped on every login/logout. A summary result is applied only if
    /// the epoch is unchanged since the call started.
    epoch: u64,
}

/// Owns the session token and wallet summary, reconciling them against
/// the node through periodic polling and user-triggered mutations.
pub struct SessionSync<T: Transport + 'static> {
    client: Arc<NodeClient<T>>,
    state: Arc<RwLock<SessionState>>,
    /// Held for the duration of a summary fetch; ticks that find it taken
    /// are skipped, never queued.
    poll_gate: Arc<Mutex<()>>,
    poller: Mutex<Option<JoinHandle<()>>>,
    mutating: AtomicBool,
    config: SessionConfig,
}

impl<T: Transport + 'static> SessionSync<T> {
    pub fn new(client: NodeClient<T>, config: SessionConfig) -> Self {
        Self {
            client: Arc::new(client),
            state: Arc::new(RwLock::new(SessionState::default())),
            poll_gate: Arc::new(Mutex::new(())),
            poller: Mutex::new(None),
            mutating: AtomicBool::new(false),
            config,
        }
    }

    pub fn client(&self) -> &NodeClient<T> {
        &self.client
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Log in against an existing wallet and start polling.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), SessionError> {
        let token = self.client.login(username, password).await?;
        self.install_session(username, token).await;
        info!(username, "logged in");
        Ok(())
    }

    /// Create a fresh wallet and log into it. Returns the seed words,
    /// in order, for the confirmation flow.
    pub async fn create_wallet(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Vec<String>, SessionError> {
        let wallet = self.client.create_wallet(username, password).await?;
        self.install_session(&wallet.username, wallet.token).await;
        info!(username, "wallet created");
        Ok(wallet.seed_words)
    }

    /// Restore a wallet from its seed phrase and log into it.
    pub async fn restore_wallet(
        &self,
        username: &str,
        password: &str,
        seed: &str,
    ) -> Result<(), SessionError> {
        let wallet = self.client.restore_wallet(username, password, seed).await?;
        self.install_session(&wallet.username, wallet.token).await;
        info!(username, "wallet restored");
        Ok(())
    }

    async fn install_session(&self, username: &str, token: SessionToken) {
        {
            let mut state = self.state.write().await;
            state.token = Some(token);
            state.username = Some(username.to_string());
            state.summary = None;
            state.selected_tx = None;
            state.epoch += 1;
        }
        self.start_poller().await;
    }

    /// Tear down the session optimistically: the poller is cancelled and
    /// local state cleared whether or not the node acknowledges the
    /// logout. A node-side session that outlives us expires on its own.
    pub async fn logout(&self) {
        if let Some(handle) = self.poller.lock().await.take() {
            handle.abort();
        }
        let token = {
            let mut state = self.state.write().await;
            state.epoch += 1;
            state.username = None;
            state.summary = None;
            state.selected_tx = None;
            state.token.take()
        };
        if let Some(token) = token {
            if !self.client.logout(&token).await {
                warn!("node did not acknowledge logout; session will expire server-side");
            }
        }
        info!("logged out");
    }

    async fn start_poller(&self) {
        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        let poll_gate = Arc::clone(&self.poll_gate);
        let poll_interval = self.config.poll_interval;
        let handle = tokio::spawn(async move {
            // First fire after one full interval, like the timer it replaces.
            let mut ticker = interval_at(Instant::now() + poll_interval, poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                poll_once(&client, &state, &poll_gate).await;
            }
        });
        if let Some(old) = self.poller.lock().await.replace(handle) {
            old.abort();
        }
    }

    /// Fetch a summary outside the regular schedule. Returns `false` when
    /// a poll is already in flight or the fetch did not update the
    /// summary.
    pub async fn refresh_now(&self) -> bool {
        poll_once(&self.client, &self.state, &self.poll_gate).await
    }

    // ── Snapshots ──────────────────────────────────────────────────────

    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.token.is_some()
    }

    pub async fn username(&self) -> Option<String> {
        self.state.read().await.username.clone()
    }

    /// The latest successfully fetched summary, if any.
    pub async fn summary(&self) -> Option<WalletSummary> {
        self.state.read().await.summary.clone()
    }

    pub async fn phase(&self) -> SessionPhase {
        if !self.is_logged_in().await {
            SessionPhase::LoggedOut
        } else if self.mutating.load(Ordering::Relaxed) {
            SessionPhase::Mutating
        } else {
            SessionPhase::Polling
        }
    }

    /// Transactions in the current summary matching `filter`, recomputed
    /// on every read.
    pub async fn transactions(&self, filter: TxFilter) -> Vec<Transaction> {
        match &self.state.read().await.summary {
            Some(summary) => filter_transactions(&summary.transactions, filter),
            None => Vec::new(),
        }
    }

    // ── Selection ──────────────────────────────────────────────────────

    /// Remember a transaction by id. The id is re-resolved on every read;
    /// it never pins a snapshot of the transaction itself.
    pub async fn select_transaction(&self, tx_id: i64) {
        self.state.write().await.selected_tx = Some(tx_id);
    }

    pub async fn clear_selection(&self) {
        self.state.write().await.selected_tx = None;
    }

    /// The selected transaction, resolved against the current summary.
    /// `None` when nothing is selected or the id has been superseded.
    pub async fn selected_transaction(&self) -> Option<Transaction> {
        let state = self.state.read().await;
        let id = state.selected_tx?;
        state.summary.as_ref()?.transaction(id).cloned()
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Cancel a transaction. `Ok(None)` is silent success; `Ok(Some(_))`
    /// carries the node's warning text for the UI to show verbatim.
    pub async fn cancel_tx(&self, tx_id: i64) -> Result<Option<String>, SessionError> {
        let (token, previous_selection) = self.begin_mutation(tx_id).await?;
        info!(tx_id, "cancelling transaction");
        let result = self.client.cancel_tx(&token, tx_id).await;
        self.finish_mutation(result, previous_selection).await
    }

    /// Repost a stuck transaction. Same contract as [`SessionSync::cancel_tx`].
    pub async fn repost_tx(&self, tx_id: i64) -> Result<Option<String>, SessionError> {
        let (token, previous_selection) = self.begin_mutation(tx_id).await?;
        info!(tx_id, "reposting transaction");
        let result = self.client.repost_tx(&token, tx_id).await;
        self.finish_mutation(result, previous_selection).await
    }

    /// Validate the target and optimistically clear the selection before
    /// the round trip, so the confirmation UI never shows a stale
    /// "in progress" selection.
    async fn begin_mutation(
        &self,
        tx_id: i64,
    ) -> Result<(SessionToken, Option<i64>), SessionError> {
        let mut state = self.state.write().await;
        let token = state.token.clone().ok_or(SessionError::NotLoggedIn)?;
        let present = state.summary.as_ref().is_some_and(|s| s.contains(tx_id));
        if !present {
            return Err(SessionError::UnknownTransaction(tx_id));
        }
        let previous_selection = state.selected_tx.take();
        self.mutating.store(true, Ordering::Relaxed);
        Ok((token, previous_selection))
    }

    /// A transport error restores the optimistic deselection; the next
    /// scheduled poll reconciles everything else.
    async fn finish_mutation(
        &self,
        result: Result<String, ClientError>,
        previous_selection: Option<i64>,
    ) -> Result<Option<String>, SessionError> {
        self.mutating.store(false, Ordering::Relaxed);
        match result {
            Ok(response) if response.is_empty() => Ok(None),
            Ok(warning) => {
                warn!(%warning, "node returned a warning");
                Ok(Some(warning))
            }
            Err(e) => {
                if previous_selection.is_some() {
                    self.state.write().await.selected_tx = previous_selection;
                }
                Err(e.into())
            }
        }
    }

    // ── Owner operations requiring a live session ──────────────────────

    async fn require_token(&self) -> Result<SessionToken, SessionError> {
        self.state
            .read()
            .await
            .token
            .clone()
            .ok_or(SessionError::NotLoggedIn)
    }

    pub async fn estimate_fee(
        &self,
        amount_grins: f64,
        strategy: SelectionStrategy,
        inputs: Vec<String>,
        message: &str,
    ) -> Result<FeeEstimate, SessionError> {
        let token = self.require_token().await?;
        Ok(self
            .client
            .estimate_fee(&token, amount_grins, strategy, inputs, message)
            .await?)
    }

    pub async fn send(&self, args: SendArgs) -> Result<Value, SessionError> {
        let token = self.require_token().await?;
        Ok(self.client.send(&token, args).await?)
    }

    pub async fn receive_slate(&self, slate: Value) -> Result<Value, SessionError> {
        let token = self.require_token().await?;
        Ok(self.client.receive_slate(&token, slate).await?)
    }

    pub async fn finalize_slate(&self, slate: Value) -> Result<Value, SessionError> {
        let token = self.require_token().await?;
        Ok(self.client.finalize_slate(&token, slate).await?)
    }

    pub async fn tor_address(&self) -> Result<Option<String>, SessionError> {
        let token = self.require_token().await?;
        Ok(self.client.tor_address(&token).await?)
    }

    /// Trigger a full wallet rescan. Best-effort, like the client call.
    pub async fn rescan(&self) -> Result<bool, SessionError> {
        let token = self.require_token().await?;
        Ok(self.client.rescan(&token).await)
    }
}

impl<T: Transport + 'static> Drop for SessionSync<T> {
    fn drop(&mut self) {
        if let Ok(mut poller) = self.poller.try_lock() {
            if let Some(handle) = poller.take() {
                handle.abort();
            }
        }
    }
}

/// One summary fetch attempt. Returns `true` only when a fresh summary
/// was applied.
async fn poll_once<T: Transport>(
    client: &NodeClient<T>,
    state: &RwLock<SessionState>,
    poll_gate: &Mutex<()>,
) -> bool {
    // Skip-if-busy: a slow call suppresses ticks instead of queueing them.
    let Ok(_gate) = poll_gate.try_lock() else {
        debug!("summary poll already in flight; skipping tick");
        return false;
    };
    let (token, epoch) = {
        let state = state.read().await;
        match &state.token {
            Some(token) => (token.clone(), state.epoch),
            None => return false,
        }
    };
    let result = client.wallet_summary(&token).await;
    let mut state = state.write().await;
    if state.epoch != epoch {
        debug!("discarding stale wallet summary");
        return false;
    }
    match result {
        Ok(Some(summary)) => {
            state.summary = Some(summary);
            true
        }
        Ok(None) => {
            debug!("wallet summary unreadable; keeping previous");
            false
        }
        Err(e) => {
            warn!("wallet summary poll failed: {e}");
            false
        }
    }
}
