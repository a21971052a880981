//! Swap quoting and execution against a launched pool.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::api::{wire, ApiClient};
use crate::client::broadcast::{BroadcastOutcome, Broadcaster};
use crate::client::builder::TxBuilderService;
use crate::core::constants::MAX_BUY_LAMPORTS;
use crate::core::error::{SdkError, SdkResult};
use crate::core::tx::SignedTransaction;
use crate::pipeline::signer::WalletSigner;

/// Serializes quote requests issued for a fast-changing input. A response is
/// only accepted if its ticket is still the newest issued one; a slow
/// response for an older input can never overwrite a newer quote, regardless
/// of arrival order.
#[derive(Debug, Default)]
pub struct QuoteTracker {
    seq: AtomicU64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuoteTicket(u64);

impl QuoteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for the current input state, invalidating all earlier
    /// tickets.
    pub fn issue(&self) -> QuoteTicket {
        QuoteTicket(self.seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a response holding this ticket still reflects the latest
    /// input.
    pub fn is_current(&self, ticket: QuoteTicket) -> bool {
        ticket.0 == self.seq.load(Ordering::SeqCst)
    }

    /// Run a fetch under a fresh ticket and keep the result only if no newer
    /// ticket was issued while it ran. `None` means superseded: the caller
    /// already has (or is about to get) a quote for newer input.
    pub fn latest_only<T>(&self, fetch: impl FnOnce() -> SdkResult<T>) -> SdkResult<Option<T>> {
        let ticket = self.issue();
        let value = fetch()?;
        Ok(self.is_current(ticket).then_some(value))
    }
}

pub struct SwapService {
    api: Arc<ApiClient>,
    builder: Arc<TxBuilderService>,
    broadcaster: Arc<Broadcaster>,
}

impl SwapService {
    pub fn new(
        api: Arc<ApiClient>,
        builder: Arc<TxBuilderService>,
        broadcaster: Arc<Broadcaster>,
    ) -> Self {
        Self {
            api,
            builder,
            broadcaster,
        }
    }

    /// Read-only output estimate. Best-effort: callers pairing this with a
    /// `QuoteTracker` should discard results whose ticket is stale.
    pub fn quote(&self, mint: &Pubkey, lamports: u64, is_buy: bool) -> SdkResult<u64> {
        let response: wire::SwapQuoteResponse = self.api.post_json(
            "/swap-quote",
            &wire::SwapQuoteRequest {
                mint: &mint.to_string(),
                amount: lamports,
                is_buy,
            },
        )?;
        debug!(mint = %mint, lamports, is_buy, estimated = response.estimated_output, "quoted");
        Ok(response.estimated_output)
    }

    /// Quote guarded by a tracker, for callers re-quoting on every input
    /// change. Returns `None` when the input changed while the request was
    /// in flight; the stale estimate must be discarded, not displayed.
    pub fn quote_tracked(
        &self,
        tracker: &QuoteTracker,
        mint: &Pubkey,
        lamports: u64,
        is_buy: bool,
    ) -> SdkResult<Option<u64>> {
        tracker.latest_only(|| self.quote(mint, lamports, is_buy))
    }

    /// Build, sign and broadcast a swap. The buy ceiling is enforced here,
    /// before any network call, so an over-limit request never costs a
    /// build+sign round-trip.
    pub fn execute(
        &self,
        mint: &Pubkey,
        lamports: u64,
        wallet: &dyn WalletSigner,
        is_buy: bool,
    ) -> SdkResult<BroadcastOutcome> {
        check_buy_ceiling(lamports, is_buy)?;
        if lamports == 0 {
            return Err(SdkError::Validation("swap amount must be > 0".into()));
        }
        let unsigned = self
            .builder
            .build_swap_tx(mint, lamports, &wallet.pubkey(), is_buy)?;
        let tx = wallet.sign(unsigned.take()?)?;
        let signed = SignedTransaction::try_new(tx)?;
        self.broadcaster.broadcast(&signed)
    }
}

/// Client-side gate for the platform buy ceiling.
pub fn check_buy_ceiling(lamports: u64, is_buy: bool) -> SdkResult<()> {
    if is_buy && lamports > MAX_BUY_LAMPORTS {
        return Err(SdkError::Validation(format!(
            "buy amount {lamports} exceeds platform ceiling of {MAX_BUY_LAMPORTS} lamports"
        )));
    }
    Ok(())
}
