//! Fee-claim flow: gate on live counters, then build, sign and broadcast.

use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::client::broadcast::BroadcastOutcome;
use crate::core::error::{SdkError, SdkResult};
use crate::core::tx::SignedTransaction;
use crate::core::types::ClaimRole;
use crate::pipeline::signer::WalletSigner;
use crate::pipeline::{ClaimTxSource, FeeReader, TxBroadcaster};

pub struct ClaimPipeline<'a> {
    fees: &'a dyn FeeReader,
    builder: &'a dyn ClaimTxSource,
    broadcaster: &'a dyn TxBroadcaster,
}

impl<'a> ClaimPipeline<'a> {
    pub fn new(
        fees: &'a dyn FeeReader,
        builder: &'a dyn ClaimTxSource,
        broadcaster: &'a dyn TxBroadcaster,
    ) -> Self {
        Self {
            fees,
            builder,
            broadcaster,
        }
    }

    /// Claim the accrued share for `role`. The claimable predicate is
    /// checked against live counters with exact integer comparison before
    /// any transaction is built, so a zero balance never costs a sign or
    /// broadcast round-trip. The server build step remains the authority; a
    /// caller bypassing this gate still has its claim rejected upstream.
    pub fn run(
        &self,
        mint: &Pubkey,
        wallet: &dyn WalletSigner,
        role: ClaimRole,
    ) -> SdkResult<BroadcastOutcome> {
        let metrics = self.fees.fee_metrics(mint)?;
        if !metrics.claimable(role) {
            return Err(SdkError::ClaimNotAvailable(role));
        }

        let unsigned = self.builder.claim_tx(mint, &wallet.pubkey(), role)?;
        let tx = wallet.sign(unsigned.take()?)?;
        let signed = SignedTransaction::try_new(tx)?;
        let outcome = self.broadcaster.broadcast(&signed)?;
        info!(mint = %mint, %role, signature = %outcome.signature(), "fee claim broadcast");
        Ok(outcome)
    }
}
