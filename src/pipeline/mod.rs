//! Launch and claim orchestration.
//!
//! The pipelines borrow their collaborators through narrow traits so the
//! production HTTP services and in-memory test doubles are interchangeable.

pub mod claim;
pub mod launch;
pub mod signer;
pub mod state;

use solana_sdk::pubkey::Pubkey;

use crate::client::broadcast::BroadcastOutcome;
use crate::client::registry::NewToken;
use crate::core::error::SdkResult;
use crate::core::tx::{SignedTransaction, UnsignedTransaction};
use crate::core::types::{ClaimRole, FeeMetrics, LaunchRequest, StagedArtifact, TokenRecord};

pub use claim::ClaimPipeline;
pub use launch::{DevBuyResult, LaunchOutcome, LaunchPipeline};
pub use signer::{LocalWallet, WalletSigner};
pub use state::{FailureReason, LaunchState, LaunchTracker};

/// Stages off-chain artifacts at the content-addressed store.
pub trait ArtifactStore {
    fn stage(&self, req: &LaunchRequest) -> SdkResult<StagedArtifact>;
}

/// Server-side builder for launch and swap transactions.
pub trait TxSource {
    fn launch_tx(
        &self,
        mint: &Pubkey,
        req: &LaunchRequest,
        metadata_uri: &str,
        user_wallet: &Pubkey,
    ) -> SdkResult<UnsignedTransaction>;

    fn swap_tx(
        &self,
        mint: &Pubkey,
        lamports: u64,
        user_wallet: &Pubkey,
        is_buy: bool,
    ) -> SdkResult<UnsignedTransaction>;
}

/// Server-side builder for fee-claim transactions.
pub trait ClaimTxSource {
    fn claim_tx(
        &self,
        mint: &Pubkey,
        claimant: &Pubkey,
        role: ClaimRole,
    ) -> SdkResult<UnsignedTransaction>;
}

/// Submits a fully-signed transaction and waits for confirmation.
pub trait TxBroadcaster {
    fn broadcast(&self, tx: &SignedTransaction) -> SdkResult<BroadcastOutcome>;
}

/// Durable token registry. Duplicate mints surface as `SdkError::Conflict`.
pub trait TokenSink {
    fn register(&self, token: &NewToken) -> SdkResult<TokenRecord>;
}

/// Live pool fee counters.
pub trait FeeReader {
    fn fee_metrics(&self, mint: &Pubkey) -> SdkResult<FeeMetrics>;
}
