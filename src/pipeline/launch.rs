//! The launch pipeline: stage, build, dual-sign, broadcast, register, and the
//! optional same-session dev buy.
//!
//! Nothing has an externally visible effect until broadcast succeeds; a user
//! can abandon the flow anywhere before that and lose only a discarded
//! keypair and an orphaned upload.

use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::{info, warn};

use crate::client::broadcast::BroadcastOutcome;
use crate::client::registry::NewToken;
use crate::core::error::SdkError;
use crate::core::tx::{EphemeralMint, SignedTransaction};
use crate::core::types::{LaunchRequest, TokenRecord};
use crate::pipeline::signer::WalletSigner;
use crate::pipeline::state::{FailureReason, LaunchState, LaunchTracker};
use crate::pipeline::{ArtifactStore, TokenSink, TxBroadcaster, TxSource};

/// Result of the optional dev buy. A confirmed launch is never failed
/// retroactively by its dev buy.
#[derive(Debug)]
pub enum DevBuyResult {
    Executed { signature: Signature },
    Unconfirmed { signature: Signature },
    Failed { message: String },
}

/// Terminal outcome of one launch attempt.
#[derive(Debug)]
pub enum LaunchOutcome {
    /// Launch confirmed and indexed.
    Confirmed {
        token: TokenRecord,
        signature: Signature,
        dev_buy: Option<DevBuyResult>,
    },
    /// Launch confirmed on-chain but the registry write failed; the token is
    /// live regardless. Retry indexing only, never the launch.
    ConfirmedUnindexed {
        mint: Pubkey,
        signature: Signature,
        warning: String,
        dev_buy: Option<DevBuyResult>,
    },
    /// The confirmation window elapsed. The transaction may still land;
    /// check the signature on an explorer before retrying, or the retry may
    /// double-mint.
    Unknown { mint: Pubkey, signature: Signature },
    /// The attempt failed before anything landed on-chain.
    Failed {
        reached: LaunchState,
        reason: FailureReason,
    },
}

pub struct LaunchPipeline<'a> {
    stager: &'a dyn ArtifactStore,
    builder: &'a dyn TxSource,
    broadcaster: &'a dyn TxBroadcaster,
    registry: &'a dyn TokenSink,
}

impl<'a> LaunchPipeline<'a> {
    pub fn new(
        stager: &'a dyn ArtifactStore,
        builder: &'a dyn TxSource,
        broadcaster: &'a dyn TxBroadcaster,
        registry: &'a dyn TokenSink,
    ) -> Self {
        Self {
            stager,
            builder,
            broadcaster,
            registry,
        }
    }

    /// Run one attempt to a terminal outcome. The wallet capability is
    /// passed explicitly; the ephemeral mint keypair is generated here,
    /// owned by this attempt alone, and consumed by its one signature.
    pub fn run(&self, req: &LaunchRequest, wallet: &dyn WalletSigner) -> LaunchOutcome {
        let mut tracker = LaunchTracker::new();

        if let Err(e) = req.validate() {
            return Self::fail(&mut tracker, FailureReason::Validation(e.to_string()));
        }

        // Stage first: a staging failure must abort before any on-chain step.
        // The stager also rejects input (image type) before uploading; that
        // is a validation failure to the caller, not an upstream one.
        let staged = match self.stager.stage(req) {
            Ok(staged) => staged,
            Err(SdkError::Validation(msg)) => {
                return Self::fail(&mut tracker, FailureReason::Validation(msg))
            }
            Err(e) => return Self::fail(&mut tracker, FailureReason::StageFailed(e.to_string())),
        };
        tracker.advance(LaunchState::Staged);

        let mint = EphemeralMint::generate();
        let mint_pubkey = mint.pubkey();
        info!(mint = %mint_pubkey, symbol = %req.symbol, "launch attempt started");

        let unsigned = match self.builder.launch_tx(
            &mint_pubkey,
            req,
            &staged.metadata_uri,
            &wallet.pubkey(),
        ) {
            Ok(unsigned) => unsigned,
            Err(e) => return Self::fail(&mut tracker, FailureReason::BuildFailed(e.to_string())),
        };
        tracker.advance(LaunchState::Built);

        // Mint signs first; wallet adapters expect the partial signature to
        // already be present when they display the transaction.
        let tx = match unsigned.take().and_then(|tx| mint.sign(tx)) {
            Ok(tx) => tx,
            Err(e) => {
                return Self::fail(&mut tracker, FailureReason::LocalSignFailed(e.to_string()))
            }
        };
        tracker.advance(LaunchState::SignedLocal);

        let tx = match wallet.sign(tx) {
            Ok(tx) => tx,
            Err(SdkError::UserRejected) => {
                return Self::fail(&mut tracker, FailureReason::UserRejected)
            }
            Err(e) => {
                return Self::fail(&mut tracker, FailureReason::WalletSignFailed(e.to_string()))
            }
        };
        tracker.advance(LaunchState::SignedUser);

        let signed = match SignedTransaction::try_new(tx) {
            Ok(signed) => signed,
            Err(e) => {
                return Self::fail(&mut tracker, FailureReason::WalletSignFailed(e.to_string()))
            }
        };

        tracker.advance(LaunchState::Broadcast);
        let signature = match self.broadcaster.broadcast(&signed) {
            Ok(BroadcastOutcome::Confirmed { signature }) => signature,
            Ok(BroadcastOutcome::Unknown { signature }) => {
                warn!(mint = %mint_pubkey, signature = %signature, "launch outcome unknown");
                return LaunchOutcome::Unknown {
                    mint: mint_pubkey,
                    signature,
                };
            }
            Err(e) => {
                return Self::fail(&mut tracker, FailureReason::BroadcastRejected(e.to_string()))
            }
        };
        tracker.advance(LaunchState::Confirmed);
        info!(mint = %mint_pubkey, signature = %signature, "launch confirmed");

        let registered = self.registry.register(&NewToken {
            mint: mint_pubkey,
            name: req.name.clone(),
            symbol: req.symbol.clone(),
            image_url: staged.image_uri.clone(),
            metadata_uri: staged.metadata_uri.clone(),
            creator_wallet: wallet.pubkey(),
            kind: req.kind.clone(),
        });

        // The dev buy runs whether or not indexing succeeded; the pool is
        // live on-chain either way.
        let dev_buy = req
            .dev_buy_lamports
            .map(|lamports| self.dev_buy(&mint_pubkey, lamports, wallet));

        match registered {
            Ok(token) => LaunchOutcome::Confirmed {
                token,
                signature,
                dev_buy,
            },
            Err(e) => {
                let warning = match &e {
                    SdkError::Conflict(msg) => {
                        format!("token already indexed: {msg}")
                    }
                    other => format!("registry write failed: {other}"),
                };
                warn!(mint = %mint_pubkey, warning = %warning, "launch saved with a warning");
                LaunchOutcome::ConfirmedUnindexed {
                    mint: mint_pubkey,
                    signature,
                    warning,
                    dev_buy,
                }
            }
        }
    }

    fn dev_buy(&self, mint: &Pubkey, lamports: u64, wallet: &dyn WalletSigner) -> DevBuyResult {
        // The amount was validated against the buy ceiling with the request.
        let result = self
            .builder
            .swap_tx(mint, lamports, &wallet.pubkey(), true)
            .and_then(|unsigned| unsigned.take())
            .and_then(|tx| wallet.sign(tx))
            .and_then(SignedTransaction::try_new)
            .and_then(|signed| self.broadcaster.broadcast(&signed));
        match result {
            Ok(BroadcastOutcome::Confirmed { signature }) => {
                info!(mint = %mint, signature = %signature, "dev buy confirmed");
                DevBuyResult::Executed { signature }
            }
            Ok(BroadcastOutcome::Unknown { signature }) => {
                warn!(mint = %mint, signature = %signature, "dev buy outcome unknown");
                DevBuyResult::Unconfirmed { signature }
            }
            Err(e) => {
                warn!(mint = %mint, error = %e, "dev buy failed");
                DevBuyResult::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    fn fail(tracker: &mut LaunchTracker, reason: FailureReason) -> LaunchOutcome {
        let reached = tracker.fail(&reason);
        LaunchOutcome::Failed { reached, reason }
    }
}
