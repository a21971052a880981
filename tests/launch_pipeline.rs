//! End-to-end launch and claim flows against in-memory collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use solana_sdk::{
    hash::Hash, pubkey::Pubkey, signature::Keypair, signer::Signer, system_instruction,
    system_program, transaction::Transaction,
};

use curvepad_sdk::client::broadcast::BroadcastOutcome;
use curvepad_sdk::client::registry::NewToken;
use curvepad_sdk::core::error::{SdkError, SdkResult};
use curvepad_sdk::core::tx::{SignedTransaction, UnsignedTransaction};
use curvepad_sdk::core::types::{
    ClaimRole, FeeMetrics, LaunchRequest, StagedArtifact, TokenRecord,
};
use curvepad_sdk::pipeline::{
    ArtifactStore, ClaimPipeline, ClaimTxSource, DevBuyResult, FailureReason, FeeReader,
    LaunchOutcome, LaunchPipeline, LaunchState, LocalWallet, TokenSink, TxBroadcaster, TxSource,
    WalletSigner,
};

fn launch_request() -> LaunchRequest {
    LaunchRequest::new("Dogwifpool", "WIFP", vec![0u8; 64])
}

enum StageScript {
    Succeed,
    UpstreamError,
    RejectInput,
}

struct FakeStore {
    script: StageScript,
}

impl FakeStore {
    fn succeeding() -> Self {
        Self {
            script: StageScript::Succeed,
        }
    }
}

impl ArtifactStore for FakeStore {
    fn stage(&self, _req: &LaunchRequest) -> SdkResult<StagedArtifact> {
        match self.script {
            StageScript::Succeed => Ok(StagedArtifact {
                image_uri: "ipfs://img1".into(),
                metadata_uri: "ipfs://meta1".into(),
            }),
            StageScript::UpstreamError => Err(SdkError::Upstream {
                status: 500,
                message: "upload store down".into(),
            }),
            StageScript::RejectInput => Err(SdkError::Validation(
                "unsupported image type (png, jpeg, gif, webp accepted)".into(),
            )),
        }
    }
}

/// Builds real two-signer transactions so the dual-sign path is exercised
/// for real, and records what it was asked to build.
#[derive(Default)]
struct FakeBuilder {
    launch_mints: Mutex<Vec<Pubkey>>,
    swap_calls: Mutex<Vec<(Pubkey, u64, bool)>>,
    claim_calls: AtomicUsize,
}

impl TxSource for FakeBuilder {
    fn launch_tx(
        &self,
        mint: &Pubkey,
        _req: &LaunchRequest,
        metadata_uri: &str,
        user_wallet: &Pubkey,
    ) -> SdkResult<UnsignedTransaction> {
        // Staging must have completed before any build is attempted.
        assert_eq!(metadata_uri, "ipfs://meta1");
        self.launch_mints.lock().unwrap().push(*mint);

        let ix = system_instruction::create_account(
            user_wallet,
            mint,
            1_000_000,
            82,
            &system_program::id(),
        );
        let mut tx = Transaction::new_with_payer(&[ix], Some(user_wallet));
        tx.message.recent_blockhash = Hash::new_unique();
        Ok(UnsignedTransaction::from_parts(tx, Duration::from_secs(60)))
    }

    fn swap_tx(
        &self,
        mint: &Pubkey,
        lamports: u64,
        user_wallet: &Pubkey,
        is_buy: bool,
    ) -> SdkResult<UnsignedTransaction> {
        self.swap_calls
            .lock()
            .unwrap()
            .push((*mint, lamports, is_buy));

        let ix = system_instruction::transfer(user_wallet, mint, lamports);
        let mut tx = Transaction::new_with_payer(&[ix], Some(user_wallet));
        tx.message.recent_blockhash = Hash::new_unique();
        Ok(UnsignedTransaction::from_parts(tx, Duration::from_secs(60)))
    }
}

impl ClaimTxSource for FakeBuilder {
    fn claim_tx(
        &self,
        mint: &Pubkey,
        claimant: &Pubkey,
        _role: ClaimRole,
    ) -> SdkResult<UnsignedTransaction> {
        self.claim_calls.fetch_add(1, Ordering::SeqCst);

        let ix = system_instruction::transfer(claimant, mint, 1);
        let mut tx = Transaction::new_with_payer(&[ix], Some(claimant));
        tx.message.recent_blockhash = Hash::new_unique();
        Ok(UnsignedTransaction::from_parts(tx, Duration::from_secs(60)))
    }
}

enum BroadcastScript {
    AlwaysConfirm,
    AlwaysUnknown,
    /// Confirm the first n broadcasts, then reject.
    ConfirmFirst(usize),
}

struct FakeBroadcaster {
    script: BroadcastScript,
    calls: AtomicUsize,
}

impl FakeBroadcaster {
    fn new(script: BroadcastScript) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TxBroadcaster for FakeBroadcaster {
    fn broadcast(&self, tx: &SignedTransaction) -> SdkResult<BroadcastOutcome> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let signature = tx.signature();
        match self.script {
            BroadcastScript::AlwaysConfirm => Ok(BroadcastOutcome::Confirmed { signature }),
            BroadcastScript::AlwaysUnknown => Ok(BroadcastOutcome::Unknown { signature }),
            BroadcastScript::ConfirmFirst(n) if call < n => {
                Ok(BroadcastOutcome::Confirmed { signature })
            }
            BroadcastScript::ConfirmFirst(_) => {
                Err(SdkError::BroadcastRejected("insufficient funds".into()))
            }
        }
    }
}

#[derive(Default)]
struct FakeRegistry {
    conflict: bool,
    writes: AtomicUsize,
}

impl FakeRegistry {
    fn conflicting() -> Self {
        Self {
            conflict: true,
            ..Self::default()
        }
    }
}

impl TokenSink for FakeRegistry {
    fn register(&self, token: &NewToken) -> SdkResult<TokenRecord> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.conflict {
            return Err(SdkError::Conflict(format!(
                "token {} already registered",
                token.mint
            )));
        }
        Ok(TokenRecord {
            mint: token.mint,
            name: token.name.clone(),
            symbol: token.symbol.clone(),
            image_url: token.image_url.clone(),
            metadata_uri: token.metadata_uri.clone(),
            pool_address: None,
            creator_wallet: token.creator_wallet,
            kind: token.kind.clone(),
            created_at: Utc::now(),
        })
    }
}

struct RejectingWallet {
    keypair: Keypair,
}

impl WalletSigner for RejectingWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    fn sign(&self, _tx: Transaction) -> SdkResult<Transaction> {
        Err(SdkError::UserRejected)
    }
}

struct FakeFees {
    metrics: FeeMetrics,
}

impl FeeReader for FakeFees {
    fn fee_metrics(&self, _mint: &Pubkey) -> SdkResult<FeeMetrics> {
        Ok(self.metrics)
    }
}

#[test]
fn happy_path_confirms_and_registers() {
    let store = FakeStore::succeeding();
    let builder = FakeBuilder::default();
    let broadcaster = FakeBroadcaster::new(BroadcastScript::AlwaysConfirm);
    let registry = FakeRegistry::default();
    let wallet = LocalWallet::new(Keypair::new());

    let pipeline = LaunchPipeline::new(&store, &builder, &broadcaster, &registry);
    let outcome = pipeline.run(&launch_request(), &wallet);

    match outcome {
        LaunchOutcome::Confirmed {
            token, dev_buy, ..
        } => {
            // The registered mint is the one the builder was asked to key
            // the transaction to.
            let built = builder.launch_mints.lock().unwrap();
            assert_eq!(built.len(), 1);
            assert_eq!(token.mint, built[0]);
            assert_eq!(token.symbol, "WIFP");
            assert_eq!(token.creator_wallet, wallet.pubkey());
            assert!(dev_buy.is_none());
        }
        other => panic!("expected Confirmed, got {other:?}"),
    }
    assert_eq!(broadcaster.call_count(), 1);
}

#[test]
fn each_attempt_uses_a_fresh_mint() {
    let store = FakeStore::succeeding();
    let builder = FakeBuilder::default();
    let broadcaster = FakeBroadcaster::new(BroadcastScript::AlwaysConfirm);
    let registry = FakeRegistry::default();
    let wallet = LocalWallet::new(Keypair::new());

    let pipeline = LaunchPipeline::new(&store, &builder, &broadcaster, &registry);
    pipeline.run(&launch_request(), &wallet);
    pipeline.run(&launch_request(), &wallet);

    let built = builder.launch_mints.lock().unwrap();
    assert_eq!(built.len(), 2);
    assert_ne!(built[0], built[1]);
}

#[test]
fn user_rejection_stops_before_broadcast() {
    let store = FakeStore::succeeding();
    let builder = FakeBuilder::default();
    let broadcaster = FakeBroadcaster::new(BroadcastScript::AlwaysConfirm);
    let registry = FakeRegistry::default();
    let wallet = RejectingWallet {
        keypair: Keypair::new(),
    };

    let pipeline = LaunchPipeline::new(&store, &builder, &broadcaster, &registry);
    let outcome = pipeline.run(&launch_request(), &wallet);

    match outcome {
        LaunchOutcome::Failed { reached, reason } => {
            assert_eq!(reached, LaunchState::SignedLocal);
            assert_eq!(reason, FailureReason::UserRejected);
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(broadcaster.call_count(), 0);
    assert_eq!(registry.writes.load(Ordering::SeqCst), 0);
}

#[test]
fn staging_failure_aborts_before_any_build() {
    let store = FakeStore {
        script: StageScript::UpstreamError,
    };
    let builder = FakeBuilder::default();
    let broadcaster = FakeBroadcaster::new(BroadcastScript::AlwaysConfirm);
    let registry = FakeRegistry::default();
    let wallet = LocalWallet::new(Keypair::new());

    let pipeline = LaunchPipeline::new(&store, &builder, &broadcaster, &registry);
    let outcome = pipeline.run(&launch_request(), &wallet);

    match outcome {
        LaunchOutcome::Failed { reached, reason } => {
            assert_eq!(reached, LaunchState::Drafting);
            assert!(matches!(reason, FailureReason::StageFailed(_)));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(builder.launch_mints.lock().unwrap().is_empty());
    assert_eq!(broadcaster.call_count(), 0);
}

#[test]
fn stager_input_rejection_surfaces_as_validation() {
    let store = FakeStore {
        script: StageScript::RejectInput,
    };
    let builder = FakeBuilder::default();
    let broadcaster = FakeBroadcaster::new(BroadcastScript::AlwaysConfirm);
    let registry = FakeRegistry::default();
    let wallet = LocalWallet::new(Keypair::new());

    let pipeline = LaunchPipeline::new(&store, &builder, &broadcaster, &registry);
    let outcome = pipeline.run(&launch_request(), &wallet);

    // A bad image type is the user's input problem, not an upstream outage;
    // the UI must see the validation tag.
    match outcome {
        LaunchOutcome::Failed { reached, reason } => {
            assert_eq!(reached, LaunchState::Drafting);
            assert!(matches!(reason, FailureReason::Validation(_)));
            assert_eq!(reason.tag(), "validation");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(builder.launch_mints.lock().unwrap().is_empty());
    assert_eq!(broadcaster.call_count(), 0);
}

#[test]
fn invalid_request_never_reaches_the_network() {
    let store = FakeStore::succeeding();
    let builder = FakeBuilder::default();
    let broadcaster = FakeBroadcaster::new(BroadcastScript::AlwaysConfirm);
    let registry = FakeRegistry::default();
    let wallet = LocalWallet::new(Keypair::new());

    let mut req = launch_request();
    req.symbol = "WAYTOOLONGFORASYMBOL".into();

    let pipeline = LaunchPipeline::new(&store, &builder, &broadcaster, &registry);
    let outcome = pipeline.run(&req, &wallet);

    match outcome {
        LaunchOutcome::Failed { reached, reason } => {
            assert_eq!(reached, LaunchState::Drafting);
            assert!(matches!(reason, FailureReason::Validation(_)));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(broadcaster.call_count(), 0);
}

#[test]
fn confirmation_timeout_is_not_a_failure() {
    let store = FakeStore::succeeding();
    let builder = FakeBuilder::default();
    let broadcaster = FakeBroadcaster::new(BroadcastScript::AlwaysUnknown);
    let registry = FakeRegistry::default();
    let wallet = LocalWallet::new(Keypair::new());

    let pipeline = LaunchPipeline::new(&store, &builder, &broadcaster, &registry);
    let outcome = pipeline.run(&launch_request(), &wallet);

    match outcome {
        LaunchOutcome::Unknown { mint, .. } => {
            let built = builder.launch_mints.lock().unwrap();
            assert_eq!(mint, built[0]);
        }
        other => panic!("expected Unknown, got {other:?}"),
    }
    // An unknown outcome must not be indexed as a live token.
    assert_eq!(registry.writes.load(Ordering::SeqCst), 0);
}

#[test]
fn registry_conflict_is_a_degraded_success() {
    let store = FakeStore::succeeding();
    let builder = FakeBuilder::default();
    let broadcaster = FakeBroadcaster::new(BroadcastScript::AlwaysConfirm);
    let registry = FakeRegistry::conflicting();
    let wallet = LocalWallet::new(Keypair::new());

    let pipeline = LaunchPipeline::new(&store, &builder, &broadcaster, &registry);
    let outcome = pipeline.run(&launch_request(), &wallet);

    match outcome {
        LaunchOutcome::ConfirmedUnindexed { mint, warning, .. } => {
            let built = builder.launch_mints.lock().unwrap();
            assert_eq!(mint, built[0]);
            assert!(warning.contains("already"));
        }
        other => panic!("expected ConfirmedUnindexed, got {other:?}"),
    }
}

#[test]
fn dev_buy_runs_in_the_same_session() {
    let store = FakeStore::succeeding();
    let builder = FakeBuilder::default();
    let broadcaster = FakeBroadcaster::new(BroadcastScript::AlwaysConfirm);
    let registry = FakeRegistry::default();
    let wallet = LocalWallet::new(Keypair::new());

    let mut req = launch_request();
    req.dev_buy_lamports = Some(500_000_000);

    let pipeline = LaunchPipeline::new(&store, &builder, &broadcaster, &registry);
    let outcome = pipeline.run(&req, &wallet);

    match outcome {
        LaunchOutcome::Confirmed { token, dev_buy, .. } => {
            assert!(matches!(dev_buy, Some(DevBuyResult::Executed { .. })));
            let swaps = builder.swap_calls.lock().unwrap();
            assert_eq!(swaps.as_slice(), &[(token.mint, 500_000_000, true)]);
        }
        other => panic!("expected Confirmed, got {other:?}"),
    }
    // Launch broadcast plus dev buy broadcast.
    assert_eq!(broadcaster.call_count(), 2);
}

#[test]
fn dev_buy_failure_does_not_fail_the_launch() {
    let store = FakeStore::succeeding();
    let builder = FakeBuilder::default();
    // Launch confirms, dev buy is rejected.
    let broadcaster = FakeBroadcaster::new(BroadcastScript::ConfirmFirst(1));
    let registry = FakeRegistry::default();
    let wallet = LocalWallet::new(Keypair::new());

    let mut req = launch_request();
    req.dev_buy_lamports = Some(500_000_000);

    let pipeline = LaunchPipeline::new(&store, &builder, &broadcaster, &registry);
    let outcome = pipeline.run(&req, &wallet);

    match outcome {
        LaunchOutcome::Confirmed { dev_buy, .. } => {
            assert!(matches!(dev_buy, Some(DevBuyResult::Failed { .. })));
        }
        other => panic!("expected Confirmed, got {other:?}"),
    }
}

#[test]
fn claim_is_gated_on_live_counters() {
    let fees = FakeFees {
        metrics: FeeMetrics::default(),
    };
    let builder = FakeBuilder::default();
    let broadcaster = FakeBroadcaster::new(BroadcastScript::AlwaysConfirm);
    let wallet = LocalWallet::new(Keypair::new());
    let mint = Pubkey::new_unique();

    let pipeline = ClaimPipeline::new(&fees, &builder, &broadcaster);
    let result = pipeline.run(&mint, &wallet, ClaimRole::Creator);

    assert!(matches!(
        result,
        Err(SdkError::ClaimNotAvailable(ClaimRole::Creator))
    ));
    // Nothing was built, signed or broadcast.
    assert_eq!(builder.claim_calls.load(Ordering::SeqCst), 0);
    assert_eq!(broadcaster.call_count(), 0);
}

#[test]
fn claim_proceeds_when_a_counter_is_positive() {
    let fees = FakeFees {
        metrics: FeeMetrics {
            creator_quote: 1,
            ..FeeMetrics::default()
        },
    };
    let builder = FakeBuilder::default();
    let broadcaster = FakeBroadcaster::new(BroadcastScript::AlwaysConfirm);
    let wallet = LocalWallet::new(Keypair::new());
    let mint = Pubkey::new_unique();

    let pipeline = ClaimPipeline::new(&fees, &builder, &broadcaster);
    let outcome = pipeline.run(&mint, &wallet, ClaimRole::Creator).unwrap();

    assert!(matches!(outcome, BroadcastOutcome::Confirmed { .. }));
    assert_eq!(builder.claim_calls.load(Ordering::SeqCst), 1);

    // A positive creator counter does not unlock the partner claim.
    let result = pipeline.run(&mint, &wallet, ClaimRole::Partner);
    assert!(matches!(
        result,
        Err(SdkError::ClaimNotAvailable(ClaimRole::Partner))
    ));
}
