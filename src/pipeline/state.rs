//! Launch attempt state machine.
//!
//! One attempt moves through a fixed sequence; any step can divert to
//! `Failed` with a tagged reason. There is no automatic retry past
//! `SignedLocal`: the blockhash may have expired, so a retry restarts from
//! the build step with a fresh transaction, never by resubmitting the old
//! payload.

use tracing::debug;

/// States of a single launch attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaunchState {
    Drafting,
    Staged,
    Built,
    SignedLocal,
    SignedUser,
    Broadcast,
    Confirmed,
    Failed,
}

impl LaunchState {
    pub fn as_str(self) -> &'static str {
        match self {
            LaunchState::Drafting => "drafting",
            LaunchState::Staged => "staged",
            LaunchState::Built => "built",
            LaunchState::SignedLocal => "signed_local",
            LaunchState::SignedUser => "signed_user",
            LaunchState::Broadcast => "broadcast",
            LaunchState::Confirmed => "confirmed",
            LaunchState::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, LaunchState::Confirmed | LaunchState::Failed)
    }

    /// Transition table. `Failed` is reachable from every non-terminal
    /// state; everything else is strictly sequential.
    pub fn can_advance_to(self, next: LaunchState) -> bool {
        use LaunchState::*;
        if next == Failed {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Drafting, Staged)
                | (Staged, Built)
                | (Built, SignedLocal)
                | (SignedLocal, SignedUser)
                | (SignedUser, Broadcast)
                | (Broadcast, Confirmed)
        )
    }
}

/// Why an attempt failed. Tags are stable strings the UI layer maps to
/// messaging; nothing here is swallowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// Bad input, caught before any network effect. Recoverable by
    /// correcting the request.
    Validation(String),
    /// Artifact staging failed; no on-chain effect occurred.
    StageFailed(String),
    /// The builder rejected the request or returned an unusable payload.
    BuildFailed(String),
    /// The ephemeral mint keypair could not sign (malformed transaction).
    LocalSignFailed(String),
    /// The user declined the wallet prompt.
    UserRejected,
    /// The wallet failed for a reason other than rejection.
    WalletSignFailed(String),
    /// The network definitively rejected the submission.
    BroadcastRejected(String),
}

impl FailureReason {
    pub fn tag(&self) -> &'static str {
        match self {
            FailureReason::Validation(_) => "validation",
            FailureReason::StageFailed(_) => "stage_failed",
            FailureReason::BuildFailed(_) => "build_failed",
            FailureReason::LocalSignFailed(_) => "local_sign_failed",
            FailureReason::UserRejected => "user_rejected",
            FailureReason::WalletSignFailed(_) => "wallet_sign_failed",
            FailureReason::BroadcastRejected(_) => "broadcast_rejected",
        }
    }

    /// Whether retrying requires restarting from the build step (fresh
    /// blockhash) rather than from scratch.
    pub fn retry_from_build(&self) -> bool {
        matches!(
            self,
            FailureReason::UserRejected
                | FailureReason::WalletSignFailed(_)
                | FailureReason::BroadcastRejected(_)
        )
    }
}

/// Tracks one attempt's progress through the table.
#[derive(Debug)]
pub struct LaunchTracker {
    state: LaunchState,
}

impl LaunchTracker {
    pub fn new() -> Self {
        Self {
            state: LaunchState::Drafting,
        }
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    /// Move forward. The pipeline drives transitions in a fixed order, so an
    /// illegal transition is a programming error.
    pub fn advance(&mut self, next: LaunchState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal launch transition {} -> {}",
            self.state.as_str(),
            next.as_str()
        );
        debug!(from = self.state.as_str(), to = next.as_str(), "launch state");
        self.state = next;
    }

    /// Divert to `Failed`, returning the state the attempt had reached.
    pub fn fail(&mut self, reason: &FailureReason) -> LaunchState {
        let reached = self.state;
        debug!(
            from = reached.as_str(),
            reason = reason.tag(),
            "launch attempt failed"
        );
        self.state = LaunchState::Failed;
        reached
    }
}

impl Default for LaunchTracker {
    fn default() -> Self {
        Self::new()
    }
}
