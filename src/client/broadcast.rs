//! Broadcast and confirmation.
//!
//! Submission goes through the platform send endpoint; confirmation is polled
//! straight from the cluster over JSON-RPC. A confirmation timeout is NOT a
//! failure: the transaction may still land, and the caller must be told so
//! distinctly to avoid an accidental double-mint on retry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use solana_sdk::signature::Signature;
use tracing::{debug, info, warn};

use crate::api::{wire, ApiClient};
use crate::core::error::{SdkError, SdkResult};
use crate::core::tx::SignedTransaction;

/// Terminal result of a broadcast attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BroadcastOutcome {
    /// The cluster confirmed the transaction.
    Confirmed { signature: Signature },
    /// The confirmation window elapsed with the transaction still pending.
    /// The outcome is unknown, not failed; check the signature on an
    /// explorer before retrying anything.
    Unknown { signature: Signature },
}

impl BroadcastOutcome {
    pub fn signature(&self) -> Signature {
        match self {
            BroadcastOutcome::Confirmed { signature } | BroadcastOutcome::Unknown { signature } => {
                *signature
            }
        }
    }
}

enum SignatureStatus {
    Pending,
    Confirmed,
    Failed(String),
}

pub struct Broadcaster {
    api: Arc<ApiClient>,
    rpc_url: String,
    agent: ureq::Agent,
    commitment: String,
    confirm_timeout: Duration,
    poll_interval: Duration,
}

impl Broadcaster {
    pub fn new(
        api: Arc<ApiClient>,
        rpc_url: &str,
        commitment: &str,
        confirm_timeout: Duration,
        poll_interval: Duration,
        http_timeout: Duration,
    ) -> Self {
        Self {
            api,
            rpc_url: rpc_url.to_string(),
            agent: ureq::AgentBuilder::new().timeout(http_timeout).build(),
            commitment: commitment.to_string(),
            confirm_timeout,
            poll_interval,
        }
    }

    /// Submit and wait. Submission rejection (bad signatures, expired
    /// blockhash, insufficient funds) surfaces immediately as an error;
    /// a confirmation timeout returns `Unknown`.
    pub fn broadcast(&self, tx: &SignedTransaction) -> SdkResult<BroadcastOutcome> {
        let encoded = tx.encode_base64()?;
        let response: wire::SendTransactionResponse = self
            .api
            .post_json("/send-transaction", &wire::SendTransactionRequest {
                signed_transaction: &encoded,
            })?;
        if !response.success {
            return Err(SdkError::BroadcastRejected(
                "send endpoint reported failure".into(),
            ));
        }
        let signature: Signature = response
            .signature
            .parse()
            .map_err(|_| SdkError::Wire(format!("invalid signature: {:?}", response.signature)))?;
        info!(signature = %signature, "transaction submitted");
        self.wait_for_confirmation(signature)
    }

    fn wait_for_confirmation(&self, signature: Signature) -> SdkResult<BroadcastOutcome> {
        let deadline = Instant::now() + self.confirm_timeout;
        loop {
            match self.signature_status(&signature) {
                Ok(SignatureStatus::Confirmed) => {
                    info!(signature = %signature, "transaction confirmed");
                    return Ok(BroadcastOutcome::Confirmed { signature });
                }
                Ok(SignatureStatus::Failed(err)) => {
                    return Err(SdkError::BroadcastRejected(format!(
                        "transaction failed on-chain: {err}"
                    )));
                }
                Ok(SignatureStatus::Pending) => {
                    debug!(signature = %signature, "still pending");
                }
                // Transient RPC trouble is not evidence of failure; keep
                // polling until the deadline decides.
                Err(e) => warn!(signature = %signature, error = %e, "status poll failed"),
            }
            if Instant::now() >= deadline {
                warn!(
                    signature = %signature,
                    timeout_secs = self.confirm_timeout.as_secs(),
                    "confirmation window elapsed; outcome unknown"
                );
                return Ok(BroadcastOutcome::Unknown { signature });
            }
            std::thread::sleep(self.poll_interval);
        }
    }

    fn signature_status(&self, signature: &Signature) -> SdkResult<SignatureStatus> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getSignatureStatuses",
            "params": [
                [signature.to_string()],
                { "searchTransactionHistory": true }
            ]
        });

        let response = self
            .agent
            .post(&self.rpc_url)
            .set("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| SdkError::Rpc(e.to_string()))?;
        let body: serde_json::Value = response
            .into_json()
            .map_err(|e| SdkError::Rpc(e.to_string()))?;

        if let Some(error) = body.get("error") {
            return Err(SdkError::Rpc(error.to_string()));
        }

        let status = &body["result"]["value"][0];
        if status.is_null() {
            return Ok(SignatureStatus::Pending);
        }
        if !status["err"].is_null() {
            return Ok(SignatureStatus::Failed(status["err"].to_string()));
        }
        let confirmation = status["confirmationStatus"].as_str().unwrap_or("processed");
        if confirmation == "finalized" || confirmation == self.commitment {
            Ok(SignatureStatus::Confirmed)
        } else {
            Ok(SignatureStatus::Pending)
        }
    }
}
