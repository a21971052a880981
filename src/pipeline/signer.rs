//! Wallet signer capability.
//!
//! The active signer is passed explicitly into each pipeline call rather than
//! living in ambient context, so tests can substitute a scripted wallet and
//! production can wrap any adapter.

use std::path::Path;

use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
    signer::Signer,
    transaction::Transaction,
};

use crate::core::error::{SdkError, SdkResult};

/// A capability to sign with the user's wallet. `sign` may suspend
/// indefinitely on user interaction and returns `SdkError::UserRejected`
/// when the user declines; that is terminal for the attempt.
///
/// By the time a wallet sees a launch transaction the mint signature is
/// already applied, which is what adapters that validate partial signatures
/// expect.
pub trait WalletSigner {
    fn pubkey(&self) -> Pubkey;
    fn sign(&self, tx: Transaction) -> SdkResult<Transaction>;
}

/// File- or keypair-backed wallet for CLI and server-side use.
pub struct LocalWallet {
    keypair: Keypair,
}

impl LocalWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn from_file(path: impl AsRef<Path>) -> SdkResult<Self> {
        let keypair = read_keypair_file(path.as_ref())
            .map_err(|e| SdkError::Validation(format!("could not read wallet keypair: {e}")))?;
        Ok(Self { keypair })
    }
}

impl WalletSigner for LocalWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    fn sign(&self, mut tx: Transaction) -> SdkResult<Transaction> {
        let blockhash = tx.message.recent_blockhash;
        tx.try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| SdkError::Signing(format!("wallet could not sign: {e}")))?;
        Ok(tx)
    }
}
