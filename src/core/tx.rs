//! Transaction envelopes for the dual-signer flow.
//!
//! Server-built transactions arrive as base64 bincode blobs bound to a recent
//! blockhash. The blockhash is a time-boxed lease: using the payload after the
//! lease lapses must fail fast instead of broadcasting a transaction the
//! cluster will reject with an ambiguous error.

use std::time::{Duration, Instant};

use base64::Engine;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};

use crate::core::error::{SdkError, SdkResult};

/// Single-use mint authority generated per launch attempt. Signing consumes
/// the value, so a keypair can never be reused across attempts and the mint
/// address can never collide on a retry.
pub struct EphemeralMint {
    keypair: Keypair,
}

impl EphemeralMint {
    pub fn generate() -> Self {
        Self {
            keypair: Keypair::new(),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Apply the mint signature. Local operation, no network call; fails only
    /// on a malformed transaction that does not list the mint as a signer.
    /// Consumes the keypair: the mint authority is done after this.
    pub fn sign(self, mut tx: Transaction) -> SdkResult<Transaction> {
        let blockhash = tx.message.recent_blockhash;
        tx.try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| SdkError::Signing(format!("mint keypair could not sign: {e}")))?;
        Ok(tx)
    }
}

/// A server-built transaction that has not been signed yet. Single-use and
/// time-boxed by its blockhash.
pub struct UnsignedTransaction {
    tx: Transaction,
    blockhash: Hash,
    built_at: Instant,
    max_age: Duration,
}

impl UnsignedTransaction {
    /// Decode the builder's base64 bincode blob.
    pub fn decode_base64(blob: &str, max_age: Duration) -> SdkResult<Self> {
        let raw = base64::engine::general_purpose::STANDARD
            .decode(blob)
            .map_err(|e| SdkError::Wire(format!("transaction blob is not valid base64: {e}")))?;
        let tx: Transaction = bincode::deserialize(&raw)
            .map_err(|e| SdkError::Wire(format!("transaction blob failed to deserialize: {e}")))?;
        Ok(Self::from_parts(tx, max_age))
    }

    /// Wrap an already-decoded transaction, starting its lease now.
    pub fn from_parts(tx: Transaction, max_age: Duration) -> Self {
        let blockhash = tx.message.recent_blockhash;
        Self {
            tx,
            blockhash,
            built_at: Instant::now(),
            max_age,
        }
    }

    pub fn blockhash(&self) -> Hash {
        self.blockhash
    }

    pub fn is_expired(&self) -> bool {
        self.built_at.elapsed() >= self.max_age
    }

    /// Consume the lease. Fails fast once the blockhash window has lapsed;
    /// the caller must rebuild rather than retry the same payload.
    pub fn take(self) -> SdkResult<Transaction> {
        if self.is_expired() {
            return Err(SdkError::StaleTransaction(self.max_age.as_secs()));
        }
        Ok(self.tx)
    }
}

/// A fully-signed transaction ready for broadcast.
pub struct SignedTransaction {
    tx: Transaction,
}

impl SignedTransaction {
    /// Requires every signature slot to be populated; the dual-sign path must
    /// have applied both the mint and the wallet signatures by now.
    pub fn try_new(tx: Transaction) -> SdkResult<Self> {
        if !tx.is_signed() {
            return Err(SdkError::Signing(
                "transaction is missing required signatures".into(),
            ));
        }
        Ok(Self { tx })
    }

    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    /// First signature, which doubles as the transaction id on the cluster.
    pub fn signature(&self) -> Signature {
        self.tx.signatures[0]
    }

    pub fn encode_base64(&self) -> SdkResult<String> {
        let raw = bincode::serialize(&self.tx)
            .map_err(|e| SdkError::Wire(format!("transaction failed to serialize: {e}")))?;
        Ok(base64::engine::general_purpose::STANDARD.encode(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{system_instruction, system_program};

    fn two_signer_tx(mint: &Pubkey, wallet: &Pubkey) -> Transaction {
        let ix = system_instruction::create_account(wallet, mint, 1_000_000, 82, &system_program::id());
        let mut tx = Transaction::new_with_payer(&[ix], Some(wallet));
        tx.message.recent_blockhash = Hash::new_unique();
        tx
    }

    #[test]
    fn mint_signs_first_then_wallet_completes() {
        let mint = EphemeralMint::generate();
        let wallet = Keypair::new();
        let tx = two_signer_tx(&mint.pubkey(), &wallet.pubkey());

        let tx = mint.sign(tx).unwrap();
        assert!(!tx.is_signed());

        let mut tx = tx;
        let blockhash = tx.message.recent_blockhash;
        tx.try_partial_sign(&[&wallet], blockhash).unwrap();
        assert!(tx.is_signed());

        let signed = SignedTransaction::try_new(tx).unwrap();
        assert!(signed.encode_base64().is_ok());
    }

    #[test]
    fn mint_rejects_transaction_not_keyed_to_it() {
        let mint = EphemeralMint::generate();
        let wallet = Keypair::new();
        let other = Pubkey::new_unique();
        let tx = two_signer_tx(&other, &wallet.pubkey());

        assert!(matches!(mint.sign(tx), Err(SdkError::Signing(_))));
    }

    #[test]
    fn partially_signed_is_not_broadcastable() {
        let mint = EphemeralMint::generate();
        let wallet = Keypair::new();
        let tx = two_signer_tx(&mint.pubkey(), &wallet.pubkey());

        let tx = mint.sign(tx).unwrap();
        assert!(matches!(
            SignedTransaction::try_new(tx),
            Err(SdkError::Signing(_))
        ));
    }

    #[test]
    fn expired_lease_fails_fast() {
        let mint = Keypair::new();
        let wallet = Keypair::new();
        let tx = two_signer_tx(&mint.pubkey(), &wallet.pubkey());

        let unsigned = UnsignedTransaction::from_parts(tx, Duration::ZERO);
        assert!(unsigned.is_expired());
        assert!(matches!(
            unsigned.take(),
            Err(SdkError::StaleTransaction(_))
        ));
    }

    #[test]
    fn fresh_lease_is_usable() {
        let mint = Keypair::new();
        let wallet = Keypair::new();
        let tx = two_signer_tx(&mint.pubkey(), &wallet.pubkey());
        let expected_blockhash = tx.message.recent_blockhash;

        let unsigned = UnsignedTransaction::from_parts(tx, Duration::from_secs(60));
        assert_eq!(unsigned.blockhash(), expected_blockhash);
        assert!(!unsigned.is_expired());
        assert!(unsigned.take().is_ok());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            UnsignedTransaction::decode_base64("not-base64!!", Duration::from_secs(60)),
            Err(SdkError::Wire(_))
        ));
        let valid_b64 = base64::engine::general_purpose::STANDARD.encode(b"not a transaction");
        assert!(matches!(
            UnsignedTransaction::decode_base64(&valid_b64, Duration::from_secs(60)),
            Err(SdkError::Wire(_))
        ));
    }
}
