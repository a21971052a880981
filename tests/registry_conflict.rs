//! The registry treats the mint as a natural key: two concurrent writes for
//! the same mint produce exactly one row and one conflict.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::Utc;
use solana_sdk::pubkey::Pubkey;

use curvepad_sdk::client::registry::NewToken;
use curvepad_sdk::core::error::{SdkError, SdkResult};
use curvepad_sdk::core::types::{TokenKind, TokenRecord};
use curvepad_sdk::pipeline::TokenSink;

#[derive(Clone, Default)]
struct InMemoryRegistry {
    rows: Arc<Mutex<HashMap<Pubkey, TokenRecord>>>,
}

impl TokenSink for InMemoryRegistry {
    fn register(&self, token: &NewToken) -> SdkResult<TokenRecord> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&token.mint) {
            return Err(SdkError::Conflict(format!(
                "token {} already registered",
                token.mint
            )));
        }
        let record = TokenRecord {
            mint: token.mint,
            name: token.name.clone(),
            symbol: token.symbol.clone(),
            image_url: token.image_url.clone(),
            metadata_uri: token.metadata_uri.clone(),
            pool_address: None,
            creator_wallet: token.creator_wallet,
            kind: token.kind.clone(),
            created_at: Utc::now(),
        };
        rows.insert(token.mint, record.clone());
        Ok(record)
    }
}

fn new_token(mint: Pubkey, creator: Pubkey) -> NewToken {
    NewToken {
        mint,
        name: "Dogwifpool".into(),
        symbol: "WIFP".into(),
        image_url: "ipfs://img1".into(),
        metadata_uri: "ipfs://meta1".into(),
        creator_wallet: creator,
        kind: TokenKind::Memecoin,
    }
}

#[test]
fn duplicate_mint_yields_one_row_and_one_conflict() {
    let registry = InMemoryRegistry::default();
    let mint = Pubkey::new_unique();
    let creator = Pubkey::new_unique();

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let registry = registry.clone();
            let token = new_token(mint, creator);
            thread::spawn(move || registry.register(&token))
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();

    let oks = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(SdkError::Conflict(_))))
        .count();
    assert_eq!(oks, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(registry.rows.lock().unwrap().len(), 1);
}

#[test]
fn distinct_mints_register_independently() {
    let registry = InMemoryRegistry::default();
    let creator = Pubkey::new_unique();

    let first = registry
        .register(&new_token(Pubkey::new_unique(), creator))
        .unwrap();
    let second = registry
        .register(&new_token(Pubkey::new_unique(), creator))
        .unwrap();

    assert_ne!(first.mint, second.mint);
    assert_eq!(registry.rows.lock().unwrap().len(), 2);
}
