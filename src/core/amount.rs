//! Lamport amount parsing and display formatting.
//!
//! Amount comparisons throughout the SDK are integer-only; decimal parsing
//! here is lossless string manipulation and float formatting exists solely
//! for display.

use solana_sdk::native_token::LAMPORTS_PER_SOL;

use crate::core::error::{SdkError, SdkResult};

const SOL_DECIMALS: usize = 9;

/// Parse a decimal SOL amount (e.g. `"1.5"`, `"10"`, `"0.000000001"`) into
/// lamports without going through floating point.
pub fn parse_sol(input: &str) -> SdkResult<u64> {
    let input = input.trim();
    let invalid = || SdkError::Validation(format!("invalid SOL amount: {input:?}"));

    let (whole, frac) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if frac.len() > SOL_DECIMALS {
        return Err(SdkError::Validation(format!(
            "SOL amounts support at most {SOL_DECIMALS} decimal places: {input:?}"
        )));
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let frac_lamports: u64 = if frac.is_empty() {
        0
    } else {
        let mut padded = frac.to_string();
        while padded.len() < SOL_DECIMALS {
            padded.push('0');
        }
        padded.parse().map_err(|_| invalid())?
    };

    whole
        .checked_mul(LAMPORTS_PER_SOL)
        .and_then(|v| v.checked_add(frac_lamports))
        .ok_or_else(|| SdkError::Validation(format!("SOL amount out of range: {input:?}")))
}

/// Display-only formatting of a lamport amount as SOL.
pub fn format_sol(lamports: u64) -> String {
    let whole = lamports / LAMPORTS_PER_SOL;
    let frac = lamports % LAMPORTS_PER_SOL;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:09}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}
