// ==============================
// src/verify.rs
// ==============================
#![forbid(unsafe_code)]

use solana_sdk::pubkey::Pubkey;

use crate::{error::FlowError, rpc::LedgerConnection};

/// Single balance check, no retry: runs after confirmation has already
/// completed, so the value is final at the connection's commitment level.
pub async fn expect_balance<C: LedgerConnection>(
    ledger: &mut C,
    address: &Pubkey,
    expected: u64,
) -> Result<u64, FlowError> {
    let actual = ledger.get_balance(address).await?;
    if actual != expected {
        return Err(FlowError::BalanceMismatch {
            address: *address,
            expected,
            actual,
        });
    }
    Ok(actual)
}

/// Checks that a funding step left the account with a positive balance.
pub async fn expect_funded<C: LedgerConnection>(
    ledger: &mut C,
    address: &Pubkey,
) -> Result<u64, FlowError> {
    let actual = ledger.get_balance(address).await?;
    if actual == 0 {
        return Err(FlowError::NotFunded(*address));
    }
    Ok(actual)
}
