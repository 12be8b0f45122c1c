// ==============================
// src/pda.rs (canonical seeds)
// ==============================
#![forbid(unsafe_code)]

use solana_program::pubkey::Pubkey;

pub const SEED_USER: &[u8] = b"user";

/// Derives the per-payer user PDA. Seed order is fixed: payer key bytes
/// first, then the `"user"` tag. Any verifier with the same inputs must
/// arrive at the same `(address, bump)`.
pub fn derive_user_pda(program_id: &Pubkey, payer: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[payer.as_ref(), SEED_USER], program_id)
}
