// ==============================
// src/instruction.rs
// ==============================
#![forbid(unsafe_code)]

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_instruction, system_program,
};

/// `createAccount` for a fresh data account. The account stays owned by the
/// system program; both `payer` and `new_account` must sign the transaction.
pub fn create_data_account(
    payer: &Pubkey,
    new_account: &Pubkey,
    lamports: u64,
    space: u64,
) -> Instruction {
    system_instruction::create_account(payer, new_account, lamports, space, &system_program::id())
}

/// Zero-data funding instruction for the user PDA. The on-ledger program
/// requires this exact account order: payer, PDA, system program.
pub fn fund_user_pda(program_id: &Pubkey, payer: &Pubkey, pda: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(*pda, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: Vec::new(),
    }
}
