// ==============================
// src/rpc/connection.rs
// ==============================
#![forbid(unsafe_code)]

use async_trait::async_trait;
use solana_sdk::{
    account::Account,
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction,
};

use crate::error::FlowError;

/// Suspend-until-response interface to the ledger. Every call blocks the
/// calling task until the ledger answers or the implementation's own
/// timeout fires; nothing here waits unboundedly.
#[async_trait]
pub trait LedgerConnection: Send + Sync {
    /// Keypair backing faucet operations on this connection.
    fn payer(&self) -> &Keypair;

    async fn request_airdrop(&mut self, to: &Pubkey, lamports: u64)
        -> Result<Signature, FlowError>;

    /// Resolves to `true` once the transaction reached the connection's
    /// commitment level, `false` if the confirmation deadline passed first.
    async fn confirm_transaction(&mut self, signature: &Signature) -> Result<bool, FlowError>;

    async fn get_latest_blockhash(&mut self) -> Result<Hash, FlowError>;

    async fn get_balance(&mut self, address: &Pubkey) -> Result<u64, FlowError>;

    async fn get_minimum_balance_for_rent_exemption(
        &mut self,
        data_len: usize,
    ) -> Result<u64, FlowError>;

    async fn get_account(&mut self, address: &Pubkey) -> Result<Option<Account>, FlowError>;

    /// Submits an already signed transaction.
    async fn send_transaction(&mut self, transaction: Transaction)
        -> Result<Signature, FlowError>;

    /// Faucet request plus confirmation. Funding is a precondition for every
    /// flow, so an unconfirmed airdrop aborts the caller instead of retrying.
    async fn airdrop(&mut self, to: &Pubkey, lamports: u64) -> Result<Signature, FlowError> {
        let signature = self.request_airdrop(to, lamports).await?;
        if !self.confirm_transaction(&signature).await? {
            return Err(FlowError::ConfirmationTimeout(signature));
        }
        Ok(signature)
    }

    /// Attaches a fresh blockhash, collects one signature per signing party,
    /// submits, and waits for confirmation.
    async fn send_and_confirm(
        &mut self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> Result<Signature, FlowError> {
        let blockhash = self.get_latest_blockhash().await?;
        let mut transaction = Transaction::new_with_payer(instructions, Some(payer));
        transaction.try_sign(signers, blockhash)?;
        let signature = self.send_transaction(transaction).await?;
        if !self.confirm_transaction(&signature).await? {
            return Err(FlowError::ConfirmationTimeout(signature));
        }
        Ok(signature)
    }
}
