// ==============================
// src/flows.rs
// ==============================
#![forbid(unsafe_code)]

use solana_sdk::{
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use tracing::info;

use crate::{error::FlowError, instruction, pda, rpc::LedgerConnection, verify};

/// Lamports the on-ledger program moves into the user PDA.
pub const PDA_FUNDING_LAMPORTS: u64 = 1_000_000_000;

/// Storage size of the data account created by the bootstrap flow.
pub const DATA_ACCOUNT_SPACE: u64 = 8;

/// Funds a fresh payer from the faucet, then creates a second account paying
/// exactly the rent-exempt minimum for `space` bytes.
pub struct DataAccountFlow {
    pub airdrop_lamports: u64,
    pub space: u64,
}

impl Default for DataAccountFlow {
    fn default() -> Self {
        Self {
            airdrop_lamports: 5 * LAMPORTS_PER_SOL,
            space: DATA_ACCOUNT_SPACE,
        }
    }
}

pub struct DataAccountReceipt {
    pub payer: Keypair,
    pub account: Keypair,
    pub rent_lamports: u64,
    pub signature: Signature,
}

impl DataAccountFlow {
    pub async fn run<C: LedgerConnection>(
        &self,
        ledger: &mut C,
    ) -> Result<DataAccountReceipt, FlowError> {
        let payer = Keypair::new();
        let account = Keypair::new();

        ledger.airdrop(&payer.pubkey(), self.airdrop_lamports).await?;
        let balance = verify::expect_funded(ledger, &payer.pubkey()).await?;
        info!(payer = %payer.pubkey(), balance, "payer funded");

        let rent_lamports = ledger
            .get_minimum_balance_for_rent_exemption(self.space as usize)
            .await?;
        info!(rent_lamports, space = self.space, "rent-exempt minimum fetched");

        let ix = instruction::create_data_account(
            &payer.pubkey(),
            &account.pubkey(),
            rent_lamports,
            self.space,
        );
        // createAccount names both the payer and the new account as signers.
        let signature = ledger
            .send_and_confirm(&[ix], &payer.pubkey(), &[&payer, &account])
            .await?;
        info!(account = %account.pubkey(), %signature, "data account created");

        Ok(DataAccountReceipt {
            payer,
            account,
            rent_lamports,
            signature,
        })
    }
}

/// Funds a fresh payer, derives its user PDA, and submits the zero-data
/// funding instruction; the on-ledger program credits the PDA.
pub struct PdaFundingFlow {
    pub program_id: Pubkey,
    pub airdrop_lamports: u64,
}

impl Default for PdaFundingFlow {
    fn default() -> Self {
        Self {
            program_id: crate::id(),
            airdrop_lamports: 2 * LAMPORTS_PER_SOL,
        }
    }
}

pub struct PdaFundingReceipt {
    pub payer: Keypair,
    pub pda: Pubkey,
    pub bump: u8,
    pub signature: Signature,
}

impl PdaFundingFlow {
    pub async fn run<C: LedgerConnection>(
        &self,
        ledger: &mut C,
    ) -> Result<PdaFundingReceipt, FlowError> {
        let payer = Keypair::new();
        ledger.airdrop(&payer.pubkey(), self.airdrop_lamports).await?;
        info!(payer = %payer.pubkey(), "payer funded");

        let (pda, bump) = pda::derive_user_pda(&self.program_id, &payer.pubkey());
        info!(%pda, bump, "derived user PDA");

        // Signed and serialized here rather than through send_and_confirm:
        // the payer is the only signing party named in the account list.
        let ix = instruction::fund_user_pda(&self.program_id, &payer.pubkey(), &pda);
        let blockhash = ledger.get_latest_blockhash().await?;
        let mut transaction = Transaction::new_with_payer(&[ix], Some(&payer.pubkey()));
        transaction.try_sign(&[&payer], blockhash)?;

        let signature = ledger.send_transaction(transaction).await?;
        if !ledger.confirm_transaction(&signature).await? {
            return Err(FlowError::ConfirmationTimeout(signature));
        }
        info!(%signature, "PDA funding transaction confirmed");

        Ok(PdaFundingReceipt {
            payer,
            pda,
            bump,
            signature,
        })
    }

    /// Runs the flow, then checks the PDA balance once against the expected
    /// funding amount.
    pub async fn run_and_verify<C: LedgerConnection>(
        &self,
        ledger: &mut C,
    ) -> Result<PdaFundingReceipt, FlowError> {
        let receipt = self.run(ledger).await?;
        verify::expect_balance(ledger, &receipt.pda, PDA_FUNDING_LAMPORTS).await?;
        Ok(receipt)
    }
}
