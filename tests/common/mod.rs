// ==============================
// tests/common/mod.rs
// ==============================
#![forbid(unsafe_code)]

use async_trait::async_trait;
use solana_banks_client::BanksClientError;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    program_error::ProgramError,
    pubkey::Pubkey,
    system_instruction,
};
use solana_program_test::*;
use solana_sdk::{
    account::Account,
    hash::Hash,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

use account_bootstrap::{
    error::FlowError,
    flows::{DATA_ACCOUNT_SPACE, PDA_FUNDING_LAMPORTS},
    pda::SEED_USER,
    rpc::LedgerConnection,
};

/// Stand-in for the external on-ledger program: creates the user PDA derived
/// from (payer, "user") and moves exactly PDA_FUNDING_LAMPORTS into it.
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    _instruction_data: &[u8],
) -> ProgramResult {
    let iter = &mut accounts.iter();
    let payer = next_account_info(iter)?;
    let pda = next_account_info(iter)?;
    let _system_program = next_account_info(iter)?;

    if !payer.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }

    let (expected, bump) = Pubkey::find_program_address(&[payer.key.as_ref(), SEED_USER], program_id);
    if expected != *pda.key {
        return Err(ProgramError::InvalidSeeds);
    }
    msg!("funding user PDA {}", pda.key);

    let ix = system_instruction::create_account(
        payer.key,
        pda.key,
        PDA_FUNDING_LAMPORTS,
        DATA_ACCOUNT_SPACE,
        program_id,
    );
    invoke_signed(
        &ix,
        accounts,
        &[&[payer.key.as_ref(), SEED_USER, &[bump]]],
    )
}

/// `LedgerConnection` over an in-process test bank. The faucet is a system
/// transfer from the test context payer.
pub struct ProgramTestLedger {
    pub ctx: ProgramTestContext,
}

pub async fn start_ledger() -> ProgramTestLedger {
    let pt = ProgramTest::new(
        "pda_funding_program",
        account_bootstrap::id(),
        processor!(process_instruction),
    );
    ProgramTestLedger {
        ctx: pt.start_with_context().await,
    }
}

fn banks_error(err: BanksClientError) -> FlowError {
    match err {
        BanksClientError::TransactionError(e) => e.into(),
        BanksClientError::SimulationError { err, .. } => err.into(),
        other => FlowError::Transport(other.to_string()),
    }
}

#[async_trait]
impl LedgerConnection for ProgramTestLedger {
    fn payer(&self) -> &Keypair {
        &self.ctx.payer
    }

    async fn request_airdrop(
        &mut self,
        to: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, FlowError> {
        let transfer = system_instruction::transfer(&self.ctx.payer.pubkey(), to, lamports);
        let blockhash = self.get_latest_blockhash().await?;
        let transaction = Transaction::new_signed_with_payer(
            &[transfer],
            Some(&self.ctx.payer.pubkey()),
            &[&self.ctx.payer],
            blockhash,
        );
        self.send_transaction(transaction).await
    }

    async fn confirm_transaction(&mut self, _signature: &Signature) -> Result<bool, FlowError> {
        // bank transactions are final once processed
        Ok(true)
    }

    async fn get_latest_blockhash(&mut self) -> Result<Hash, FlowError> {
        self.ctx
            .get_new_latest_blockhash()
            .await
            .map_err(FlowError::from)
    }

    async fn get_balance(&mut self, address: &Pubkey) -> Result<u64, FlowError> {
        self.ctx
            .banks_client
            .get_balance(*address)
            .await
            .map_err(banks_error)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &mut self,
        data_len: usize,
    ) -> Result<u64, FlowError> {
        let rent = self.ctx.banks_client.get_rent().await.map_err(banks_error)?;
        Ok(rent.minimum_balance(data_len))
    }

    async fn get_account(&mut self, address: &Pubkey) -> Result<Option<Account>, FlowError> {
        self.ctx
            .banks_client
            .get_account(*address)
            .await
            .map_err(banks_error)
    }

    async fn send_transaction(
        &mut self,
        transaction: Transaction,
    ) -> Result<Signature, FlowError> {
        let signature = *transaction
            .signatures
            .first()
            .expect("transaction has a signature slot");
        let result = self
            .ctx
            .banks_client
            .process_transaction_with_metadata(transaction)
            .await
            .map_err(banks_error)?;
        result.result.map_err(FlowError::from)?;
        Ok(signature)
    }
}
