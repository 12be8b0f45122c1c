// ==============================
// src/rpc/solana.rs
// ==============================
#![forbid(unsafe_code)]

use std::{
    fmt::{Debug, Display, Formatter},
    time::Duration,
};

use async_trait::async_trait;
use solana_client::{client_error::ClientError, rpc_client::RpcClient};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction,
};
use tokio::time::{sleep, Instant};
use tracing::warn;

use crate::{error::FlowError, rpc::connection::LedgerConnection};

pub enum LedgerUrl {
    Localnet,
    Devnet,
    Testnet,
    Custom(String),
}

impl Display for LedgerUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            LedgerUrl::Localnet => "http://127.0.0.1:8899".to_string(),
            LedgerUrl::Devnet => "https://api.devnet.solana.com".to_string(),
            LedgerUrl::Testnet => "https://api.testnet.solana.com".to_string(),
            LedgerUrl::Custom(url) => url.clone(),
        };
        write!(f, "{}", str)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub retry_delay: Duration,
    /// Deadline for `confirm_transaction`; ledger transactions expire a
    /// bounded time after their blockhash was issued, so waiting longer
    /// than this cannot succeed.
    pub confirm_timeout: Duration,
    pub confirm_poll: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_retries: 10,
            retry_delay: Duration::from_millis(500),
            confirm_timeout: Duration::from_secs(30),
            confirm_poll: Duration::from_millis(500),
        }
    }
}

/// `LedgerConnection` over a JSON-RPC endpoint. Read calls are retried a
/// bounded number of times on transport failure; submissions are not.
pub struct SolanaConnection {
    client: RpcClient,
    payer: Keypair,
    commitment: CommitmentConfig,
    retry_config: RetryConfig,
}

impl Debug for SolanaConnection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolanaConnection {{ url: {} }}", self.client.url())
    }
}

impl SolanaConnection {
    pub fn new(url: LedgerUrl) -> Self {
        Self::new_with_commitment(url, CommitmentConfig::confirmed())
    }

    pub fn new_with_commitment(url: LedgerUrl, commitment: CommitmentConfig) -> Self {
        let client = RpcClient::new_with_commitment(url.to_string(), commitment);
        Self {
            client,
            payer: Keypair::new(),
            commitment,
            retry_config: RetryConfig::default(),
        }
    }

    pub fn set_retry_config(&mut self, retry_config: RetryConfig) {
        self.retry_config = retry_config;
    }

    async fn with_retry<T>(
        &self,
        mut op: impl FnMut() -> Result<T, ClientError>,
    ) -> Result<T, FlowError> {
        let mut attempts = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempts += 1;
                    if attempts > self.retry_config.max_retries {
                        return Err(err.into());
                    }
                    warn!(
                        "RPC request failed, retrying in {:?} (attempt {}/{}): {}",
                        self.retry_config.retry_delay, attempts, self.retry_config.max_retries, err
                    );
                    sleep(self.retry_config.retry_delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl LedgerConnection for SolanaConnection {
    fn payer(&self) -> &Keypair {
        &self.payer
    }

    async fn request_airdrop(
        &mut self,
        to: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, FlowError> {
        self.client
            .request_airdrop(to, lamports)
            .map_err(FlowError::from)
    }

    async fn confirm_transaction(&mut self, signature: &Signature) -> Result<bool, FlowError> {
        let deadline = Instant::now() + self.retry_config.confirm_timeout;
        loop {
            let confirmed = self
                .client
                .confirm_transaction_with_commitment(signature, self.commitment)?
                .value;
            if confirmed {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            sleep(self.retry_config.confirm_poll).await;
        }
    }

    async fn get_latest_blockhash(&mut self) -> Result<Hash, FlowError> {
        self.with_retry(|| self.client.get_latest_blockhash()).await
    }

    async fn get_balance(&mut self, address: &Pubkey) -> Result<u64, FlowError> {
        self.with_retry(|| self.client.get_balance(address)).await
    }

    async fn get_minimum_balance_for_rent_exemption(
        &mut self,
        data_len: usize,
    ) -> Result<u64, FlowError> {
        self.with_retry(|| self.client.get_minimum_balance_for_rent_exemption(data_len))
            .await
    }

    async fn get_account(&mut self, address: &Pubkey) -> Result<Option<Account>, FlowError> {
        let response = self
            .with_retry(|| self.client.get_account_with_commitment(address, self.commitment))
            .await?;
        Ok(response.value)
    }

    async fn send_transaction(
        &mut self,
        transaction: Transaction,
    ) -> Result<Signature, FlowError> {
        self.client
            .send_transaction(&transaction)
            .map_err(FlowError::from)
    }
}
