// ==============================
// src/error.rs
// ==============================
#![forbid(unsafe_code)]

use std::io;

use solana_client::client_error::ClientError;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Signature,
    signer::SignerError,
    transaction::TransactionError,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    // Transport
    #[error("RPC client error: {0}")]
    Client(#[from] Box<ClientError>),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("IO error: {0}")]
    Io(#[from] Box<io::Error>),

    // Submission
    #[error("transaction failed: {0}")]
    Transaction(Box<TransactionError>),
    #[error("recent blockhash expired before the transaction could confirm")]
    BlockhashExpired,
    #[error("transaction is missing a required signature")]
    MissingSignature,
    #[error("fee payer cannot cover the transaction")]
    InsufficientFunds,
    #[error("signing failed: {0}")]
    Signer(Box<SignerError>),

    // Confirmation
    #[error("transaction {0} was not confirmed before the timeout")]
    ConfirmationTimeout(Signature),

    // Verification
    #[error("balance mismatch for {address}: expected {expected} lamports, found {actual}")]
    BalanceMismatch {
        address: Pubkey,
        expected: u64,
        actual: u64,
    },
    #[error("account {0} was not funded")]
    NotFunded(Pubkey),
}

impl From<ClientError> for FlowError {
    fn from(err: ClientError) -> Self {
        // Preflight surfaces ledger-side rejections through the client error;
        // pull the transaction error out so callers see the real category.
        match err.get_transaction_error() {
            Some(tx_err) => tx_err.into(),
            None => FlowError::Client(Box::new(err)),
        }
    }
}

impl From<TransactionError> for FlowError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::BlockhashNotFound => FlowError::BlockhashExpired,
            TransactionError::SignatureFailure => FlowError::MissingSignature,
            TransactionError::InsufficientFundsForFee => FlowError::InsufficientFunds,
            other => FlowError::Transaction(Box::new(other)),
        }
    }
}

impl From<SignerError> for FlowError {
    fn from(err: SignerError) -> Self {
        match err {
            SignerError::NotEnoughSigners => FlowError::MissingSignature,
            other => FlowError::Signer(Box::new(other)),
        }
    }
}

impl From<io::Error> for FlowError {
    fn from(err: io::Error) -> Self {
        FlowError::Io(Box::new(err))
    }
}
