// ==============================
// src/rpc/mod.rs
// ==============================
#![forbid(unsafe_code)]

pub mod connection;
pub mod solana;

pub use connection::LedgerConnection;
pub use solana::{LedgerUrl, RetryConfig, SolanaConnection};
