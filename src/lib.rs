// ==============================
// src/lib.rs
// ==============================
#![deny(warnings)]
#![forbid(unsafe_code)]

pub mod error;
pub mod flows;
pub mod instruction;
pub mod pda;
pub mod rpc;
pub mod verify;

solana_program::declare_id!("75Zp2SwmevG3tMGTHjjXkXde8KxufKyjqKZUbsThwn5f");
