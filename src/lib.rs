//! # broadcast-verify
//!
//! Batch source verification for contracts deployed by a forge broadcast.
//!
//! Reads a broadcast file, projects its `CREATE` transactions to deployed
//! contracts, synthesizes one `forge verify-contract` command per contract
//! (embedding a `cast abi-encode` substitution for recorded constructor
//! arguments and `--libraries` flags for linked libraries), and runs the
//! commands sequentially with a delay between submissions.

pub mod abi;
pub mod broadcast;
pub mod command;
pub mod exec;
pub mod opts;
