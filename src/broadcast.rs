//! Deserialization of forge broadcast files.
//!
//! A broadcast file is the JSON record a deployment script leaves behind in
//! `broadcast/{script}.s.sol/{chain_id}/`. Only the fields needed to verify
//! the created contracts are modeled here.

use alloy_primitives::Address;
use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::path::Path;
use tracing::trace;

/// The opcode kind recorded in a broadcast transaction's `transactionType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallKind {
    Call,
    Callcode,
    Delegatecall,
    Staticcall,
    Create,
    Create2,
}

/// A single transaction entry of a broadcast file.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastTransaction {
    #[serde(rename = "transactionType")]
    pub opcode: CallKind,
    #[serde(default)]
    pub contract_name: Option<String>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    /// Constructor arguments as string literals; `None` means the contract
    /// takes no constructor arguments.
    #[serde(default)]
    pub arguments: Option<Vec<String>>,
}

/// The parts of a broadcast file this tool consumes.
#[derive(Clone, Debug, Deserialize)]
pub struct BroadcastManifest {
    pub transactions: Vec<BroadcastTransaction>,
    /// Pre-linked libraries as `"<File>:<Name>:<address>"` strings.
    #[serde(default)]
    pub libraries: Option<Vec<String>>,
}

/// One contract created by the broadcast, projected from a `CREATE`
/// transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedContract {
    pub name: String,
    pub address: Address,
    pub arguments: Option<Vec<String>>,
}

impl BroadcastManifest {
    /// Loads a broadcast file from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read broadcast file `{}`", path.display()))?;
        serde_json::from_str(&data)
            .wrap_err_with(|| format!("Invalid broadcast file `{}`", path.display()))
    }

    /// Returns the contracts created by this broadcast, in transaction order.
    ///
    /// Only `CREATE` transactions are considered. Duplicate deployments of
    /// the same contract are kept as-is and will be verified once each.
    pub fn created_contracts(&self) -> Result<Vec<DeployedContract>> {
        let mut contracts = Vec::new();
        for tx in &self.transactions {
            if tx.opcode != CallKind::Create {
                continue;
            }
            let name = tx
                .contract_name
                .clone()
                .ok_or_else(|| eyre::eyre!("CREATE transaction is missing `contractName`"))?;
            let address = tx.contract_address.ok_or_else(|| {
                eyre::eyre!("CREATE transaction for `{name}` is missing `contractAddress`")
            })?;
            contracts.push(DeployedContract { name, address, arguments: tx.arguments.clone() });
        }
        trace!(target: "verify", "found {} created contracts", contracts.len());
        Ok(contracts)
    }

    /// The library linkage entries, or an empty slice if the field was null
    /// or absent.
    pub fn libraries(&self) -> &[String] {
        self.libraries.as_deref().unwrap_or_default()
    }
}
