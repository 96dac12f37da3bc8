//! CLI arguments and the top-level run loop.

use crate::{
    abi,
    broadcast::BroadcastManifest,
    command::{verify_command, VerifierConfig},
    exec::CommandRunner,
};
use clap::{Parser, ValueHint};
use eyre::Result;
use std::{path::PathBuf, time::Duration};
use tracing::debug;

/// Verify every contract deployed by a forge broadcast.
///
/// Reads a broadcast file, extracts the `CREATE` transactions and submits
/// one `forge verify-contract` invocation per created contract, ABI-encoding
/// the recorded constructor arguments with `cast abi-encode`.
#[derive(Clone, Debug, Parser)]
#[command(name = "broadcast-verify", version)]
pub struct BroadcastVerifyArgs {
    /// Path to the broadcast file, e.g.
    /// `broadcast/Deploy.s.sol/421614/run-latest.json`.
    #[arg(value_hint = ValueHint::FilePath, value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Contract verification provider to use.
    #[arg(long, default_value = "etherscan", value_name = "VERIFIER")]
    pub verifier: String,

    /// The verifier URL.
    #[arg(
        long,
        env = "VERIFIER_URL",
        default_value = "https://api-sepolia.arbiscan.io/api",
        value_name = "VERIFIER_URL"
    )]
    pub verifier_url: String,

    /// Your Etherscan API key.
    #[arg(long, env = "ETHERSCAN_API_KEY", value_name = "ETHERSCAN_KEY")]
    pub etherscan_api_key: String,

    /// The chain the contracts are deployed to.
    #[arg(long, env = "CHAIN", default_value = "arbitrum-sepolia", value_name = "CHAIN")]
    pub chain: String,

    /// The compiler version used to build the contracts.
    #[arg(long, default_value = "v0.8.23+commit.f704f362", value_name = "VERSION")]
    pub compiler_version: String,

    /// Directory holding `<ContractName>.json` ABI files or foundry
    /// artifacts, used instead of inferring constructor argument types from
    /// their literals.
    #[arg(long, value_hint = ValueHint::DirPath, value_name = "PATH")]
    pub abi_dir: Option<PathBuf>,

    /// Skip contracts until the one with this name, useful to pick up an
    /// aborted run.
    #[arg(long, value_name = "NAME")]
    pub resume_from: Option<String>,

    /// Seconds to wait between verification submissions.
    #[arg(long, default_value = "1", value_name = "SECONDS")]
    pub delay: u64,

    /// Print the commands without executing them.
    #[arg(long)]
    pub dry_run: bool,
}

impl BroadcastVerifyArgs {
    pub fn run(self) -> Result<()> {
        let manifest = BroadcastManifest::load(&self.manifest)?;
        let commands = self.commands(&manifest)?;
        CommandRunner::new(Duration::from_secs(self.delay), self.dry_run).run_all(&commands)
    }

    /// Synthesizes the verification commands for `manifest`, honoring
    /// `--resume-from` and `--abi-dir`.
    pub fn commands(&self, manifest: &BroadcastManifest) -> Result<Vec<String>> {
        let mut contracts = manifest.created_contracts()?;

        if let Some(name) = &self.resume_from {
            let position = contracts
                .iter()
                .position(|c| &c.name == name)
                .ok_or_else(|| eyre::eyre!("No created contract named `{name}` to resume from"))?;
            debug!(target: "verify", "resuming from {name}, skipping {position} contracts");
            contracts.drain(..position);
        }

        let config = VerifierConfig {
            verifier: self.verifier.clone(),
            verifier_url: self.verifier_url.clone(),
            etherscan_api_key: self.etherscan_api_key.clone(),
            chain: self.chain.clone(),
            compiler_version: self.compiler_version.clone(),
        };

        let mut commands = Vec::with_capacity(contracts.len());
        for contract in &contracts {
            let constructor_args = match &contract.arguments {
                Some(arguments) => Some(abi::constructor_args(
                    &contract.name,
                    arguments,
                    self.abi_dir.as_deref(),
                )?),
                None => None,
            };
            commands.push(verify_command(
                &config,
                contract,
                constructor_args.as_ref(),
                manifest.libraries(),
            ));
        }
        debug!(target: "verify", "synthesized {} verification commands", commands.len());
        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        BroadcastVerifyArgs::command().debug_assert();
    }

    #[test]
    fn parses_defaults() {
        let args = BroadcastVerifyArgs::parse_from([
            "broadcast-verify",
            "--etherscan-api-key",
            "TESTKEY",
            "run-latest.json",
        ]);
        assert_eq!(args.verifier, "etherscan");
        assert_eq!(args.chain, "arbitrum-sepolia");
        assert_eq!(args.delay, 1);
        assert!(!args.dry_run);
    }
}
