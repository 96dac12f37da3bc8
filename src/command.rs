//! Synthesis of `forge verify-contract` invocations.

use crate::{abi::ConstructorArgs, broadcast::DeployedContract};

/// The fixed verifier configuration shared by every synthesized command.
#[derive(Clone, Debug)]
pub struct VerifierConfig {
    /// Verification provider passed to `--verifier`.
    pub verifier: String,
    /// Verifier API endpoint.
    pub verifier_url: String,
    /// Etherscan API key.
    pub etherscan_api_key: String,
    /// Chain the contracts are deployed to.
    pub chain: String,
    /// Compiler version the contracts were built with.
    pub compiler_version: String,
}

/// Builds the verification command for one deployed contract.
///
/// Library entries are passed through verbatim, wrapped in double quotes; no
/// further shell escaping is applied, so malformed literals containing shell
/// metacharacters stay a correctness risk of the input.
pub fn verify_command(
    config: &VerifierConfig,
    contract: &DeployedContract,
    constructor_args: Option<&ConstructorArgs>,
    libraries: &[String],
) -> String {
    let mut command = format!(
        "forge verify-contract --verifier {} --verifier-url {} --watch \
         --etherscan-api-key {} {} {} --compiler-version \"{}\" --chain {}",
        config.verifier,
        config.verifier_url,
        config.etherscan_api_key,
        contract.address,
        contract.name,
        config.compiler_version,
        config.chain,
    );

    if let Some(args) = constructor_args {
        command.push_str(&format!(
            " --constructor-args $(cast abi-encode {})",
            args.encode_command()
        ));
    }

    for library in libraries {
        command.push_str(&format!(" --libraries \"{library}\""));
    }

    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn config() -> VerifierConfig {
        VerifierConfig {
            verifier: "etherscan".to_string(),
            verifier_url: "https://api-sepolia.arbiscan.io/api".to_string(),
            etherscan_api_key: "TESTKEY".to_string(),
            chain: "arbitrum-sepolia".to_string(),
            compiler_version: "v0.8.23+commit.f704f362".to_string(),
        }
    }

    fn contract(arguments: Option<Vec<String>>) -> DeployedContract {
        DeployedContract {
            name: "Foo".to_string(),
            address: address!("1111111111111111111111111111111111111111"),
            arguments,
        }
    }

    #[test]
    fn command_without_constructor_args() {
        let command = verify_command(&config(), &contract(None), None, &[]);
        assert_eq!(
            command,
            "forge verify-contract --verifier etherscan \
             --verifier-url https://api-sepolia.arbiscan.io/api --watch \
             --etherscan-api-key TESTKEY 0x1111111111111111111111111111111111111111 Foo \
             --compiler-version \"v0.8.23+commit.f704f362\" --chain arbitrum-sepolia"
        );
        assert!(!command.contains("--constructor-args"));
    }

    #[test]
    fn command_with_constructor_args() {
        let args = ConstructorArgs::infer(&["42".to_string(), "hello".to_string()]);
        let command = verify_command(&config(), &contract(None), Some(&args), &[]);
        assert!(command.contains(
            "--constructor-args $(cast abi-encode \"constructor(uint256,string)\" 42 hello)"
        ));
        assert_eq!(command.matches("--constructor-args").count(), 1);
    }

    #[test]
    fn command_with_libraries() {
        let libraries =
            vec!["src/Lib.sol:Lib:0xabcabcabcabcabcabcabcabcabcabcabcabcabca".to_string()];
        let command = verify_command(&config(), &contract(None), None, &libraries);
        assert_eq!(command.matches("--libraries").count(), 1);
        assert!(command.ends_with(
            " --libraries \"src/Lib.sol:Lib:0xabcabcabcabcabcabcabcabcabcabcabcabcabca\""
        ));
    }

    #[test]
    fn no_libraries_flag_for_empty_list() {
        let command = verify_command(&config(), &contract(None), None, &[]);
        assert!(!command.contains("--libraries"));
    }
}
