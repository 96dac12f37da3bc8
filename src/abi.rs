//! Constructor argument handling.
//!
//! Broadcast files record constructor arguments as plain string literals,
//! with no type information. To ABI-encode them for the verifier the type of
//! each argument is inferred from the literal's shape, unless an ABI source
//! is available (see [`constructor_args`]).

use alloy_json_abi::JsonAbi;
use eyre::{Result, WrapErr};
use std::{fmt, path::Path};
use tracing::{debug, warn};

/// A Solidity ABI type inferred from an argument literal.
///
/// This is a heuristic over the literal's textual shape, not a resolver
/// against the contract's actual constructor signature. Negative numbers,
/// hex literals of 42 characters or fewer, and booleans are knowingly
/// misclassified; supply an ABI source to get exact types instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InferredType {
    Address,
    Bytes,
    Uint256,
    String,
}

impl fmt::Display for InferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Address => "address",
            Self::Bytes => "bytes",
            Self::Uint256 => "uint256",
            Self::String => "string",
        };
        f.write_str(s)
    }
}

/// Infers the ABI type of a single non-array argument literal.
///
/// Rules, in order: 42 characters is an `address`, longer is `bytes`, a
/// non-empty all-digit literal is a `uint256`, anything else is a `string`.
///
/// Lengths are measured in UTF-8 bytes. Address and bytes literals are hex
/// strings and numbers are ASCII digits, so this only matters for non-ASCII
/// `string` arguments, which can cross the 42 threshold earlier than their
/// character count suggests.
pub fn infer_type(arg: &str) -> InferredType {
    if arg.len() == 42 {
        InferredType::Address
    } else if arg.len() > 42 {
        InferredType::Bytes
    } else if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
        InferredType::Uint256
    } else {
        InferredType::String
    }
}

/// The typed constructor arguments of one deployment, ready to be passed to
/// `cast abi-encode`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorArgs {
    pub types: Vec<String>,
    pub values: Vec<String>,
}

impl ConstructorArgs {
    /// Builds the argument list by inferring every type from its literal.
    ///
    /// Array literals (`[a, b, c]`) take their element type from the first
    /// element and are re-rendered without spaces after the commas.
    pub fn infer(args: &[String]) -> Self {
        let mut types = Vec::with_capacity(args.len());
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            if let Some(inner) = arg.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                let elements = inner.split(", ").collect::<Vec<_>>();
                let element_type = infer_type(elements.first().copied().unwrap_or_default());
                types.push(format!("{element_type}[] memory"));
                values.push(format!("[{}]", elements.join(",")));
            } else {
                types.push(infer_type(arg).to_string());
                values.push(arg.clone());
            }
        }
        Self { types, values }
    }

    /// Builds the argument list from known parameter types, keeping the same
    /// value rendering as [`Self::infer`].
    pub fn with_types(types: Vec<String>, args: &[String]) -> Self {
        let values = args
            .iter()
            .map(|arg| match arg.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                Some(inner) => format!("[{}]", inner.split(", ").collect::<Vec<_>>().join(",")),
                None => arg.clone(),
            })
            .collect();
        Self { types, values }
    }

    /// Renders the `cast abi-encode` argument fragment:
    /// `"constructor(t1,t2,...)" v1 v2 ...`.
    pub fn encode_command(&self) -> String {
        format!("\"constructor({})\" {}", self.types.join(","), self.values.join(" "))
    }
}

/// Resolves the constructor arguments for `contract_name`.
///
/// When `abi_dir` is set and `<abi_dir>/<contract_name>.json` holds an ABI
/// with a constructor whose parameter count matches, its parameter types are
/// used. In every other case the shape heuristic applies.
pub fn constructor_args(
    contract_name: &str,
    args: &[String],
    abi_dir: Option<&Path>,
) -> Result<ConstructorArgs> {
    if let Some(dir) = abi_dir {
        if let Some(types) = constructor_types_from_abi(dir, contract_name)? {
            if types.len() == args.len() {
                debug!(target: "verify", "using ABI constructor types for {contract_name}");
                return Ok(ConstructorArgs::with_types(types, args));
            }
            warn!(
                target: "verify",
                "ABI for {contract_name} has {} constructor parameters but the broadcast \
                 recorded {} arguments, falling back to inferred types",
                types.len(),
                args.len()
            );
        }
    }
    Ok(ConstructorArgs::infer(args))
}

/// Reads the constructor parameter types of `<dir>/<contract_name>.json`.
///
/// The file may be a bare JSON ABI array or a foundry artifact with a
/// top-level `abi` field. Returns `Ok(None)` if the file does not exist or
/// the ABI has no constructor.
pub fn constructor_types_from_abi(dir: &Path, contract_name: &str) -> Result<Option<Vec<String>>> {
    let path = dir.join(format!("{contract_name}.json"));
    if !path.exists() {
        return Ok(None);
    }
    let data = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("Failed to read ABI file `{}`", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&data)
        .wrap_err_with(|| format!("Invalid JSON in ABI file `{}`", path.display()))?;
    // Artifacts wrap the ABI in an `abi` field.
    let abi_value = match value.get("abi") {
        Some(abi) => abi.clone(),
        None => value,
    };
    let abi: JsonAbi = serde_json::from_value(abi_value)
        .wrap_err_with(|| format!("Invalid ABI in `{}`", path.display()))?;
    Ok(abi
        .constructor()
        .map(|c| c.inputs.iter().map(|input| input.selector_type().into_owned()).collect()))
}
