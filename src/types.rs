use std::sync::Arc;

use ethers_providers::{Http, Provider};
use serde::{Deserialize, Serialize};

/// The raw envelope every Etherscan-style API call answers with.
///
/// `result` is heterogeneous: a string carrying the failure cause when
/// `status != "1"`, an array of source-code records otherwise.
#[derive(Clone, Debug, Deserialize)]
pub struct ExplorerResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub result: serde_json::Value,
}

/// A verified contract's name and parsed ABI. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbiResult {
    /// Contract name as reported by the explorer, possibly empty.
    pub name: String,
    /// The standard contract-ABI JSON array, passed through verbatim.
    pub abi: Vec<serde_json::Value>,
}

/// Per-fetch configuration. All fields optional; unset fields fall back to
/// environment variables and the static tables in [`crate::consts`].
///
/// `provider` and `rpc_url` are alternate ways of reaching the chain; when a
/// provider handle is supplied its reported chain id supersedes `network`.
#[derive(Clone, Debug, Default)]
pub struct FetchConfig {
    /// Network to fetch on: decimal chain id, `0x`-prefixed hex, or a name.
    pub network: Option<String>,
    /// Explorer API key.
    pub api_key: Option<String>,
    /// RPC URL used to resolve proxy implementation addresses.
    pub rpc_url: Option<String>,
    /// Pre-established connection, reused instead of dialing `rpc_url`.
    pub provider: Option<Arc<Provider<Http>>>,
}
