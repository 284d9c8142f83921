//! Network and endpoint resolution.
//!
//! Every lookup follows the same ordered fallback: explicit argument, then
//! environment variable, then static table.

use std::collections::HashMap;
use std::env;

use tracing::debug;

use crate::consts::{ENV_EXPLORER_BASE, ENV_NETWORK, ENV_RPC_URL};
use crate::errors::{FetchError, Result};

/// Resolves a user-supplied network identifier to a chain id.
///
/// Accepts a decimal chain id, a `0x`-prefixed hex chain id, or a
/// case-insensitive symbolic name looked up in `networks`. With no input and
/// no `ETH_NETWORK` environment variable, defaults to `"mainnet"`.
pub fn resolve_chain_id(network: Option<&str>, networks: &HashMap<&str, u64>) -> Result<u64> {
    let network = network
        .map(str::to_owned)
        .or_else(|| env::var(ENV_NETWORK).ok())
        .unwrap_or_else(|| "mainnet".to_owned());

    if let Some(digits) = network.strip_prefix("0x") {
        return u64::from_str_radix(digits, 16)
            .map_err(|_| FetchError::UnknownNetwork(network.clone()));
    }
    if !network.is_empty() && network.bytes().all(|b| b.is_ascii_digit()) {
        return network
            .parse()
            .map_err(|_| FetchError::UnknownNetwork(network.clone()));
    }

    let name = network.to_lowercase();
    networks
        .get(name.as_str())
        .copied()
        .ok_or(FetchError::UnknownNetwork(network))
}

/// Resolves the RPC endpoint used for proxy resolution.
///
/// `RPC_URL` environment override first, else the first listed public
/// endpoint for the chain. `None` means proxy resolution is skipped.
pub fn resolve_rpc_url(chain_id: u64, endpoints: &HashMap<u64, Vec<&str>>) -> Option<String> {
    if let Ok(url) = env::var(ENV_RPC_URL) {
        if !url.is_empty() {
            return Some(url);
        }
    }

    let url = endpoints.get(&chain_id).and_then(|list| list.first());
    debug!(chain_id, ?url, "resolved rpc endpoint");
    url.map(|url| (*url).to_string())
}

/// Resolves the explorer API base URL for a chain.
///
/// `ETHERSCAN_BASE_URL` environment override first, else the static table.
/// A chain with neither is a hard configuration error: no query can be
/// constructed without a base URL.
pub fn resolve_explorer_base(chain_id: u64, bases: &HashMap<u64, &str>) -> Result<String> {
    if let Ok(base) = env::var(ENV_EXPLORER_BASE) {
        if !base.is_empty() {
            return Ok(base);
        }
    }

    bases
        .get(&chain_id)
        .map(|base| (*base).to_string())
        .ok_or(FetchError::UnsupportedNetwork)
}
