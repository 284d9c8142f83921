//! The fetch orchestrator: one address in, one normalized ABI out.

use ethers_core::types::Address;
use ethers_core::utils::to_checksum;
use ethers_providers::Middleware;
use tracing::debug;

use crate::consts::{EXPLORER_BASES, NETWORK_IDS, RPC_ENDPOINTS};
use crate::errors::{FetchError, Result};
use crate::explorer;
use crate::network;
use crate::proxy::{self, ChainSource, ProxyLookup};
use crate::types::{AbiResult, FetchConfig};

/// Fetches the verified ABI of the contract at `address`.
///
/// Fixed pipeline: resolve the chain id, resolve an RPC endpoint, resolve
/// the EIP-1967 implementation address (keeping the original address when
/// the contract is not a proxy), resolve the explorer base URL, query the
/// explorer, normalize. The first fatal error aborts the whole fetch; the
/// chain id is derived exactly once and never recomputed.
///
/// When `config.provider` is set, the chain id reported by that connection
/// wins over `config.network`.
pub async fn fetch_abi_at(address: &str, config: &FetchConfig) -> Result<AbiResult> {
    let address: Address = address
        .parse()
        .map_err(|_| FetchError::InvalidAddress(address.to_owned()))?;

    let (rpc, chain_id) = match (&config.provider, &config.rpc_url) {
        (Some(handle), _) => {
            let rpc = ChainSource::from_handle(handle.clone()).connect()?;
            let chain_id = rpc
                .get_chainid()
                .await
                .map_err(|e| FetchError::Rpc(e.to_string()))?
                .as_u64();
            (Some(rpc), chain_id)
        }
        (None, rpc_url) => {
            let chain_id = network::resolve_chain_id(config.network.as_deref(), &NETWORK_IDS)?;
            let rpc_url = rpc_url
                .clone()
                .or_else(|| network::resolve_rpc_url(chain_id, &RPC_ENDPOINTS));
            let rpc = match rpc_url {
                Some(url) => Some(ChainSource::from_url(url).connect()?),
                None => None,
            };
            (rpc, chain_id)
        }
    };
    debug!(chain_id, "fetching abi");

    let address = match &rpc {
        Some(rpc) => match proxy::resolve_implementation(rpc.as_ref(), address).await? {
            ProxyLookup::Implementation(implementation) => implementation,
            ProxyLookup::NotAProxy => address,
        },
        None => address,
    };

    let base = network::resolve_explorer_base(chain_id, &EXPLORER_BASES)?;
    let response =
        explorer::query_source_code(&base, &to_checksum(&address, None), config.api_key.as_deref())
            .await?;

    explorer::extract_abi(&response)
}
