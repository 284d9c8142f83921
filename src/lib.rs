//! evm-abi-fetcher resolves a contract address to its verified ABI.
//!
//! This crate provides tools to:
//! - Resolve a network identifier (chain id or name) to explorer/RPC endpoints
//! - Resolve EIP-1967 proxies (implementation and beacon slots) to their implementation
//! - Fetch and normalize the verified ABI from an Etherscan-style explorer API
//!
//! # Example
//! ```no_run
//! use evm_abi_fetcher::{fetch_abi_at, FetchConfig};
//!
//! # async fn example() -> Result<(), evm_abi_fetcher::FetchError> {
//! let config = FetchConfig {
//!     network: Some("mainnet".to_string()),
//!     ..Default::default()
//! };
//! let result = fetch_abi_at("0xdAC17F958D2ee523a2206206994597C13D831ec7", &config).await?;
//! println!("{}: {} ABI entries", result.name, result.abi.len());
//! # Ok(())
//! # }
//! ```

pub mod consts;
mod errors;
pub mod explorer;
mod fetch;
pub mod network;
pub mod proxy;
mod types;

pub use errors::FetchError;
pub use fetch::fetch_abi_at;
pub use proxy::{resolve_implementation, ChainSource, ProxyLookup};
pub use types::{AbiResult, ExplorerResponse, FetchConfig};

// Re-export common types for convenience
pub use ethers_core::types::{Address, H256};
