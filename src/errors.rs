//! Error types for the evm-abi-fetcher crate.

use thiserror::Error;

/// Errors that can abort an ABI fetch.
///
/// `Explorer` and `MalformedAbi` render as their payload alone so the
/// explorer's own diagnostic text (rate limits, "Contract source code not
/// verified") reaches the caller unchanged.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No explorer base URL is known for the resolved chain id.
    #[error("Unsupported network: please specify a network scan base URL via the ETHERSCAN_BASE_URL environment variable")]
    UnsupportedNetwork,

    /// A symbolic network name is missing from the name table.
    #[error("Unknown network `{0}`: expected a chain id (decimal or 0x-prefixed hex) or a known network name")]
    UnknownNetwork(String),

    /// The contract address could not be parsed.
    #[error("Invalid contract address: `{0}`")]
    InvalidAddress(String),

    /// RPC communication error during proxy resolution
    #[error("RPC error: `{0}`")]
    Rpc(String),

    /// The explorer reported a non-success status.
    #[error("{0}")]
    Explorer(String),

    /// The explorer reported success but the ABI field is not valid JSON;
    /// the payload is the raw ABI text.
    #[error("{0}")]
    MalformedAbi(String),

    /// HTTP transport failure while querying the explorer.
    #[error("explorer request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;
