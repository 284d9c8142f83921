use std::collections::HashMap;

use ethers_core::types::H256;
use hex_literal::hex;
use once_cell::sync::Lazy;

/// keccak256("eip1967.proxy.implementation") - 1
pub const EIP1967_IMPLEMENTATION_SLOT: H256 = H256(hex!(
    "360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc"
));

/// keccak256("eip1967.proxy.beacon") - 1
pub const EIP1967_BEACON_SLOT: H256 = H256(hex!(
    "a3f0ad74e5423aebfd80d3ef4346578335a9a72aeaee59ff6cb3582b35133d50"
));

/// Selector of `implementation()`, the getter every EIP-1967 beacon exposes.
pub const IMPLEMENTATION_SELECTOR: [u8; 4] = hex!("5c60da1b");

pub const ENV_NETWORK: &str = "ETH_NETWORK";
pub const ENV_RPC_URL: &str = "RPC_URL";
pub const ENV_API_KEY: &str = "ETHERSCAN_API_KEY";
pub const ENV_EXPLORER_BASE: &str = "ETHERSCAN_BASE_URL";

/// Symbolic network name -> chain id. Versioned data, injected into the
/// resolver so it can be swapped without touching the pipeline.
pub static NETWORK_IDS: Lazy<HashMap<&'static str, u64>> = Lazy::new(|| {
    [
        ("mainnet", 1),
        ("ropsten", 3),
        ("rinkeby", 4),
        ("goerli", 5),
        ("optimism", 10),
        ("cronos", 25),
        ("kovan", 42),
        ("bsc", 56),
        ("gnosis", 100),
        ("polygon", 137),
        ("fantom", 250),
        ("base", 8453),
        ("arbitrum", 42161),
        ("avalanche", 43114),
        ("mumbai", 80001),
        ("sepolia", 11155111),
    ]
    .into_iter()
    .collect()
});

/// Chain id -> known public RPC endpoints, best endpoint first.
pub static RPC_ENDPOINTS: Lazy<HashMap<u64, Vec<&'static str>>> = Lazy::new(|| {
    [
        (1, vec!["https://eth.llamarpc.com", "https://cloudflare-eth.com"]),
        (5, vec!["https://rpc.ankr.com/eth_goerli"]),
        (10, vec!["https://mainnet.optimism.io"]),
        (56, vec!["https://bsc-dataseed.binance.org"]),
        (100, vec!["https://rpc.gnosischain.com"]),
        (137, vec!["https://polygon-rpc.com"]),
        (250, vec!["https://rpc.ftm.tools"]),
        (8453, vec!["https://mainnet.base.org"]),
        (42161, vec!["https://arb1.arbitrum.io/rpc"]),
        (43114, vec!["https://api.avax.network/ext/bc/C/rpc"]),
        (11155111, vec!["https://rpc.sepolia.org"]),
    ]
    .into_iter()
    .collect()
});

/// Chain id -> explorer API base URL.
pub static EXPLORER_BASES: Lazy<HashMap<u64, &'static str>> = Lazy::new(|| {
    [
        (1, "https://api.etherscan.io"),
        (3, "https://api-ropsten.etherscan.io"),
        (4, "https://api-rinkeby.etherscan.io"),
        (5, "https://api-goerli.etherscan.io"),
        (10, "https://api-optimistic.etherscan.io"),
        (25, "https://api.cronoscan.com"),
        (42, "https://api-kovan.etherscan.io"),
        (56, "https://api.bscscan.com"),
        (69, "https://api-kovan-optimistic.etherscan.io"),
        (97, "https://api-testnet.bscscan.com"),
        (100, "https://api.gnosisscan.io"),
        (137, "https://api.polygonscan.com"),
        (250, "https://api.ftmscan.com"),
        (420, "https://api-goerli-optimistic.etherscan.io"),
        (4002, "https://api-testnet.ftmscan.com"),
        (8453, "https://api.basescan.org"),
        (42161, "https://api.arbiscan.io"),
        (43114, "https://api.snowtrace.io"),
        (80001, "https://api-testnet.polygonscan.com"),
    ]
    .into_iter()
    .collect()
});
