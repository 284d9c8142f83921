use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use futures::future::join_all;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use evm_abi_fetcher::{fetch_abi_at, AbiResult, FetchConfig};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Fetch the most up-to-date ABI of a verified smart contract", long_about = None)]
pub struct Args {
    /// The addresses of the contracts to fetch ABIs of
    #[clap(required = true)]
    contracts: Vec<String>,

    /// The path to the directory inside which to save ABIs
    #[clap(short, long, default_value = "abis")]
    target: PathBuf,

    /// The network on which to fetch ABIs (chain id, 0x-hex id, or name)
    #[clap(short, long, env = "ETH_NETWORK")]
    network: Option<String>,

    /// The explorer API key to use to fetch ABIs
    #[clap(short = 'k', long = "api-key", env = "ETHERSCAN_API_KEY")]
    api_key: Option<String>,

    /// The RPC URL to use to query for the implementation address (only
    /// used in case of proxies)
    #[clap(short = 'r', long = "rpc-url", env = "RPC_URL")]
    rpc_url: Option<String>,
}

fn save_abi(target: &Path, address: &str, result: &AbiResult) -> Result<PathBuf> {
    let name = if result.name.is_empty() { address } else { &result.name };
    let path = target.join(format!("{name}.json"));

    let json = serde_json::to_string_pretty(&result.abi)?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;

    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::from_default_env();

    FmtSubscriber::builder().with_env_filter(filter).init();

    let args = Args::parse();

    std::fs::create_dir_all(&args.target)
        .with_context(|| format!("creating {}", args.target.display()))?;

    let config = FetchConfig {
        network: args.network.clone(),
        api_key: args.api_key.clone(),
        rpc_url: args.rpc_url.clone(),
        provider: None,
    };

    // One independent fetch per address: a failing address reports its own
    // error without aborting the rest of the batch.
    join_all(args.contracts.iter().map(|address| {
        let config = config.clone();
        let target = args.target.clone();
        async move {
            match fetch_abi_at(address, &config).await {
                Ok(result) => match save_abi(&target, address, &result) {
                    Ok(path) => println!("Successfully saved ABI for {address} at {}", path.display()),
                    Err(error) => eprintln!("Error while saving ABI for {address}: {error}"),
                },
                Err(error) => eprintln!("Error while fetching ABI for {address}: {error}"),
            }
        }
    }))
    .await;

    Ok(())
}
