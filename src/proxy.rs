//! EIP-1967 proxy resolution.
//!
//! Reads the implementation and beacon storage slots defined by the EIP-1967
//! convention and, for beacon proxies, calls `implementation()` on the beacon
//! contract to obtain the logic address.

use std::sync::Arc;

use ethers_core::types::{Address, TransactionRequest, H256};
use ethers_providers::{Http, Middleware, Provider};
use tracing::debug;

use crate::consts::{EIP1967_BEACON_SLOT, EIP1967_IMPLEMENTATION_SLOT, IMPLEMENTATION_SELECTOR};
use crate::errors::{FetchError, Result};

/// Outcome of a proxy lookup against a single address.
///
/// Transport failures are not part of this enum: they surface as
/// [`FetchError::Rpc`] and abort the whole fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProxyLookup {
    /// A recognized proxy pattern pointing at this implementation address.
    Implementation(Address),
    /// No recognized proxy pattern; callers keep the original address.
    NotAProxy,
}

/// A way of reaching chain state: either a bare RPC URL dialed on demand or
/// a pre-established provider handle.
#[derive(Clone, Debug)]
pub enum ChainSource {
    Url(String),
    Handle(Arc<Provider<Http>>),
}

impl ChainSource {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    pub fn from_handle(provider: Arc<Provider<Http>>) -> Self {
        Self::Handle(provider)
    }

    /// Returns a usable provider, dialing the URL variant on first use.
    pub fn connect(&self) -> Result<Arc<Provider<Http>>> {
        match self {
            Self::Url(url) => Provider::<Http>::try_from(url.as_str())
                .map(Arc::new)
                .map_err(|e| FetchError::Rpc(e.to_string())),
            Self::Handle(provider) => Ok(Arc::clone(provider)),
        }
    }
}

/// Resolves `address` to its implementation if it is an EIP-1967 proxy.
///
/// Checks the implementation slot first, then the beacon slot. An address
/// with neither slot populated is reported as [`ProxyLookup::NotAProxy`];
/// that is the common path and not an error.
pub async fn resolve_implementation<M>(rpc: &M, address: Address) -> Result<ProxyLookup>
where
    M: Middleware,
{
    if let Some(implementation) = read_address_slot(rpc, address, EIP1967_IMPLEMENTATION_SLOT).await? {
        debug!(?address, ?implementation, "resolved EIP-1967 implementation slot");
        return Ok(ProxyLookup::Implementation(implementation));
    }

    if let Some(beacon) = read_address_slot(rpc, address, EIP1967_BEACON_SLOT).await? {
        let implementation = beacon_implementation(rpc, beacon).await?;
        debug!(?address, ?beacon, ?implementation, "resolved EIP-1967 beacon");
        return Ok(ProxyLookup::Implementation(implementation));
    }

    Ok(ProxyLookup::NotAProxy)
}

/// Reads a storage slot and interprets the word as an address.
///
/// Returns `None` for the zero word and for words whose upper 12 bytes are
/// populated (the slot holds something other than an address).
async fn read_address_slot<M>(rpc: &M, address: Address, slot: H256) -> Result<Option<Address>>
where
    M: Middleware,
{
    let word = rpc
        .get_storage_at(address, slot, None)
        .await
        .map_err(|e| FetchError::Rpc(e.to_string()))?;
    debug!(?slot, ?word, "stored value");

    Ok(word_to_address(&word))
}

fn word_to_address(word: &H256) -> Option<Address> {
    if word.0[..12].iter().any(|b| *b != 0) {
        return None;
    }

    let address = Address::from_slice(&word.0[12..]);
    (!address.is_zero()).then_some(address)
}

/// Calls `implementation()` on a beacon contract and decodes the returned
/// address.
async fn beacon_implementation<M>(rpc: &M, beacon: Address) -> Result<Address>
where
    M: Middleware,
{
    let call = TransactionRequest::new()
        .to(beacon)
        .data(IMPLEMENTATION_SELECTOR.to_vec());
    let returned = rpc
        .call(&call.into(), None)
        .await
        .map_err(|e| FetchError::Rpc(e.to_string()))?;

    if returned.len() < 32 {
        return Err(FetchError::Rpc(format!(
            "beacon {beacon:?} returned {} bytes from implementation(), expected 32",
            returned.len()
        )));
    }

    let word = H256::from_slice(&returned[..32]);
    word_to_address(&word).ok_or_else(|| {
        FetchError::Rpc(format!("beacon {beacon:?} returned a non-address word: {word:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::Bytes;
    use ethers_providers::Provider;
    use hex_literal::hex;

    fn addr(last: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        Address::from(bytes)
    }

    fn word_with_address(address: Address) -> H256 {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(address.as_bytes());
        H256(word)
    }

    #[test]
    fn test_word_to_address() {
        assert_eq!(word_to_address(&H256::zero()), None);
        assert_eq!(word_to_address(&word_with_address(addr(0xbe))), Some(addr(0xbe)));

        // upper bytes populated: not an address
        let mut word = word_with_address(addr(0xbe)).0;
        word[0] = 1;
        assert_eq!(word_to_address(&H256(word)), None);
    }

    #[tokio::test]
    async fn test_not_a_proxy_keeps_original_address() {
        let (provider, mock) = Provider::mocked();
        // responses pop LIFO: beacon slot read pushed first, implementation
        // slot read pushed last
        mock.push(H256::zero()).unwrap();
        mock.push(H256::zero()).unwrap();

        let lookup = resolve_implementation(&provider, addr(0x11)).await.unwrap();
        assert_eq!(lookup, ProxyLookup::NotAProxy);
    }

    #[tokio::test]
    async fn test_implementation_slot_resolves() {
        let (provider, mock) = Provider::mocked();
        mock.push(word_with_address(addr(0xbe))).unwrap();

        let lookup = resolve_implementation(&provider, addr(0x11)).await.unwrap();
        assert_eq!(lookup, ProxyLookup::Implementation(addr(0xbe)));
    }

    #[tokio::test]
    async fn test_beacon_slot_resolves_through_beacon_call() {
        let (provider, mock) = Provider::mocked();
        // eth_call on the beacon answers last, so push it first
        mock.push::<Bytes, _>(Bytes::from(word_with_address(addr(0xcc)).0.to_vec()))
            .unwrap();
        mock.push(word_with_address(addr(0xbb))).unwrap();
        mock.push(H256::zero()).unwrap();

        let lookup = resolve_implementation(&provider, addr(0x11)).await.unwrap();
        assert_eq!(lookup, ProxyLookup::Implementation(addr(0xcc)));
    }

    #[tokio::test]
    async fn test_junk_storage_word_is_not_a_proxy() {
        let (provider, mock) = Provider::mocked();
        mock.push(H256::zero()).unwrap();
        mock.push(H256(hex!(
            "0100000000000000000000001111111111111111111111111111111111111111"
        )))
        .unwrap();

        let lookup = resolve_implementation(&provider, addr(0x11)).await.unwrap();
        assert_eq!(lookup, ProxyLookup::NotAProxy);
    }

    #[tokio::test]
    async fn test_transport_failure_is_fatal() {
        let (provider, _mock) = Provider::mocked();
        // no queued response: the storage read errors out
        let result = resolve_implementation(&provider, addr(0x11)).await;
        assert!(matches!(result, Err(FetchError::Rpc(_))));
    }
}
