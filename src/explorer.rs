//! Explorer API client and response normalization.

use std::env;

use tracing::debug;

use crate::consts::ENV_API_KEY;
use crate::errors::{FetchError, Result};
use crate::types::{AbiResult, ExplorerResponse};

/// Builds a query URL against an explorer base.
///
/// Params are appended in slice order; entries with an absent value are
/// skipped. The API key falls back to the `ETHERSCAN_API_KEY` environment
/// variable and finally to an empty string (explorers tolerate a missing key
/// at lower rate limits).
pub fn build_explorer_url(
    base: &str,
    module: &str,
    params: &[(&str, Option<&str>)],
    api_key: Option<&str>,
) -> String {
    let api_key = api_key
        .map(str::to_owned)
        .or_else(|| env::var(ENV_API_KEY).ok())
        .unwrap_or_default();

    let mut url = format!("{}/api?module={module}", base.trim_end_matches('/'));
    for (key, value) in params {
        if let Some(value) = value {
            url.push_str(&format!("&{key}={value}"));
        }
    }
    url.push_str(&format!("&apikey={api_key}"));

    url
}

/// Queries the explorer's verified source-code endpoint for `address`.
///
/// A single GET, no retry, no timeout; transport failures propagate.
pub async fn query_source_code(
    base: &str,
    address: &str,
    api_key: Option<&str>,
) -> Result<ExplorerResponse> {
    let url = build_explorer_url(
        base,
        "contract",
        &[("action", Some("getsourcecode")), ("address", Some(address))],
        api_key,
    );
    debug!(%url, "querying explorer");

    let response = reqwest::get(&url).await?.json::<ExplorerResponse>().await?;
    Ok(response)
}

/// The explorer marks failures with any status other than `"1"`.
pub fn is_explorer_error(response: &ExplorerResponse) -> bool {
    response.status != "1"
}

/// Normalizes an explorer response into an [`AbiResult`].
///
/// On an error status the failure cause lives in `result` and becomes the
/// error message verbatim. On success, `result[0].ABI` is a JSON-encoded
/// string; when it fails to parse the raw text is the error message, since
/// explorers put diagnostics like "Contract source code not verified" there.
pub fn extract_abi(response: &ExplorerResponse) -> Result<AbiResult> {
    if is_explorer_error(response) {
        let cause = match response.result.as_str() {
            Some(cause) => cause.to_owned(),
            None => response.result.to_string(),
        };
        return Err(FetchError::Explorer(cause));
    }

    let record = response
        .result
        .get(0)
        .ok_or_else(|| FetchError::Explorer(format!("explorer returned no record: {}", response.message)))?;

    let name = record
        .get("ContractName")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let raw_abi = record
        .get("ABI")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();

    let abi: Vec<serde_json::Value> =
        serde_json::from_str(raw_abi).map_err(|_| FetchError::MalformedAbi(raw_abi.to_owned()))?;

    Ok(AbiResult { name, abi })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: serde_json::Value) -> ExplorerResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_build_url_param_order_and_skipping() {
        let url = build_explorer_url(
            "https://api.etherscan.io",
            "contract",
            &[
                ("action", Some("getsourcecode")),
                ("address", Some("0xbe")),
                ("tag", None),
            ],
            Some("KEY"),
        );
        assert_eq!(
            url,
            "https://api.etherscan.io/api?module=contract&action=getsourcecode&address=0xbe&apikey=KEY"
        );
    }

    #[test]
    fn test_build_url_trims_trailing_slash_and_tolerates_missing_key() {
        let url = build_explorer_url("https://api.bscscan.com/", "contract", &[], Some(""));
        assert_eq!(url, "https://api.bscscan.com/api?module=contract&apikey=");
    }

    #[test]
    fn test_explorer_error_surfaces_result_text() {
        let response = response(json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Max rate limit reached"
        }));
        assert!(is_explorer_error(&response));

        let err = extract_abi(&response).unwrap_err();
        assert_eq!(err.to_string(), "Max rate limit reached");
    }

    #[test]
    fn test_unparseable_abi_surfaces_raw_text() {
        let response = response(json!({
            "status": "1",
            "message": "OK",
            "result": [{"ContractName": "Foo", "ABI": "not-json"}]
        }));

        let err = extract_abi(&response).unwrap_err();
        assert!(matches!(err, FetchError::MalformedAbi(_)));
        assert_eq!(err.to_string(), "not-json");
    }

    #[test]
    fn test_successful_extraction() {
        let response = response(json!({
            "status": "1",
            "message": "OK",
            "result": [{"ContractName": "Foo", "ABI": "[]"}]
        }));

        let result = extract_abi(&response).unwrap();
        assert_eq!(result.name, "Foo");
        assert_eq!(result.abi, Vec::<serde_json::Value>::new());
    }

    #[test]
    fn test_abi_round_trips_through_json() {
        let response = response(json!({
            "status": "1",
            "message": "OK",
            "result": [{
                "ContractName": "Token",
                "ABI": r#"[{"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"}],"outputs":[]}]"#
            }]
        }));

        let result = extract_abi(&response).unwrap();
        let serialized = serde_json::to_string(&result).unwrap();
        let reparsed: AbiResult = serde_json::from_str(&serialized).unwrap();
        assert_eq!(reparsed, result);
    }

    #[test]
    fn test_missing_record_is_an_explorer_error() {
        let response = response(json!({
            "status": "1",
            "message": "OK",
            "result": []
        }));
        assert!(matches!(extract_abi(&response), Err(FetchError::Explorer(_))));
    }
}
