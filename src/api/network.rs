use serde::de::DeserializeOwned;

use crate::constants::{NETWORK_CONFIG_PATH, TRAIN_DATA_PATH};
use crate::models::{NetworkConfig, TrainData};

/// Fetch the station/section topology
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP request fails
/// - The response status is not ok
/// - The response body cannot be deserialized
pub async fn fetch_network_config(api_base: &str) -> Result<NetworkConfig, String> {
    fetch_json(&endpoint(api_base, NETWORK_CONFIG_PATH)).await
}

/// Fetch the current train snapshot
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP request fails
/// - The response status is not ok
/// - The response body cannot be deserialized
pub async fn fetch_train_data(api_base: &str) -> Result<TrainData, String> {
    fetch_json(&endpoint(api_base, TRAIN_DATA_PATH)).await
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    reqwest::get(absolute_url(url))
        .await
        .map_err(|e| format!("Request failed: {e}"))?
        .error_for_status()
        .map_err(|e| format!("Request failed: {e}"))?
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to deserialize: {e}"))
}

fn endpoint(api_base: &str, path: &str) -> String {
    format!("{}{path}", api_base.trim_end_matches('/'))
}

/// The browser fetch client needs absolute URLs; same-origin paths get the page origin
fn absolute_url(url: &str) -> String {
    if !url.starts_with('/') {
        return url.to_string();
    }

    #[cfg(target_arch = "wasm32")]
    if let Some(origin) = web_sys::window().and_then(|window| window.location().origin().ok()) {
        return format!("{origin}{url}");
    }

    url.to_string()
}
