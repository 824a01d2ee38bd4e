use hproxy_sdk::models::{self, LocationsResponse, NewProxyResponse, ProtoTypesResponse, ProxyDetails};
use hproxy_sdk::{Client, Endpoint, HProxyError, NewProxyOptions};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

const SAMPLE_COUNTRIES: usize = 2;

/// What one pass over every endpoint returned.
#[derive(Debug, Default, Serialize)]
pub struct WalkthroughReport {
    pub location_count: usize,
    /// `"<country> (<region>)"` for the first few locations.
    pub sample_countries: Vec<String>,
    pub routes: Value,
    pub proto_types: Vec<String>,
    pub default_proxy: Option<ProxyDetails>,
    pub filtered_proxy: Option<ProxyDetails>,
    pub current_proxy: Value,
}

fn unsuccessful(endpoint: Endpoint) {
    warn!(%endpoint, "API answered without success flag");
}

fn rotate(
    client: &Client,
    options: &NewProxyOptions,
) -> Result<Option<ProxyDetails>, HProxyError> {
    let response: NewProxyResponse =
        models::decode(Endpoint::GetNewProxy, client.get_new_proxy(options)?)?;
    if !response.success {
        unsuccessful(Endpoint::GetNewProxy);
        return Ok(None);
    }

    if let Some(proxy) = &response.proxy {
        info!(
            full_proxy = proxy.full_proxy.as_deref().unwrap_or("-"),
            proto_type = proxy.proto_type.as_deref().unwrap_or("-"),
            expires_in_minutes = proxy.expires_in_minutes,
            "proxy assigned"
        );
    }
    Ok(response.proxy)
}

/// Calls every endpoint once, stopping at the first error.
///
/// The filtered rotation is skipped when `filters` carries no values, since
/// it would repeat the default rotation.
pub fn run(client: &Client, filters: &NewProxyOptions) -> Result<WalkthroughReport, HProxyError> {
    let mut report = WalkthroughReport::default();

    let locations: LocationsResponse =
        models::decode(Endpoint::GetAllLocations, client.get_all_locations()?)?;
    if locations.success {
        report.location_count = locations.locations.len();
        report.sample_countries = locations
            .locations
            .iter()
            .take(SAMPLE_COUNTRIES)
            .map(|country| format!("{} ({})", country.country_name, country.region))
            .collect();
        info!(
            count = report.location_count,
            sample = ?report.sample_countries,
            "locations listed"
        );
    } else {
        unsuccessful(Endpoint::GetAllLocations);
    }

    report.routes = client.get_routes()?;
    info!(routes = %report.routes, "routes listed");

    let protos: ProtoTypesResponse =
        models::decode(Endpoint::GetProtoTypes, client.get_proto_types()?)?;
    if protos.success {
        info!(proto_types = ?protos.proto_types, "protocol types listed");
        report.proto_types = protos.proto_types;
    } else {
        unsuccessful(Endpoint::GetProtoTypes);
    }

    report.default_proxy = rotate(client, &NewProxyOptions::default())?;

    if filters.to_params().is_empty() {
        info!("no rotation filters configured; skipping filtered rotation");
    } else {
        report.filtered_proxy = rotate(client, filters)?;
    }

    let current = client.get_current_proxy()?;
    if current.get("success").and_then(Value::as_bool) == Some(true) {
        report.current_proxy = current.get("proxy").cloned().unwrap_or(Value::Null);
        info!(proxy = %report.current_proxy, "current proxy");
    } else {
        unsuccessful(Endpoint::GetCurrentProxy);
    }

    Ok(report)
}
