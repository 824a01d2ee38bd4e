//! Typed views of the response bodies observed from the API.
//!
//! The service does not publish a schema, so every field is lenient: missing
//! values fall back to defaults instead of failing the decode, and proxy
//! ports and expiry minutes accept numeric strings as well as numbers. Use
//! [`crate::Client::call_as`] or [`decode`] to opt in; the plain client
//! methods return the raw JSON untouched.

use std::str::FromStr;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::HProxyError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    pub state_id: i64,
    pub state_name: String,
    pub cities: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    pub country_id: i64,
    pub country_name: String,
    pub region: String,
    pub states: Vec<State>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationsResponse {
    pub success: bool,
    pub locations: Vec<Country>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtoTypesResponse {
    pub success: bool,
    #[serde(rename = "protoTypes")]
    pub proto_types: Vec<String>,
}

/// Accepts `8080`, `"8080"`, `""` or `null`.
fn number_or_string<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + FromStr,
{
    let out_of_range = || <D::Error as de::Error>::custom("number out of range");
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => {
            let raw = number.as_i64().ok_or_else(out_of_range)?;
            T::try_from(raw).map(Some).map_err(|_| out_of_range())
        }
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a number, got '{text}'"))),
        Some(other) => Err(de::Error::custom(format!(
            "expected a number or numeric string, got {other}"
        ))),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyDetails {
    pub host: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "protoType")]
    pub proto_type: Option<String>,
    pub full_proxy: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    pub expires_in_minutes: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewProxyResponse {
    pub success: bool,
    pub proxy: Option<ProxyDetails>,
}

/// `proxy` is a plain string on some accounts and an object on others.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentProxyResponse {
    pub success: bool,
    pub proxy: Value,
}

/// Decodes a raw response into one of the typed views.
pub fn decode<T: DeserializeOwned>(endpoint: Endpoint, value: Value) -> Result<T, HProxyError> {
    serde_json::from_value(value).map_err(|source| HProxyError::Decode { endpoint, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_new_proxy_response() {
        let raw = json!({
            "success": true,
            "proxy": {"full_proxy": "1.2.3.4:8080", "protoType": "socks5", "port": 8080}
        });
        let parsed: NewProxyResponse = decode(Endpoint::GetNewProxy, raw).unwrap();
        assert!(parsed.success);
        let proxy = parsed.proxy.unwrap();
        assert_eq!(proxy.full_proxy.as_deref(), Some("1.2.3.4:8080"));
        assert_eq!(proxy.proto_type.as_deref(), Some("socks5"));
        assert_eq!(proxy.port, Some(8080));
        assert_eq!(proxy.expires_in_minutes, None);
    }

    #[test]
    fn proxy_numbers_may_arrive_as_strings() {
        let raw = json!({
            "success": true,
            "proxy": {"full_proxy": "1.2.3.4:8080", "port": "8080", "expires_in_minutes": " 30 "}
        });
        let parsed: NewProxyResponse = decode(Endpoint::GetNewProxy, raw).unwrap();
        let proxy = parsed.proxy.unwrap();
        assert_eq!(proxy.port, Some(8080));
        assert_eq!(proxy.expires_in_minutes, Some(30));

        let blank: ProxyDetails =
            serde_json::from_value(json!({"port": "", "expires_in_minutes": null})).unwrap();
        assert_eq!(blank.port, None);
        assert_eq!(blank.expires_in_minutes, None);
    }

    #[test]
    fn non_numeric_port_is_decode_error() {
        for port in [json!("http"), json!(70000), json!([1])] {
            let raw = json!({"success": true, "proxy": {"port": port}});
            assert!(decode::<NewProxyResponse>(Endpoint::GetNewProxy, raw).is_err());
        }
    }

    #[test]
    fn decodes_locations_with_missing_fields() {
        let raw = json!({
            "success": true,
            "locations": [
                {"country_name": "Viet Nam", "region": "Asia"},
                {"country_name": "United States", "region": "America",
                 "states": [{"state_id": 4, "state_name": "Texas", "cities": ["Austin"]}]}
            ]
        });
        let parsed: LocationsResponse = decode(Endpoint::GetAllLocations, raw).unwrap();
        assert_eq!(parsed.locations.len(), 2);
        assert!(parsed.locations[0].states.is_empty());
        assert_eq!(parsed.locations[1].states[0].cities, vec!["Austin"]);
    }

    #[test]
    fn routes_decode_as_list() {
        let raw = json!([{"id": 1, "name": "Asia"}, {"id": 2, "name": "Europe"}]);
        let routes: Vec<Route> = decode(Endpoint::GetRoutes, raw).unwrap();
        assert_eq!(routes[1].name, "Europe");
    }

    #[test]
    fn mismatched_shape_is_decode_error() {
        let err = decode::<ProtoTypesResponse>(Endpoint::GetProtoTypes, json!({"protoTypes": 3}))
            .unwrap_err();
        assert!(matches!(err, HProxyError::Decode { endpoint: Endpoint::GetProtoTypes, .. }));
    }

    #[test]
    fn current_proxy_accepts_string_or_object() {
        let plain: CurrentProxyResponse =
            decode(Endpoint::GetCurrentProxy, json!({"success": true, "proxy": "1.2.3.4:80"}))
                .unwrap();
        assert_eq!(plain.proxy, json!("1.2.3.4:80"));

        let object: CurrentProxyResponse = decode(
            Endpoint::GetCurrentProxy,
            json!({"success": true, "proxy": {"full_proxy": "1.2.3.4:80"}}),
        )
        .unwrap();
        assert!(object.proxy.is_object());
    }
}
