use crate::validation;

/// Filters for a proxy rotation request.
///
/// Every field is optional. Unset or blank fields are left out of the request
/// so the remote service applies its own defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewProxyOptions {
    pub country_code: Option<String>,
    /// Route identifier.
    pub host: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    /// `http`, `https` or `socks5`, as listed by `getProtoTypes.php`.
    pub proto_type: Option<String>,
}

impl NewProxyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country_code<T: Into<String>>(mut self, country_code: T) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    pub fn with_host<T: Into<String>>(mut self, host: T) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_state<T: Into<String>>(mut self, state: T) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_city<T: Into<String>>(mut self, city: T) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_proto_type<T: Into<String>>(mut self, proto_type: T) -> Self {
        self.proto_type = Some(proto_type.into());
        self
    }

    /// Query pairs for the supplied filters, in wire order.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        [
            ("country_code", &self.country_code),
            ("host", &self.host),
            ("state", &self.state),
            ("city", &self.city),
            ("protoType", &self.proto_type),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            validation::optional_value(value.as_deref()).map(|value| (name, value))
        })
        .collect()
    }
}
