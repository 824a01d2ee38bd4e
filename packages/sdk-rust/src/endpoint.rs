use std::fmt;

/// Relative paths served under the API base URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetAllLocations,
    GetRoutes,
    GetProtoTypes,
    GetCurrentProxy,
    GetNewProxy,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::GetAllLocations,
        Endpoint::GetRoutes,
        Endpoint::GetProtoTypes,
        Endpoint::GetCurrentProxy,
        Endpoint::GetNewProxy,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::GetAllLocations => "getAllLocations.php",
            Endpoint::GetRoutes => "getRoutes.php",
            Endpoint::GetProtoTypes => "getProtoTypes.php",
            Endpoint::GetCurrentProxy => "getCurrentProxy.php",
            Endpoint::GetNewProxy => "getNewProxy.php",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
