use serde::Serialize;
use tracing::info;
use uuid::Uuid;

#[derive(Serialize)]
struct AuditEvent<'a, D: Serialize> {
    level: &'static str,
    service: &'static str,
    action: &'a str,
    outcome: Outcome,
    request_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<D>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }
}

#[derive(Serialize)]
pub(crate) struct CallDetails<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    pub elapsed_ms: u128,
}

fn render<D: Serialize>(
    action: &str,
    outcome: Outcome,
    request_id: Uuid,
    details: Option<D>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&AuditEvent {
        level: "audit",
        service: "hproxy-sdk",
        action,
        outcome,
        request_id,
        details,
    })
}

pub(crate) fn log_call<D>(action: &str, outcome: Outcome, request_id: Uuid, details: Option<D>)
where
    D: Serialize,
{
    match render(action, outcome, request_id, details) {
        Ok(payload) => info!(target: "audit", "{}", payload),
        Err(error) => {
            info!(target: "audit", action = action, outcome = outcome.as_str(), error = %error, "audit serialization failed")
        }
    }
}
