//! Domain DTOs for the PassNinja API.
//!
//! # Design
//! Only the create response is reshaped into a typed struct. Every other
//! operation hands back the server's JSON verbatim because the remote
//! service, not this crate, owns the pass and template schemas.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied template field values, keyed by field name.
///
/// Every value must be a JSON string; anything else is rejected before a
/// request is sent.
pub type ClientPassData = Map<String, Value>;

/// Normalized result of creating a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPass {
    /// Landing page for the issued pass, taken from `urls.landing`.
    pub url: String,
    pub serial_number: String,
    pub pass_type: String,
}

/// Request body shared by create and update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PassPayload<'a> {
    pub pass_type: &'a str,
    pub pass: &'a ClientPassData,
}

#[derive(Debug, Serialize)]
pub(crate) struct DecryptPayload<'a> {
    pub payload: &'a str,
}

/// Raw shape of the create response; extra fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePassResponse {
    pub urls: PassUrls,
    pub serial_number: String,
    pub pass_type: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PassUrls {
    pub landing: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequiredKeysResponse {
    pub keys: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FindPassesResponse {
    pub passes: Vec<Value>,
}

impl From<CreatePassResponse> for CreatedPass {
    fn from(raw: CreatePassResponse) -> Self {
        CreatedPass {
            url: raw.urls.landing,
            serial_number: raw.serial_number,
            pass_type: raw.pass_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_pass_serializes_camel_case() {
        let pass = CreatedPass {
            url: "https://passninja.invalid/p/1".to_string(),
            serial_number: "abc".to_string(),
            pass_type: "demo.coupon".to_string(),
        };
        let json = serde_json::to_value(&pass).unwrap();
        assert_eq!(
            json,
            json!({"url": "https://passninja.invalid/p/1", "serialNumber": "abc", "passType": "demo.coupon"})
        );
    }

    #[test]
    fn create_response_ignores_extra_fields() {
        let raw: CreatePassResponse = serde_json::from_value(json!({
            "urls": {"landing": "https://l", "apple": "https://a"},
            "serialNumber": "s1",
            "passType": "demo.coupon",
            "pass": {"barcode": "1"}
        }))
        .unwrap();
        let pass = CreatedPass::from(raw);
        assert_eq!(pass.url, "https://l");
        assert_eq!(pass.serial_number, "s1");
    }

    #[test]
    fn pass_payload_nests_client_data() {
        let mut data = ClientPassData::new();
        data.insert("barcode".to_string(), json!("123"));
        let payload = PassPayload {
            pass_type: "demo.coupon",
            pass: &data,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"passType": "demo.coupon", "pass": {"barcode": "123"}})
        );
    }
}
