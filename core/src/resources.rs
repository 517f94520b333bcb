//! The two operation groups exposed by `PassClient`.
//!
//! Every operation validates its arguments locally first, so malformed
//! calls never reach the network. Only `create` pays for the extra
//! required-keys round trip.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::warn;

use crate::client::PassClient;
use crate::error::PassNinjaError;
use crate::types::{ClientPassData, CreatedPass};
use crate::validate::{require_keys, require_present, require_string_values};

/// Operations on issued passes, obtained from `PassClient::pass`.
#[derive(Debug, Clone, Copy)]
pub struct Passes<'a> {
    client: &'a PassClient,
}

impl<'a> Passes<'a> {
    pub(crate) fn new(client: &'a PassClient) -> Self {
        Self { client }
    }

    /// Issue a new pass of `pass_type`.
    ///
    /// Rejects non-string values, then fetches the template's required keys
    /// and rejects the call if any of them is absent from `data`.
    pub fn create(&self, pass_type: &str, data: &ClientPassData) -> Result<CreatedPass, PassNinjaError> {
        rejected(require_present(pass_type, "passType", "createPass"))?;
        rejected(require_string_values(data))?;
        let required = self.required_keys(pass_type)?;
        rejected(require_keys(&required, data))?;

        let c = self.client;
        c.round_trip("create pass", c.build_create_pass(pass_type, data), PassClient::parse_create_pass)
    }

    /// Fetch a single pass; returns the server body verbatim.
    pub fn get(&self, pass_type: &str, serial_number: &str) -> Result<Value, PassNinjaError> {
        rejected(require_present(pass_type, "passType", "getPass"))?;
        rejected(require_present(serial_number, "serialNumber", "getPass"))?;

        let c = self.client;
        c.round_trip("get pass", Ok(c.build_get_pass(pass_type, serial_number)), PassClient::parse_pass)
    }

    /// Update an existing pass.
    ///
    /// Unlike `create`, the template's required keys are not re-checked:
    /// partial updates are accepted as-is.
    pub fn put(&self, pass_type: &str, serial_number: &str, data: &ClientPassData) -> Result<Value, PassNinjaError> {
        rejected(require_present(pass_type, "passType", "putPass"))?;
        rejected(require_present(serial_number, "serialNumber", "putPass"))?;
        rejected(require_string_values(data))?;

        let c = self.client;
        c.round_trip(
            "update pass",
            c.build_put_pass(pass_type, serial_number, data),
            PassClient::parse_pass,
        )
    }

    /// Delete a pass and echo back `serial_number` on success.
    pub fn delete(&self, pass_type: &str, serial_number: &str) -> Result<String, PassNinjaError> {
        rejected(require_present(pass_type, "passType", "deletePass"))?;
        rejected(require_present(serial_number, "serialNumber", "deletePass"))?;

        let c = self.client;
        c.round_trip(
            "delete pass",
            Ok(c.build_delete_pass(pass_type, serial_number)),
            PassClient::parse_delete_pass,
        )?;
        Ok(serial_number.to_string())
    }

    /// All passes issued for `pass_type`.
    pub fn find(&self, pass_type: &str) -> Result<Vec<Value>, PassNinjaError> {
        rejected(require_present(pass_type, "passType", "find"))?;

        let c = self.client;
        c.round_trip("find passes", Ok(c.build_find_passes(pass_type)), PassClient::parse_find_passes)
    }

    /// Decrypt a scanned payload for `pass_type`.
    pub fn decrypt(&self, pass_type: &str, payload: &str) -> Result<Value, PassNinjaError> {
        rejected(require_present(pass_type, "passType", "decrypt"))?;
        rejected(require_present(payload, "payload", "decrypt"))?;

        let c = self.client;
        c.round_trip("decrypt pass", c.build_decrypt_pass(pass_type, payload), PassClient::parse_pass)
    }

    /// Field names the server requires for passes of `pass_type`.
    ///
    /// Not cached; each call is a round trip.
    pub fn required_keys(&self, pass_type: &str) -> Result<BTreeSet<String>, PassNinjaError> {
        rejected(require_present(pass_type, "passType", "requiredKeys"))?;

        let c = self.client;
        c.round_trip(
            "fetch required keys",
            Ok(c.build_required_keys(pass_type)),
            PassClient::parse_required_keys,
        )
    }
}

/// Operations on pass templates, obtained from `PassClient::pass_template`.
#[derive(Debug, Clone, Copy)]
pub struct PassTemplates<'a> {
    client: &'a PassClient,
}

impl<'a> PassTemplates<'a> {
    pub(crate) fn new(client: &'a PassClient) -> Self {
        Self { client }
    }

    pub fn find(&self, template_id: &str) -> Result<Value, PassNinjaError> {
        rejected(require_present(template_id, "passTemplateId", "findPassTemplate"))?;

        let c = self.client;
        c.round_trip(
            "find pass template",
            Ok(c.build_find_pass_template(template_id)),
            PassClient::parse_pass,
        )
    }
}

fn rejected<T>(result: Result<T, PassNinjaError>) -> Result<T, PassNinjaError> {
    result.inspect_err(|err| warn!(error = %err, "rejected arguments"))
}
