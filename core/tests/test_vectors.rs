//! Replay the JSON vectors in `test-vectors/` through a canned transport.
//!
//! Each case lists the caller's input, the responses the fake server hands
//! back in order, the requests the client must send, and either the
//! normalized result or the expected error kind. Request bodies and results
//! are compared as parsed JSON so field ordering does not matter.

mod common;

use passninja_core::{ClientPassData, HttpMethod, HttpResponse, PassClient, PassNinjaError};
use serde_json::Value;

use common::{client_with, CannedTransport, ACCOUNT_ID, API_KEY, BASE_URL};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

/// Vector bodies are JSON values, or raw strings for non-JSON payloads.
fn simulated(sim: &Value) -> HttpResponse {
    let body = match &sim["body"] {
        Value::String(raw) => raw.clone(),
        other => other.to_string(),
    };
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body,
    }
}

fn str_input<'a>(input: &'a Value, field: &str) -> &'a str {
    input[field].as_str().unwrap()
}

fn pass_input(input: &Value) -> ClientPassData {
    input["pass"].as_object().cloned().unwrap()
}

fn replay(raw: &str, call: impl Fn(&PassClient, &Value) -> Result<Value, PassNinjaError>) {
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let responses = case["simulated_responses"].as_array().unwrap().iter().map(simulated);
        let transport = CannedTransport::new(responses);
        let client = client_with(&transport);

        let result = call(&client, &case["input"]);

        // Verify requests
        let sent = transport.requests();
        let expected_requests = case["expected_requests"].as_array().unwrap();
        assert_eq!(sent.len(), expected_requests.len(), "{name}: request count");
        for (req, expected) in sent.iter().zip(expected_requests) {
            assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
            assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
            assert_eq!(req.header("content-type"), Some("application/json"), "{name}: content-type");
            assert_eq!(req.header("x-account-id"), Some(ACCOUNT_ID), "{name}: account id");
            assert_eq!(req.header("x-api-key"), Some(API_KEY), "{name}: api key");
            match req.body.as_deref() {
                Some(body) => {
                    let body: Value = serde_json::from_str(body).unwrap();
                    assert_eq!(body, expected["body"], "{name}: body");
                }
                None => assert!(expected["body"].is_null(), "{name}: body should be None"),
            }
        }

        // Verify outcome
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "InvalidArguments" => assert!(err.is_invalid_arguments(), "{name}: expected InvalidArguments, got {err}"),
                "OperationFailed" => assert!(err.is_operation_failed(), "{name}: expected OperationFailed, got {err}"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            if let Some(fragment) = case.get("expected_message_contains") {
                let fragment = fragment.as_str().unwrap();
                assert!(err.to_string().contains(fragment), "{name}: {err} lacks {fragment:?}");
            }
        } else {
            let value = result.unwrap_or_else(|e| panic!("{name}: unexpected error {e}"));
            assert_eq!(value, case["expected_result"], "{name}: result");
        }
    }
}

#[test]
fn create_test_vectors() {
    replay(include_str!("../../test-vectors/create.json"), |client, input| {
        let created = client
            .pass()
            .create(str_input(input, "passType"), &pass_input(input))?;
        Ok(serde_json::to_value(created).unwrap())
    });
}

#[test]
fn get_test_vectors() {
    replay(include_str!("../../test-vectors/get.json"), |client, input| {
        client
            .pass()
            .get(str_input(input, "passType"), str_input(input, "serialNumber"))
    });
}

#[test]
fn put_test_vectors() {
    replay(include_str!("../../test-vectors/put.json"), |client, input| {
        client.pass().put(
            str_input(input, "passType"),
            str_input(input, "serialNumber"),
            &pass_input(input),
        )
    });
}

#[test]
fn delete_test_vectors() {
    replay(include_str!("../../test-vectors/delete.json"), |client, input| {
        let serial = client
            .pass()
            .delete(str_input(input, "passType"), str_input(input, "serialNumber"))?;
        Ok(Value::String(serial))
    });
}

#[test]
fn find_test_vectors() {
    replay(include_str!("../../test-vectors/find.json"), |client, input| {
        let passes = client.pass().find(str_input(input, "passType"))?;
        Ok(Value::Array(passes))
    });
}

#[test]
fn decrypt_test_vectors() {
    replay(include_str!("../../test-vectors/decrypt.json"), |client, input| {
        client
            .pass()
            .decrypt(str_input(input, "passType"), str_input(input, "payload"))
    });
}

#[test]
fn pass_template_test_vectors() {
    replay(include_str!("../../test-vectors/template.json"), |client, input| {
        client.pass_template().find(str_input(input, "passTemplateId"))
    });
}
