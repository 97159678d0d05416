//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use vestaboard_core::{ClientConfig, HttpMethod, HttpResponse, RwClient, VestaboardError};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> RwClient {
    RwClient::from_config(ClientConfig::new("vector-key").with_base_url(BASE_URL)).unwrap()
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(value: &serde_json::Value) -> HttpResponse {
    HttpResponse {
        status: value["status"].as_u64().unwrap() as u16,
        headers: vec![(
            "content-type".to_string(),
            value["content_type"].as_str().unwrap().to_string(),
        )],
        body: value["body"].as_str().unwrap().as_bytes().to_vec(),
    }
}

fn error_kind(err: &VestaboardError) -> &'static str {
    match err {
        VestaboardError::InvalidText(_) => "InvalidText",
        VestaboardError::UnexpectedStatus { .. } => "UnexpectedStatus",
        VestaboardError::ContentType { .. } => "ContentType",
        VestaboardError::Decode { .. } => "Decode",
        _ => "Other",
    }
}

// ---------------------------------------------------------------------------
// Send text
// ---------------------------------------------------------------------------

#[test]
fn send_text_test_vectors() {
    let raw = include_str!("../../test-vectors/send_text.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_str().unwrap();
        let result = c.build_send_text(input);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(error_kind(&err), expected_error.as_str().unwrap(), "{name}");
            continue;
        }

        // Verify build
        let req = result.unwrap();
        let expected_req = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, BASE_URL, "{name}: url");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let parsed = c.parse_send_message(simulated(&case["simulated_response"])).unwrap();
        assert_eq!(parsed.message.text, case["expected_result"].as_str().unwrap(), "{name}: result");
    }
}

// ---------------------------------------------------------------------------
// Parse response
// ---------------------------------------------------------------------------

#[test]
fn parse_response_test_vectors() {
    let raw = include_str!("../../test-vectors/parse_response.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = c.parse_send_message(simulated(&case["response"]));

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(error_kind(&err), expected_error.as_str().unwrap(), "{name}");
            let needle = case["expected_message_contains"].as_str().unwrap();
            assert!(err.to_string().contains(needle), "{name}: {err}");
            assert!(
                err.to_string().starts_with(&format!("POST {BASE_URL}")),
                "{name}: {err}"
            );
        } else {
            let parsed = result.unwrap();
            assert_eq!(parsed.message.text, case["expected_result"].as_str().unwrap(), "{name}");
        }
    }
}
