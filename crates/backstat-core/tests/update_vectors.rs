//! Status datagram vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use backstat_core::protocol::update::{decode_update, UpdateKind};

mod vector_loader;
use vector_loader::TestVector;

fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

#[test]
fn update_vectors() {
    let files = [
        "started_canonical.json",
        "finished_long_names.json",
        "finished_sentinel_status.json",
        "unknown_kind.json",
        "missing_backend.json",
        "empty_backend.json",
        "not_json.json",
        "truncated.json",
        "wrong_type.json",
        "kind_out_of_range.json",
        "canonical_and_alias.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.payload.decode();
        let res = decode_update(&raw);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let update = res.expect("expected ok update");
        let ex = v.expect.expect("missing expect block");

        assert_eq!(update.request_seq, ex["request_seq"].as_i64().unwrap(), "vector={}", v.description);
        assert_eq!(update.backend, ex["backend"].as_str().unwrap(), "vector={}", v.description);
        assert_eq!(update.code as u64, ex["code"].as_u64().unwrap(), "vector={}", v.description);
        assert_eq!(update.status, ex["status"].as_i64().unwrap(), "vector={}", v.description);
        assert_eq!(update.uri, ex["uri"].as_str().unwrap(), "vector={}", v.description);

        if let Some(t) = ex.get("elapsed_secs") {
            assert_eq!(update.elapsed_secs, t.as_f64().unwrap(), "vector={}", v.description);
        } else {
            assert_eq!(update.elapsed_secs, 0.0, "vector={}", v.description);
        }
    }
}

#[test]
fn kind_mapping() {
    let started = decode_update(br#"{"I":1,"B":"h:1","C":1}"#).unwrap();
    let finished = decode_update(br#"{"I":1,"B":"h:1","C":2}"#).unwrap();
    let zero = decode_update(br#"{"I":1,"B":"h:1"}"#).unwrap();

    assert_eq!(started.kind(), UpdateKind::Started);
    assert_eq!(finished.kind(), UpdateKind::Finished);
    assert_eq!(zero.kind(), UpdateKind::Unknown(0));
}

#[test]
fn missing_backend_names_the_field() {
    let err = decode_update(br#"{"I":1,"C":1}"#).unwrap_err();
    assert_eq!(err.to_string(), "missing required field: B");
}
