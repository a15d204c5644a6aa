#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use backstat_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
ingest:
  listen: "127.0.0.1:9463"
  recv_bufer_bytes: 8192 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.ingest.listen, "127.0.0.1:9463");
    assert_eq!(cfg.ingest.recv_buffer_bytes, 4096);
    assert_eq!(cfg.http.listen, "127.0.0.1:9464");
    assert_eq!(cfg.registry.completed_capacity, 500);
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
ingest:
  listen: "0.0.0.0:19463"
  recv_buffer_bytes: 8192
http:
  listen: "0.0.0.0:19464"
registry:
  completed_capacity: 50
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.ingest.listen_addr().unwrap().port(), 19463);
    assert_eq!(cfg.http.listen_addr().unwrap().port(), 19464);
    assert_eq!(cfg.ingest.recv_buffer_bytes, 8192);
    assert_eq!(cfg.registry.completed_capacity, 50);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn listen_must_be_socket_addr() {
    let bad = r#"
version: 1
http:
  listen: "localhost:9464"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
    assert!(err.to_string().contains("http.listen"));
}

#[test]
fn capacity_range_checked() {
    let bad = r#"
version: 1
registry:
  completed_capacity: 0
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn recv_buffer_range_checked() {
    let bad = r#"
version: 1
ingest:
  recv_buffer_bytes: 16
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn missing_file_is_io_and_names_the_path() {
    let path = std::env::temp_dir().join("backstat-no-such-config.yaml");
    let err = config::load_from_file(&path).expect_err("must fail");
    assert_eq!(err.code().as_str(), "IO");
    assert!(err.to_string().contains("backstat-no-such-config.yaml"));
}
