use std::io::Cursor;

use super::*;

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("utf8 output")
}

// =============================================================================
// Argument parsing
// =============================================================================

#[test]
fn cli_parses_validate_with_defaults() {
    let cli = Cli::try_parse_from(["authstate", "validate"]).expect("valid args");
    let Command::Validate(args) = cli.command else {
        panic!("expected validate command");
    };
    assert_eq!(args.source.input, "-");
    assert!(!args.sessions);
    assert!(cli.max_user_len.is_none());
}

#[test]
fn cli_parses_limit_and_level() {
    let cli = Cli::try_parse_from(["authstate", "--log-level", "debug", "--max-user-len", "12", "methods"])
        .expect("valid args");
    assert_eq!(cli.log_level, Level::DEBUG);
    assert_eq!(cli.max_user_len, Some(12));
}

#[test]
fn cli_rejects_zero_limit() {
    assert!(Cli::try_parse_from(["authstate", "--max-user-len", "0", "methods"]).is_err());
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn methods_lists_google_oauth() {
    let mut buf = Vec::new();
    run_methods(&mut buf).unwrap();
    assert_eq!(output(buf), "Google OAuth\n");
}

#[test]
fn validate_reports_each_line() {
    let input = concat!(
        r#"{"user": "alice", "authenticatedBy": "Google OAuth"}"#,
        "\n\n",
        r#"{"user": "alice", "authenticatedBy": "Email/Password"}"#,
        "\n",
    );
    let mut buf = Vec::new();
    let err = run_validate(&Validator::default(), Cursor::new(input), false, &mut buf).unwrap_err();
    assert!(matches!(err, CliError::InvalidDocuments { invalid: 1, total: 2 }));

    let text = output(buf);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "ok 1: alice via Google OAuth");
    assert!(lines[1].starts_with("invalid 3: unknown authentication method"));
}

#[test]
fn validate_all_valid_succeeds() {
    let input = r#"{"user": "bob", "authenticatedBy": "Google OAuth"}"#;
    let mut buf = Vec::new();
    run_validate(&Validator::default(), Cursor::new(input), false, &mut buf).unwrap();
    assert_eq!(output(buf), "ok 1: bob via Google OAuth\n");
}

#[test]
fn validate_null_requires_sessions_flag() {
    let mut buf = Vec::new();
    assert!(run_validate(&Validator::default(), Cursor::new("null\n"), false, &mut buf).is_err());

    let mut buf = Vec::new();
    run_validate(&Validator::default(), Cursor::new("null\n"), true, &mut buf).unwrap();
    assert_eq!(output(buf), "ok 1: anonymous\n");
}

#[test]
fn encode_then_decode_round_trips() {
    let validator = Validator::default();
    let mut encoded = Vec::new();
    run_encode(
        &validator,
        Cursor::new(r#"{"user": "carol", "authenticatedBy": "Google OAuth"}"#),
        &mut encoded,
    )
    .unwrap();
    let hex = output(encoded);

    let mut decoded = Vec::new();
    run_decode(&validator, hex.trim(), &mut decoded).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
    assert_eq!(json, serde_json::json!({ "user": "carol", "authenticatedBy": "Google OAuth" }));
}

#[test]
fn encode_rejects_invalid_document() {
    let mut buf = Vec::new();
    let err = run_encode(&Validator::default(), Cursor::new(r#"{"user": ""}"#), &mut buf).unwrap_err();
    assert!(matches!(err, CliError::Contract(ContractError::MissingField("authenticatedBy"))));
    assert!(buf.is_empty());
}

#[test]
fn decode_applies_user_limit() {
    let hex = hex_encode(&encode_auth_state(&authstate::AuthState::google("longname").unwrap()));
    let validator = Validator::new(ContractConfig { max_user_len: 4 });
    let mut buf = Vec::new();
    let err = run_decode(&validator, &hex, &mut buf).unwrap_err();
    assert!(matches!(err, CliError::Contract(ContractError::UserTooLong { len: 8, max: 4 })));
}

#[test]
fn validate_reads_input_file() {
    let dir = tempfile::Builder::new().prefix("authstate-cli-").tempdir().expect("temp dir");
    let path = dir.path().join("states.jsonl");
    std::fs::write(
        &path,
        concat!(
            r#"{"user": "alice", "authenticatedBy": "Google OAuth"}"#,
            "\n",
            r#"{"user": "bob", "authenticatedBy": "Google OAuth"}"#,
            "\n",
        ),
    )
    .expect("write input");

    let reader = open_input(path.to_str().expect("utf8 path")).expect("open input");
    let mut buf = Vec::new();
    run_validate(&Validator::default(), reader, false, &mut buf).unwrap();
    assert_eq!(output(buf), "ok 1: alice via Google OAuth\nok 2: bob via Google OAuth\n");
}

#[test]
fn encode_reads_input_file() {
    let dir = tempfile::Builder::new().prefix("authstate-cli-").tempdir().expect("temp dir");
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{"user": "dana", "authenticatedBy": "Google OAuth"}"#).expect("write input");

    let reader = open_input(path.to_str().expect("utf8 path")).expect("open input");
    let mut buf = Vec::new();
    run_encode(&Validator::default(), reader, &mut buf).unwrap();
    let bytes = hex_decode(output(buf).trim()).expect("hex output");
    assert_eq!(decode_auth_state(&bytes).expect("decode").user(), "dana");
}

#[test]
fn open_input_missing_file_is_io_error() {
    let dir = tempfile::Builder::new().prefix("authstate-cli-").tempdir().expect("temp dir");
    let path = dir.path().join("missing.jsonl");
    let Err(err) = open_input(path.to_str().expect("utf8 path")) else {
        panic!("missing file should fail");
    };
    assert!(matches!(err, CliError::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
}

#[test]
fn decode_rejects_bad_hex() {
    let mut buf = Vec::new();
    let err = run_decode(&Validator::default(), "xyz", &mut buf).unwrap_err();
    assert!(matches!(err, CliError::Codec(CodecError::InvalidHex(_))));
}
