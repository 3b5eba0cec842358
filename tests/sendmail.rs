//! End-to-end delivery tests against fake MTA scripts.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use pipemail::{Address, Error, Mailer, Message, Transport};
use tempfile::TempDir;

/// Writes an executable shell script standing in for the MTA binary.
/// Scripts capture into files next to themselves via `dirname "$0"`.
fn fake_mta(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-sendmail");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn sample_message() -> Message {
    Message::new()
        .with_from(Address::with_name("Michał", "me@example.com").unwrap())
        .with_to(Address::with_name("Ktoś", "info@example.com").unwrap())
        .with_to(Address::with_name("Ktoś2", "info2@example.com").unwrap())
        .with_subject("Cześć")
        .with_text(":)\r\n".as_bytes())
}

#[test]
fn delivers_serialized_message_on_stdin() {
    let dir = TempDir::new().unwrap();
    let mta = fake_mta(dir.path(), r#"cat > "$(dirname "$0")/stdin.capture""#);

    let mut message = sample_message();
    Mailer::sendmail(&mta).send(&mut message).unwrap();

    let captured = fs::read(dir.path().join("stdin.capture")).unwrap();
    assert_eq!(captured, message.to_bytes().unwrap());
}

#[test]
fn passes_extra_args_then_bare_mailboxes() {
    let dir = TempDir::new().unwrap();
    let mta = fake_mta(
        dir.path(),
        r#"printf '%s\n' "$@" > "$(dirname "$0")/args.capture"
cat > /dev/null"#,
    );

    let transport = Transport::sendmail_with_args(&mta, ["-i"]);
    let mut message = sample_message();
    Mailer::with_transport(transport).send(&mut message).unwrap();

    let args = fs::read_to_string(dir.path().join("args.capture")).unwrap();
    assert_eq!(args, "-i\ninfo@example.com\ninfo2@example.com\n");
}

#[test]
fn stderr_output_fails_delivery_despite_exit_zero() {
    let dir = TempDir::new().unwrap();
    let mta = fake_mta(
        dir.path(),
        "cat > /dev/null\necho 'dead.letter saved' >&2\nexit 0",
    );

    let err = Mailer::sendmail(&mta).send(&mut sample_message()).unwrap_err();
    match err {
        Error::MtaReported { stderr } => assert_eq!(stderr, b"dead.letter saved\n"),
        other => panic!("expected MtaReported, got {other:?}"),
    }
}

#[test]
fn nonzero_exit_with_quiet_stderr_is_a_process_error() {
    let dir = TempDir::new().unwrap();
    let mta = fake_mta(dir.path(), "cat > /dev/null\nexit 3");

    let err = Mailer::sendmail(&mta).send(&mut sample_message()).unwrap_err();
    match err {
        Error::ProcessExit(status) => assert_eq!(status.code(), Some(3)),
        other => panic!("expected ProcessExit, got {other:?}"),
    }
}

#[test]
fn sink_output_matches_process_stdin_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let mta = fake_mta(dir.path(), r#"cat > "$(dirname "$0")/stdin.capture""#);
    let sink_path = dir.path().join("sink.capture");

    let mut message = sample_message();
    Mailer::sendmail(&mta).send(&mut message).unwrap();
    Mailer::sink(fs::File::create(&sink_path).unwrap())
        .send(&mut message)
        .unwrap();

    let via_process = fs::read(dir.path().join("stdin.capture")).unwrap();
    let via_sink = fs::read(&sink_path).unwrap();
    assert_eq!(via_process, via_sink);
    assert_eq!(via_sink, message.to_bytes().unwrap());
}

#[test]
fn missing_binary_surfaces_as_launch_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no-such-mta");

    let err = Mailer::sendmail(&missing)
        .send(&mut sample_message())
        .unwrap_err();
    assert!(matches!(err, Error::Launch { .. }), "got {err:?}");
}
