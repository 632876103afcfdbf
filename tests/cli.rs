//! Exit codes and JSON output of the `minimax-tts` binary.

use mockito::Server;
use serde_json::{json, Value};
use std::process::{Command, Output};

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_minimax-tts"));
    for var in [
        "MINIMAX_API_KEY",
        "MINMAX_API_KEY",
        "MINIMAX_TTS_ENDPOINT",
        "MINMAX_TTS_ENDPOINT",
        "MINIMAX_TTS_BACKUP_ENDPOINT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn stderr_json(output: &Output) -> Value {
    let stderr = String::from_utf8_lossy(&output.stderr);
    serde_json::from_str(stderr.trim()).unwrap_or_else(|e| panic!("stderr is not JSON ({e}): {stderr}"))
}

#[test]
fn test_both_text_sources_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let text_file = dir.path().join("in.txt");
    std::fs::write(&text_file, "hello").unwrap();

    let output = cli()
        .args(["--text", "hello", "--text-file"])
        .arg(&text_file)
        .args(["--voice-id", "v", "--api-key", "k", "--output"])
        .arg(dir.path().join("out.mp3"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let err = stderr_json(&output);
    assert_eq!(err["ok"], false);
    assert!(err["error"].as_str().unwrap().contains("exactly one of --text or --text-file"));
}

#[test]
fn test_no_text_source_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli()
        .args(["--voice-id", "v", "--api-key", "k", "--output"])
        .arg(dir.path().join("out.mp3"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr_json(&output)["ok"], false);
}

#[test]
fn test_missing_api_key_makes_no_request() {
    let mut server = Server::new();
    let mock = server.mock("POST", "/v1/t2a_v2").expect(0).create();
    let dir = tempfile::tempdir().unwrap();

    let output = cli()
        .args(["--text", "hello", "--voice-id", "v", "--endpoint"])
        .arg(format!("{}/v1/t2a_v2", server.url()))
        .arg("--output")
        .arg(dir.path().join("out.mp3"))
        .output()
        .unwrap();

    mock.assert();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_json(&output)["error"]
        .as_str()
        .unwrap()
        .contains("Missing API key"));
}

#[test]
fn test_verbose_failure_keeps_stderr_to_one_json_line() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli()
        .args(["-vvv", "--text", "hello", "--voice-id", "v", "--output"])
        .arg(dir.path().join("out.mp3"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.trim().lines().count(), 1, "stderr: {stderr}");
    assert_eq!(stderr_json(&output)["ok"], false);
}

#[test]
fn test_argument_errors_use_json_and_exit_one() {
    let output = cli().args(["--text", "hello"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr_json(&output)["ok"], false);
}

#[test]
fn test_successful_run_prints_report() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/v1/t2a_v2")
        .match_header("authorization", "Bearer env-key")
        .match_body(mockito::Matcher::PartialJson(json!({
            "model": "speech-02-turbo",
            "audio_setting": {"format": "wav", "sample_rate": 24000},
            "voice_setting": {"voice_id": "narrator", "pitch": -2},
            "pronunciation_dict": {"tone": ["a/(a1)", "b/(b2)"]},
            "subtitle_enable": true
        })))
        .with_status(200)
        .with_body(
            json!({
                "data": {"audio": "52494646"},
                "extra_info": {"usage_characters": 11},
                "trace_id": "trace-cli",
                "base_resp": {"status_code": 0, "status_msg": "success"}
            })
            .to_string(),
        )
        .create();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("speech/out.wav");
    let endpoint = format!("{}/v1/t2a_v2", server.url());
    let output = cli()
        .env("MINIMAX_API_KEY", "env-key")
        .args(["--text", "hello world", "--voice-id", "narrator"])
        .args(["--model", "speech-02-turbo", "--format", "wav", "--sample-rate", "24000"])
        .args(["--pitch", "-2", "--subtitle-enable"])
        .args(["--pronunciation-tone", "a/(a1)", "--pronunciation-tone", "b/(b2)"])
        .args(["--endpoint", endpoint.as_str(), "--backup-endpoint", endpoint.as_str()])
        .arg("--output")
        .arg(&out)
        .output()
        .unwrap();

    mock.assert();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stderr.is_empty());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report,
        json!({
            "ok": true,
            "output_path": out.display().to_string(),
            "voice_id": "narrator",
            "model": "speech-02-turbo",
            "format": "wav",
            "bytes": 4,
            "trace_id": "trace-cli",
            "usage_characters": 11
        })
    );
    assert_eq!(std::fs::read(&out).unwrap(), b"RIFF");
}
