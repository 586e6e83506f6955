//! Integration tests for `recur serve` over stdio.
//! Verifies a tool call round-trip and that closing stdin or SIGTERM causes a clean exit.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn recur_binary() -> std::path::PathBuf {
    assert_cmd::cargo::cargo_bin!("recur").into()
}

fn spawn_serve(dir: &TempDir) -> std::process::Child {
    Command::new(recur_binary())
        .arg("serve")
        .env("RECUR_CONFIG", dir.path().join("config.toml"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn recur serve")
}

/// Send the MCP initialize handshake so the server enters its main loop.
fn mcp_handshake(child: &mut std::process::Child) {
    let stdin = child.stdin.as_mut().expect("stdin pipe");

    let init_req = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "test", "version": "0.1.0" }
        }
    });
    send_jsonrpc(stdin, &init_req);

    // Wait for server to process initialize
    std::thread::sleep(Duration::from_millis(300));

    let initialized = serde_json::json!({
        "jsonrpc": "2.0",
        "method": "notifications/initialized"
    });
    send_jsonrpc(stdin, &initialized);

    std::thread::sleep(Duration::from_millis(200));
}

/// Send a JSON-RPC message as newline-delimited JSON.
fn send_jsonrpc(stdin: &mut impl Write, msg: &serde_json::Value) {
    let line = serde_json::to_string(msg).unwrap();
    writeln!(stdin, "{line}").unwrap();
    stdin.flush().unwrap();
}

/// Closing stdin before MCP init should still exit cleanly (code 0).
#[test]
fn serve_exits_on_early_stdin_eof() {
    let dir = TempDir::new().unwrap();
    let mut child = spawn_serve(&dir);
    std::thread::sleep(Duration::from_millis(200));

    drop(child.stdin.take());

    let start = Instant::now();
    let output = child.wait_with_output().expect("wait");
    let elapsed = start.elapsed();

    assert!(
        output.status.success(),
        "early stdin EOF should exit 0, got {}",
        output.status
    );
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
}

/// After full MCP handshake, closing stdin should trigger clean shutdown.
#[test]
fn serve_exits_on_stdin_eof() {
    let dir = TempDir::new().unwrap();
    let mut child = spawn_serve(&dir);
    mcp_handshake(&mut child);

    drop(child.stdin.take());

    let start = Instant::now();
    let output = child.wait_with_output().expect("wait");
    let elapsed = start.elapsed();

    assert!(
        output.status.success(),
        "recur serve should exit 0 on stdin EOF, got {}",
        output.status
    );
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
}

#[test]
fn serve_answers_recur_solve() {
    let dir = TempDir::new().unwrap();
    let mut child = spawn_serve(&dir);
    mcp_handshake(&mut child);

    let call = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/call",
        "params": {
            "name": "recur_solve",
            "arguments": { "input": "4" }
        }
    });
    send_jsonrpc(child.stdin.as_mut().expect("stdin pipe"), &call);
    std::thread::sleep(Duration::from_millis(300));
    drop(child.stdin.take());

    let stdout = child.stdout.take().expect("stdout pipe");
    let response = BufReader::new(stdout)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(&line).ok())
        .find(|msg| msg["id"] == 2)
        .expect("response to tools/call");
    child.wait().expect("wait");

    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("text content");
    let record: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(record["input"], "4");
    assert_eq!(
        record["solution"],
        "T(4) = 2T(4/2) + O(4)\n2(2(T(1) = O(1)) + O(2)) + O(4)"
    );
    assert_eq!(record["error"], "");
}

#[cfg(unix)]
#[test]
fn serve_exits_on_sigterm() {
    let dir = TempDir::new().unwrap();
    let mut child = spawn_serve(&dir);
    mcp_handshake(&mut child);

    let status = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .expect("failed to run kill");
    assert!(status.success());

    let start = Instant::now();
    let deadline = start + Duration::from_secs(2);
    let exit = loop {
        if let Some(exit) = child.try_wait().expect("try_wait") {
            break exit;
        }
        if Instant::now() > deadline {
            let _ = child.kill();
            panic!("recur serve still running {:?} after SIGTERM", start.elapsed());
        }
        std::thread::sleep(Duration::from_millis(20));
    };

    assert!(exit.success(), "SIGTERM should exit 0, got {exit}");
}
