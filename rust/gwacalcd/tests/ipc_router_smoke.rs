use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_gwacalcd");
    let mut child = Command::new(exe)
        .env_remove("GWACALCD_SEED")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn gwacalcd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn read_response(reader: &mut BufReader<ChildStdout>) -> serde_json::Value {
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response");
    serde_json::from_str(line.trim()).expect("parse response json")
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let value = read_response(reader);
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    if value.get("ok").and_then(|v| v.as_bool()) == Some(false) {
        let code = value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        assert_ne!(
            code, "not_implemented",
            "unexpected unknown method for {}",
            method
        );
    }
    value
}

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    let result = &health["result"];
    assert_eq!(result["version"], json!(env!("CARGO_PKG_VERSION")));
    assert_eq!(result["seed"], json!("sample"));
    assert_eq!(result["subjectCount"], json!(8));
    assert!(result["startedAt"].as_str().map(|s| s.contains('T')).unwrap_or(false));

    let bands = request(&mut stdin, &mut reader, "2", "grades.bands", json!({}));
    let list = bands["result"]["bands"].as_array().cloned().unwrap_or_default();
    assert_eq!(list.len(), 6);
    assert_eq!(list[0]["minAverage"].as_f64(), Some(98.0));
    assert_eq!(list[0]["grade"].as_f64(), Some(1.0));
    assert_eq!(list[5]["minAverage"].as_f64(), Some(83.0));
    assert_eq!(bands["result"]["fallbackGrade"].as_f64(), Some(2.5));

    for (id, method, params) in [
        ("3", "roster.get", json!({})),
        ("4", "summary.get", json!({})),
        ("5", "view.table", json!({})),
        ("6", "view.text", json!({})),
        ("7", "seed.audit", json!({})),
        ("8", "subjects.add", json!({})),
        ("9", "subjects.update", json!({ "index": 8, "field": "subjectName", "value": "NSTP" })),
        ("10", "subjects.updateRow", json!({ "index": 8, "fields": { "units": "1" } })),
        ("11", "subjects.delete", json!({ "index": 8 })),
        ("12", "roster.reset", json!({})),
    ] {
        let resp = request(&mut stdin, &mut reader, id, method, params);
        assert_eq!(resp["ok"], json!(true), "{method}: {resp}");
    }

    let text = request(&mut stdin, &mut reader, "13", "view.text", json!({}));
    let body = text["result"]["text"].as_str().unwrap_or_default().to_string();
    assert!(body.starts_with("Subject"));
    assert!(body.contains("APPDEV"));
    assert!(body.ends_with("Total Units: 25  General Weighted Average: 1.24\n"));

    let unknown = {
        writeln!(stdin, "{}", json!({ "id": "14", "method": "grades.curve" })).expect("write");
        stdin.flush().expect("flush");
        read_response(&mut reader)
    };
    assert_eq!(unknown["ok"], json!(false));
    assert_eq!(unknown["error"]["code"], json!("not_implemented"));

    writeln!(stdin, "{{not json").expect("write");
    writeln!(stdin).expect("write blank");
    stdin.flush().expect("flush");
    let bad = read_response(&mut reader);
    assert_eq!(bad["ok"], json!(false));
    assert_eq!(bad["error"]["code"], json!("bad_json"));

    // Still serving after a malformed line.
    let after = request(&mut stdin, &mut reader, "15", "health", json!({}));
    assert_eq!(after["ok"], json!(true));
    assert_eq!(after["result"]["revision"], json!(5));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn empty_seed_starts_blank() {
    let exe = env!("CARGO_BIN_EXE_gwacalcd");
    let mut child = Command::new(exe)
        .env("GWACALCD_SEED", "empty")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn gwacalcd");
    let mut stdin = child.stdin.take().expect("child stdin");
    let mut reader = BufReader::new(child.stdout.take().expect("child stdout"));

    let roster = request(&mut stdin, &mut reader, "1", "roster.get", json!({}));
    assert_eq!(roster["result"]["subjects"], json!([]));
    assert_eq!(roster["result"]["summary"]["gwa"].as_f64(), Some(0.0));

    let reset = request(&mut stdin, &mut reader, "2", "roster.reset", json!({}));
    assert_eq!(reset["result"]["subjects"], json!([]));
    assert_eq!(reset["result"]["revision"], json!(1));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn invalid_seed_mode_exits_non_zero() {
    let exe = env!("CARGO_BIN_EXE_gwacalcd");
    let out = Command::new(exe)
        .env("GWACALCD_SEED", "everything")
        .stdin(Stdio::null())
        .output()
        .expect("run gwacalcd");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("GWACALCD_SEED"), "stderr: {stderr}");
    assert!(out.stdout.is_empty());
}
