#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use tempfile::TempDir;

pub const WORKFLOW_ID: &str = "wf-1";
pub const APPROVAL_AUTH: &str = "Basic YXBwcm92YWw6";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("json request body")
    }
}

#[derive(Clone)]
struct Route {
    method: String,
    path: String,
    status: u16,
    body: String,
}

/// HTTP/1.1 test server answering from a route table, one request per
/// connection. Unrouted requests get 404. The accept loop stops on drop.
pub struct StubServer {
    pub base: String,
    addr: SocketAddr,
    routes: Arc<Mutex<Vec<Route>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        listener
            .set_nonblocking(true)
            .expect("set_nonblocking true");
        let addr = listener.local_addr().expect("stub addr");
        let routes: Arc<Mutex<Vec<Route>>> = Arc::default();
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::default();
        let stop = Arc::new(AtomicBool::new(false));

        let (r, q, stop_flag) = (
            Arc::clone(&routes),
            Arc::clone(&requests),
            Arc::clone(&stop),
        );
        let handle = std::thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        if stop_flag.load(Ordering::Relaxed) {
                            break;
                        }
                        serve_connection(stream, &r, &q);
                    }
                    Err(err) if err.kind() == ErrorKind::WouldBlock => {
                        std::thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            base: format!("http://{}", addr),
            addr,
            routes,
            requests,
            stop,
            handle: Some(handle),
        }
    }

    pub fn route(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        self.routes.lock().expect("routes lock").push(Route {
            method: method.to_string(),
            path: path.to_string(),
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// `"METHOD /path"` for every request received, in arrival order.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve_connection(
    mut stream: TcpStream,
    routes: &Mutex<Vec<Route>>,
    requests: &Mutex<Vec<Recorded>>,
) {
    // Accepted sockets inherit non-blocking mode on some platforms.
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let Some(recorded) = read_request(&stream) else {
        return;
    };

    let route = routes
        .lock()
        .expect("routes lock")
        .iter()
        .find(|r| r.method == recorded.method && r.path == recorded.path)
        .cloned();
    requests.lock().expect("requests lock").push(recorded);

    let (status, body) = route
        .map(|r| (r.status, r.body))
        .unwrap_or((404, "{}".to_string()));
    let status_text = if (200..300).contains(&status) { "OK" } else { "Stub" };
    let response = format!(
        "HTTP/1.1 {status} {status_text}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Request line, lowercased headers and a `content-length` body.
fn read_request(stream: &TcpStream) -> Option<Recorded> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0_u8; length];
    reader.read_exact(&mut body).ok()?;

    Some(Recorded {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// A port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{}/login", addr)
}

pub struct TestEnv {
    _tmp: TempDir,
    pub dir: PathBuf,
    pub server: StubServer,
}

impl TestEnv {
    /// Workspace with a stub identity endpoint that accepts the login.
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let dir = tmp.path().to_path_buf();
        let server = StubServer::start();
        server.route("POST", "/login", 200, r#"{"access_token":"tok-e2e"}"#);
        Self {
            _tmp: tmp,
            dir,
            server,
        }
    }

    pub fn write_catalog(&self, name: &str, doc: Value) {
        fs::write(
            self.dir.join(format!("{}.json", name)),
            serde_json::to_string_pretty(&doc).expect("serialize catalog"),
        )
        .expect("write catalog");
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join("smoke-test.log")
    }

    pub fn log(&self) -> String {
        fs::read_to_string(self.log_path()).unwrap_or_default()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("smokegate");
        for var in [
            "HTTP_PROXY",
            "http_proxy",
            "HTTPS_PROXY",
            "https_proxy",
            "ALL_PROXY",
            "all_proxy",
            "RUST_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.dir)
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env("URL", self.server.url("/login"))
            .env("EMAIL", "ci@example.com")
            .env("PASSWORD", "s3cret")
            .env("AUTHORIZATION", "Basic bG9naW46")
            .env("CIRCLE_WORKFLOW_ID", WORKFLOW_ID)
            .env("APPROVAL_API_URL", self.server.url("/api/v2"))
            .env("APPROVAL_AUTHORIZATION", APPROVAL_AUTH)
            .arg("--catalog-dir")
            .arg(&self.dir)
            .arg("--log-file")
            .arg(self.log_path());
        cmd
    }

    /// `--function test` against `smoke.json` / `stg`.
    pub fn test_cmd(&self, fail_fast: bool) -> Command {
        let mut cmd = self.cmd();
        cmd.args([
            "--function",
            "test",
            "--flag",
            if fail_fast { "true" } else { "false" },
            "--env",
            "stg",
            "--name",
            "smoke",
        ]);
        cmd
    }

    pub fn rollback_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args([
            "--function", "rollback", "--flag", "false", "--env", "stg", "--name", "smoke",
        ]);
        cmd
    }

    pub fn route_workflow_jobs(&self, items: Value) {
        self.server.route(
            "GET",
            &format!("/api/v2/workflow/{}/job", WORKFLOW_ID),
            200,
            &serde_json::json!({ "items": items }).to_string(),
        );
    }

    pub fn route_approval(&self, approval_request_id: &str, status: u16) {
        self.server.route(
            "POST",
            &format!(
                "/api/v2/workflow/{}/approve/{}",
                WORKFLOW_ID, approval_request_id
            ),
            status,
            r#"{"message":"Accepted."}"#,
        );
    }
}

pub fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("valid json output")
}
