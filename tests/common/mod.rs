#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use football_reminder_bot::error::{FetchError, NotifyError};
use football_reminder_bot::football_data::{FootballData, MatchSource};
use football_reminder_bot::model::date_range::DateRange;
use football_reminder_bot::model::match_record::{MatchRecord, TeamId};
use football_reminder_bot::telegram::Notifier;
use football_reminder_bot::translations::{TranslationTable, Translations};

pub fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).expect("valid rfc3339").with_timezone(&Utc)
}

pub fn load_fixture(name: &str) -> Vec<MatchRecord> {
    let body = std::fs::read_to_string(format!("tests/fixtures/{}", name)).expect("failed to read fixture");
    FootballData::parse_matches(&body).expect("fixture should parse")
}

/// Canned responses per team; teams without an entry fail with HTTP 403.
#[derive(Default)]
pub struct FakeSource {
    pub responses: HashMap<u32, Vec<MatchRecord>>,
    pub calls: Mutex<Vec<(TeamId, DateRange)>>,
}

impl FakeSource {
    pub fn with(mut self, team: u32, records: Vec<MatchRecord>) -> Self {
        self.responses.insert(team, records);
        self
    }
}

impl MatchSource for FakeSource {
    fn matches_for_team(&self, team: TeamId, range: &DateRange) -> Result<Vec<MatchRecord>, FetchError> {
        self.calls.lock().unwrap().push((team, *range));
        self.responses
            .get(&team.0)
            .cloned()
            .ok_or_else(|| FetchError::Http { status: 403, body: "restricted".to_string() })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self { fail: true, sent: Mutex::new(Vec::new()) }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, text: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.fail {
            Err(NotifyError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

pub fn hebrew_translations() -> Translations {
    Translations {
        leagues: TranslationTable::from_json(r#"{"La Liga": "ליגה ספרדית", "Primera Division": "ליגה ספרדית"}"#).unwrap(),
        teams: TranslationTable::from_json(
            r#"{"Real Madrid": "ריאל מדריד", "Barcelona": "ברצלונה", "Real Madrid CF": "ריאל מדריד", "FC Barcelona": "ברצלונה"}"#,
        )
        .unwrap(),
    }
}

/// A request captured by `serve_once`: head lines plus the decoded body.
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Accept exactly one HTTP request on a local port, answer with `status` and
/// `body`, and hand the request back through the join handle.
pub fn serve_once(status: &str, body: &str) -> (String, std::thread::JoinHandle<CapturedRequest>) {
    use std::io::Write;

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let request = read_request(&mut stream);
        stream.write_all(response.as_bytes()).expect("write response");
        request
    });
    (format!("http://{}", addr), handle)
}

fn read_request(stream: &mut std::net::TcpStream) -> CapturedRequest {
    use std::io::Read;

    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 4096];
    let (head_end, head) = loop {
        let n = stream.read(&mut chunk).expect("read request");
        assert!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break (pos + 4, String::from_utf8_lossy(&buf[..pos]).to_string());
        }
    };

    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();
    let find = |name: &str| headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.clone());

    let body_bytes = if find("transfer-encoding").is_some_and(|v| v.eq_ignore_ascii_case("chunked")) {
        while !buf[head_end..].ends_with(b"0\r\n\r\n") {
            let n = stream.read(&mut chunk).expect("read chunked body");
            assert!(n > 0, "connection closed inside chunked body");
            buf.extend_from_slice(&chunk[..n]);
        }
        decode_chunked(&buf[head_end..])
    } else {
        let len = find("content-length").and_then(|v| v.parse::<usize>().ok()).unwrap_or(0);
        while buf.len() < head_end + len {
            let n = stream.read(&mut chunk).expect("read body");
            assert!(n > 0, "connection closed inside body");
            buf.extend_from_slice(&chunk[..n]);
        }
        buf[head_end..head_end + len].to_vec()
    };

    CapturedRequest { request_line, headers, body: String::from_utf8(body_bytes).expect("utf-8 body") }
}

fn decode_chunked(mut raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let Some(line_end) = raw.windows(2).position(|w| w == b"\r\n") else { break };
        let size_str = String::from_utf8_lossy(&raw[..line_end]).to_string();
        let size = usize::from_str_radix(size_str.split(';').next().unwrap_or("0").trim(), 16).unwrap_or(0);
        if size == 0 {
            break;
        }
        let start = line_end + 2;
        out.extend_from_slice(&raw[start..start + size]);
        raw = &raw[start + size + 2..];
    }
    out
}
