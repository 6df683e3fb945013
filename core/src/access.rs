//! # Access Prober
//!
//! Turns a host's open camera ports into [`StreamCandidate`]s and tests them
//! one after another until the first one answers.
//!
//! Candidates are built per port (ascending), then per credential in
//! [`DEFAULT_CREDENTIALS`](lensr_common::camera::DEFAULT_CREDENTIALS) order,
//! RTSP before HTTP. That order decides which credential gets reported.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use lensr_common::camera::{self, Credential, Scheme, StreamCandidate};
use lensr_common::error::ProbeError;
use lensr_common::scanning::{ProbeOutcome, StreamTester};
use lensr_common::{debug, warn};

const RTSP_USER_AGENT: &str = "lensr/0.1";
const MAX_RTSP_RESPONSE: usize = 16 * 1024;

/// Result of probing one host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessOutcome {
    /// First candidate that answered, if any.
    pub confirmed: Option<StreamCandidate>,
    /// Number of candidates actually tested.
    pub attempts: usize,
    /// The stop signal was observed before the candidate list was exhausted.
    pub cancelled: bool,
}

/// Builds the ordered candidate list for `host`.
///
/// Ports outside the camera port set are ignored.
pub fn build_candidates(host: &str, ports: &[u16], credentials: &[Credential]) -> Vec<StreamCandidate> {
    let mut ports: Vec<u16> = ports
        .iter()
        .copied()
        .filter(|p| camera::is_camera_port(*p))
        .collect();
    ports.sort_unstable();
    ports.dedup();

    ports
        .iter()
        .flat_map(|&port| {
            credentials.iter().flat_map(move |cred| {
                [
                    StreamCandidate::new(Scheme::Rtsp, host, port, cred),
                    StreamCandidate::new(Scheme::Http, host, port, cred),
                ]
            })
        })
        .collect()
}

pub struct AccessProber {
    tester: Arc<dyn StreamTester>,
    credentials: Vec<Credential>,
}

impl AccessProber {
    pub fn new(tester: Arc<dyn StreamTester>) -> Self {
        Self::with_credentials(tester, Credential::defaults())
    }

    pub fn with_credentials(tester: Arc<dyn StreamTester>, credentials: Vec<Credential>) -> Self {
        Self { tester, credentials }
    }

    /// Tests candidates in construction order and stops at the first reachable one.
    ///
    /// `cancel` is checked between attempts; a result that arrives after the
    /// token fired is discarded.
    pub async fn probe_host(
        &self,
        ip: IpAddr,
        open_ports: &[u16],
        cancel: &CancellationToken,
    ) -> AccessOutcome {
        let candidates = build_candidates(&ip.to_string(), open_ports, &self.credentials);
        let mut outcome = AccessOutcome::default();

        for candidate in candidates {
            if cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }

            outcome.attempts += 1;
            let result = self.tester.test(&candidate).await;
            debug!("{candidate} -> {result:?}");

            if cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }
            if result.is_reachable() {
                outcome.confirmed = Some(candidate);
                break;
            }
        }

        outcome
    }
}

/// Parses `url` and hands it to `tester`; unparsable URLs count as protocol failures.
pub async fn test_url(tester: &dyn StreamTester, url: &str) -> ProbeOutcome {
    match StreamCandidate::parse(url) {
        Ok(candidate) => tester.test(&candidate).await,
        Err(e) => {
            warn!("Cannot test {url}: {e}");
            ProbeOutcome::Failed(ProbeError::Protocol)
        }
    }
}

/// Tests candidates over the network: RTSP `DESCRIBE` or HTTP `GET`.
pub struct NetworkStreamTester {
    http: reqwest::Client,
    rtsp_timeout: Duration,
}

impl NetworkStreamTester {
    pub fn new(rtsp_timeout: Duration, http_timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(http_timeout)
            .connect_timeout(http_timeout)
            .build()?;
        Ok(Self { http, rtsp_timeout })
    }

    async fn test_rtsp(&self, candidate: &StreamCandidate) -> ProbeOutcome {
        match timeout(self.rtsp_timeout, describe(candidate)).await {
            Ok(Ok(response)) => evaluate_describe(&response),
            Ok(Err(e)) => ProbeOutcome::Failed(ProbeError::from(&e)),
            Err(_) => ProbeOutcome::Failed(ProbeError::Timeout),
        }
    }

    async fn test_http(&self, candidate: &StreamCandidate) -> ProbeOutcome {
        let Ok(url) = candidate.location() else {
            return ProbeOutcome::Failed(ProbeError::Protocol);
        };
        let mut request = self.http.get(url);
        if let Some(cred) = &candidate.credential {
            request = request.basic_auth(&cred.user, Some(&cred.password));
        }

        match request.send().await {
            Ok(resp) if resp.status() == StatusCode::OK => ProbeOutcome::Reachable,
            Ok(_) => ProbeOutcome::Unreachable,
            Err(e) if e.is_timeout() => ProbeOutcome::Failed(ProbeError::Timeout),
            Err(e) if e.is_connect() => ProbeOutcome::Failed(ProbeError::Refused),
            Err(_) => ProbeOutcome::Failed(ProbeError::Io),
        }
    }
}

#[async_trait]
impl StreamTester for NetworkStreamTester {
    async fn test(&self, candidate: &StreamCandidate) -> ProbeOutcome {
        match candidate.scheme {
            Scheme::Rtsp => self.test_rtsp(candidate).await,
            Scheme::Http => self.test_http(candidate).await,
        }
    }
}

fn describe_request(candidate: &StreamCandidate) -> String {
    let mut request = format!(
        "DESCRIBE rtsp://{}:{}{} RTSP/1.0\r\n\
         CSeq: 2\r\n\
         Accept: application/sdp\r\n\
         User-Agent: {RTSP_USER_AGENT}\r\n",
        candidate.host, candidate.port, candidate.path
    );
    if let Some(cred) = &candidate.credential {
        let token = STANDARD.encode(format!("{}:{}", cred.user, cred.password));
        request.push_str(&format!("Authorization: Basic {token}\r\n"));
    }
    request.push_str("\r\n");
    request
}

async fn describe(candidate: &StreamCandidate) -> std::io::Result<String> {
    let mut stream = TcpStream::connect((candidate.host.as_str(), candidate.port)).await?;
    stream.write_all(describe_request(candidate).as_bytes()).await?;

    let mut response: Vec<u8> = Vec::new();
    let mut buf = [0u8; 2048];
    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        response.extend_from_slice(&buf[..n]);
        if response.len() >= MAX_RTSP_RESPONSE || is_complete(&response) {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&response).into_owned())
}

/// Headers received and, when announced, the whole body too.
fn is_complete(response: &[u8]) -> bool {
    let text = String::from_utf8_lossy(response);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let body_len = text[..header_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    text.len() >= header_end + 4 + body_len
}

/// Reachable iff the status is 200 and the SDP advertises a video track.
fn evaluate_describe(response: &str) -> ProbeOutcome {
    if !response.starts_with("RTSP/") {
        return ProbeOutcome::Failed(ProbeError::Protocol);
    }
    let status_ok = response
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        == Some("200");
    if status_ok && response.lines().any(|line| line.starts_with("m=video")) {
        ProbeOutcome::Reachable
    } else {
        ProbeOutcome::Unreachable
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
