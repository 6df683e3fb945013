//! # Camera Model
//!
//! Everything the access prober and the registry exchange:
//! * the fixed camera port set and known-defaults credential list,
//! * [`StreamCandidate`], a guessed stream URL that has not been verified yet,
//! * [`ConfirmedCamera`], a candidate that answered during a scan,
//! * [`SavedCamera`], the durable registry record.

use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

/// Ports associated with camera services (HTTP, RTSP and their common alternates).
pub const CAMERA_PORTS: [u16; 4] = [80, 554, 8080, 8888];

/// Factory defaults shipped by common camera vendors, tried in this order.
///
/// This is a known-defaults list, not a wordlist: the order is part of the
/// observable behaviour because the first credential that works is the one
/// reported. Anonymous access comes first so an open stream is never reported
/// with credentials it ignores.
pub const DEFAULT_CREDENTIALS: [(&str, &str); 14] = [
    ("", ""),
    ("admin", "admin"),
    ("admin", "12345"),
    ("admin", "password"),
    ("root", "root"),
    ("user", "user"),
    ("admin", "1234"),
    ("admin", "1111111"),
    ("admin", "4321"),
    ("admin", "123456"),
    ("root", "admin"),
    ("service", "service"),
    ("", "admin"),
    ("supervisor", "supervisor"),
];

pub fn is_camera_port(port: u16) -> bool {
    CAMERA_PORTS.contains(&port)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Credential {
    pub user: String,
    pub password: String,
}

impl Credential {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Anonymous access: both fields empty.
    pub fn is_anonymous(&self) -> bool {
        self.user.is_empty() && self.password.is_empty()
    }

    /// The fixed dictionary as owned credentials, in probing order.
    pub fn defaults() -> Vec<Credential> {
        DEFAULT_CREDENTIALS
            .iter()
            .map(|(user, password)| Credential::new(*user, *password))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Rtsp,
    Http,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Rtsp => "rtsp",
            Scheme::Http => "http",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Rtsp => 554,
            Scheme::Http => 80,
        }
    }

    /// Path probed for this protocol.
    pub fn default_path(&self) -> &'static str {
        match self {
            Scheme::Rtsp => "/",
            Scheme::Http => "/video",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A protocol-specific URL guessed from a port/credential combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamCandidate {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    /// `None` means the authority carries no userinfo.
    pub credential: Option<Credential>,
    pub path: String,
}

impl StreamCandidate {
    /// Builds a candidate with the default path of `scheme`.
    ///
    /// Anonymous credentials are dropped so the URL has no userinfo.
    pub fn new(scheme: Scheme, host: impl Into<String>, port: u16, credential: &Credential) -> Self {
        let credential = (!credential.is_anonymous()).then(|| credential.clone());
        Self {
            scheme,
            host: host.into(),
            port,
            credential,
            path: scheme.default_path().to_string(),
        }
    }

    pub fn url(&self) -> String {
        self.to_string()
    }

    /// The candidate as a [`Url`], userinfo percent-encoded.
    pub fn to_url(&self) -> Option<Url> {
        let mut url = self.location().ok()?;
        if let Some(cred) = &self.credential {
            url.set_username(&cred.user).ok()?;
            url.set_password(Some(&cred.password)).ok()?;
        }
        Some(url)
    }

    /// The candidate without userinfo, as sent on the wire.
    pub fn location(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}://{}:{}{}",
            self.scheme, self.host, self.port, self.path
        ))
    }

    /// Parses `rtsp://` and `http://` URLs, filling in the scheme default port.
    ///
    /// Userinfo is percent-decoded, so `a%2Fb` yields the password `a/b`.
    pub fn parse(raw: &str) -> Result<Self, CandidateParseError> {
        let url = Url::parse(raw).map_err(|e| match e {
            url::ParseError::InvalidPort => CandidateParseError::InvalidPort(raw.to_string()),
            url::ParseError::EmptyHost => CandidateParseError::MissingHost(raw.to_string()),
            other => CandidateParseError::Malformed(format!("{raw}: {other}")),
        })?;

        let scheme = match url.scheme() {
            "rtsp" => Scheme::Rtsp,
            "http" => Scheme::Http,
            _ => return Err(CandidateParseError::UnsupportedScheme(raw.to_string())),
        };

        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(CandidateParseError::MissingHost(raw.to_string())),
        };
        let port = url.port().unwrap_or(scheme.default_port());

        let credential = Credential::new(
            decode(url.username()),
            decode(url.password().unwrap_or_default()),
        );

        let mut path = match url.path() {
            "" => String::from("/"),
            path => path.to_string(),
        };
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        Ok(Self {
            scheme,
            host,
            port,
            credential: (!credential.is_anonymous()).then_some(credential),
            path,
        })
    }
}

fn decode(component: &str) -> String {
    percent_decode_str(component).decode_utf8_lossy().into_owned()
}

impl fmt::Display for StreamCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_url() {
            Some(url) => write!(f, "{url}"),
            None => write!(f, "{}://{}:{}{}", self.scheme, self.host, self.port, self.path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CandidateParseError {
    #[error("unsupported stream url: {0}")]
    UnsupportedScheme(String),
    #[error("invalid port: {0}")]
    InvalidPort(String),
    #[error("missing host in {0}")]
    MissingHost(String),
    #[error("malformed stream url: {0}")]
    Malformed(String),
}

/// A candidate that tested reachable during one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmedCamera {
    pub ip: IpAddr,
    pub url: String,
}

/// Durable registry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCamera {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub local_ip: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub attempt_count: u32,
    #[serde(default)]
    pub last_success: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
