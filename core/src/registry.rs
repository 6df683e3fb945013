//! # Camera Registry
//!
//! Durable list of cameras the user chose to keep.
//!
//! Every mutation rewrites the whole file through a sibling temp file and a
//! rename, and only touches the in-memory list once that write succeeded.
//! Writers are serialised by one mutex; readers go through an `RwLock` and
//! never observe a half-applied change.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use lensr_common::camera::{ConfirmedCamera, SavedCamera};
use lensr_common::error::RegistryError;
use lensr_common::scanning::{ProbeOutcome, StreamTester};
use lensr_common::{info, warn};

use crate::access;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegistryState {
    next_id: u64,
    cameras: Vec<SavedCamera>,
}

impl RegistryState {
    fn empty() -> Self {
        Self {
            next_id: 1,
            cameras: Vec::new(),
        }
    }
}

/// Older files hold a bare array of records.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRegistry {
    Envelope(RegistryState),
    Bare(Vec<SavedCamera>),
}

impl From<StoredRegistry> for RegistryState {
    fn from(stored: StoredRegistry) -> Self {
        let (next_id, cameras) = match stored {
            StoredRegistry::Envelope(state) => (state.next_id, state.cameras),
            StoredRegistry::Bare(cameras) => (0, cameras),
        };
        let floor = cameras.iter().map(|c| c.id + 1).max().unwrap_or(1);
        RegistryState {
            next_id: next_id.max(floor),
            cameras,
        }
    }
}

/// Outcome of re-testing one saved camera.
#[derive(Debug, Clone)]
pub struct Verification {
    pub camera: SavedCamera,
    pub outcome: ProbeOutcome,
}

pub struct CameraRegistry {
    path: PathBuf,
    state: RwLock<RegistryState>,
    writer: Mutex<()>,
}

impl CameraRegistry {
    /// Loads `path`. A missing or unreadable file yields an empty registry.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = load(&path).await;
        Self {
            path,
            state: RwLock::new(state),
            writer: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<SavedCamera> {
        self.state.read().await.cameras.clone()
    }

    pub async fn get(&self, id: u64) -> Option<SavedCamera> {
        self.state
            .read()
            .await
            .cameras
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub async fn add(
        &self,
        name: &str,
        url: &str,
        local_ip: &str,
        description: &str,
    ) -> Result<SavedCamera, RegistryError> {
        let _guard = self.writer.lock().await;
        let mut next = self.state.read().await.clone();

        let camera = SavedCamera {
            id: next.next_id,
            name: name.to_string(),
            url: url.to_string(),
            local_ip: local_ip.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
            active: true,
            attempt_count: 0,
            last_success: None,
        };
        next.next_id += 1;
        next.cameras.push(camera.clone());

        self.commit(next).await?;
        info!("Saved camera #{} '{}'", camera.id, camera.name);
        Ok(camera)
    }

    /// Stores a camera confirmed during a scan.
    pub async fn save_confirmed(
        &self,
        confirmed: &ConfirmedCamera,
        name: &str,
        description: &str,
    ) -> Result<SavedCamera, RegistryError> {
        self.add(name, &confirmed.url, &confirmed.ip.to_string(), description)
            .await
    }

    /// Deletes the record with `id`. An unknown id is a no-op and writes nothing.
    pub async fn remove(&self, id: u64) -> Result<Option<SavedCamera>, RegistryError> {
        let _guard = self.writer.lock().await;
        let mut next = self.state.read().await.clone();

        let Some(idx) = next.cameras.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        let removed = next.cameras.remove(idx);

        self.commit(next).await?;
        Ok(Some(removed))
    }

    /// Renames and/or re-describes a record. Other fields stay untouched.
    pub async fn update(
        &self,
        id: u64,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<SavedCamera, RegistryError> {
        let _guard = self.writer.lock().await;
        let mut next = self.state.read().await.clone();

        let camera = next
            .cameras
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RegistryError::NotFound(id))?;
        if let Some(name) = name {
            camera.name = name.to_string();
        }
        if let Some(description) = description {
            camera.description = description.to_string();
        }
        let updated = camera.clone();

        self.commit(next).await?;
        Ok(updated)
    }

    /// Re-tests the stored URL and records the attempt.
    ///
    /// Holds the writer lock for the whole probe, so two verifications of the
    /// same registry never interleave; `list` keeps working meanwhile.
    pub async fn verify(
        &self,
        id: u64,
        tester: &dyn StreamTester,
    ) -> Result<Verification, RegistryError> {
        let _guard = self.writer.lock().await;
        let mut next = self.state.read().await.clone();

        let url = next
            .cameras
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.url.clone())
            .ok_or(RegistryError::NotFound(id))?;

        let outcome = access::test_url(tester, &url).await;

        let camera = next
            .cameras
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RegistryError::NotFound(id))?;
        camera.attempt_count = camera.attempt_count.saturating_add(1);
        if outcome.is_reachable() {
            camera.active = true;
            camera.last_success = Some(Utc::now());
        } else {
            camera.active = false;
        }
        let camera = camera.clone();

        self.commit(next).await?;
        Ok(Verification { camera, outcome })
    }

    /// Persists `next`, then publishes it. Nothing changes in memory on failure.
    async fn commit(&self, next: RegistryState) -> Result<(), RegistryError> {
        persist(&self.path, &next).await?;
        *self.state.write().await = next;
        Ok(())
    }
}

async fn load(path: &Path) -> RegistryState {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return RegistryState::empty(),
        Err(e) => {
            warn!("Could not read {}: {e}, starting empty", path.display());
            return RegistryState::empty();
        }
    };

    match serde_json::from_str::<StoredRegistry>(&raw) {
        Ok(stored) => stored.into(),
        Err(e) => {
            warn!("Ignoring malformed registry {}: {e}", path.display());
            RegistryState::empty()
        }
    }
}

async fn persist(path: &Path, state: &RegistryState) -> Result<(), RegistryError> {
    let json = serde_json::to_string_pretty(state)?;
    let tmp = temp_sibling(path);

    let write = async {
        tokio::fs::write(&tmp, json.as_bytes()).await?;
        tokio::fs::rename(&tmp, path).await
    };

    if let Err(source) = write.await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(RegistryError::Persist {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "registry".to_string());
    path.with_file_name(format!(".{file_name}.{:08x}.tmp", rand::random::<u32>()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
