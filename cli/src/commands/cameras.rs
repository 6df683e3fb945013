use std::sync::Arc;

use lensr_common::camera::{SavedCamera, StreamCandidate};
use lensr_common::config::Config;
use lensr_common::{info, success, warn};
use lensr_core::{CameraRegistry, NetworkStreamTester};

use crate::commands::CameraAction;
use crate::mprint;
use crate::terminal::{format, print};

pub async fn cameras(action: CameraAction, cfg: &Config) -> anyhow::Result<()> {
    let registry = CameraRegistry::open(&cfg.registry_path).await;

    match action {
        CameraAction::List => list(&registry).await,
        CameraAction::Add {
            name,
            url,
            local_ip,
            description,
        } => {
            let candidate = StreamCandidate::parse(&url)?;
            let local_ip = local_ip.unwrap_or(candidate.host);
            let saved = registry.add(&name, &url, &local_ip, &description).await?;
            success!("Saved '{}' as #{}", saved.name, saved.id);
        }
        CameraAction::Remove { id } => match registry.remove(id).await? {
            Some(removed) => success!("Removed #{} '{}'", removed.id, removed.name),
            None => warn!("No saved camera with id {id}"),
        },
        CameraAction::Verify { id } => verify(&registry, id, cfg).await?,
        CameraAction::Edit {
            id,
            name,
            description,
        } => {
            if name.is_none() && description.is_none() {
                warn!("Nothing to change, pass --name and/or --description");
                return Ok(());
            }
            let updated = registry
                .update(id, name.as_deref(), description.as_deref())
                .await?;
            success!("Updated #{} '{}'", updated.id, updated.name);
        }
    }
    Ok(())
}

async fn list(registry: &CameraRegistry) {
    let cameras = registry.list().await;
    if cameras.is_empty() {
        info!("No saved cameras in {}", registry.path().display());
        return;
    }

    print::header("saved cameras");
    print_cameras(&cameras);
    print::end_of_program();
}

fn print_cameras(cameras: &[SavedCamera]) {
    for (idx, camera) in cameras.iter().enumerate() {
        print::tree_head(camera.id as usize, &camera.name);
        print::as_tree_one_level(format::camera_to_details(camera));
        if idx + 1 != cameras.len() {
            mprint!();
        }
    }
}

async fn verify(registry: &CameraRegistry, id: Option<u64>, cfg: &Config) -> anyhow::Result<()> {
    let tester = Arc::new(NetworkStreamTester::new(cfg.rtsp_timeout, cfg.http_timeout)?);
    let ids: Vec<u64> = match id {
        Some(id) => vec![id],
        None => registry.list().await.iter().map(|c| c.id).collect(),
    };

    for id in ids {
        let verification = registry.verify(id, tester.as_ref()).await?;
        let camera = &verification.camera;
        if camera.active {
            success!("#{} '{}' is reachable", camera.id, camera.name);
        } else {
            warn!(
                "#{} '{}' did not answer ({:?})",
                camera.id, camera.name, verification.outcome
            );
        }
    }
    Ok(())
}
