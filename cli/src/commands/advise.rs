use anyhow::Context;

use lensr_common::config::Config;
use lensr_core::advisor;
use lensr_core::{CameraRegistry, HttpPublicIpLookup};

use crate::mprint;
use crate::terminal::{format, print};

pub async fn advise(id: u64, cfg: &Config) -> anyhow::Result<()> {
    let registry = CameraRegistry::open(&cfg.registry_path).await;
    let camera = registry
        .get(id)
        .await
        .with_context(|| format!("no saved camera with id {id}"))?;

    let lookup = HttpPublicIpLookup::new()?;
    let methods = advisor::advise(&camera, &lookup).await?;

    print::header(&format!("reaching {}", camera.name));
    for (idx, method) in methods.iter().enumerate() {
        print::tree_head(idx, &method.kind.to_string());
        print::as_tree_one_level(format::access_method_to_details(method));
        if idx + 1 != methods.len() {
            mprint!();
        }
    }
    print::end_of_program();
    Ok(())
}
