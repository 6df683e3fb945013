#![cfg(test)]
use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::task::JoinSet;

use lensr_core::CameraRegistry;

use crate::support::{AllowListTester, temp_registry};

#[tokio::test]
async fn concurrent_adds_get_distinct_ids_and_all_reach_disk() {
    let path = temp_registry();
    let registry = Arc::new(CameraRegistry::open(&path).await);

    let mut set = JoinSet::new();
    for n in 0..16u8 {
        let registry = registry.clone();
        set.spawn(async move {
            let ip = format!("10.0.0.{n}");
            registry
                .add(&format!("cam-{n}"), &format!("rtsp://{ip}:554/"), &ip, "")
                .await
        });
    }

    let mut ids = BTreeSet::new();
    while let Some(res) = set.join_next().await {
        ids.insert(res.unwrap().unwrap().id);
    }
    assert_eq!(ids, (1..=16).collect::<BTreeSet<u64>>());

    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["cameras"].as_array().map(Vec::len), Some(16));

    let reopened = CameraRegistry::open(&path).await;
    assert_eq!(reopened.list().await.len(), 16);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn removed_ids_stay_retired_across_reopen() {
    let path = temp_registry();
    {
        let registry = CameraRegistry::open(&path).await;
        registry.add("a", "rtsp://10.0.0.1:554/", "10.0.0.1", "").await.unwrap();
        let b = registry.add("b", "rtsp://10.0.0.2:554/", "10.0.0.2", "").await.unwrap();
        registry.remove(b.id).await.unwrap();
    }

    let registry = CameraRegistry::open(&path).await;
    let c = registry.add("c", "rtsp://10.0.0.3:554/", "10.0.0.3", "").await.unwrap();
    assert_eq!(c.id, 3);
    assert!(registry.remove(2).await.unwrap().is_none());

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn verify_all_marks_unreachable_cameras_inactive() {
    let path = temp_registry();
    let registry = CameraRegistry::open(&path).await;
    let up = registry.add("up", "rtsp://10.0.0.1:554/", "10.0.0.1", "").await.unwrap();
    let down = registry.add("down", "rtsp://10.0.0.2:554/", "10.0.0.2", "").await.unwrap();

    let tester = AllowListTester::new(&["rtsp://10.0.0.1:554/"]);
    for camera in registry.list().await {
        registry.verify(camera.id, &tester).await.unwrap();
    }

    let reopened = CameraRegistry::open(&path).await;
    let up = reopened.get(up.id).await.unwrap();
    let down = reopened.get(down.id).await.unwrap();
    assert!(up.active);
    assert!(up.last_success.is_some());
    assert!(!down.active);
    assert!(down.last_success.is_none());
    assert_eq!((up.attempt_count, down.attempt_count), (1, 1));

    let _ = std::fs::remove_file(&path);
}
