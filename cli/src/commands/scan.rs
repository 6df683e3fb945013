use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use colored::*;

use lensr_common::config::{Config, ProbeDepth};
use lensr_common::network::host::HostProbeResult;
use lensr_common::network::interface;
use lensr_common::{error, info, success, warn};
use lensr_core::scanner::EventCallback;
use lensr_core::{CameraRegistry, ScanEngine, ScanEvent, ScanReport, ScanRequest, spawn_scan};

use crate::mprint;
use crate::terminal::input::InputHandle;
use crate::terminal::{colors, format, print, spinner};

const INPUT_POLL: Duration = Duration::from_millis(100);

pub async fn scan(
    interface_name: Option<String>,
    save: bool,
    cfg: &Config,
) -> anyhow::Result<()> {
    if !is_root::is_root() {
        warn!("Not running as root: the ARP sweep will most likely be refused");
    }

    let intf = interface::select_interface(&interface::list_interfaces(), interface_name.as_deref())?;
    info!(
        "Using {} ({}/{}), scanning {}",
        intf.name,
        intf.ipv4,
        intf.prefix(),
        intf.scan_network()
    );
    if cfg.depth == ProbeDepth::Deep {
        info!("Deep mode: ports are probed with nmap");
    }

    let engine = Arc::new(ScanEngine::from_config(cfg)?);
    let request = ScanRequest::new(intf, cfg);

    print::print_status("Press 'q' to stop the scan early");
    spinner::start();
    let handle = spawn_scan(engine, request, Some(progress_callback()));

    let mut input = InputHandle::new();
    input.start();
    while !handle.is_finished() {
        if input.should_interrupt() {
            warn!("Stopping scan, waiting for in-flight probes...");
            handle.stop();
        }
        tokio::time::sleep(INPUT_POLL).await;
    }
    drop(input);

    let result = handle.join().await;
    spinner::stop();
    let report = result?;

    scan_ends(&report);

    if save && !report.cameras.is_empty() {
        save_cameras(&report, cfg).await;
    }
    Ok(())
}

fn progress_callback() -> EventCallback {
    let total = Arc::new(AtomicUsize::new(0));
    let done = Arc::new(AtomicUsize::new(0));
    Arc::new(move |event: ScanEvent| match event {
        ScanEvent::HostsFound(n) => {
            total.store(n, Ordering::Relaxed);
            spinner::report_hosts_found(n);
        }
        ScanEvent::HostDone(_) => {
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            spinner::report_host_done(finished, total.load(Ordering::Relaxed));
        }
        ScanEvent::CameraConfirmed(ip, _) => {
            spinner::report(format!("Camera confirmed at {}", ip.to_string().green().bold()));
        }
    })
}

fn scan_ends(report: &ScanReport) {
    if report.cancelled {
        warn!("Scan was stopped early, results are partial");
    }
    if report.hosts.is_empty() {
        print::header("zero hosts detected");
        print::no_results();
        return;
    }

    mprint!();
    print::header("hosts");
    print_hosts(&report.hosts);
    print_summary(report);
}

fn print_hosts(hosts: &[HostProbeResult]) {
    for (idx, host) in hosts.iter().enumerate() {
        let title = if host.confirmed_url.is_some() {
            format!("{} (camera)", host.vendor)
        } else {
            host.vendor.clone()
        };
        print::tree_head(idx, &title);
        print::as_tree_one_level(format::host_to_details(host));
        if idx + 1 != hosts.len() {
            mprint!();
        }
    }
}

fn print_summary(report: &ScanReport) {
    let hosts: ColoredString = format!("{} hosts", report.hosts.len()).bold().green();
    let cameras: ColoredString = format!("{} cameras", report.cameras.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", report.elapsed.as_secs_f64()).bold().yellow();
    let output = format!("Scan Complete: {hosts} and {cameras} in {total_time}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    print::fat_separator();
    print::centerln(&output);
}

async fn save_cameras(report: &ScanReport, cfg: &Config) {
    let registry = CameraRegistry::open(&cfg.registry_path).await;
    for camera in &report.cameras {
        let name = format!("camera-{}", camera.ip);
        match registry.save_confirmed(camera, &name, "").await {
            Ok(saved) => success!("Saved {} as #{}", camera.url, saved.id),
            Err(e) => error!("Could not save {}: {e}", camera.url),
        }
    }
}
