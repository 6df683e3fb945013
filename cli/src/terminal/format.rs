use colored::*;

use lensr_common::camera::SavedCamera;
use lensr_common::network::host::HostProbeResult;
use lensr_common::network::interface::NetworkInterface;
use lensr_core::AccessMethod;

use crate::terminal::colors;

type Detail = (String, ColoredString);

pub fn interface_to_details(intf: &NetworkInterface) -> Vec<Detail> {
    let address = format!(
        "{}/{}",
        intf.ipv4.to_string().color(colors::IPV4_ADDR),
        intf.prefix().to_string().color(colors::IPV4_PREFIX)
    );
    vec![
        ("IPv4".to_string(), address.normal()),
        (
            "Scan".to_string(),
            intf.scan_network().to_string().color(colors::IPV4_ADDR),
        ),
    ]
}

pub fn host_to_details(host: &HostProbeResult) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        ("IPv4".to_string(), host.ip.to_string().color(colors::IPV4_ADDR)),
        ("MAC".to_string(), host.mac.color(colors::MAC_ADDR)),
        ("Vendor".to_string(), host.vendor.normal()),
    ];

    if !host.open_ports.is_empty() {
        let ports = host
            .open_ports
            .iter()
            .map(|port| match host.services.get(port) {
                Some(service) => format!("{port} ({service})"),
                None => port.to_string(),
            })
            .collect::<Vec<String>>()
            .join(", ");
        details.push(("Ports".to_string(), ports.color(colors::PORT)));
    }

    if let Some(url) = &host.confirmed_url {
        details.push(("Stream".to_string(), url.color(colors::STREAM_URL).bold()));
    } else if host.is_camera_candidate {
        details.push(("Stream".to_string(), "no default credential worked".dimmed()));
    }

    details
}

pub fn camera_to_details(camera: &SavedCamera) -> Vec<Detail> {
    let status = if camera.active {
        "active".green()
    } else {
        "inactive".color(colors::INACTIVE)
    };
    let last_success = camera
        .last_success
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let mut details: Vec<Detail> = vec![
        ("URL".to_string(), camera.url.color(colors::STREAM_URL)),
        ("Local".to_string(), camera.local_ip.color(colors::IPV4_ADDR)),
        ("Status".to_string(), status),
        ("Checks".to_string(), camera.attempt_count.to_string().normal()),
        ("Seen".to_string(), last_success.normal()),
        (
            "Added".to_string(),
            camera.created_at.format("%Y-%m-%d %H:%M:%S").to_string().normal(),
        ),
    ];
    if !camera.description.is_empty() {
        details.push(("Notes".to_string(), camera.description.italic()));
    }
    details
}

pub fn access_method_to_details(method: &AccessMethod) -> Vec<Detail> {
    vec![
        ("URL".to_string(), method.url.color(colors::STREAM_URL)),
        ("How".to_string(), method.description.normal()),
        ("Note".to_string(), method.note.dimmed()),
    ]
}
