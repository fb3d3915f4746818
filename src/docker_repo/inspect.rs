// Flatten an inspect response into the fields the details panel shows.

use bollard::models::{ContainerInspectResponse, PortBinding};

use crate::models::ContainerDetails;

pub(crate) fn to_details(ci: &ContainerInspectResponse) -> ContainerDetails {
    let config = ci.config.as_ref();
    let host_config = ci.host_config.as_ref();
    let network_settings = ci.network_settings.as_ref();

    let ip_address = network_settings
        .and_then(|n| n.networks.as_ref())
        .and_then(|networks| {
            let mut names: Vec<&String> = networks.keys().collect();
            names.sort();
            names
                .into_iter()
                .filter_map(|name| networks[name].ip_address.clone())
                .find(|ip| !ip.is_empty())
        })
        .unwrap_or_default();

    let ports = network_settings
        .and_then(|n| n.ports.as_ref())
        .map(|ports| {
            let mut keys: Vec<&String> = ports.keys().collect();
            keys.sort();
            keys.into_iter()
                .map(|k| format!("{} -> {}", k, port_bindings(ports[k].as_deref())))
                .collect()
        })
        .unwrap_or_default();

    let volumes = ci
        .mounts
        .as_ref()
        .map(|mounts| {
            let mut pairs: Vec<(String, String)> = mounts
                .iter()
                .map(|m| {
                    (
                        m.destination.clone().unwrap_or_default(),
                        m.source.clone().unwrap_or_default(),
                    )
                })
                .collect();
            pairs.sort();
            pairs
                .into_iter()
                .map(|(dest, src)| format!("{} -> {}", dest, src))
                .collect()
        })
        .unwrap_or_default();

    ContainerDetails {
        name: ci
            .name
            .as_deref()
            .unwrap_or_default()
            .trim_start_matches('/')
            .to_string(),
        image: config
            .and_then(|c| c.image.clone())
            .or_else(|| ci.image.clone())
            .unwrap_or_default(),
        path: ci.path.clone().unwrap_or_default(),
        args: ci.args.clone().unwrap_or_default(),
        ip_address,
        ports,
        volumes,
        hostname: config.and_then(|c| c.hostname.clone()).unwrap_or_default(),
        memory: host_config.and_then(|h| h.memory).unwrap_or(0),
        memory_swap: host_config.and_then(|h| h.memory_swap).unwrap_or(0),
        cpu_shares: host_config.and_then(|h| h.cpu_shares).unwrap_or(0),
        cpuset: host_config
            .and_then(|h| h.cpuset_cpus.clone())
            .unwrap_or_default(),
        env: config.and_then(|c| c.env.clone()).unwrap_or_default(),
    }
}

fn port_bindings(bindings: Option<&[PortBinding]>) -> String {
    match bindings {
        Some(b) if !b.is_empty() => b
            .iter()
            .map(|p| {
                format!(
                    "{}:{}",
                    p.host_ip.as_deref().unwrap_or_default(),
                    p.host_port.as_deref().unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => "-".to_string(),
    }
}
