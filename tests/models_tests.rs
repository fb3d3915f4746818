// Wire shape of the model types

mod common;

use common::snapshot;
use dockmon::models::*;

#[test]
fn test_raw_snapshot_serializes_camel_case() {
    let s = snapshot("abc", 1_700_000_000, 10, 20, 2, 30, 40, 50, 60);
    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["containerId"], "abc");
    assert_eq!(json["cpu"]["totalUsageTicks"], 10);
    assert_eq!(json["cpu"]["systemUsageTicks"], 20);
    assert_eq!(json["cpu"]["onlineCpuCount"], 2);
    assert_eq!(json["memory"]["usageBytes"], 30);
    assert_eq!(json["memory"]["limitBytes"], 40);
    assert_eq!(json["network"]["rxBytes"], 50);
    assert_eq!(json["network"]["txBytes"], 60);
    assert!(json["readTimestamp"].as_str().unwrap().starts_with("2023-11-14T22:13:20"));
}

#[test]
fn test_raw_snapshot_deserializes() {
    let json = r#"{
        "containerId": "abc",
        "readTimestamp": "2024-01-01T00:00:00Z",
        "cpu": {"totalUsageTicks": 1, "systemUsageTicks": 2, "onlineCpuCount": 4},
        "memory": {"usageBytes": 3, "limitBytes": 4},
        "network": {"rxBytes": 5, "txBytes": 6}
    }"#;
    let s: RawSnapshot = serde_json::from_str(json).unwrap();
    assert_eq!(s.container_id, "abc");
    assert_eq!(s.read_timestamp.timestamp(), 1_704_067_200);
    assert_eq!(s.cpu.online_cpu_count, 4);
    assert_eq!(s.network.tx_bytes, 6);
}

#[test]
fn test_container_summary_image_defaults() {
    let s: ContainerSummary = serde_json::from_str(r#"{"id": "x", "name": "web"}"#).unwrap();
    assert_eq!(s, ContainerSummary::new("x", "web"));
    assert_eq!(ContainerSummary::from("x").name, "x");
}

#[test]
fn test_dashboard_serialization_skips_memory_result() {
    let dashboard = DashboardSnapshot {
        containers: vec![ContainerView {
            index: 0,
            id: "x".into(),
            name: "web".into(),
            image: "nginx".into(),
            view: DerivedView {
                memory_percent: Some(Ok(5)),
                memory_usage_bytes: Some(10),
                samples: 1,
                ..Default::default()
            },
        }],
    };
    let json = serde_json::to_value(&dashboard).unwrap();
    let view = &json["containers"][0]["view"];
    assert_eq!(view["memoryUsageBytes"], 10);
    assert_eq!(view["cpuPercentSeries"], serde_json::json!([]));
    assert!(view.get("memoryPercent").is_none());
    assert!(!dashboard.is_empty());
    assert!(dashboard.get("x").is_some());
    assert!(dashboard.get("y").is_none());
}
