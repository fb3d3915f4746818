// Rendering against an in-memory backend

mod common;

use common::{snapshot, summaries};
use dockmon::engine::AggregationEngine;
use dockmon::models::{ContainerDetails, ContainerSummary};
use dockmon::tui::{View, draw, history_capacity};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

fn screen_text(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width);
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render(view: &View, engine: &AggregationEngine, details: Option<&ContainerDetails>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    let snapshot = engine.dashboard();
    terminal.draw(|f| draw(f, view, &snapshot, details)).unwrap();
    screen_text(terminal.backend().buffer())
}

#[test]
fn test_main_view_renders_titles_and_containers() {
    let engine = AggregationEngine::new(history_capacity(120));
    engine.reconcile(vec![ContainerSummary::new("abc123", "web")]);
    engine
        .ingest("abc123", snapshot("abc123", 1, 0, 0, 1, 100, 0, 0, 0))
        .unwrap();
    engine
        .ingest("abc123", snapshot("abc123", 2, 50, 100, 1, 200, 0, 10, 20))
        .unwrap();

    let text = render(&View::Main, &engine, None);
    assert!(text.contains("('q' to quit panel)"));
    // 30 columns at this width: the list title is clipped by its border.
    assert!(text.contains("Containers (#num for"));
    assert!(text.contains("Memory % usage"));
    assert!(text.contains("CPU"));
    assert!(text.contains("Rx Bytes"));
    assert!(text.contains("Tx Bytes"));
    assert!(text.contains("[0] web:abc123"));
    assert!(text.contains("[ 0]: 200b (no limit)"));
    assert!(text.contains("(no limit)"));
    assert!(text.contains("[50 %] web:abc123"));
}

#[test]
fn test_memory_panel_flags_containers_without_limit() {
    let engine = AggregationEngine::new(10);
    engine.reconcile(vec![
        ContainerSummary::new("a", "limited"),
        ContainerSummary::new("b", "unlimited"),
    ]);
    engine
        .ingest("a", snapshot("a", 1, 0, 0, 1, 50, 100, 0, 0))
        .unwrap();
    engine
        .ingest("b", snapshot("b", 1, 0, 0, 1, 50, 0, 0, 0))
        .unwrap();

    let text = render(&View::Main, &engine, None);
    assert!(text.contains("n/a (no limit): [ 1]"));
    assert!(!text.contains("[ 0] n/a"));
}

#[test]
fn test_memory_panel_without_unlimited_containers_has_no_flag() {
    let engine = AggregationEngine::new(10);
    engine.reconcile(summaries(&["a"]));
    engine
        .ingest("a", snapshot("a", 1, 0, 0, 1, 50, 100, 0, 0))
        .unwrap();
    let text = render(&View::Main, &engine, None);
    assert!(!text.contains("n/a"));
}

#[test]
fn test_main_view_with_no_containers() {
    let engine = AggregationEngine::new(10);
    let text = render(&View::Main, &engine, None);
    assert!(text.contains("Container Memory"));
}

#[test]
fn test_details_view_without_container() {
    let engine = AggregationEngine::new(10);
    engine.reconcile(summaries(&["a"]));
    let view = View::Details {
        index: 4,
        container_id: None,
    };
    let text = render(&view, &engine, None);
    assert!(text.contains("no running container at [4]"));
}

#[test]
fn test_details_view_lists_inspect_fields() {
    let engine = AggregationEngine::new(10);
    let details = ContainerDetails {
        name: "web".into(),
        image: "nginx:latest".into(),
        path: "/docker-entrypoint.sh".into(),
        ip_address: "172.17.0.2".into(),
        ports: vec!["80/tcp -> 0.0.0.0:8080".into()],
        volumes: vec!["/data -> /srv/data".into(), "/logs -> /srv/logs".into()],
        hostname: "abc123".into(),
        ..Default::default()
    };
    let view = View::Details {
        index: 0,
        container_id: Some("abc123".into()),
    };
    let text = render(&view, &engine, Some(&details));
    assert!(text.contains("Details: web"));
    assert!(text.contains("Image: nginx:latest"));
    assert!(text.contains("IP: 172.17.0.2"));
    assert!(text.contains("Ports: 80/tcp -> 0.0.0.0:8080"));
    assert!(text.contains("Volumes: /data -> /srv/data"));
    assert!(text.contains("/logs -> /srv/logs"));
    assert!(text.contains("Hostname: abc123"));
}
