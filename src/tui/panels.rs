// Panel renderers. Every renderer of a tick draws from the same DashboardSnapshot.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph, Sparkline},
};

use super::format::{list_name, mem_as_string, signed_mem_as_string};
use super::stack::View;
use crate::metrics::MetricError;
use crate::models::{ContainerDetails, DashboardSnapshot, NetworkDirection};
use crate::version;

/// Rows per sparkline entry: one label line plus the graph.
const SPARKLINE_ROWS: u16 = 3;

/// Screen regions of the main view.
#[derive(Debug, Clone, Copy)]
pub struct MainAreas {
    pub title: Rect,
    pub list: Rect,
    pub memory_percent: Rect,
    pub memory_values: Rect,
    pub cpu: Rect,
    pub rx: Rect,
    pub tx: Rect,
}

impl MainAreas {
    /// Title row, then list | memory % | memory values, then cpu | rx | tx (3/6/3 and 6/3/3 of 12).
    pub fn split(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Percentage(40),
                Constraint::Min(0),
            ])
            .split(area);
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(3, 12),
                Constraint::Ratio(6, 12),
                Constraint::Ratio(3, 12),
            ])
            .split(rows[1]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(6, 12),
                Constraint::Ratio(3, 12),
                Constraint::Ratio(3, 12),
            ])
            .split(rows[2]);
        Self {
            title: rows[0],
            list: middle[0],
            memory_percent: middle[1],
            memory_values: middle[2],
            cpu: bottom[0],
            rx: bottom[1],
            tx: bottom[2],
        }
    }
}

pub type PanelRenderer = fn(&mut Frame, &MainAreas, &DashboardSnapshot);

/// Main view renderers, drawn in this order on every tick.
pub const MAIN_PANELS: [PanelRenderer; 7] = [
    render_title,
    render_container_list,
    render_memory_percent,
    render_memory_values,
    render_cpu,
    render_rx,
    render_tx,
];

/// Draws the top panel of the stack.
pub fn draw(
    f: &mut Frame,
    view: &View,
    snapshot: &DashboardSnapshot,
    details: Option<&ContainerDetails>,
) {
    let area = f.size();
    match view {
        View::Main => {
            let areas = MainAreas::split(area);
            for render in MAIN_PANELS {
                render(f, &areas, snapshot);
            }
        }
        View::Details { index, .. } => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(area);
            f.render_widget(title_bar(), rows[0]);
            render_details(f, rows[1], *index, details);
        }
    }
}

fn bordered(title: impl Into<Line<'static>>) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(title)
}

fn title_bar() -> Paragraph<'static> {
    Paragraph::new(version::title()).block(Block::default().borders(Borders::ALL))
}

fn render_title(f: &mut Frame, areas: &MainAreas, _snapshot: &DashboardSnapshot) {
    f.render_widget(title_bar(), areas.title);
}

fn render_container_list(f: &mut Frame, areas: &MainAreas, snapshot: &DashboardSnapshot) {
    let items: Vec<ListItem> = snapshot
        .containers
        .iter()
        .map(|c| ListItem::new(list_name(c.index, &c.name, &c.id, 30)))
        .collect();
    let list = List::new(items)
        .style(Style::default().fg(Color::Yellow))
        .block(bordered("Containers (#num for details)"));
    f.render_widget(list, areas.list);
}

fn render_memory_percent(f: &mut Frame, areas: &MainAreas, snapshot: &DashboardSnapshot) {
    let bars: Vec<Bar> = snapshot
        .containers
        .iter()
        .map(|c| {
            let value = match c.view.memory_percent {
                Some(Ok(percent)) => percent.min(100),
                _ => 0,
            };
            Bar::default()
                .label(Line::from(format!("[{:2}]", c.index)))
                .value(value)
        })
        .collect();
    // Bars of height 0 cannot carry text, so no-limit containers get their own line.
    let no_limit: Vec<String> = snapshot
        .containers
        .iter()
        .filter(|c| matches!(c.view.memory_percent, Some(Err(MetricError::DivisionByZero))))
        .map(|c| format!("[{:2}]", c.index))
        .collect();

    let block = bordered("Memory % usage");
    let inner = block.inner(areas.memory_percent);
    f.render_widget(block, areas.memory_percent);
    let chart_area = if no_limit.is_empty() {
        inner
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);
        f.render_widget(
            Paragraph::new(format!("n/a (no limit): {}", no_limit.join(" ")))
                .style(Style::default().fg(Color::Yellow)),
            rows[1],
        );
        rows[0]
    };

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Red))
        .max(100);
    f.render_widget(chart, chart_area);
}

fn render_memory_values(f: &mut Frame, areas: &MainAreas, snapshot: &DashboardSnapshot) {
    let items: Vec<ListItem> = snapshot
        .containers
        .iter()
        .map(|c| {
            let used = mem_as_string(c.view.memory_usage_bytes.unwrap_or(0));
            let text = match c.view.memory_percent {
                Some(Err(MetricError::DivisionByZero)) => {
                    format!("[{:2}]: {} (no limit)", c.index, used)
                }
                _ => format!("[{:2}]: {}", c.index, used),
            };
            ListItem::new(text)
        })
        .collect();
    let list = List::new(items)
        .style(Style::default().fg(Color::Yellow))
        .block(bordered("Container Memory"));
    f.render_widget(list, areas.memory_values);
}

fn render_cpu(f: &mut Frame, areas: &MainAreas, snapshot: &DashboardSnapshot) {
    let rows: Vec<(String, Vec<u64>)> = snapshot
        .containers
        .iter()
        .map(|c| {
            (
                format!("[{} %] {}:{}", c.view.last_cpu_percent(), c.name, c.id),
                c.view.cpu_percent_series.clone(),
            )
        })
        .collect();
    render_sparklines(f, areas.cpu, "CPU", Color::Yellow, &rows);
}

fn render_rx(f: &mut Frame, areas: &MainAreas, snapshot: &DashboardSnapshot) {
    render_network(f, areas.rx, snapshot, NetworkDirection::Rx);
}

fn render_tx(f: &mut Frame, areas: &MainAreas, snapshot: &DashboardSnapshot) {
    render_network(f, areas.tx, snapshot, NetworkDirection::Tx);
}

fn render_network(
    f: &mut Frame,
    area: Rect,
    snapshot: &DashboardSnapshot,
    direction: NetworkDirection,
) {
    let (title, color) = match direction {
        NetworkDirection::Rx => ("Rx Bytes", Color::Green),
        NetworkDirection::Tx => ("Tx Bytes", Color::Blue),
    };
    let rows: Vec<(String, Vec<u64>)> = snapshot
        .containers
        .iter()
        .filter(|c| c.view.samples > 1)
        .map(|c| {
            let last = signed_mem_as_string(c.view.last_network_delta(direction));
            // A counter reset shows up as a negative delta; draw it as an empty column.
            let data = c
                .view
                .network_series(direction)
                .iter()
                .map(|v| (*v).max(0) as u64)
                .collect();
            (
                format!("[{:>5}] {}", last, list_name(c.index, &c.name, &c.id, 20)),
                data,
            )
        })
        .collect();
    render_sparklines(f, area, title, color, &rows);
}

/// One label line plus a sparkline per entry, as many as fit; newest points on the right.
fn render_sparklines(
    f: &mut Frame,
    area: Rect,
    title: &'static str,
    color: Color,
    rows: &[(String, Vec<u64>)],
) {
    let block = bordered(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let fit = usize::from(inner.height / SPARKLINE_ROWS);
    for (i, (label, data)) in rows.iter().take(fit).enumerate() {
        let y = inner.y + i as u16 * SPARKLINE_ROWS;
        let label_area = Rect::new(inner.x, y, inner.width, 1);
        let graph_area = Rect::new(inner.x, y + 1, inner.width, SPARKLINE_ROWS - 1);
        let start = data.len().saturating_sub(usize::from(graph_area.width));
        f.render_widget(Paragraph::new(label.as_str()), label_area);
        f.render_widget(
            Sparkline::default()
                .data(&data[start..])
                .style(Style::default().fg(color)),
            graph_area,
        );
    }
}

fn render_details(f: &mut Frame, area: Rect, index: usize, details: Option<&ContainerDetails>) {
    let Some(d) = details else {
        let empty = Paragraph::new(format!("no running container at [{}]", index))
            .style(Style::default().fg(Color::Yellow))
            .block(bordered("Details"));
        f.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        format!("Name: {}", d.name),
        format!("Image: {}", d.image),
        format!("Path: {}", d.path),
        format!("Args: {}", d.args.join(" ")),
        format!("IP: {}", d.ip_address),
        format!("Ports: {}", d.ports.join(", ")),
    ];
    for (i, v) in d.volumes.iter().enumerate() {
        if i == 0 {
            lines.push(format!("Volumes: {}", v));
        } else {
            lines.push(format!("         {}", v));
        }
    }
    lines.push(format!("Hostname: {}", d.hostname));
    lines.push(format!("Memory: {}", d.memory));
    lines.push(format!("Swap: {}", d.memory_swap));
    lines.push(format!("Cpu-Shares: {}", d.cpu_shares));
    lines.push(format!("Cpu-Set: {}", d.cpuset));
    lines.push(format!("Env: {}", d.env.join(" ")));

    let items: Vec<ListItem> = lines.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .style(Style::default().fg(Color::Yellow))
        .block(bordered(format!("Details: {}", d.name)));
    f.render_widget(list, area);
}
