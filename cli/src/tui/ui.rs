//! TUI rendering.

use chrono::{Local, Utc};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use tapas_core::classify::database_product;
use tapas_core::{Controller, KillPrompt, Modal, Mode, PortInfo, SortKey};

use crate::format::{address_label, app_badge, format_uptime, process_label, truncate, RowKind};

/// Rendering switches taken from the configuration.
pub struct RenderOptions {
    pub ascii: bool,
}

const HELP_IDLE: &str =
    "[k] Kill  [Enter] Details  [/] Search  [s] Sort  [r] Refresh  [w] Watch  [q] Quit";
const HELP_SEARCH: &str = "Type to filter | Enter: keep filter | Esc: clear";
const HELP_DETAILS: &str = "[Esc] [q] [Enter] Close";
const HELP_KILL: &str = "[y] Terminate  [f] Force kill  [n] Cancel";

pub fn draw(f: &mut Frame, controller: &Controller, options: &RenderOptions) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    let view = controller.view();

    draw_header(f, controller, view.len(), chunks[0]);
    draw_table(f, controller, &view, options, chunks[1]);
    draw_footer(f, controller, chunks[2]);

    match &controller.state().modal {
        Modal::None => {}
        Modal::Details(port) => draw_details(f, port),
        Modal::KillConfirm(prompt) => draw_kill_confirm(f, prompt),
    }
}

fn draw_header(f: &mut Frame, controller: &Controller, shown: usize, area: Rect) {
    let state = controller.state();
    let mut spans = vec![
        Span::styled("TAPAS", Style::default().fg(Color::Cyan).bold()),
        Span::raw(format!("  {} ports", shown)),
    ];
    if shown != state.snapshot.len() {
        spans.push(Span::raw(format!(" of {}", state.snapshot.len())));
    }
    spans.push(Span::raw(format!("  sort: {}", state.sort_key)));
    if state.watch_enabled {
        spans.push(Span::styled(
            format!("  watch {}s", state.watch_interval.as_secs()),
            Style::default().fg(Color::Green),
        ));
    }
    if state.refreshes_in_flight > 0 {
        spans.push(Span::styled("  refreshing…", Style::default().fg(Color::DarkGray)));
    }
    if state.search_active {
        spans.push(Span::styled(
            format!("  / {}_", state.search_query),
            Style::default().fg(Color::Yellow),
        ));
    } else if !state.search_query.is_empty() {
        spans.push(Span::styled(
            format!("  filter: {}", state.search_query),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(header, area);
}

fn draw_table(
    f: &mut Frame,
    controller: &Controller,
    view: &[PortInfo],
    options: &RenderOptions,
    area: Rect,
) {
    let state = controller.state();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Listening Ports ");

    if view.is_empty() {
        let mut lines = vec![Line::from("No listening ports found.")];
        if !state.search_query.is_empty() {
            lines.push(Line::from(format!("No matches for \"{}\".", state.search_query)));
        }
        let empty = Paragraph::new(lines)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let arrow = if options.ascii { " ^" } else { " ↑" };
    let title = |name: &str, key: Option<SortKey>| {
        if key == Some(state.sort_key) {
            format!("{name}{arrow}")
        } else {
            name.to_string()
        }
    };
    let header_cells = [
        String::new(),
        title("PORT", Some(SortKey::Port)),
        title("PROCESS", Some(SortKey::Process)),
        title("APP", None),
        title("PROJECT", None),
        title("ADDRESS", None),
        title("UPTIME", Some(SortKey::Uptime)),
        title("CONN", None),
    ]
    .into_iter()
    .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow).bold()));
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let now = Utc::now();
    let rows = view.iter().map(|port| {
        let kind = RowKind::of(port, now);
        let cells = vec![
            Cell::from(kind.symbol(options.ascii)),
            Cell::from(port.port.to_string()),
            Cell::from(truncate(&process_label(port), 40)),
            Cell::from(truncate(&app_badge(port), 14)),
            Cell::from(port.project_label().to_string()),
            Cell::from(truncate(&address_label(port), 22)),
            Cell::from(format_uptime(port.uptime(now))),
            Cell::from(port.connection_count.to_string()),
        ];
        Row::new(cells).style(kind_style(kind))
    });

    let widths = [
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Length(40),
        Constraint::Length(14),
        Constraint::Min(8),
        Constraint::Length(22),
        Constraint::Length(9),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut table_state = TableState::default();
    table_state.select(state.selection);

    f.render_stateful_widget(table, area, &mut table_state);
}

fn kind_style(kind: RowKind) -> Style {
    match kind {
        RowKind::LongRunning => Style::default().fg(Color::Red),
        RowKind::Dev => Style::default().fg(Color::Blue),
        RowKind::Database => Style::default().fg(Color::Magenta),
        RowKind::Container => Style::default().fg(Color::Cyan),
        RowKind::System => Style::default().fg(Color::DarkGray),
        RowKind::Default => Style::default(),
    }
}

fn draw_footer(f: &mut Frame, controller: &Controller, area: Rect) {
    let state = controller.state();

    let help = match controller.mode() {
        Mode::Idle => HELP_IDLE,
        Mode::Searching => HELP_SEARCH,
        Mode::DetailsOpen => HELP_DETAILS,
        Mode::KillConfirmOpen => HELP_KILL,
    };

    let line = if let Some(error) = &state.last_error {
        Line::from(vec![
            Span::styled(error.clone(), Style::default().fg(Color::Red)),
            Span::styled(format!(" | {}", help), Style::default().fg(Color::DarkGray)),
        ])
    } else if let Some(status) = &state.status {
        Line::from(vec![
            Span::styled(status.clone(), Style::default().fg(Color::Green)),
            Span::styled(format!(" | {}", help), Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::styled(help, Style::default().fg(Color::DarkGray))
    };

    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(footer, area);
}

fn draw_details(f: &mut Frame, port: &PortInfo) {
    let mut lines = vec![
        detail("Port", port.port.to_string()),
        detail("PID", port.pid.to_string()),
        detail("Process", process_label(port)),
        detail("Protocol", port.protocol.clone()),
        detail("Address", address_label(port)),
        detail("Project", port.project_label().to_string()),
        detail("Working dir", port.working_dir.clone()),
        detail("Command", port.command.clone()),
    ];
    if !port.framework.is_empty() {
        lines.push(detail("Framework", port.framework.clone()));
    }
    if let Some(product) = database_product(port.port) {
        lines.push(detail("Database", product.to_string()));
    }
    if !port.environment.is_empty() {
        lines.push(detail("Launched by", port.environment.clone()));
    }
    match &port.container {
        Some(container) => lines.push(detail(
            "Container",
            format!("{} ({})", container.name, container.image),
        )),
        None if port.in_container => lines.push(detail("Container", "yes".to_string())),
        None => {}
    }
    lines.push(detail("Connections", port.connection_count.to_string()));
    if let Some(start) = port.start_time {
        lines.push(detail(
            "Started",
            start.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        ));
        lines.push(detail("Uptime", format_uptime(port.uptime(Utc::now()))));
    }
    lines.push(Line::default());
    lines.push(Line::styled(HELP_DETAILS, Style::default().fg(Color::DarkGray)));

    let area = centered_rect(70, lines.len() as u16 + 4, f.area());
    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(modal_block(format!(" Port {} ", port.port), Color::Cyan));

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn draw_kill_confirm(f: &mut Frame, prompt: &KillPrompt) {
    let target = &prompt.target;
    let mut lines = vec![
        Line::from(format!(
            "Kill port {} ({})?",
            target.port,
            process_label(target)
        )),
        Line::styled(format!("PID {}", target.pid), Style::default().fg(Color::DarkGray)),
        Line::default(),
    ];
    if prompt.pending {
        let signal = if prompt.force { "SIGKILL" } else { "SIGTERM" };
        lines.push(Line::styled(
            format!("Sending {signal}…"),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        lines.push(Line::from(HELP_KILL));
    }
    if let Some(error) = &prompt.error {
        lines.push(Line::default());
        lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red)));
    }

    let area = centered_rect(60, lines.len() as u16 + 4, f.area());
    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(modal_block(" Kill process ".to_string(), Color::Red));

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn detail(label: &str, value: String) -> Line<'static> {
    let value = if value.is_empty() { "—".to_string() } else { value };
    Line::from(vec![
        Span::styled(format!("{label:<12} "), Style::default().fg(Color::Yellow)),
        Span::raw(value),
    ])
}

fn modal_block(title: String, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

/// A rect `percent_x` wide and `height` rows tall, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 10, area);
        assert_eq!(rect, Rect::new(20, 15, 60, 10));

        let small = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(50, 12, small);
        assert_eq!(rect.height, 5);
        assert_eq!(rect.y, 0);
    }

    #[test]
    fn test_centered_rect_on_wide_terminal() {
        let area = Rect::new(0, 0, 1000, 50);
        let rect = centered_rect(70, 10, area);
        assert_eq!(rect.width, 700);
        assert_eq!(rect.x, 150);
    }
}
