use dashboard_core::{
    AppViewModel, DialogView, JobGroup, RequestOutcome, UPLOAD_DIALOG_DESCRIPTION,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use super::constants::*;
use super::UiState;

pub fn draw_ui(frame: &mut Frame, view: &AppViewModel, ui: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(vec![
        Line::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
        Line::from(SUBTITLE),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    for (group, area) in JobGroup::ALL.into_iter().zip(columns.iter()) {
        draw_group(frame, *area, view, ui, group);
    }

    let pane_title = match &ui.updated_at {
        Some(at) => format!("{RESPONSE_PANE} (updated {at})"),
        None => RESPONSE_PANE.to_string(),
    };
    let mut pane_lines: Vec<Line> = outcome_line(&view.outcome).into_iter().collect();
    if view.in_flight > 1 {
        pane_lines.push(Line::styled(
            format!("({} requests still running)", view.in_flight),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let pane = Paragraph::new(pane_lines)
        .block(Block::default().borders(Borders::ALL).title(pane_title))
        .wrap(Wrap { trim: false });
    frame.render_widget(pane, chunks[2]);

    let status = match &ui.notice {
        Some(notice) => Line::styled(notice.as_str(), Style::default().fg(Color::Yellow)),
        None => Line::from(KEY_HINTS),
    };
    let footer = Paragraph::new(vec![Line::from(format!(
        "Endpoint: {} Health: {}",
        view.endpoint, view.health
    ))])
    .block(Block::default().borders(Borders::TOP).title(status));
    frame.render_widget(footer, chunks[3]);

    if let Some(dialog) = &view.dialog {
        draw_dialog(frame, dialog, ui);
    } else if ui.show_help {
        let area = centered_rect(60, 14, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(HELP)
            .block(Block::default().borders(Borders::ALL).title(HELP_TITLE));
        frame.render_widget(help, area);
    }
}

fn draw_group(
    frame: &mut Frame,
    area: Rect,
    view: &AppViewModel,
    ui: &UiState,
    group: JobGroup,
) {
    let jobs: Vec<_> = view.jobs_in(group).collect();
    let items = jobs
        .iter()
        .map(|job| {
            let marker = if job.requires_file { " (file)" } else { "" };
            ListItem::new(format!("[{}] {}{}", job.position, job.label, marker))
        })
        .collect::<Vec<_>>();
    let selected = ui.selected_job();
    let mut state =
        ListState::default().with_selected(jobs.iter().position(|job| job.job == selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(group.title()))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_dialog(frame: &mut Frame, dialog: &DialogView, ui: &UiState) {
    let area = centered_rect(64, 9, frame.area());
    frame.render_widget(Clear, area);

    let selected = match &dialog.selected {
        Some(name) => Line::from(format!("Selected: {name}")),
        None => Line::styled(NO_FILE_SELECTED, Style::default().fg(Color::DarkGray)),
    };
    let upload = if dialog.upload_enabled {
        Span::styled("[upload]", Style::default().add_modifier(Modifier::BOLD))
    } else {
        Span::styled("[upload disabled]", Style::default().fg(Color::DarkGray))
    };
    let lines = vec![
        Line::from(UPLOAD_DIALOG_DESCRIPTION),
        Line::from(format!("Path: {}_", ui.path_input)),
        selected,
        Line::from(vec![Span::raw("[cancel] "), upload]),
        Line::styled(DIALOG_HINTS, Style::default().fg(Color::DarkGray)),
    ];
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(dialog.title))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

/// Exactly one of processing, the success message or the error is shown.
pub fn outcome_line(outcome: &RequestOutcome) -> Option<Line<'static>> {
    match outcome {
        RequestOutcome::Idle => None,
        RequestOutcome::InProgress => Some(Line::styled(
            PROCESSING,
            Style::default().fg(Color::Cyan),
        )),
        RequestOutcome::Success(message) => Some(Line::from(message.clone())),
        RequestOutcome::Failure(message) => Some(Line::from(vec![
            Span::styled(
                ERROR_PREFIX,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(message.clone(), Style::default().fg(Color::Red)),
        ])),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
