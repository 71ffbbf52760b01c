use afvalpas_core::{model::WastePass, ports::ResolveError, tables::PostalCodeRange};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState, Wrap},
};

use crate::app::{App, Field, Lookup, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new("afvalpas – waste pass lookup by postal code")
        .block(Block::default().borders(Borders::ALL).title("Afvalpas"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::Lookup => draw_lookup(frame, app, *content_area),
        Screen::Districts => draw_districts(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::Lookup => {
            "Type to edit · Tab switch field · Enter look up · Esc clear · F2 districts · Ctrl-C quit"
        }
        Screen::Districts => "↑/↓ move · Esc/←/b/F2 back to lookup · q/Ctrl-C quit",
    };

    let (status_text, status_style) = match app.last_lookup().map(|lookup| &lookup.outcome) {
        Some(Err(err)) => (format!("{err} · {nav_hint}"), Style::default().fg(Color::Red)),
        _ => (nav_hint.to_owned(), Style::default()),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_lookup(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // inputs
            Constraint::Length(5), // result
            Constraint::Min(0),    // history
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [inputs_area, result_area, history_area] = chunks else {
        return;
    };

    let input_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(*inputs_area);
    let [postal_code_area, house_number_area] = input_chunks.as_ref() else {
        return;
    };

    frame.render_widget(
        input_box(
            &app.postal_code_input,
            "Postal code (1234 AB)",
            app.focus == Field::PostalCode,
        ),
        *postal_code_area,
    );
    frame.render_widget(
        input_box(
            &app.house_number_input,
            "House number (optional)",
            app.focus == Field::HouseNumber,
        ),
        *house_number_area,
    );

    let result = match app.last_lookup() {
        None => Paragraph::new("Enter a postal code and press Enter."),
        Some(lookup) => result_paragraph(lookup),
    };
    frame.render_widget(
        result
            .block(Block::default().borders(Borders::ALL).title("Result"))
            .wrap(Wrap { trim: true }),
        *result_area,
    );

    let items = if app.history.is_empty() {
        vec![ListItem::new("No lookups yet.")]
    } else {
        app.history.iter().map(history_item).collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("History (last {})", app.history_limit)),
    );
    frame.render_widget(list, *history_area);
}

fn input_box<'a>(value: &'a str, title: &'a str, focused: bool) -> Paragraph<'a> {
    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if focused { "▏" } else { "" };

    Paragraph::new(format!("{value}{cursor}"))
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(style)
}

fn result_paragraph(lookup: &Lookup) -> Paragraph<'static> {
    match &lookup.outcome {
        Ok(pass) => Paragraph::new(vec![
            Line::from(format!("District:     {}", pass.district)),
            Line::from(format!("Pass number:  {}", pass.pass_number)),
            Line::from(Span::styled(
                container_label(pass),
                Style::default().fg(container_color(pass)),
            )),
        ]),
        Err(err) => Paragraph::new(Line::from(Span::styled(
            error_label(err),
            Style::default().fg(Color::Red),
        ))),
    }
}

fn history_item(lookup: &Lookup) -> ListItem<'static> {
    let time = lookup.at.format("%H:%M:%S");
    let query = match &lookup.house_number {
        Some(house_number) => format!("{} {house_number}", lookup.postal_code),
        None => lookup.postal_code.clone(),
    };
    let (summary, color) = match &lookup.outcome {
        Ok(pass) => (
            format!("{} · {} · {}", pass.district, pass.pass_number, container_label(pass)),
            Color::Green,
        ),
        Err(err) => (error_label(err), Color::Red),
    };

    ListItem::new(format!("{time}  {query:<14} {summary}")).style(Style::default().fg(color))
}

fn container_label(pass: &WastePass) -> String {
    if pass.has_container {
        "Container available".to_owned()
    } else {
        "No container at this address".to_owned()
    }
}

fn container_color(pass: &WastePass) -> Color {
    if pass.has_container {
        Color::Green
    } else {
        Color::Yellow
    }
}

fn error_label(err: &ResolveError) -> String {
    match err {
        ResolveError::Validation(reason) => format!("Invalid {}: {reason}", reason.field()),
        ResolveError::NotFound(_) => err.to_string(),
    }
}

fn draw_districts(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = app.districts.iter().map(|row| {
        let pass_number = row
            .pass_number
            .as_ref()
            .map_or_else(|| "–".to_owned(), ToString::to_string);
        let style = if row.pass_number.is_some() {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Row::new(vec![
            Cell::from(row.district.to_string()),
            Cell::from(ranges_label(&row.ranges)),
            Cell::from(pass_number),
        ])
        .style(style)
    });

    let column_widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["District", "Postal codes", "Pass number"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Districts (Esc/←/b to go back)"),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .column_spacing(1);

    let mut state = TableState::default();
    if !app.districts.is_empty() {
        state.select(Some(app.district_list_index));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn ranges_label(ranges: &[PostalCodeRange]) -> String {
    if ranges.is_empty() {
        return "–".to_owned();
    }
    ranges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
