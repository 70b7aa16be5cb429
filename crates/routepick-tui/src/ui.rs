//! Rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
        canvas::{Canvas, Map, MapResolution},
    },
};

use routepick_core::prelude::*;

use crate::app::{App, Mode};

pub fn draw(f: &mut Frame, app: &mut App) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(f.area());
    let [map_area, sidebar] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(body);

    app.map_area = Block::bordered().inner(map_area);
    draw_map(f, app, map_area);
    draw_sidebar(f, app, sidebar);
    draw_footer(f, app, footer);

    if app.coordinator.dialog().is_open() {
        draw_dialog(f, app);
    }
}

fn draw_map(f: &mut Frame, app: &App, area: Rect) {
    let props = app.coordinator.map_props();
    let pending = app.coordinator.dialog().pending().map(|p| p.coordinate);

    let canvas = Canvas::default()
        .block(Block::bordered().title(" Map - click to drop a pin "))
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(move |ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();
            for location in props.plan.locations() {
                let color = if Some(location.id) == props.selected_id {
                    Color::Yellow
                } else if props.plan.is_depot(location.id) {
                    Color::Cyan
                } else {
                    Color::Green
                };
                ctx.print(location.lng, location.lat, Span::styled("●", color));
            }
            if let Some(coordinate) = pending {
                ctx.print(coordinate.lng, coordinate.lat, Span::styled("+", Color::Red));
            }
        });
    f.render_widget(canvas, area);
}

fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::bordered().title(" Locations ");
    let collection = app.coordinator.collection();

    let rows = match collection.view() {
        CollectionView::Empty => {
            let placeholder = Paragraph::new(LocationCollection::EMPTY_TEXT)
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .centered();
            f.render_widget(placeholder, area);
            return;
        }
        CollectionView::Rows(rows) => rows,
    };

    let depot_id = collection.depot().map(LocationEntry::id);
    let items: Vec<ListItem> = rows
        .into_iter()
        .map(|row| {
            let marker = if Some(row.id()) == depot_id { "◆" } else { "•" };
            let remove = if row.remove_enabled() {
                Span::raw("")
            } else {
                Span::styled(" 🔒", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(format!("{marker} ")),
                    Span::styled(row.label().text, Style::default().bold()),
                    remove,
                ]),
                Line::from(Span::styled(
                    format!("  {} · {}", row.required_skill().label(), row.coordinate_text()),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.mode {
        Mode::Search => Line::from(vec![
            Span::styled("Search (lat,lng address): ", Style::default().fg(Color::Cyan)),
            Span::raw(app.search_input.as_str()),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ]),
        Mode::Browse => {
            let hover = app
                .coordinator
                .collection()
                .row_at(app.cursor)
                .and_then(|row| row.label().hover);
            match (&app.status, hover) {
                (Some(status), _) => Line::from(status.as_str()),
                (None, Some(description)) => Line::from(description),
                (None, None) => Line::from(Span::styled(
                    "↑↓ move · s skill · d remove · / search · c clear · q quit",
                    Style::default().fg(Color::DarkGray),
                )),
            }
        }
    };
    f.render_widget(Paragraph::new(line).block(Block::bordered()), area);
}

fn draw_dialog(f: &mut Frame, app: &App) {
    let dialog = app.coordinator.dialog();
    let skills = app.selectable_skills();

    let mut lines: Vec<Line> = Vec::new();
    if let Some(coordinate_lines) = dialog.coordinate_lines() {
        lines.extend(coordinate_lines.into_iter().map(Line::from));
    }
    if let Some(address) = dialog.address_line() {
        lines.push(Line::from(address));
    }
    lines.push(Line::from(""));

    for (index, option) in skills.iter().enumerate() {
        let chosen = dialog.chosen_skill() == Some(option.value);
        let mut style = Style::default();
        if index == app.dialog_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let radio = if chosen { "(•)" } else { "( )" };
        lines.push(Line::from(Span::styled(format!("{radio} {}", option.label), style)));
    }

    if let Some(error) = app.coordinator.validation_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "space choose · enter confirm · esc cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let height = lines.len() as u16 + 2;
    let area = centered_rect(f.area(), 48, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", SelectionDialog::TITLE))
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(vertical);
    rect
}
