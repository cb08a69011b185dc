//! Skill list table for the wizard's first screen.
//!
//! Shows every discovered skill with its version and description, followed
//! by one red row per skill whose manifest failed to load. The cursor moves
//! across both kinds of rows, so broken skills stay visible and selectable.

use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Cell;
use ratatui::widgets::Row;
use ratatui::widgets::Table;
use ratatui::widgets::TableState;
use ratatui::Frame;
use sk_core::skill::SkillError;
use sk_protocol::manifest::Manifest;

/// Renders the skill table with the cursor row highlighted.
pub fn render_skill_list(
    frame: &mut Frame,
    area: Rect,
    skills: &[Manifest],
    errors: &[SkillError],
    cursor: usize,
) {
    let mut rows: Vec<Row> = skills
        .iter()
        .map(|manifest| {
            Row::new(vec![
                Cell::from(manifest.name.clone()),
                Cell::from(manifest.version.clone()),
                Cell::from(manifest.display_description().to_string()),
            ])
        })
        .collect();

    let error_style = Style::default().fg(Color::Red);
    rows.extend(errors.iter().map(|error| {
        Row::new(vec![
            Cell::from(error.name.clone()).style(error_style),
            Cell::from("-"),
            Cell::from(format!("failed to load: {}", error.message)).style(error_style),
        ])
    }));

    let header = Row::new(vec![
        Cell::from("Skill"),
        Cell::from("Version"),
        Cell::from("Description"),
    ])
    .style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Cyan),
    );

    let widths = [
        ratatui::layout::Constraint::Length(20),
        ratatui::layout::Constraint::Length(10),
        ratatui::layout::Constraint::Percentage(60),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Skills")
                .style(Style::default().fg(Color::White)),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut table_state = TableState::default();
    if !skills.is_empty() || !errors.is_empty() {
        table_state.select(Some(cursor));
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}
