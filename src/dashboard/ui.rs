use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::dashboard::app::{App, Focus};
use crate::dashboard::theme::Palette;

const HELP: &str = " Tab focus | arrows select/scroll | type to search | PgUp/PgDn scroll | Enter details | Ctrl+T theme | Esc quit";

/// Display format of author birth dates
const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";

/// Draw the UI
pub fn draw(f: &mut Frame, app: &App) {
    let palette = app.theme.palette();

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Filter inputs
            Constraint::Length(3),      // Summary counts
            Constraint::Percentage(40), // Charts
            Constraint::Min(6),         // Quote cards
            Constraint::Length(1),      // Key help
        ])
        .split(f.area());

    render_filters(f, app, chunks[0], palette);
    render_summary(f, app, chunks[1], palette);
    render_charts(f, app, chunks[2], palette);
    render_quotes(f, app, chunks[3], palette);

    f.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(palette.muted)),
        chunks[4],
    );
}

/// A bordered panel whose border lights up when focused
fn panel(title: &str, palette: Palette, focused: bool) -> Block<'_> {
    let border = if focused { palette.focus } else { palette.muted };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
}

/// Render the search field and both selectors
fn render_filters(f: &mut Frame, app: &App, area: Rect, palette: Palette) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let search_block = panel("Search", palette, app.focus == Focus::Search);
    let inner_area = search_block.inner(columns[0]);
    f.render_widget(
        Paragraph::new(app.search.as_str()).block(search_block),
        columns[0],
    );

    if app.focus == Focus::Search {
        let cursor_x = app.search[..app.cursor_byte_index()].width() as u16;
        f.set_cursor_position((inner_area.x + cursor_x, inner_area.y));
    }

    render_selector(
        f,
        "Author",
        app.selected_author(),
        app.focus == Focus::Author,
        columns[1],
        palette,
    );
    render_selector(
        f,
        "Tag",
        app.selected_tag(),
        app.focus == Focus::Tag,
        columns[2],
        palette,
    );
}

fn render_selector(
    f: &mut Frame,
    title: &str,
    value: &str,
    focused: bool,
    area: Rect,
    palette: Palette,
) {
    let line = Line::from(vec![
        Span::styled("< ", Style::default().fg(palette.muted)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" >", Style::default().fg(palette.muted)),
    ]);
    f.render_widget(
        Paragraph::new(line).block(panel(title, palette, focused)),
        area,
    );
}

/// Render the headline counts
fn render_summary(f: &mut Frame, app: &App, area: Rect, palette: Palette) {
    let value = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::raw("Quotes "),
        Span::styled(app.result.total_quotes.to_string(), value),
        Span::raw(format!(" of {}   Authors ", app.collection_len())),
        Span::styled(app.result.total_authors.to_string(), value),
        Span::raw("   Tags "),
        Span::styled(app.result.total_tags.to_string(), value),
        Span::styled(
            format!("   ({} theme)", app.theme.name()),
            Style::default().fg(palette.muted),
        ),
    ]);
    f.render_widget(
        Paragraph::new(line).block(panel("Summary", palette, false)),
        area,
    );
}

/// Render the three aggregate charts side by side
fn render_charts(f: &mut Frame, app: &App, area: Rect, palette: Palette) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    render_bar_chart(f, "Top Authors", &app.result.top_authors, columns[0], palette);
    render_bar_chart(f, "Top Tags", &app.result.top_tags, columns[1], palette);
    render_bar_chart(
        f,
        "Birth Centuries",
        &app.result.century_distribution,
        columns[2],
        palette,
    );
}

fn render_bar_chart(
    f: &mut Frame,
    title: &str,
    rows: &[(String, usize)],
    area: Rect,
    palette: Palette,
) {
    let block = panel(title, palette, false);

    if rows.is_empty() {
        f.render_widget(
            Paragraph::new("No data")
                .style(Style::default().fg(palette.muted))
                .block(block),
            area,
        );
        return;
    }

    let bars: Vec<Bar> = rows
        .iter()
        .map(|(label, count)| {
            Bar::default()
                .label(Line::from(label.as_str()))
                .value(*count as u64)
                .style(Style::default().fg(palette.bar))
                .value_style(
                    Style::default()
                        .fg(palette.foreground)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

/// Render the preview records as quote cards
fn render_quotes(f: &mut Frame, app: &App, area: Rect, palette: Palette) {
    let title = format!(
        "Quotes ({} of {})",
        app.result.preview_records.len(),
        app.result.total_quotes
    );
    let block = panel(&title, palette, app.focus == Focus::Quotes);

    if app.result.is_empty() {
        f.render_widget(
            Paragraph::new("No quotes match the current filters.")
                .style(Style::default().fg(palette.muted))
                .block(block),
            area,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(app.card_height());
    for record in &app.result.preview_records {
        lines.push(Line::from(Span::styled(
            record.text.as_str(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(vec![
            Span::raw("  - "),
            Span::styled(
                record.author_name.as_str(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({})", record.author_birth_century),
                Style::default().fg(palette.muted),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "  born {} in {}",
                record.author_birth_date.format(BIRTH_DATE_FORMAT),
                record.author_birth_place
            ),
            Style::default().fg(palette.muted),
        )));
        let tags: Vec<&str> = record.visible_tags().collect();
        let tag_line = if tags.is_empty() {
            "  no tags".to_string()
        } else {
            format!("  tags: {}", tags.join(", "))
        };
        lines.push(Line::from(Span::styled(
            tag_line,
            Style::default().fg(palette.muted),
        )));
        if app.show_details {
            let about = record.author_about.trim();
            lines.push(Line::from(if about.is_empty() {
                Span::styled("  no biography", Style::default().fg(palette.muted))
            } else {
                Span::raw(format!("  {}", about))
            }));
        }
        lines.push(Line::default());
    }

    let total_height = lines.len();
    let quotes = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.scroll_position.min(u16::MAX as usize) as u16, 0));

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));
    let mut scrollbar_state = ScrollbarState::default()
        .content_length(total_height)
        .position(app.scroll_position);

    f.render_widget(quotes, area);
    f.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}
