//! UI rendering for cardfold: title bar, card list and key hints.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::widgets::CardListWidget;

const HEADER_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 1;
const FOOTER_TEXT: &str = "↑↓/jk:Move  Enter/Space:Toggle  PgUp/PgDn:Page  g/G:Ends  r:Reload  q:Quit";

// ============================================================================
// Main Render Entry Point
// ============================================================================

/// Draws the whole screen as of `now`.
pub fn render(app: &mut App, frame: &mut Frame, now: Instant) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(frame.area());

    render_header(frame, header, app);
    frame.render_stateful_widget(CardListWidget::new(&app.theme, now), body, &mut app.list);
    render_footer(frame, footer, app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let line = Line::from(vec![
        Span::styled(
            " cardfold ",
            Style::new()
                .fg(theme.heading)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "{} cards · {} expanded",
                app.list.len(),
                app.expanded_count()
            ),
            theme.muted_style(),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::new().bg(theme.background)),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let footer = Paragraph::new(FOOTER_TEXT)
        .style(app.theme.muted_style().bg(app.theme.background))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::test_utils::{CellModelMother, buffer_to_string, test_terminal_80x24};
    use ratatui::{Terminal, backend::TestBackend};
    use rstest::rstest;

    #[rstest]
    fn test_render_screen(mut test_terminal_80x24: Terminal<TestBackend>) {
        let mut app = App::new(&AppConfig::default(), CellModelMother::rows(5));
        let now = Instant::now();

        test_terminal_80x24
            .draw(|frame| render(&mut app, frame, now))
            .unwrap();

        let buffer = test_terminal_80x24.backend().buffer();
        let content = buffer_to_string(buffer);
        let lines: Vec<&str> = content.lines().collect();

        assert!(lines[0].contains("cardfold"));
        assert!(lines[0].contains("5 cards · 0 expanded"));
        assert!(content.contains("Title 1"));
        assert!(lines[23].contains("Enter/Space:Toggle"));
        assert!(lines[23].contains("q:Quit"));
    }

    #[rstest]
    fn test_render_focused_card_border(mut test_terminal_80x24: Terminal<TestBackend>) {
        let mut app = App::new(&AppConfig::default(), CellModelMother::rows(5));
        let now = Instant::now();

        test_terminal_80x24
            .draw(|frame| render(&mut app, frame, now))
            .unwrap();

        // Row 0's card border starts one margin row below the header.
        let buffer = test_terminal_80x24.backend().buffer();
        assert_eq!(buffer[(2, 2)].symbol(), "╭");
        assert_eq!(buffer[(2, 2)].fg, app.theme.focused_border);
        assert_eq!(buffer[(2, 9)].fg, app.theme.border);
    }
}
