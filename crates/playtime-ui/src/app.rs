//! Application state and TUI event loop for SC Playtime.
//!
//! [`App`] owns the theme and drives the chart screen until the user quits.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use playtime_core::models::{ChartSeries, PlaytimeBreakdown};

use crate::chart_view::{self, ChartViewData};
use crate::themes::Theme;

/// Root application state for the chart screen.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Directory the report was built from, shown in the header.
    pub log_dir: String,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, log_dir: String) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            log_dir,
            should_quit: false,
        }
    }

    /// Show the chart in the alternate screen until `q`, `Esc` or `Ctrl+C`.
    ///
    /// The terminal is restored even when drawing fails.
    pub fn run_chart(mut self, series: ChartSeries, total: PlaytimeBreakdown) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal, &series, total);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Update state for one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    /// Render the chart screen, or a placeholder when there is nothing to plot.
    pub fn render(&self, frame: &mut Frame, series: &ChartSeries, total: PlaytimeBreakdown) {
        let area = frame.area();
        if series.is_empty() {
            chart_view::render_no_data(frame, area, &self.log_dir, &self.theme);
        } else {
            let data = ChartViewData {
                series,
                total,
                log_dir: &self.log_dir,
            };
            chart_view::render_chart_view(frame, area, &data, &self.theme);
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        series: &ChartSeries,
        total: PlaytimeBreakdown,
    ) -> io::Result<()> {
        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame, series, total))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_app_creation_defaults() {
        let app = App::new("dark", "/logs".to_string());
        assert!(!app.should_quit);
        assert_eq!(app.log_dir, "/logs");
        assert_eq!(app.theme.header.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_handle_key_quits_on_q_and_esc() {
        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            let mut app = App::new("classic", String::new());
            app.handle_key(press(code, KeyModifiers::NONE));
            assert!(app.should_quit, "{code:?} should quit");
        }
    }

    #[test]
    fn test_handle_key_ctrl_c_quits_plain_c_does_not() {
        let mut app = App::new("dark", String::new());
        app.handle_key(press(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(!app.should_quit);
        app.handle_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_handle_key_ignores_release() {
        let mut app = App::new("dark", String::new());
        let mut key = press(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_render_with_and_without_sessions() {
        let app = App::new("light", "/logs".to_string());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal
            .draw(|frame| app.render(frame, &ChartSeries::default(), PlaytimeBreakdown::default()))
            .unwrap();

        let series = ChartSeries {
            dates: vec![NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()],
            session_hours: vec![1.0],
            cumulative_hours: vec![1.0],
        };
        terminal
            .draw(|frame| app.render(frame, &series, PlaytimeBreakdown::from_total_seconds(3_600)))
            .unwrap();
    }
}
