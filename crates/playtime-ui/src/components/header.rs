use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Chart screen header rendering four lines:
///
/// 1. Application title with sparkle decorations.
/// 2. A 60-column `=` separator.
/// 3. Session count and log directory in `[ sessions | dir ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    pub sessions: usize,
    /// Directory the logs were read from.
    pub log_dir: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(sessions: usize, log_dir: &'a str, theme: &'a Theme) -> Self {
        Self {
            sessions,
            log_dir,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let sessions = if self.sessions == 1 {
            "1 session".to_string()
        } else {
            format!("{} sessions", self.sessions)
        };

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" STAR CITIZEN PLAYTIME ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(sessions, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.log_dir, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        let lines = Header::new(2, "/logs", &theme).to_lines();
        assert_eq!(lines.len(), 4, "header must produce exactly 4 lines");
    }

    #[test]
    fn test_header_title_and_info() {
        let theme = Theme::dark();
        let lines = Header::new(2, "/games/logbackups", &theme).to_lines();

        let title = line_text(&lines[0]);
        assert!(title.contains("STAR CITIZEN PLAYTIME"), "got: {title}");
        assert!(title.contains(SPARKLES));
        assert_eq!(line_text(&lines[1]), "=".repeat(60));
        assert_eq!(line_text(&lines[2]), "[ 2 sessions | /games/logbackups ]");
    }

    #[test]
    fn test_header_singular_session() {
        let theme = Theme::classic();
        let lines = Header::new(1, "/logs", &theme).to_lines();
        assert_eq!(line_text(&lines[2]), "[ 1 session | /logs ]");
    }
}
