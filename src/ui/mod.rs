pub mod dashboard;
pub mod fields;

use crate::monitor::StatusSnapshot;
use ratatui::{style::Color, Frame};

pub use fields::*;

#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub primary: Color,
    pub header: Color,
    pub label: Color,
    pub foreground: Color,
    pub phase: Color,
    pub success: Color,
    pub error: Color,
    pub muted: Color,
    pub border: Color,
    pub footer: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: Color::Green,
            header: Color::Magenta,
            label: Color::Cyan,
            foreground: Color::White,
            phase: Color::Blue,
            success: Color::Green,
            error: Color::Red,
            muted: Color::Gray,
            border: Color::Green,
            footer: Color::Yellow,
        }
    }
}

/// Live display state: the latest snapshot laid out as table rows.
pub struct App {
    pub registry: FieldRegistry,
    pub rows: Vec<DisplayRow>,
    pub snapshot: Option<StatusSnapshot>,
    pub theme_colors: ThemeColors,
}

impl App {
    pub fn new() -> Self {
        Self {
            registry: FieldRegistry::new(),
            rows: Vec::new(),
            snapshot: None,
            theme_colors: ThemeColors::default(),
        }
    }

    pub fn update_data(&mut self, snapshot: StatusSnapshot) {
        self.rows = self.registry.rows(&snapshot.fields);
        self.snapshot = Some(snapshot);
    }

    pub fn render(&self, f: &mut Frame) {
        self.render_dashboard(f);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{parse_status, StatusMap};
    use chrono::Local;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|f| app.render(f)).expect("draw");
        screen_text(&terminal)
    }

    #[test]
    fn test_update_data_recomputes_rows() {
        let mut app = App::new();
        app.update_data(StatusSnapshot {
            fields: parse_status("Running = 1;\nBackupPhase = Copying;"),
            taken_at: Local::now(),
        });
        assert!(app.rows.iter().any(|r| r.label == "Backup Phase"));

        app.update_data(StatusSnapshot {
            fields: StatusMap::error("boom"),
            taken_at: Local::now(),
        });
        assert!(app.rows.iter().all(|r| r.label != "Backup Phase"));
        assert!(app.rows.iter().any(|r| r.value == "boom"));
    }

    #[test]
    fn test_dashboard_shows_table() {
        let mut app = App::new();
        app.update_data(StatusSnapshot {
            fields: parse_status("BackupPhase = Copying;\nProgress = {\nPercent = \"0.5\";\n};"),
            taken_at: Local::now(),
        });

        let screen = draw(&app);
        assert!(screen.contains("Time Machine Backup Status"));
        assert!(screen.contains("Parameter"));
        assert!(screen.contains("Backup Phase"));
        assert!(screen.contains("Copying"));
        assert!(screen.contains("50.00%"));
        assert!(screen.contains(&"█".repeat(10)));
    }

    #[test]
    fn test_dashboard_before_first_poll() {
        let screen = draw(&App::new());
        assert!(screen.contains("Waiting for tmutil"));
    }
}
