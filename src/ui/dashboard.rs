use crate::monitor::{BAR_EMPTY, BAR_FILLED, PROGRESS_BAR_WIDTH};
use crate::ui::{App, DisplayRow, RowTone};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

impl App {
    pub fn render_dashboard(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Status table
                Constraint::Length(3), // Footer
            ])
            .split(f.size());

        self.render_header(f, chunks[0]);
        self.render_status_table(f, chunks[1]);
        self.render_footer(f, chunks[2]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new("Time Machine Backup Status")
            .style(Style::default().fg(self.theme_colors.primary).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(self.theme_colors.border)));
        f.render_widget(header, area);
    }

    fn render_status_table(&self, f: &mut Frame, area: Rect) {
        if self.snapshot.is_none() {
            let waiting = Paragraph::new("Waiting for tmutil...")
                .style(Style::default().fg(self.theme_colors.muted))
                .alignment(Alignment::Center)
                .block(Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .style(Style::default().fg(self.theme_colors.border)));
            f.render_widget(waiting, area);
            return;
        }

        let header_cells = ["Parameter", "Value"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD).fg(self.theme_colors.header)));
        let header_row = Row::new(header_cells);

        let rows: Vec<Row> = self.rows
            .iter()
            .map(|row| {
                Row::new(vec![
                    Cell::from(row.label.clone())
                        .style(Style::default().fg(self.theme_colors.label)),
                    self.value_cell(row),
                ])
            })
            .collect();

        let label_width = self.rows
            .iter()
            .map(|row| row.label.chars().count())
            .max()
            .unwrap_or(0)
            .max("Parameter".len()) as u16;
        let widths = [
            Constraint::Length(label_width),            // Parameter
            Constraint::Min(PROGRESS_BAR_WIDTH as u16), // Value
        ];

        let table = Table::new(rows)
            .header(header_row)
            .block(Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(self.theme_colors.border)))
            .column_spacing(2)
            .widths(&widths);

        f.render_widget(table, area);
    }

    fn value_cell(&self, row: &DisplayRow) -> Cell<'static> {
        let colors = &self.theme_colors;
        match row.tone {
            RowTone::Plain => Cell::from(row.value.clone())
                .style(Style::default().fg(colors.foreground)),
            RowTone::Phase => Cell::from(row.value.clone())
                .style(Style::default().fg(colors.phase).add_modifier(Modifier::BOLD)),
            RowTone::Positive => Cell::from(row.value.clone())
                .style(Style::default().fg(colors.success)),
            RowTone::Negative => Cell::from(row.value.clone())
                .style(Style::default().fg(colors.error)),
            RowTone::Error => Cell::from(row.value.clone())
                .style(Style::default().fg(colors.error).add_modifier(Modifier::BOLD)),
            RowTone::Bar(filled) => {
                let filled = filled.min(PROGRESS_BAR_WIDTH);
                Cell::from(Line::from(vec![
                    Span::styled(
                        BAR_FILLED.to_string().repeat(filled),
                        Style::default().fg(colors.success),
                    ),
                    Span::styled(
                        BAR_EMPTY.to_string().repeat(PROGRESS_BAR_WIDTH - filled),
                        Style::default().fg(colors.muted),
                    ),
                ]))
            }
        }
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let updated = self.snapshot
            .as_ref()
            .map(|s| s.taken_at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());

        let footer = Paragraph::new(format!("Last updated: {} | Press Ctrl+C to exit", updated))
            .style(Style::default().fg(self.theme_colors.footer))
            .alignment(Alignment::Center)
            .block(Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(self.theme_colors.border)));
        f.render_widget(footer, area);
    }
}
