use crate::monitor::{StatusMap, StatusSnapshot};
use crate::ui::DisplayRow;
use anyhow::Result;
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            _ => Err(anyhow::anyhow!("Unsupported snapshot format: {}", s)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
    pub label: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ExportData<'a> {
    pub timestamp: DateTime<Local>,
    pub fields: &'a StatusMap,
    pub rows: Vec<ExportRow<'a>>,
}

pub struct Exporter;

impl Exporter {
    pub fn export_snapshot(
        snapshot: &StatusSnapshot,
        rows: &[DisplayRow],
        format: ExportFormat,
    ) -> Result<String> {
        match format {
            ExportFormat::Text => Ok(Self::to_text(rows)),
            ExportFormat::Json => Self::to_json(snapshot, rows),
        }
    }

    fn to_json(snapshot: &StatusSnapshot, rows: &[DisplayRow]) -> Result<String> {
        let data = ExportData {
            timestamp: snapshot.taken_at,
            fields: &snapshot.fields,
            rows: rows
                .iter()
                .map(|row| ExportRow {
                    label: &row.label,
                    value: &row.value,
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&data)?)
    }

    fn to_text(rows: &[DisplayRow]) -> String {
        let width = rows
            .iter()
            .map(|row| row.label.chars().count())
            .chain(std::iter::once("Parameter".len()))
            .max()
            .unwrap_or(0);

        let mut out = format!("{:<width$}  Value\n", "Parameter", width = width);
        for row in rows {
            out.push_str(&format!("{:<width$}  {}\n", row.label, row.value, width = width));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::RowTone;

    fn snapshot() -> StatusSnapshot {
        let mut fields = StatusMap::new();
        fields.insert("BackupPhase", "Copying");
        fields.insert("Running", "1");
        StatusSnapshot {
            fields,
            taken_at: Local::now(),
        }
    }

    fn rows() -> Vec<DisplayRow> {
        vec![
            DisplayRow::new("Backup Phase", "Copying", RowTone::Phase),
            DisplayRow::new("Running", "Yes", RowTone::Positive),
        ]
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(ExportFormat::from_str("json").unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::from_str("TEXT").unwrap(), ExportFormat::Text);
        assert!(ExportFormat::from_str("csv").is_err());
    }

    #[test]
    fn test_text_export_aligns_columns() {
        let text = Exporter::export_snapshot(&snapshot(), &rows(), ExportFormat::Text).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Parameter     Value");
        assert_eq!(lines[1], "Backup Phase  Copying");
        assert_eq!(lines[2], "Running       Yes");
    }

    #[test]
    fn test_json_export_keeps_raw_fields_and_rows() {
        let json = Exporter::export_snapshot(&snapshot(), &rows(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["fields"]["BackupPhase"], "Copying");
        assert_eq!(value["rows"][1]["label"], "Running");
        assert_eq!(value["rows"][1]["value"], "Yes");
        assert!(value["timestamp"].is_string());
    }
}
