use crate::monitor::{
    format_byte_size, format_duration, format_flag, format_percent, parse_fraction, progress_bar,
    StatusMap, ERROR_FIELD,
};

/// Label of the synthesized bar row under a fractional progress field.
pub const PROGRESS_BAR_LABEL: &str = "Progress Bar";
const MISSING_VALUE: &str = "N/A";

/// Fields holding a 0..1 fraction, shown as a percentage plus a bar.
/// `Percent` and `FractionDone` come from different tool versions and may
/// appear together.
const FRACTION_FIELDS: &[&str] = &["FractionDone", "Percent"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    Identity,
    ByteSize,
    Duration,
    Percent,
    Flag,
}

impl Formatter {
    pub fn apply(&self, value: &str) -> String {
        match self {
            Formatter::Identity => value.to_string(),
            Formatter::ByteSize => format_byte_size(value),
            Formatter::Duration => format_duration(value),
            Formatter::Percent => format_percent(value),
            Formatter::Flag => format_flag(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTone {
    Plain,
    Phase,
    Positive,
    Negative,
    Error,
    /// Progress bar with this many filled cells.
    Bar(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    pub formatter: Formatter,
    pub visible: bool,
}

impl FieldDescriptor {
    fn known(key: &str, label: &str, formatter: Formatter) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            formatter,
            visible: true,
        }
    }

    fn hidden(key: &str, label: &str) -> Self {
        Self {
            visible: false,
            ..Self::known(key, label, Formatter::Identity)
        }
    }

    /// Picks a formatter for a field that is not in the known table.
    pub fn infer(key: &str) -> Self {
        let lower = key.to_lowercase();
        let formatter = if lower.contains("bytes") {
            Formatter::ByteSize
        } else if lower.contains("time remaining") {
            Formatter::Duration
        } else {
            Formatter::Identity
        };

        Self::known(key, key, formatter)
    }

    fn tone(&self, formatted: &str) -> RowTone {
        match self.key.as_str() {
            "BackupPhase" => RowTone::Phase,
            "Running" if formatted == "Yes" => RowTone::Positive,
            "Running" => RowTone::Negative,
            ERROR_FIELD => RowTone::Error,
            _ => RowTone::Plain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub label: String,
    pub value: String,
    pub tone: RowTone,
}

impl DisplayRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>, tone: RowTone) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            tone,
        }
    }
}

fn known_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::known("BackupPhase", "Backup Phase", Formatter::Identity),
        FieldDescriptor::known("ChangedItemCount", "Changed Items", Formatter::Identity),
        FieldDescriptor::known("ClientID", "Client ID", Formatter::Identity),
        FieldDescriptor::known("DateOfStateChange", "Last State Change", Formatter::Identity),
        FieldDescriptor::hidden("DestinationID", "Destination ID"),
        FieldDescriptor::known("DestinationMountPoint", "Destination Mount", Formatter::Identity),
        FieldDescriptor::known("FractionDone", "Progress", Formatter::Percent),
        FieldDescriptor::hidden("FractionOfProgressBar", "Progress Bar Fraction"),
        FieldDescriptor::known("Running", "Running", Formatter::Flag),
        FieldDescriptor::known("BytesCopied", "Bytes Copied", Formatter::ByteSize),
        FieldDescriptor::known("TotalBytesToCopy", "Total Bytes to Copy", Formatter::ByteSize),
        FieldDescriptor::known("TimeRemaining", "Time Remaining", Formatter::Duration),
        FieldDescriptor::known(ERROR_FIELD, "Error", Formatter::Identity),
        FieldDescriptor::known("Percent", "Progress", Formatter::Percent),
        FieldDescriptor::hidden("_raw_Percent", "_raw_Percent"),
    ]
}

/// Ordered field descriptors: the known table first, then every unknown
/// field in the order it was first seen. Only ever grows.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    descriptors: Vec<FieldDescriptor>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self {
            descriptors: known_fields(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.descriptors.iter().find(|d| d.key == key)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Registers descriptors for fields not seen before.
    pub fn observe(&mut self, fields: &StatusMap) {
        for key in fields.keys() {
            if self.get(key).is_none() {
                tracing::debug!(field = key, "new status field");
                self.descriptors.push(FieldDescriptor::infer(key));
            }
        }
    }

    /// Observes `fields`, then lays out one row per visible field.
    pub fn rows(&mut self, fields: &StatusMap) -> Vec<DisplayRow> {
        self.observe(fields);

        let mut rows = Vec::new();
        for descriptor in self.descriptors.iter().filter(|d| d.visible) {
            let key = descriptor.key.as_str();

            if FRACTION_FIELDS.contains(&key) {
                let value = fields.get(key).unwrap_or(MISSING_VALUE);
                match parse_fraction(value) {
                    Some(fraction) => {
                        let (filled, bar) = progress_bar(fraction);
                        rows.push(DisplayRow::new(
                            &descriptor.label,
                            descriptor.formatter.apply(value),
                            RowTone::Plain,
                        ));
                        rows.push(DisplayRow::new(PROGRESS_BAR_LABEL, bar, RowTone::Bar(filled)));
                    }
                    None => rows.push(DisplayRow::new(&descriptor.label, value, RowTone::Plain)),
                }
                continue;
            }

            if let Some(value) = fields.get(key) {
                let formatted = descriptor.formatter.apply(value);
                let tone = descriptor.tone(&formatted);
                rows.push(DisplayRow::new(&descriptor.label, formatted, tone));
            }
        }

        rows
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}
