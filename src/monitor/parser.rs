use crate::monitor::StatusMap;

const BLOCK_OPENER: &str = "Progress = {";
const BLOCK_CLOSER: &str = "};";

/// Parses `tmutil status` output into a flat map.
///
/// The tool prints a property-list style dictionary:
///
/// ```text
/// Backup session status:
/// {
///     BackupPhase = Copying;
///     Progress =     {
///         Percent = "0.25";
///         bytes = 1024;
///     };
///     Running = 1;
/// }
/// ```
///
/// Keys inside the `Progress` block are merged into the top level once the
/// block closes, overwriting same-named keys. A block that never closes is
/// dropped.
pub fn parse_status(output: &str) -> StatusMap {
    let mut fields = StatusMap::new();
    let mut block = StatusMap::new();
    let mut in_block = false;

    for line in output.lines() {
        let line = line.trim();

        if is_block_opener(line) {
            in_block = true;
            continue;
        }

        if in_block && line == BLOCK_CLOSER {
            in_block = false;
            fields.extend(std::mem::take(&mut block));
            continue;
        }

        if let Some((key, value)) = parse_line(line) {
            if in_block {
                block.insert(key, value);
            } else {
                fields.insert(key, value);
            }
        }
    }

    fields
}

// Real output pads the opener as `Progress =     {`, so whitespace runs are
// collapsed before comparing.
fn is_block_opener(line: &str) -> bool {
    let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.starts_with(BLOCK_OPENER)
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let value = value.trim().trim_end_matches(';').trim();

    Some((unquote(key.trim()), unquote(value)))
}

// Strips one pair of enclosing double quotes. Keys such as `"_raw_Percent"`
// are quoted by the tool too.
fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}
