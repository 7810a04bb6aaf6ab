//! Output formatting for CLI operations.

use binarc::{EntryInfo, OperationStats};
use serde_json::json;

/// Trait for output formatting
pub trait OutputFormatter {
    /// Formats an archive listing
    fn format_list(&self, entries: &[EntryInfo]) -> String;

    /// Formats the statistics of a finished operation
    fn format_stats(&self, stats: &OperationStats) -> String;
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_list(&self, entries: &[EntryInfo]) -> String {
        let mut output = String::new();

        output.push_str(&format!("{:>12} {:>5} {}\n", "Stored", "Codec", "Name"));
        output.push_str(&"-".repeat(50));
        output.push('\n');

        let mut total: u64 = 0;
        let mut dirs = Vec::new();
        for entry in entries {
            total += entry.stored_size;
            if let Some(dir) = entry.name.dir_name() {
                if !dirs.contains(&dir) {
                    dirs.push(dir);
                }
            }
            output.push_str(&format!(
                "{:>12} {:>5} {}\n",
                humanize_bytes(entry.stored_size),
                entry.codec.name(),
                entry.name
            ));
        }

        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{} files, {} directories, {} stored\n",
            entries.len(),
            dirs.len(),
            humanize_bytes(total)
        ));
        output
    }

    fn format_stats(&self, stats: &OperationStats) -> String {
        stats.to_string()
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_list(&self, entries: &[EntryInfo]) -> String {
        let items: Vec<_> = entries
            .iter()
            .map(|e| {
                json!({
                    "name": e.name.as_str(),
                    "is_dir": e.is_dir,
                    "codec": e.codec.name(),
                    "stored_size": e.stored_size,
                })
            })
            .collect();

        serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_stats(&self, stats: &OperationStats) -> String {
        let obj = json!({
            "operation": format!("{:?}", stats.operation).to_lowercase(),
            "elapsed_seconds": stats.elapsed.as_secs_f64(),
            "input_bytes": stats.input_bytes,
            "payload_bytes": stats.payload_bytes,
            "archive_bytes": stats.archive_bytes,
            "archive_bytes_before": stats.archive_bytes_before,
            "entries": stats.entries,
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Creates the appropriate formatter based on output format
pub fn create_formatter(format: super::OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        super::OutputFormat::Human => Box::new(HumanFormatter),
        super::OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Converts bytes to a human-readable string
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
