use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};
use tracing::info;

use crate::messages::WorkerResult;
use crate::states::FeedbackRecord;

use super::{send_error, send_log};

pub(super) fn handle_submit(
    record: &FeedbackRecord,
    log_path: Option<&Path>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    info!(
        source = %record.source,
        label = %record.label,
        classification = ?record.ratings.classification_accuracy,
        localization = ?record.ratings.localization_accuracy,
        ease_of_use = ?record.ratings.ease_of_use,
        "Feedback submitted"
    );

    let Some(path) = log_path else {
        send_log(tx, ctx, "Thank you for your feedback");
        return;
    };

    match append_record(record, path) {
        Ok(()) => send_log(tx, ctx, format!("Feedback saved to {}", path.display())),
        Err(e) => send_error(tx, ctx, format!("{e:#}")),
    }
}

/// Append `record` as one JSON line.
fn append_record(record: &FeedbackRecord, path: &Path) -> Result<()> {
    let line = serde_json::to_string(record).context("Failed to encode feedback")?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open feedback log {}", path.display()))?;
    writeln!(file, "{line}")
        .with_context(|| format!("Failed to write feedback log {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::rating::FeedbackRatings;
    use crate::states::RatedClassification;

    #[test]
    fn test_records_are_appended_as_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ratings.jsonl");

        let context = RatedClassification {
            source: "a.png".into(),
            label: "Nodule".into(),
            confidence: "87.00%".into(),
        };
        let ratings = FeedbackRatings {
            classification_accuracy: Some(5),
            localization_accuracy: Some(4),
            ease_of_use: Some(3),
            feedback: String::new(),
        };
        let record = FeedbackRecord::new(&context, ratings);
        append_record(&record, &path).unwrap();
        append_record(&record, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let back: FeedbackRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(back, record);
    }
}
