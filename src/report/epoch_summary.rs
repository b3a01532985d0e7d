use std::fs::{self, File};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One appended row per epoch, in epoch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochSummaryRecord {
    pub epoch: usize,
    pub average_loss: f64,
    pub total_samples: usize,
    /// Minimum average loss over all epochs so far, including this one.
    pub best_loss_so_far: f64,
}

/// Append-only CSV writer for epoch summaries. Created once per run; the
/// header is written at creation and each record is flushed to disk before
/// training continues.
pub struct EpochSummaryWriter {
    writer: csv::Writer<File>,
    best_loss: f64,
    records: Vec<EpochSummaryRecord>,
}

impl EpochSummaryWriter {
    pub fn create(path: &Path) -> Result<EpochSummaryWriter> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(EpochSummaryWriter {
            writer: csv::Writer::from_path(path)?,
            best_loss: f64::INFINITY,
            records: Vec::new(),
        })
    }

    /// Appends one epoch's summary and returns the record (with the running
    /// best loss filled in).
    pub fn append(
        &mut self,
        epoch: usize,
        average_loss: f64,
        total_samples: usize,
    ) -> Result<EpochSummaryRecord> {
        self.best_loss = self.best_loss.min(average_loss);
        let record = EpochSummaryRecord {
            epoch,
            average_loss,
            total_samples,
            best_loss_so_far: self.best_loss,
        };
        self.writer.serialize(&record)?;
        self.writer.flush()?;
        self.records.push(record.clone());
        Ok(record)
    }

    /// All records appended so far, in epoch order.
    pub fn records(&self) -> &[EpochSummaryRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "glassbox_epoch_summary_{}_{}.csv",
            std::process::id(),
            name
        ))
    }

    #[test]
    fn best_loss_tracks_the_running_minimum_including_current() {
        let path = temp_path("best");
        let mut writer = EpochSummaryWriter::create(&path).unwrap();

        let first = writer.append(0, 0.30, 4).unwrap();
        assert_abs_diff_eq!(first.best_loss_so_far, 0.30);

        let worse = writer.append(1, 0.40, 4).unwrap();
        assert_abs_diff_eq!(worse.best_loss_so_far, 0.30);

        let better = writer.append(2, 0.10, 4).unwrap();
        assert_abs_diff_eq!(better.best_loss_so_far, 0.10);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn csv_has_header_and_one_row_per_epoch() {
        let path = temp_path("rows");
        let mut writer = EpochSummaryWriter::create(&path).unwrap();
        writer.append(0, 0.5, 4).unwrap();
        writer.append(1, 0.25, 4).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "epoch,average_loss,total_samples,best_loss_so_far"
        );
        assert_eq!(lines.next().unwrap(), "0,0.5,4,0.5");
        assert_eq!(lines.next().unwrap(), "1,0.25,4,0.25");

        let _ = fs::remove_file(&path);
    }
}
