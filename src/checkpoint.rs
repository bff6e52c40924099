use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};

/// Resumable state of a length-driver run, saved after completed digit
/// lengths. Lengths are the only safe resumption boundary: a partially
/// swept length is re-run from its start on resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCheckpoint {
    pub start_length: u32,
    pub end_length: Option<u32>,
    pub next_length: u32,
    pub found: Vec<BigUint>,
    pub lengths_completed: u32,
    pub checkpoint_interval: Option<u32>,
    pub checkpoint_file: Option<String>,
    pub elapsed_secs: f64,
    pub timestamp: String,
}

impl SearchCheckpoint {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_length: u32,
        end_length: Option<u32>,
        next_length: u32,
        found: Vec<BigUint>,
        lengths_completed: u32,
        checkpoint_interval: Option<u32>,
        checkpoint_file: Option<String>,
        elapsed_secs: f64,
    ) -> Self {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        SearchCheckpoint {
            start_length,
            end_length,
            next_length,
            found,
            lengths_completed,
            checkpoint_interval,
            checkpoint_file,
            elapsed_secs,
            timestamp,
        }
    }

    /// Serialize to pretty JSON at `filepath`.
    pub fn save(&self, filepath: &str) -> std::io::Result<()> {
        let file = File::create(filepath)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Load a checkpoint previously written by [`SearchCheckpoint::save`].
    pub fn load(filepath: &str) -> std::io::Result<Self> {
        let file = File::open(filepath)?;
        let reader = BufReader::new(file);
        let checkpoint = serde_json::from_reader(reader)?;
        Ok(checkpoint)
    }

    /// Percentage of lengths completed. Only meaningful for bounded runs;
    /// unbounded runs report 0.
    pub fn progress_percentage(&self) -> f64 {
        match self.end_length {
            Some(end) if end >= self.start_length => {
                let total = end - self.start_length + 1;
                (self.lengths_completed as f64 / total as f64) * 100.0
            }
            _ => 0.0,
        }
    }

    /// Remaining lengths for a bounded run, None when unbounded.
    pub fn lengths_remaining(&self) -> Option<u32> {
        self.end_length
            .map(|end| (end + 1).saturating_sub(self.next_length))
    }
}
