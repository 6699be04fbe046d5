//! Record of finished calculations.

use serde::Serialize;

/// Receives one line per finished calculation, e.g. `8＋2 = 10`.
pub trait HistorySink {
    fn add_record(&mut self, line: &str);
    fn clear_all(&mut self);
    fn count(&self) -> usize;
    /// Records in insertion order, oldest first.
    fn records(&self) -> &[String];
}

/// In-memory history list.
#[derive(Clone, Debug, Default, Serialize)]
pub struct History {
    records: Vec<String>,
    /// Oldest records are dropped once this many are stored.
    #[serde(skip)]
    capacity: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity: Some(capacity),
        }
    }
}

impl HistorySink for History {
    fn add_record(&mut self, line: &str) {
        self.records.push(line.to_string());

        if let Some(capacity) = self.capacity
            && self.records.len() > capacity
        {
            let excess = self.records.len() - capacity;
            self.records.drain(..excess);
        }
    }

    fn clear_all(&mut self) {
        self.records.clear();
    }

    fn count(&self) -> usize {
        self.records.len()
    }

    fn records(&self) -> &[String] {
        &self.records
    }
}
