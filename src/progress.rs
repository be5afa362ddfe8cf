/// Consumption progress of a source against its physical size.
///
/// Pure state: the source feeds positions in, callers query out. A new report
/// becomes available only when the whole-number percentage moves forward.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    total: Option<u64>,
    position: u64,
    finished: bool,
    reported: Option<u8>,
    available: bool,
}

impl Progress {
    pub fn new(total: Option<u64>) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Record the current raw offset. Offsets never move backwards.
    pub fn advance(&mut self, position: u64) {
        self.position = self.position.max(position);
        self.refresh();
    }

    /// Record the final raw offset and mark the stream as fully consumed.
    pub fn finish_at(&mut self, position: u64) {
        self.position = self.position.max(position);
        self.finished = true;
        self.refresh();
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    /// Percentage in `[0, 100]`; 0 when the total size is unknown.
    pub fn percentage(&self) -> f64 {
        match self.total {
            None => 0.0,
            Some(_) if self.finished => 100.0,
            Some(0) => 100.0,
            Some(total) => (self.position as f64 * 100.0 / total as f64).min(100.0),
        }
    }

    /// Whether the last update crossed into a new whole percentage point.
    pub fn available(&self) -> bool {
        self.available
    }

    fn refresh(&mut self) {
        if self.total.is_none() {
            self.available = false;
            return;
        }
        let whole = self.percentage().floor() as u8;
        self.available = self.reported.is_none_or(|last| whole > last);
        if self.available {
            self.reported = Some(whole);
        }
    }
}
