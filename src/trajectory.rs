//! Per-iteration progress log.
//!
//! Every strategy appends one [`TrajectoryRecord`] per iteration (or
//! generation) to a caller-owned [`TrajectorySink`]. Records already appended
//! stay in the sink when a run fails part-way.

/// Label written by the local search runner.
pub const LOCAL_SEARCH: &str = "local-search";
/// Label written by the iterated local search runner.
pub const ITERATED_LOCAL_SEARCH: &str = "iterated-local-search";
/// Label written by the simulated annealing runner.
pub const ANNEALING: &str = "annealing";
/// Label written by the tabu search runner.
pub const TABU: &str = "tabu";
/// Label written by the genetic algorithm runner.
pub const GENETIC: &str = "genetic";

/// One progress sample.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryRecord {
    /// Fitness of the point the strategy is working on at this step.
    pub current_value: f64,
    /// Best fitness known to the strategy at this step.
    pub best_value: f64,
    pub iteration: usize,
    /// Strategy that produced the record.
    pub label: String,
}

impl TrajectoryRecord {
    pub fn new(current_value: f64, best_value: f64, iteration: usize, label: &str) -> Self {
        Self {
            current_value,
            best_value,
            iteration,
            label: label.to_string(),
        }
    }
}

/// Append-only destination for trajectory records.
pub trait TrajectorySink {
    fn record(&mut self, record: TrajectoryRecord);
}

impl TrajectorySink for Vec<TrajectoryRecord> {
    fn record(&mut self, record: TrajectoryRecord) {
        self.push(record);
    }
}

/// In-memory trajectory, ordered by insertion.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Trajectory {
    records: Vec<TrajectoryRecord>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TrajectoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&TrajectoryRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryRecord> {
        self.records.iter()
    }

    /// The `best_value` column.
    pub fn best_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.best_value).collect()
    }

    /// Writes the trajectory as CSV with a
    /// `current_value,best_value,iteration,label` header.
    #[cfg(feature = "csv")]
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(["current_value", "best_value", "iteration", "label"])?;
        for r in &self.records {
            out.write_record([
                r.current_value.to_string(),
                r.best_value.to_string(),
                r.iteration.to_string(),
                r.label.clone(),
            ])?;
        }
        out.flush()?;
        Ok(())
    }
}

impl TrajectorySink for Trajectory {
    fn record(&mut self, record: TrajectoryRecord) {
        self.records.push(record);
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryRecord;
    type IntoIter = std::slice::Iter<'a, TrajectoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut t = Trajectory::new();
        for i in 0..5 {
            t.record(TrajectoryRecord::new(i as f64, i as f64, i, GENETIC));
        }
        assert_eq!(t.len(), 5);
        let iterations: Vec<usize> = t.iter().map(|r| r.iteration).collect();
        assert_eq!(iterations, vec![0, 1, 2, 3, 4]);
        assert_eq!(t.last().map(|r| r.label.as_str()), Some("genetic"));
    }

    #[test]
    fn test_vec_is_a_sink() {
        let mut v: Vec<TrajectoryRecord> = Vec::new();
        v.record(TrajectoryRecord::new(0.1, 0.2, 0, TABU));
        assert_eq!(v.len(), 1);
    }

    #[cfg(feature = "csv")]
    #[test]
    fn test_write_csv() {
        let mut t = Trajectory::new();
        t.record(TrajectoryRecord::new(0.5, 0.75, 0, ANNEALING));
        let mut buf = Vec::new();
        t.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "current_value,best_value,iteration,label\n0.5,0.75,0,annealing\n"
        );
    }
}
