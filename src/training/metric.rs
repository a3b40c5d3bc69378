/// Metrics of one completed epoch
///
/// # Fields
///
/// - `epoch` - 1-based epoch number
/// - `loss` - Sample-weighted mean loss over the epoch's batches
/// - `accuracy` - Fraction of correctly classified training samples, when the model tracks it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainMetric {
    pub epoch: usize,
    pub loss: f32,
    pub accuracy: Option<f32>,
}

/// Outcome of a training run that did not fail
///
/// # Fields
///
/// - `metrics` - One entry per completed epoch, in epoch order
/// - `requested_epochs` - Epoch count the run was configured with
/// - `stopped` - `true` if the run ended early because a stop was requested
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub metrics: Vec<TrainMetric>,
    pub requested_epochs: usize,
    pub stopped: bool,
}

impl TrainReport {
    /// Metric of the last completed epoch
    pub fn last(&self) -> Option<&TrainMetric> {
        self.metrics.last()
    }

    /// Number of completed epochs
    pub fn completed_epochs(&self) -> usize {
        self.metrics.len()
    }
}
