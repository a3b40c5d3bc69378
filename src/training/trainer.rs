use super::{TrainConfig, TrainMetric, TrainReport};
use crate::dataset::{Dataset, Split};
use crate::error::ModelError;
use crate::neural_network::Sequential;
use log::{debug, info, warn};
use ndarray::Axis;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::UnboundedSender;

/// Cloneable handle that requests cancellation of a [`Trainer`] run from elsewhere
#[derive(Debug, Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Requests cancellation; observed at the next epoch boundary.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns `true` if a stop has been requested for the current run
    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Runs the epoch loop over a model and a dataset
///
/// Cancellation is cooperative: the stop flag is polled once per epoch, right after the
/// epoch's metric has been emitted. An epoch in progress always completes. At most one run
/// may be active per model at a time; the `&mut` borrows of `train` enforce that for a
/// single trainer.
///
/// # Example
/// ```rust
/// use netscope::dataset::select;
/// use netscope::model_builder::{build, default_xor_spec};
/// use netscope::training::{TrainConfig, Trainer};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let mut model = build(&default_xor_spec()).unwrap();
/// let mut trainer = Trainer::new();
/// let config = TrainConfig { epochs: 3, ..TrainConfig::default() };
///
/// let report = trainer.train(&mut model, &select("xor"), &config, None).await.unwrap();
/// assert_eq!(report.metrics.len(), 3);
/// assert_eq!(report.metrics[0].epoch, 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct Trainer {
    stop_flag: Arc<AtomicBool>,
    metrics: Vec<TrainMetric>,
}

impl Trainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of the in-flight run.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Returns a handle that can stop runs of this trainer while it is borrowed by `train`.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flag: Arc::clone(&self.stop_flag),
        }
    }

    /// Metrics of the most recent run, complete or partial
    pub fn metrics(&self) -> &[TrainMetric] {
        &self.metrics
    }

    /// Trains `model` in place on the training split of `dataset`.
    ///
    /// Each call starts a new metric history and clears any pending stop request. The model
    /// is compiled with the configured optimizer and loss, which discards optimizer state left
    /// over from earlier runs; learned weights are kept.
    ///
    /// # Parameters
    ///
    /// - `model` - The model to train
    /// - `dataset` - Source of the training inputs and labels
    /// - `config` - Epochs, batch size, optimizer, loss and shuffling
    /// - `sink` - Optional channel receiving every metric as soon as it is produced
    ///
    /// # Returns
    ///
    /// - `Ok(TrainReport)` - The run completed or was stopped; `stopped` tells which
    /// - `Err(ModelError::Config)` - Malformed configuration, no epoch has run
    /// - `Err(ModelError::Shape)` - Dataset arity does not match the model, no epoch has run
    /// - `Err(ModelError::Training)` - Numeric failure, carrying the metrics completed so far
    pub async fn train(
        &mut self,
        model: &mut Sequential,
        dataset: &Dataset,
        config: &TrainConfig,
        sink: Option<&UnboundedSender<TrainMetric>>,
    ) -> Result<TrainReport, ModelError> {
        self.metrics.clear();
        self.stop_flag.store(false, Ordering::SeqCst);

        config.validate()?;
        dataset.validate_against(model, Split::Train)?;
        let optimizer = config.optimizer.build()?;
        model.compile_boxed(optimizer, config.loss.build());

        let (inputs, labels) = dataset.split(Split::Train);
        let sample_count = inputs.nrows();
        if sample_count == 0 {
            return Err(ModelError::Shape("training split is empty".to_string()));
        }

        info!(
            "training started: {} epochs, batch size {}, {} @ {}, {} samples",
            config.epochs,
            config.batch_size,
            config.optimizer.name(),
            config.optimizer.learning_rate(),
            sample_count
        );

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let mut order: Vec<usize> = (0..sample_count).collect();
        let mut stopped = false;

        for epoch in 1..=config.epochs {
            if config.shuffle {
                order.shuffle(&mut rng);
            }

            let mut loss_sum = 0.0f32;
            let mut correct = 0usize;

            for batch in order.chunks(config.batch_size) {
                let x = inputs.select(Axis(0), batch).into_dyn();
                let y = labels.select(Axis(0), batch).into_dyn();

                let outcome = match model.train_batch(&x, &y) {
                    Ok(outcome) => outcome,
                    Err(e) => return Err(self.fail(epoch, e.to_string())),
                };
                if !outcome.loss.is_finite() {
                    return Err(self.fail(
                        epoch,
                        format!("batch loss became non-finite ({})", outcome.loss),
                    ));
                }
                loss_sum += outcome.loss * outcome.size as f32;
                correct += outcome.correct;
            }

            let loss = loss_sum / sample_count as f32;
            if !loss.is_finite() {
                return Err(self.fail(epoch, format!("loss became non-finite ({})", loss)));
            }

            let metric = TrainMetric {
                epoch,
                loss,
                accuracy: model
                    .tracks_accuracy()
                    .then(|| correct as f32 / sample_count as f32),
            };
            self.metrics.push(metric);
            debug!("epoch {}/{}: {:?}", epoch, config.epochs, metric);

            if let Some(sink) = sink {
                if sink.send(metric).is_err() {
                    warn!("metric receiver dropped, epoch {} not delivered", epoch);
                }
            }

            // the single suspension point of a run
            tokio::task::yield_now().await;

            if self.stop_flag.load(Ordering::SeqCst) {
                warn!("training stopped after epoch {}/{}", epoch, config.epochs);
                stopped = true;
                break;
            }
        }

        info!(
            "training finished: {} of {} epochs, final loss {:?}",
            self.metrics.len(),
            config.epochs,
            self.metrics.last().map(|m| m.loss)
        );

        Ok(TrainReport {
            metrics: self.metrics.clone(),
            requested_epochs: config.epochs,
            stopped,
        })
    }

    fn fail(&self, epoch: usize, reason: String) -> ModelError {
        warn!("training failed at epoch {}: {}", epoch, reason);
        ModelError::Training {
            epoch,
            reason,
            metrics: self.metrics.clone(),
        }
    }
}
