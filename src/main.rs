use std::env;
use std::error::Error;

use log::{info, warn};
use netscope::prelude::*;
use tokio::{signal, sync::mpsc};

const DEFAULT_DATASET: &str = "xor";
const DEFAULT_THRESHOLD: f32 = 0.5;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, Box<dyn Error>> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| format!("{key} has an invalid value: {raw:?}").into()),
        Err(_) => Ok(default),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let dataset_name = DatasetName::from_name(
        &env::var("NETSCOPE_DATASET").unwrap_or_else(|_| DEFAULT_DATASET.to_string()),
    );
    let defaults = TrainConfig::default();
    let config = TrainConfig {
        epochs: env_or("NETSCOPE_EPOCHS", defaults.epochs)?,
        optimizer: defaults
            .optimizer
            .with_learning_rate(env_or("NETSCOPE_LR", defaults.optimizer.learning_rate())?),
        ..defaults
    };
    let threshold = env_or("NETSCOPE_THRESHOLD", DEFAULT_THRESHOLD)?;

    let dataset = dataset_name.load();
    let mut session = Session::new();
    session.build(&default_xor_spec())?;
    session.summary();

    let stop = session.stop_handle();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("received SIGINT, stopping after the current epoch");
            stop.stop();
        }
    });

    let (tx, mut rx) = mpsc::unbounded_channel::<TrainMetric>();
    let printer = tokio::spawn(async move {
        while let Some(metric) = rx.recv().await {
            match metric.accuracy {
                Some(acc) => println!(
                    "epoch {:>4}  loss {:.4}  accuracy {:.2}",
                    metric.epoch, metric.loss, acc
                ),
                None => println!("epoch {:>4}  loss {:.4}", metric.epoch, metric.loss),
            }
        }
    });

    info!("training on {}", dataset_name.as_str());
    let report = session.train(&dataset, &config, Some(&tx)).await?;
    drop(tx);
    printer.await?;
    if report.stopped {
        println!(
            "stopped after {} of {} epochs",
            report.completed_epochs(),
            report.requested_epochs
        );
    }

    let eval = session.evaluate(&dataset, threshold)?;
    println!("test loss {:.4}", eval.loss);
    for row in &eval.rows {
        println!(
            "#{:<3} {:?} -> class {} (true {}) p={:?}{}",
            row.index,
            row.input,
            row.predicted_class,
            row.true_class,
            row.class_probabilities,
            if row.confident { "" } else { "  [low confidence]" }
        );
    }
    println!(
        "{}/{} correct, {} confident at threshold {}",
        eval.correct_count(),
        eval.rows.len(),
        eval.confident_count(),
        threshold
    );

    Ok(())
}
