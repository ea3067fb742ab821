// Feed Loop Module
// Cooperative publish loop: one reading per tick, log-and-continue on sink failure

use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::sink::TelemetrySink;
use crate::vitals::noise::NoiseSource;
use crate::vitals::reading::Reading;
use crate::vitals::VitalSignsGenerator;

/// Counters accumulated over one feed session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub published: u64,
    pub failed: u64,
}

/// Run the feed until the shutdown channel fires
///
/// A failed publish is logged and the loop moves on to the next tick. The
/// signal state already advanced before the attempt, so the next reading
/// continues from it regardless of the outcome.
pub async fn run<N, S>(
    generator: &mut VitalSignsGenerator<N>,
    sink: &S,
    path: &str,
    interval: Duration,
    shutdown: &mut broadcast::Receiver<()>,
) -> FeedStats
where
    N: NoiseSource,
    S: TelemetrySink + ?Sized,
{
    let mut stats = FeedStats::default();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(path = %path, interval_secs = interval.as_secs_f64(), "Feed loop started");

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                info!("Shutdown requested - stopping feed loop");
                break;
            }
            _ = ticker.tick() => {
                let reading = generator.generate_reading(Instant::now());

                match sink.publish(path, &reading).await {
                    Ok(()) => {
                        stats.published += 1;
                        debug!(
                            heart_rate = reading.heart_rate,
                            spo2 = reading.spo2,
                            last_updated = reading.last_updated,
                            "Reading published"
                        );
                    }
                    Err(e) => {
                        stats.failed += 1;
                        warn!(error = %e, "Failed to publish reading - continuing next tick");
                    }
                }
            }
        }
    }

    info!(published = stats.published, failed = stats.failed, "Feed loop stopped");
    stats
}

/// Generate and publish exactly one reading
pub async fn publish_once<N, S>(
    generator: &mut VitalSignsGenerator<N>,
    sink: &S,
    path: &str,
) -> Result<Reading>
where
    N: NoiseSource,
    S: TelemetrySink + ?Sized,
{
    let reading = generator.generate_reading(Instant::now());
    sink.publish(path, &reading).await?;
    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{SinkError, StatusCode};
    use crate::vitals::noise::FixedNoise;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        readings: Mutex<Vec<(String, Reading)>>,
    }

    #[async_trait]
    impl TelemetrySink for RecordingSink {
        async fn publish(&self, path: &str, reading: &Reading) -> Result<(), SinkError> {
            self.readings
                .lock()
                .unwrap()
                .push((path.to_string(), reading.clone()));
            Ok(())
        }
    }

    struct RejectingSink;

    #[async_trait]
    impl TelemetrySink for RejectingSink {
        async fn publish(&self, _path: &str, _reading: &Reading) -> Result<(), SinkError> {
            Err(SinkError::Rejected {
                status: StatusCode::UNAUTHORIZED,
            })
        }
    }

    #[tokio::test]
    async fn test_loop_publishes_until_shutdown() {
        let mut generator = VitalSignsGenerator::with_noise(FixedNoise::silent());
        let sink = RecordingSink::default();
        let (tx, mut rx) = broadcast::channel(4);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let _ = tx.send(());
        });

        let stats = run(
            &mut generator,
            &sink,
            "devices/TEST01/readings",
            Duration::from_millis(10),
            &mut rx,
        )
        .await;

        let recorded = sink.readings.lock().unwrap();
        assert!(stats.published >= 2);
        assert_eq!(stats.failed, 0);
        assert_eq!(recorded.len() as u64, stats.published);
        assert!(recorded.iter().all(|(path, _)| path == "devices/TEST01/readings"));
    }

    #[tokio::test]
    async fn test_publish_failures_keep_the_loop_alive() {
        let mut generator = VitalSignsGenerator::with_noise(FixedNoise::silent());
        let sink = RejectingSink;
        let (tx, mut rx) = broadcast::channel(4);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(60)).await;
            let _ = tx.send(());
        });

        let stats = run(
            &mut generator,
            &sink,
            "devices/TEST01/readings",
            Duration::from_millis(10),
            &mut rx,
        )
        .await;

        assert_eq!(stats.published, 0);
        assert!(stats.failed >= 2);
        // The generator advanced despite every publish failing
        assert!(generator.state().heart_rate > 74.0);
    }

    #[tokio::test]
    async fn test_publish_once_returns_the_stored_reading() {
        let mut generator = VitalSignsGenerator::with_noise(FixedNoise::silent());
        let sink = RecordingSink::default();

        let reading = publish_once(&mut generator, &sink, "devices/TEST01/readings")
            .await
            .unwrap();

        let recorded = sink.readings.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].1, reading);
    }

    #[tokio::test]
    async fn test_publish_once_surfaces_sink_errors() {
        let mut generator = VitalSignsGenerator::with_noise(FixedNoise::silent());

        let result = publish_once(&mut generator, &RejectingSink, "devices/TEST01/readings").await;
        assert!(result.is_err());
    }
}
