//! Periodic refresh driver.
//!
//! Every tick nudges each quality scalar by a bounded random amount, clamps
//! it back into `[0, 100]` and redraws the quality radar in place. The tick
//! body is synchronous ([`RefreshDriver::tick`]) so tests can drive it
//! directly; [`spawn_refresh`] runs it on a tokio interval.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use tokio::sync::{oneshot, Mutex};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::dashboard::Dashboard;
use crate::logging::{log, log_tick, obj, v_num, v_str, Domain, Level};
use crate::model::QualityMetrics;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    pub amplitude: f64,
}

impl Default for Perturbation {
    fn default() -> Self {
        Self { amplitude: 1.0 }
    }
}

impl Perturbation {
    /// Largest nudge that still fits the `[0, 100]` scale.
    pub const MAX_AMPLITUDE: f64 = QualityMetrics::MAX - QualityMetrics::MIN;

    /// Negative amplitudes are mirrored and oversized ones capped at
    /// [`Self::MAX_AMPLITUDE`]. NaN falls back to the default.
    pub fn new(amplitude: f64) -> Self {
        Self {
            amplitude: Self::bounded(amplitude),
        }
    }

    fn bounded(amplitude: f64) -> f64 {
        if amplitude.is_nan() {
            return Self::default().amplitude;
        }
        amplitude.abs().min(Self::MAX_AMPLITUDE)
    }

    pub fn apply<R: Rng + ?Sized>(&self, metrics: &mut QualityMetrics, rng: &mut R) {
        // the field is public, so bound it again here
        let a = Self::bounded(self.amplitude);
        for v in metrics.scalars_mut() {
            let delta = if a > 0.0 { rng.gen_range(-a..=a) } else { 0.0 };
            *v = (*v + delta).clamp(QualityMetrics::MIN, QualityMetrics::MAX);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug)]
pub struct RefreshDriver {
    state: DriverState,
    ticks: u64,
    perturbation: Perturbation,
}

impl RefreshDriver {
    pub fn new(perturbation: Perturbation) -> Self {
        Self {
            state: DriverState::Idle,
            ticks: 0,
            perturbation,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Idle -> Running. Has no effect in any other state.
    pub fn start(&mut self) -> bool {
        if self.state != DriverState::Idle {
            return false;
        }
        self.state = DriverState::Running;
        true
    }

    /// Run one tick. Ticks outside `Running` are ignored.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dashboard: &mut Dashboard,
        rng: &mut R,
    ) -> Option<[f64; 5]> {
        if self.state != DriverState::Running {
            return None;
        }
        let vector = dashboard.refresh_quality(rng, &self.perturbation);
        self.ticks += 1;
        log_tick(self.ticks, &vector);
        Some(vector)
    }

    /// Stop ticking and release the dashboard's chart instances.
    pub fn stop(&mut self, dashboard: &mut Dashboard) {
        if self.state == DriverState::Stopped {
            return;
        }
        self.state = DriverState::Stopped;
        dashboard.shutdown();
    }
}

#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub interval: Duration,
    pub perturbation: Perturbation,
    pub seed: Option<u64>,
    /// Stop on its own after this many ticks.
    pub max_ticks: Option<u64>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            perturbation: Perturbation::default(),
            seed: None,
            max_ticks: None,
        }
    }
}

pub struct RefreshHandle {
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
    ticks: Arc<AtomicU64>,
}

impl RefreshHandle {
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the pending timer and wait for the task to release the charts.
    pub async fn stop(self) {
        // a finished task has dropped its receiver; that is fine
        let _ = self.stop_tx.send(());
        log_join(self.task.await);
    }

    /// Wait for the task to end on its own (`max_ticks`).
    pub async fn join(self) {
        log_join(self.task.await);
    }
}

fn log_join(res: Result<(), JoinError>) {
    if let Err(err) = res {
        log(
            Level::Error,
            Domain::Refresh,
            "driver.task_failed",
            obj(&[("error", v_str(&err.to_string()))]),
        );
    }
}

/// Shortest period the driver will tick at.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Run the driver on a fixed interval until stopped. The first tick fires
/// one full interval after the call.
pub fn spawn_refresh(dashboard: Arc<Mutex<Dashboard>>, cfg: RefreshConfig) -> RefreshHandle {
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let ticks = Arc::new(AtomicU64::new(0));
    let counter = ticks.clone();

    let task = tokio::spawn(async move {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let period = cfg.interval.max(MIN_INTERVAL);
        let mut driver = RefreshDriver::new(cfg.perturbation);
        driver.start();
        log(
            Level::Info,
            Domain::Refresh,
            "driver.started",
            obj(&[
                ("interval_secs", v_num(period.as_secs_f64())),
                ("amplitude", v_num(cfg.perturbation.amplitude)),
            ]),
        );

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // a dropped handle does not stop the driver, only an explicit stop
        let mut stop_open = true;
        while !cfg.max_ticks.is_some_and(|max| driver.ticks() >= max) {
            tokio::select! {
                res = &mut stop_rx, if stop_open => {
                    if res.is_ok() {
                        break;
                    }
                    stop_open = false;
                }
                _ = ticker.tick() => {
                    let mut dash = dashboard.lock().await;
                    driver.tick(&mut dash, &mut rng);
                    counter.store(driver.ticks(), Ordering::SeqCst);
                }
            }
        }

        driver.stop(&mut *dashboard.lock().await);
        log(
            Level::Info,
            Domain::Refresh,
            "driver.stopped",
            obj(&[("ticks", json!(driver.ticks()))]),
        );
    });

    RefreshHandle {
        stop_tx,
        task,
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::engine::SharedEngine;
    use crate::chart::recording::RecordingEngine;
    use crate::chart::{ChartRenderer, MountRegistry};
    use crate::model::ProjectModel;

    fn dashboard() -> Dashboard {
        let engine: SharedEngine = Arc::new(RecordingEngine::new());
        let mut d = Dashboard::new(ProjectModel::reference(), ChartRenderer::new(engine, MountRegistry::all()));
        d.initial_draw();
        d
    }

    #[test]
    fn test_perturbation_stays_within_amplitude() {
        let mut rng = StdRng::seed_from_u64(42);
        let p = Perturbation::default();
        let mut q = ProjectModel::reference().code_metrics.quality;
        let before = q.scalars();
        p.apply(&mut q, &mut rng);
        for (b, a) in before.iter().zip(q.scalars()) {
            assert!((a - b).abs() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn test_perturbation_clamps_at_edges() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = Perturbation::new(5.0);
        let mut q = QualityMetrics {
            test_coverage: 0.0,
            code_quality: 100.0,
            documentation: 0.5,
            performance: 99.5,
        };
        for _ in 0..1_000 {
            p.apply(&mut q, &mut rng);
            assert!(q.in_bounds(), "out of bounds: {:?}", q);
        }
    }

    #[test]
    fn test_amplitude_is_bounded() {
        assert_eq!(Perturbation::new(1e308).amplitude, Perturbation::MAX_AMPLITUDE);
        assert_eq!(Perturbation::new(f64::INFINITY).amplitude, 100.0);
        assert_eq!(Perturbation::new(f64::NAN).amplitude, 1.0);
        assert_eq!(Perturbation::new(-3.0).amplitude, 3.0);

        // constructed directly, bypassing `new`
        let mut rng = StdRng::seed_from_u64(8);
        let mut q = ProjectModel::reference().code_metrics.quality;
        for amplitude in [f64::INFINITY, f64::MAX, f64::NAN] {
            Perturbation { amplitude }.apply(&mut q, &mut rng);
            assert!(q.in_bounds(), "amplitude {} gave {:?}", amplitude, q);
        }
    }

    #[test]
    fn test_zero_amplitude_is_identity() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut q = ProjectModel::reference().code_metrics.quality;
        Perturbation::new(0.0).apply(&mut q, &mut rng);
        assert_eq!(q, ProjectModel::reference().code_metrics.quality);
    }

    #[test]
    fn test_driver_state_machine() {
        let mut d = dashboard();
        let mut rng = StdRng::seed_from_u64(1);
        let mut driver = RefreshDriver::new(Perturbation::default());
        assert_eq!(driver.state(), DriverState::Idle);
        assert!(driver.tick(&mut d, &mut rng).is_none());

        assert!(driver.start());
        assert!(!driver.start());
        assert_eq!(driver.state(), DriverState::Running);
        assert!(driver.tick(&mut d, &mut rng).is_some());
        assert!(driver.tick(&mut d, &mut rng).is_some());
        assert_eq!(driver.ticks(), 2);

        driver.stop(&mut d);
        assert_eq!(driver.state(), DriverState::Stopped);
        assert!(d.renderer().is_empty());
        assert!(driver.tick(&mut d, &mut rng).is_none());
        assert!(!driver.start());
    }

    #[test]
    fn test_seeded_ticks_are_deterministic() {
        let run = || {
            let mut d = dashboard();
            let mut rng = StdRng::seed_from_u64(99);
            let mut driver = RefreshDriver::new(Perturbation::default());
            driver.start();
            (0..10).filter_map(|_| driver.tick(&mut d, &mut rng)).last()
        };
        assert_eq!(run(), run());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_driver_ticks_on_interval() {
        let dash = Arc::new(Mutex::new(dashboard()));
        let handle = spawn_refresh(
            dash.clone(),
            RefreshConfig {
                seed: Some(5),
                ..Default::default()
            },
        );
        tokio::time::sleep(Duration::from_secs(29)).await;
        assert_eq!(handle.ticks(), 0);
        tokio::time::sleep(Duration::from_secs(66)).await;
        assert_eq!(handle.ticks(), 3);

        handle.stop().await;
        assert!(dash.lock().await.renderer().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_ticks_ends_task() {
        let dash = Arc::new(Mutex::new(dashboard()));
        let handle = spawn_refresh(
            dash.clone(),
            RefreshConfig {
                interval: Duration::from_secs(1),
                seed: Some(5),
                max_ticks: Some(4),
                ..Default::default()
            },
        );
        let ticks = handle.ticks.clone();
        handle.join().await;
        assert_eq!(ticks.load(Ordering::SeqCst), 4);
        assert!(dash.lock().await.renderer().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_amplitude_keeps_ticking_and_releases_charts() {
        let dash = Arc::new(Mutex::new(dashboard()));
        let handle = spawn_refresh(
            dash.clone(),
            RefreshConfig {
                interval: Duration::from_secs(1),
                perturbation: Perturbation { amplitude: 1e308 },
                seed: Some(5),
                ..Default::default()
            },
        );
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(handle.ticks(), 3);
        assert!(!handle.is_finished());

        handle.stop().await;
        let dash = dash.lock().await;
        assert!(dash.renderer().is_empty());
        assert!(dash.model().quality().in_bounds());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_raised_to_minimum() {
        let dash = Arc::new(Mutex::new(dashboard()));
        let handle = spawn_refresh(
            dash.clone(),
            RefreshConfig {
                interval: Duration::ZERO,
                seed: Some(5),
                max_ticks: Some(3),
                ..Default::default()
            },
        );
        let ticks = handle.ticks.clone();
        handle.join().await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert!(dash.lock().await.renderer().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_max_ticks_stops_without_waiting() {
        let dash = Arc::new(Mutex::new(dashboard()));
        let started = Instant::now();
        let handle = spawn_refresh(
            dash.clone(),
            RefreshConfig {
                seed: Some(5),
                max_ticks: Some(0),
                ..Default::default()
            },
        );
        let ticks = handle.ticks.clone();
        handle.join().await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
        assert!(started.elapsed() < Duration::from_secs(30));
        let dash = dash.lock().await;
        assert!(dash.renderer().is_empty());
        assert_eq!(*dash.model().quality(), *ProjectModel::reference().quality());
    }
}
