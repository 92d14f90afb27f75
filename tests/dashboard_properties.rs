//! End-to-end properties of the dashboard pipeline: model in, derived
//! series and engine calls out. Everything runs against the recording
//! engine so the exact calls a real charting engine would see can be
//! asserted on.

use std::sync::Arc;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use projectdash::chart::engine::{ChartData, DatasetValues, RedrawMode, SharedEngine};
use projectdash::chart::recording::{EngineCall, RecordingEngine};
use projectdash::chart::{ChartId, ChartRenderer, MountRegistry};
use projectdash::dashboard::Dashboard;
use projectdash::derive::{
    epic_status_series, phase_progress_series, quality_radar_vector, timeline_scatter, velocity_series,
};
use projectdash::export;
use projectdash::model::{
    Epic, EventKind, Phase, PhaseStatus, Priority, ProjectModel, QualityMetrics, TimelineEvent,
};
use projectdash::refresh::Perturbation;

fn recording_dashboard(mounts: MountRegistry) -> (Arc<RecordingEngine>, Dashboard) {
    let engine = Arc::new(RecordingEngine::new());
    let shared: SharedEngine = engine.clone();
    let dashboard = Dashboard::new(ProjectModel::reference(), ChartRenderer::new(shared, mounts));
    (engine, dashboard)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_phase_percent_bounds() {
    let phases = vec![
        Phase::new("Done", 34, 34, PhaseStatus::Completed),
        Phase::new("Started", 0, 50, PhaseStatus::InProgress),
        Phase::new("Empty", 0, 0, PhaseStatus::Planned),
        Phase::new("Partial", 7, 66, PhaseStatus::InProgress),
    ];
    let series = phase_progress_series(&phases);
    assert_eq!(series.len(), phases.len());
    for (point, phase) in series.iter().zip(&phases) {
        assert_eq!(point.label, phase.name);
        assert!((0.0..=100.0).contains(&point.value));
    }
    assert_eq!(series[0].value, 100.0);
    assert_eq!(series[1].value, 0.0);
    assert_eq!(series[2].value, 0.0);
}

#[test]
fn test_epic_pairs_sum_to_points() {
    let model = ProjectModel::reference();
    let series = epic_status_series(&model.epics);
    for (i, epic) in model.epics.iter().enumerate() {
        assert_eq!(series.completed[i] + series.remaining[i], epic.points as f64);
    }
    assert_eq!(series.labels[0], "Core Combat");
    assert_eq!(series.completed[0], 45.0);
    assert_eq!(series.remaining[0], 0.0);
}

#[test]
fn test_epic_label_strips_first_suffix_only() {
    let epics = vec![Epic::new("Core Combat System", 45, 45, Priority::Critical)];
    let series = epic_status_series(&epics);
    assert_eq!(series.labels, vec!["Core Combat"]);
}

#[test]
fn test_velocity_keeps_order_and_length() {
    let model = ProjectModel::reference();
    let series = velocity_series(&model.sprints);
    assert_eq!(series.labels.len(), model.sprints.len());
    let names: Vec<&str> = model.sprints.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(series.labels, names);
}

#[test]
fn test_radar_vector_order_and_bounds() {
    let q = QualityMetrics {
        test_coverage: 87.0,
        code_quality: 92.0,
        documentation: 78.0,
        performance: 95.0,
    };
    assert_eq!(quality_radar_vector(&q), [87.0, 92.0, 78.0, 95.0, 85.0]);
}

#[test]
fn test_repeated_refresh_keeps_quality_in_bounds() {
    let (engine, mut dash) = recording_dashboard(MountRegistry::all());
    dash.initial_draw();
    let mut rng = StdRng::seed_from_u64(2024);
    let wide = Perturbation::new(40.0);
    for _ in 0..500 {
        let v = dash.refresh_quality(&mut rng, &wide);
        assert!(v[..4].iter().all(|s| (0.0..=100.0).contains(s)));
        assert_eq!(v[4], 85.0);
    }
    assert!(dash.model().quality().in_bounds());

    // every refresh is a data swap plus a non-animated redraw, never a rebuild
    assert_eq!(engine.constructed(), 5);
    let redraws = engine
        .calls()
        .into_iter()
        .filter(|c| matches!(c, EngineCall::Redraw { mode: RedrawMode::NoAnimation, .. }))
        .count();
    assert_eq!(redraws, 500);
}

#[test]
fn test_radar_update_carries_current_vector() {
    let (engine, mut dash) = recording_dashboard(MountRegistry::all());
    dash.initial_draw();
    let mut rng = StdRng::seed_from_u64(9);
    let v = dash.refresh_quality(&mut rng, &Perturbation::default());
    let pushed = engine.last_update_for("quality-chart").unwrap();
    assert_eq!(pushed.datasets[0].values, DatasetValues::Numbers(v.to_vec()));
}

#[test]
fn test_update_unknown_chart_is_noop() {
    let (engine, mut dash) = recording_dashboard(MountRegistry::from_names(["phase-progress-chart"]));
    dash.initial_draw();
    let before = engine.calls();
    let updated = dash.renderer_mut().update(ChartId::Quality, ChartData::default());
    assert!(!updated);
    assert_eq!(engine.calls(), before);
    assert!(dash.renderer().data_of(ChartId::Quality).is_none());
}

#[test]
fn test_timeline_lanes_from_three_events() {
    let events = vec![
        TimelineEvent::new(date(2024, 3, 1), "Target", EventKind::Target),
        TimelineEvent::new(date(2024, 1, 1), "Kickoff", EventKind::Milestone),
        TimelineEvent::new(date(2024, 1, 15), "Phase 1", EventKind::Completion),
    ];
    let scatter = timeline_scatter(&events);
    assert_eq!(scatter.len(), 3);
    assert_eq!(scatter.milestones.len(), 1);
    assert_eq!(scatter.milestones[0].y, 1);
    assert_eq!(scatter.milestones[0].date, date(2024, 1, 1));
    assert_eq!(scatter.completions[0].y, 2);
    assert_eq!(scatter.targets[0].y, 3);
}

#[test]
fn test_export_after_refresh_round_trips() {
    let (_engine, mut dash) = recording_dashboard(MountRegistry::all());
    dash.initial_draw();
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..10 {
        dash.refresh_quality(&mut rng, &Perturbation::default());
    }
    let doc = dash.export().unwrap();
    let parsed = export::parse(&doc).unwrap();
    assert_eq!(&parsed, dash.model());
    assert_ne!(parsed, ProjectModel::reference());
}

#[test]
fn test_shutdown_disposes_everything() {
    let (engine, mut dash) = recording_dashboard(MountRegistry::all());
    dash.initial_draw();
    dash.toggle_chart(ChartId::PhaseProgress);
    dash.shutdown();
    assert_eq!(engine.live_instances(), 0);
    assert_eq!(engine.constructed(), 6);
    assert!(dash.renderer().is_empty());
}
