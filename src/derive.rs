//! Pure per-chart series derived from the project model.
//!
//! None of these functions fail: empty input yields an empty series and
//! degenerate values (a phase with zero points) come out as zero.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Epic, EventKind, Phase, QualityMetrics, Sprint, TimelineEvent};

/// Axis labels of the quality radar, in vector order.
pub const QUALITY_AXES: [&str; 5] = [
    "Test Coverage",
    "Code Quality",
    "Documentation",
    "Performance",
    "Maintainability",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

pub fn phase_progress_series(phases: &[Phase]) -> Vec<SeriesPoint> {
    phases
        .iter()
        .map(|p| SeriesPoint {
            label: p.name.clone(),
            value: p.completion_percent(),
        })
        .collect()
}

/// Rounded percentage for tooltips and cards.
pub fn percent_label(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EpicStatusSeries {
    pub labels: Vec<String>,
    pub completed: Vec<f64>,
    pub remaining: Vec<f64>,
}

/// Shorten an epic name for display: drop the first `" System"`, then the
/// first `" Features"` of what is left.
pub fn display_label(name: &str) -> String {
    name.replacen(" System", "", 1).replacen(" Features", "", 1)
}

pub fn epic_status_series(epics: &[Epic]) -> EpicStatusSeries {
    let mut out = EpicStatusSeries::default();
    for e in epics {
        out.labels.push(display_label(&e.name));
        out.completed.push(e.completed as f64);
        out.remaining.push(e.remaining() as f64);
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VelocitySeries {
    pub labels: Vec<String>,
    pub planned: Vec<f64>,
    pub completed: Vec<f64>,
}

pub fn velocity_series(sprints: &[Sprint]) -> VelocitySeries {
    let mut out = VelocitySeries::default();
    for s in sprints {
        out.labels.push(s.name.clone());
        out.planned.push(s.planned as f64);
        out.completed.push(s.completed as f64);
    }
    out
}

pub fn quality_radar_vector(metrics: &QualityMetrics) -> [f64; 5] {
    [
        metrics.test_coverage,
        metrics.code_quality,
        metrics.documentation,
        metrics.performance,
        QualityMetrics::MAINTAINABILITY,
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub date: NaiveDate,
    pub y: u8,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimelineScatter {
    pub milestones: Vec<ScatterPoint>,
    pub completions: Vec<ScatterPoint>,
    pub targets: Vec<ScatterPoint>,
}

impl TimelineScatter {
    pub fn lanes(&self) -> [(&'static str, &[ScatterPoint]); 3] {
        [
            ("Milestones", self.milestones.as_slice()),
            ("Completions", self.completions.as_slice()),
            ("Targets", self.targets.as_slice()),
        ]
    }

    pub fn len(&self) -> usize {
        self.milestones.len() + self.completions.len() + self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn timeline_scatter(events: &[TimelineEvent]) -> TimelineScatter {
    let mut out = TimelineScatter::default();
    for ev in events {
        let point = ScatterPoint {
            date: ev.date,
            y: ev.kind.lane(),
            label: ev.label.clone(),
        };
        match ev.kind {
            EventKind::Milestone => out.milestones.push(point),
            EventKind::Completion => out.completions.push(point),
            EventKind::Target => out.targets.push(point),
        }
    }
    // stable: same-day events keep input order
    for lane in [&mut out.milestones, &mut out.completions, &mut out.targets] {
        lane.sort_by_key(|p| p.date);
    }
    out
}
