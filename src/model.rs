//! Static project model: phases, epics, sprints, code metrics and timeline.
//!
//! Everything here is built once from literals. `QualityMetrics` is the only
//! part that changes afterwards (see [`crate::refresh`]).

use anyhow::{ensure, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Completed,
    InProgress,
    Planned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Phase {
    pub name: String,
    pub completed_points: u32,
    pub total_points: u32,
    pub status: PhaseStatus,
}

impl Phase {
    pub fn new(name: &str, completed_points: u32, total_points: u32, status: PhaseStatus) -> Self {
        Self {
            name: name.to_string(),
            completed_points,
            total_points,
            status,
        }
    }

    /// Completion in percent; a phase with no points is 0% done.
    pub fn completion_percent(&self) -> f64 {
        if self.total_points == 0 {
            return 0.0;
        }
        self.completed_points as f64 / self.total_points as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Epic {
    pub name: String,
    pub points: u32,
    pub completed: u32,
    pub priority: Priority,
}

impl Epic {
    pub fn new(name: &str, points: u32, completed: u32, priority: Priority) -> Self {
        Self {
            name: name.to_string(),
            points,
            completed,
            priority,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.points.saturating_sub(self.completed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sprint {
    pub name: String,
    pub planned: u32,
    pub completed: u32,
    pub velocity: u32,
}

impl Sprint {
    pub fn new(name: &str, planned: u32, completed: u32, velocity: u32) -> Self {
        Self {
            name: name.to_string(),
            planned,
            completed,
            velocity,
        }
    }
}

/// Quality scalars, each kept in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QualityMetrics {
    pub test_coverage: f64,
    pub code_quality: f64,
    pub documentation: f64,
    pub performance: f64,
}

impl QualityMetrics {
    pub const MAINTAINABILITY: f64 = 85.0;
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub fn scalars_mut(&mut self) -> [&mut f64; 4] {
        [
            &mut self.test_coverage,
            &mut self.code_quality,
            &mut self.documentation,
            &mut self.performance,
        ]
    }

    pub fn scalars(&self) -> [f64; 4] {
        [
            self.test_coverage,
            self.code_quality,
            self.documentation,
            self.performance,
        ]
    }

    pub fn clamp(&mut self) {
        for v in self.scalars_mut() {
            *v = v.clamp(Self::MIN, Self::MAX);
        }
    }

    pub fn in_bounds(&self) -> bool {
        self.scalars().iter().all(|v| (Self::MIN..=Self::MAX).contains(v))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeMetrics {
    pub lines_of_code: u64,
    pub quality: QualityMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Milestone,
    Completion,
    Target,
}

impl EventKind {
    /// Lane used by the timeline scatter.
    pub fn lane(&self) -> u8 {
        match self {
            EventKind::Milestone => 1,
            EventKind::Completion => 2,
            EventKind::Target => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimelineEvent {
    pub date: NaiveDate,
    pub label: String,
    pub kind: EventKind,
}

impl TimelineEvent {
    pub fn new(date: NaiveDate, label: &str, kind: EventKind) -> Self {
        Self {
            date,
            label: label.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectModel {
    pub phases: Vec<Phase>,
    pub epics: Vec<Epic>,
    pub sprints: Vec<Sprint>,
    pub code_metrics: CodeMetrics,
    pub timeline: Vec<TimelineEvent>,
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

impl ProjectModel {
    /// The hard-coded project data shown by the dashboard.
    pub fn reference() -> Self {
        Self {
            phases: vec![
                Phase::new("Phase 1", 34, 34, PhaseStatus::Completed),
                Phase::new("Phase 2", 0, 50, PhaseStatus::InProgress),
                Phase::new("Phase 3", 0, 75, PhaseStatus::Planned),
                Phase::new("Phase 4", 0, 66, PhaseStatus::Planned),
            ],
            epics: vec![
                Epic::new("Core Combat System", 45, 45, Priority::Critical),
                Epic::new("Advanced Combat Features", 35, 15, Priority::High),
                Epic::new("Task Management System", 25, 25, Priority::High),
                Epic::new("Economy Integration", 30, 0, Priority::Medium),
                Epic::new("Anti-Detection System", 40, 30, Priority::Critical),
                Epic::new("User Interface", 35, 0, Priority::High),
                Epic::new("Testing & QA", 15, 5, Priority::Medium),
            ],
            sprints: vec![
                Sprint::new("Sprint 1", 20, 20, 20),
                Sprint::new("Sprint 2", 18, 14, 14),
                Sprint::new("Sprint 3", 25, 0, 0),
                Sprint::new("Sprint 4", 25, 0, 0),
            ],
            code_metrics: CodeMetrics {
                lines_of_code: 3250,
                quality: QualityMetrics {
                    test_coverage: 87.0,
                    code_quality: 92.0,
                    documentation: 78.0,
                    performance: 95.0,
                },
            },
            timeline: vec![
                TimelineEvent::new(ymd(2024, 1, 1), "Project Initialization", EventKind::Milestone),
                TimelineEvent::new(ymd(2024, 1, 15), "Core Architecture Complete", EventKind::Completion),
                TimelineEvent::new(ymd(2024, 1, 30), "Combat Engine Implemented", EventKind::Completion),
                TimelineEvent::new(ymd(2024, 2, 15), "GUI Development Start", EventKind::Milestone),
                TimelineEvent::new(ymd(2024, 3, 1), "Beta Release Target", EventKind::Target),
            ],
        }
    }

    pub fn quality(&self) -> &QualityMetrics {
        &self.code_metrics.quality
    }

    pub fn quality_mut(&mut self) -> &mut QualityMetrics {
        &mut self.code_metrics.quality
    }

    /// Check the cross-field invariants of an externally supplied snapshot.
    pub fn validate(&self) -> Result<()> {
        for p in &self.phases {
            ensure!(
                p.completed_points <= p.total_points,
                "phase {:?}: completed {} exceeds total {}",
                p.name,
                p.completed_points,
                p.total_points
            );
        }
        for e in &self.epics {
            ensure!(
                e.completed <= e.points,
                "epic {:?}: completed {} exceeds points {}",
                e.name,
                e.completed,
                e.points
            );
        }
        ensure!(
            self.quality().in_bounds(),
            "quality metrics out of [0,100]: {:?}",
            self.quality()
        );
        Ok(())
    }
}
