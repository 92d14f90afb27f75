//! Headline metric cards and insight cards.

use serde::Serialize;

use crate::model::{PhaseStatus, ProjectModel};

/// Coverage the project aims for before release.
pub const COVERAGE_TARGET: f64 = 95.0;
const PERFORMANCE_HIGH: f64 = 90.0;
/// Share of the anti-detection epic that must be done before it is called out.
const ANTI_DETECTION_READY: f64 = 75.0;
const ANTI_DETECTION_EPIC: &str = "Anti-Detection System";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_story_points: u64,
    pub completed_story_points: u64,
    pub completion_rate: u64,
    pub lines_of_code: u64,
    pub test_coverage: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub id: &'static str,
    pub label: &'static str,
    pub target: u64,
    pub suffix: &'static str,
}

impl Overview {
    pub fn from_model(model: &ProjectModel) -> Self {
        let total: u64 = model.phases.iter().map(|p| p.total_points as u64).sum();
        let completed: u64 = model.phases.iter().map(|p| p.completed_points as u64).sum();
        let completion_rate = if total == 0 { 0 } else { completed * 100 / total };
        Self {
            total_story_points: total,
            completed_story_points: completed,
            completion_rate,
            lines_of_code: model.code_metrics.lines_of_code,
            test_coverage: model.quality().test_coverage.round() as u64,
        }
    }

    /// Only rate cards carry a `%` suffix.
    pub fn cards(&self) -> Vec<MetricCard> {
        vec![
            MetricCard {
                id: "total-story-points",
                label: "Total Story Points",
                target: self.total_story_points,
                suffix: "",
            },
            MetricCard {
                id: "completion-rate",
                label: "Completion Rate",
                target: self.completion_rate,
                suffix: "%",
            },
            MetricCard {
                id: "lines-of-code",
                label: "Lines of Code",
                target: self.lines_of_code,
                suffix: "",
            },
            MetricCard {
                id: "test-coverage",
                label: "Test Coverage",
                target: self.test_coverage,
                suffix: "",
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
    Error,
}

impl InsightKind {
    pub fn icon(&self) -> &'static str {
        match self {
            InsightKind::Success => "check-circle",
            InsightKind::Warning => "exclamation-triangle",
            InsightKind::Info => "info-circle",
            InsightKind::Error => "times-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub action: String,
}

pub fn insights(model: &ProjectModel) -> Vec<Insight> {
    let mut out = Vec::new();
    let mut phases = model.phases.iter().peekable();
    while let Some(phase) = phases.next() {
        if phase.status != PhaseStatus::Completed {
            continue;
        }
        let next = phases
            .peek()
            .map(|p| format!("Continue momentum into {}", p.name))
            .unwrap_or_else(|| "Prepare release".to_string());
        out.push(Insight {
            kind: InsightKind::Success,
            title: format!("{} Completed Successfully", phase.name),
            description: format!("All {} story points delivered.", phase.total_points),
            action: next,
        });
    }

    let q = model.quality();
    if q.test_coverage < COVERAGE_TARGET {
        out.push(Insight {
            kind: InsightKind::Warning,
            title: "Test Coverage Opportunity".to_string(),
            description: format!(
                "Current coverage at {}%. Target {}% for production readiness.",
                q.test_coverage.round(),
                COVERAGE_TARGET
            ),
            action: "Prioritize unit test development".to_string(),
        });
    }
    if q.performance >= PERFORMANCE_HIGH {
        out.push(Insight {
            kind: InsightKind::Info,
            title: "Performance Optimization".to_string(),
            description: format!("Performance score at {}%.", q.performance.round()),
            action: "Implement memory optimization".to_string(),
        });
    }
    let anti_detection = model
        .epics
        .iter()
        .find(|e| e.name == ANTI_DETECTION_EPIC && e.points > 0);
    if let Some(epic) = anti_detection {
        let done = epic.completed as f64 / epic.points as f64 * 100.0;
        if done >= ANTI_DETECTION_READY {
            out.push(Insight {
                kind: InsightKind::Success,
                title: "Anti-Detection Effectiveness".to_string(),
                description: format!("Anti-detection work {}% complete.", done.round()),
                action: "Maintain current approach".to_string(),
            });
        }
    }
    out
}
