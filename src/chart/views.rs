//! Bind derived series to chart data and options, one builder per chart.

use crate::derive::{
    epic_status_series, phase_progress_series, quality_radar_vector, timeline_scatter,
    velocity_series, QUALITY_AXES,
};
use crate::model::ProjectModel;

use super::engine::{ChartData, ChartKind, ChartOptions, Dataset, LegendPosition};
use super::ChartId;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

pub fn view_for(id: ChartId, model: &ProjectModel) -> ChartView {
    match id {
        ChartId::PhaseProgress => phase_progress_view(model),
        ChartId::EpicStatus => epic_status_view(model),
        ChartId::Velocity => velocity_view(model),
        ChartId::Quality => quality_view(model),
        ChartId::Timeline => timeline_view(model),
    }
}

/// Data only; used for in-place updates.
pub fn data_for(id: ChartId, model: &ProjectModel) -> ChartData {
    match id {
        ChartId::Quality => quality_data(model),
        _ => view_for(id, model).data,
    }
}

fn phase_progress_view(model: &ProjectModel) -> ChartView {
    let series = phase_progress_series(&model.phases);
    let (labels, values): (Vec<String>, Vec<f64>) =
        series.into_iter().map(|p| (p.label, p.value)).unzip();
    ChartView {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels,
            datasets: vec![Dataset::numbers("Completion %", values)],
        },
        options: ChartOptions {
            legend: LegendPosition::Bottom,
            ..Default::default()
        },
    }
}

fn epic_status_view(model: &ProjectModel) -> ChartView {
    let series = epic_status_series(&model.epics);
    ChartView {
        kind: ChartKind::StackedBar,
        data: ChartData {
            labels: series.labels,
            datasets: vec![
                Dataset::numbers("Completed", series.completed),
                Dataset::numbers("Remaining", series.remaining),
            ],
        },
        options: ChartOptions {
            stacked: true,
            begin_at_zero: true,
            ..Default::default()
        },
    }
}

fn velocity_view(model: &ProjectModel) -> ChartView {
    let series = velocity_series(&model.sprints);
    ChartView {
        kind: ChartKind::Line,
        data: ChartData {
            labels: series.labels,
            datasets: vec![
                Dataset::numbers("Planned", series.planned),
                Dataset::numbers("Completed", series.completed),
            ],
        },
        options: ChartOptions {
            begin_at_zero: true,
            y_title: Some("Story Points".to_string()),
            ..Default::default()
        },
    }
}

fn quality_data(model: &ProjectModel) -> ChartData {
    ChartData {
        labels: QUALITY_AXES.iter().map(|s| s.to_string()).collect(),
        datasets: vec![Dataset::numbers(
            "Current Metrics",
            quality_radar_vector(model.quality()).to_vec(),
        )],
    }
}

fn quality_view(model: &ProjectModel) -> ChartView {
    ChartView {
        kind: ChartKind::Radar,
        data: quality_data(model),
        options: ChartOptions {
            begin_at_zero: true,
            y_max: Some(100.0),
            ..Default::default()
        },
    }
}

fn timeline_view(model: &ProjectModel) -> ChartView {
    let scatter = timeline_scatter(&model.timeline);
    let datasets = scatter
        .lanes()
        .into_iter()
        .map(|(label, points)| Dataset::points(label, points.to_vec()))
        .collect();
    ChartView {
        kind: ChartKind::Scatter,
        data: ChartData {
            labels: Vec::new(),
            datasets,
        },
        options: ChartOptions {
            y_max: Some(4.0),
            y_title: Some("Timeline".to_string()),
            ..Default::default()
        },
    }
}
