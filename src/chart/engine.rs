//! The charting engine seam: what the renderer needs from an engine, and
//! the structured view model handed to it.

use std::sync::Arc;

use serde::Serialize;

use crate::derive::ScatterPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Doughnut,
    Pie,
    Bar,
    StackedBar,
    Line,
    Radar,
    Scatter,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Doughnut => "doughnut",
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
            ChartKind::StackedBar => "stacked_bar",
            ChartKind::Line => "line",
            ChartKind::Radar => "radar",
            ChartKind::Scatter => "scatter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DatasetValues {
    Numbers(Vec<f64>),
    Points(Vec<ScatterPoint>),
}

impl DatasetValues {
    pub fn len(&self) -> usize {
        match self {
            DatasetValues::Numbers(v) => v.len(),
            DatasetValues::Points(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub values: DatasetValues,
}

impl Dataset {
    pub fn numbers(label: &str, values: Vec<f64>) -> Self {
        Self {
            label: label.to_string(),
            values: DatasetValues::Numbers(values),
        }
    }

    pub fn points(label: &str, points: Vec<ScatterPoint>) -> Self {
        Self {
            label: label.to_string(),
            values: DatasetValues::Points(points),
        }
    }
}

/// Data bound to a chart instance. Replaced wholesale on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartOptions {
    pub legend: LegendPosition,
    pub stacked: bool,
    pub begin_at_zero: bool,
    pub y_max: Option<f64>,
    pub y_title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedrawMode {
    Animated,
    NoAnimation,
}

/// A live chart instance owned by the renderer.
pub trait ChartHandle: Send {
    fn update_data(&mut self, data: &ChartData);
    fn redraw(&mut self, mode: RedrawMode);
    fn dispose(&mut self);
}

pub trait ChartEngine: Send + Sync {
    fn construct(
        &self,
        kind: ChartKind,
        mount: &str,
        data: &ChartData,
        options: &ChartOptions,
    ) -> Box<dyn ChartHandle>;
}

pub type SharedEngine = Arc<dyn ChartEngine>;
