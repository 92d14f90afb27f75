//! Chart render adapter.
//!
//! [`ChartRenderer`] owns at most one engine instance per [`ChartId`]. A
//! chart whose mount point is missing simply does not exist; updates to it
//! are no-ops.

pub mod engine;
pub mod gate;
pub mod recording;
pub mod views;

use std::collections::{BTreeSet, HashMap};

use serde_json::json;

use crate::logging::{log_chart, v_str, Level};

use engine::{ChartData, ChartHandle, ChartKind, ChartOptions, RedrawMode, SharedEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartId {
    PhaseProgress,
    EpicStatus,
    Velocity,
    Quality,
    Timeline,
}

impl ChartId {
    pub const ALL: [ChartId; 5] = [
        ChartId::PhaseProgress,
        ChartId::EpicStatus,
        ChartId::Velocity,
        ChartId::Quality,
        ChartId::Timeline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartId::PhaseProgress => "phase-progress",
            ChartId::EpicStatus => "epic-status",
            ChartId::Velocity => "velocity",
            ChartId::Quality => "quality",
            ChartId::Timeline => "timeline",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }

    /// Name of the surface this chart binds to.
    pub fn mount_point(&self) -> String {
        format!("{}-chart", self.as_str())
    }

    pub fn primary_kind(&self) -> ChartKind {
        match self {
            ChartId::PhaseProgress => ChartKind::Doughnut,
            ChartId::EpicStatus => ChartKind::StackedBar,
            ChartId::Velocity => ChartKind::Line,
            ChartId::Quality => ChartKind::Radar,
            ChartId::Timeline => ChartKind::Scatter,
        }
    }

    /// Kind used by the type toggle; `None` when the chart has no alternative.
    pub fn alternate_kind(&self) -> Option<ChartKind> {
        match self {
            ChartId::PhaseProgress => Some(ChartKind::Pie),
            ChartId::EpicStatus => Some(ChartKind::Bar),
            ChartId::Velocity => Some(ChartKind::Bar),
            ChartId::Quality => Some(ChartKind::Bar),
            ChartId::Timeline => None,
        }
    }
}

/// The set of surfaces present on the page.
#[derive(Debug, Clone, Default)]
pub struct MountRegistry {
    mounts: BTreeSet<String>,
}

impl MountRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every chart's mount point.
    pub fn all() -> Self {
        Self::from_names(ChartId::ALL.iter().map(|id| id.mount_point()))
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mounts: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, mount: &str) -> bool {
        self.mounts.contains(mount)
    }

    pub fn insert(&mut self, mount: &str) {
        self.mounts.insert(mount.to_string());
    }

    pub fn remove(&mut self, mount: &str) -> bool {
        self.mounts.remove(mount)
    }
}

struct MountedChart {
    kind: ChartKind,
    data: ChartData,
    options: ChartOptions,
    handle: Box<dyn ChartHandle>,
}

pub struct ChartRenderer {
    engine: SharedEngine,
    mounts: MountRegistry,
    charts: HashMap<ChartId, MountedChart>,
}

impl ChartRenderer {
    pub fn new(engine: SharedEngine, mounts: MountRegistry) -> Self {
        Self {
            engine,
            mounts,
            charts: HashMap::new(),
        }
    }

    pub fn mounts_mut(&mut self) -> &mut MountRegistry {
        &mut self.mounts
    }

    /// Create or replace the instance for `id`. Returns false when the mount
    /// point is absent; any previous instance is disposed in both cases.
    pub fn draw(
        &mut self,
        id: ChartId,
        kind: ChartKind,
        data: ChartData,
        options: ChartOptions,
    ) -> bool {
        if let Some(mut prev) = self.charts.remove(&id) {
            prev.handle.dispose();
            log_chart(
                Level::Debug,
                "chart.disposed",
                id.as_str(),
                &[("reason", v_str("replaced"))],
            );
        }
        let mount = id.mount_point();
        if !self.mounts.contains(&mount) {
            log_chart(
                Level::Debug,
                "chart.mount_missing",
                id.as_str(),
                &[("mount", v_str(&mount))],
            );
            return false;
        }
        let handle = self.engine.construct(kind, &mount, &data, &options);
        log_chart(
            Level::Info,
            "chart.drawn",
            id.as_str(),
            &[
                ("kind", v_str(kind.as_str())),
                ("datasets", json!(data.datasets.len())),
            ],
        );
        self.charts.insert(
            id,
            MountedChart {
                kind,
                data,
                options,
                handle,
            },
        );
        true
    }

    /// Swap the bound data of an existing instance and redraw it without
    /// animation. Unknown charts are left alone and `false` is returned.
    pub fn update(&mut self, id: ChartId, data: ChartData) -> bool {
        let Some(chart) = self.charts.get_mut(&id) else {
            return false;
        };
        chart.handle.update_data(&data);
        chart.handle.redraw(RedrawMode::NoAnimation);
        chart.data = data;
        true
    }

    /// Redraw `id` with its alternate kind (or back to the primary one),
    /// keeping the bound data. Returns the new kind.
    pub fn toggle_kind(&mut self, id: ChartId) -> Option<ChartKind> {
        let alternate = id.alternate_kind()?;
        let chart = self.charts.get(&id)?;
        let next = if chart.kind == alternate {
            id.primary_kind()
        } else {
            alternate
        };
        let (data, options) = (chart.data.clone(), chart.options.clone());
        self.draw(id, next, data, options).then_some(next)
    }

    pub fn dispose_all(&mut self) {
        for (id, mut chart) in self.charts.drain() {
            chart.handle.dispose();
            log_chart(
                Level::Debug,
                "chart.disposed",
                id.as_str(),
                &[("reason", v_str("shutdown"))],
            );
        }
    }

    pub fn is_mounted(&self, id: ChartId) -> bool {
        self.charts.contains_key(&id)
    }

    pub fn kind_of(&self, id: ChartId) -> Option<ChartKind> {
        self.charts.get(&id).map(|c| c.kind)
    }

    pub fn data_of(&self, id: ChartId) -> Option<&ChartData> {
        self.charts.get(&id).map(|c| &c.data)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}
