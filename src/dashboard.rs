//! The dashboard context: one model plus the renderer drawing it.
//!
//! Whoever owns the render loop owns a `Dashboard`; there is no global
//! instance. Quality perturbation and the radar redraw happen inside a
//! single `&mut self` call so no reader sees a half-updated vector.

use anyhow::Result;
use rand::Rng;
use serde_json::json;

use crate::chart::views::{data_for, view_for};
use crate::chart::{ChartId, ChartRenderer};
use crate::derive::quality_radar_vector;
use crate::export;
use crate::logging::{log, obj, Domain, Level};
use crate::model::ProjectModel;
use crate::overview::{insights, Insight, Overview};
use crate::refresh::Perturbation;

pub struct Dashboard {
    model: ProjectModel,
    renderer: ChartRenderer,
}

impl Dashboard {
    pub fn new(model: ProjectModel, renderer: ChartRenderer) -> Self {
        Self { model, renderer }
    }

    pub fn model(&self) -> &ProjectModel {
        &self.model
    }

    pub fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut ChartRenderer {
        &mut self.renderer
    }

    /// Draw every chart whose mount point exists. Returns how many were drawn.
    pub fn initial_draw(&mut self) -> usize {
        let mut drawn = 0;
        for id in ChartId::ALL {
            let view = view_for(id, &self.model);
            if self.renderer.draw(id, view.kind, view.data, view.options) {
                drawn += 1;
            }
        }
        log(
            Level::Info,
            Domain::System,
            "dashboard.drawn",
            obj(&[("charts", json!(drawn))]),
        );
        drawn
    }

    /// Perturb the quality scalars and push the new radar vector to the
    /// `quality` chart (if mounted).
    pub fn refresh_quality<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        perturbation: &Perturbation,
    ) -> [f64; 5] {
        perturbation.apply(self.model.quality_mut(), rng);
        self.renderer
            .update(ChartId::Quality, data_for(ChartId::Quality, &self.model));
        quality_radar_vector(self.model.quality())
    }

    /// Re-derive and push data to every mounted chart.
    pub fn refresh_all(&mut self) -> usize {
        ChartId::ALL
            .into_iter()
            .filter(|id| self.renderer.update(*id, data_for(*id, &self.model)))
            .count()
    }

    pub fn toggle_chart(&mut self, id: ChartId) {
        if let Some(kind) = self.renderer.toggle_kind(id) {
            log(
                Level::Info,
                Domain::Chart,
                "chart.toggled",
                obj(&[("chart_id", json!(id.as_str())), ("kind", json!(kind.as_str()))]),
            );
        }
    }

    /// Serialize the current in-memory model.
    pub fn export(&self) -> Result<String> {
        export::serialize(&self.model)
    }

    pub fn overview(&self) -> Overview {
        Overview::from_model(&self.model)
    }

    pub fn insights(&self) -> Vec<Insight> {
        insights(&self.model)
    }

    pub fn shutdown(&mut self) {
        self.renderer.dispose_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::engine::{ChartKind, DatasetValues, SharedEngine};
    use crate::chart::recording::RecordingEngine;
    use crate::chart::MountRegistry;
    use rand::{rngs::StdRng, SeedableRng};
    use std::sync::Arc;

    fn dashboard(mounts: MountRegistry) -> (Arc<RecordingEngine>, Dashboard) {
        let engine = Arc::new(RecordingEngine::new());
        let shared: SharedEngine = engine.clone();
        let d = Dashboard::new(ProjectModel::reference(), ChartRenderer::new(shared, mounts));
        (engine, d)
    }

    #[test]
    fn test_initial_draw_all_mounts() {
        let (engine, mut d) = dashboard(MountRegistry::all());
        assert_eq!(d.initial_draw(), 5);
        assert_eq!(engine.live_instances(), 5);
    }

    #[test]
    fn test_initial_draw_skips_missing_surfaces() {
        let (_engine, mut d) = dashboard(MountRegistry::from_names(["velocity-chart", "timeline-chart"]));
        assert_eq!(d.initial_draw(), 2);
        assert!(!d.renderer().is_mounted(ChartId::Quality));
        // no surface, no chart, no error
        let mut rng = StdRng::seed_from_u64(1);
        let v = d.refresh_quality(&mut rng, &Perturbation::default());
        assert_eq!(v[4], 85.0);
    }

    #[test]
    fn test_refresh_quality_pushes_vector() {
        let (engine, mut d) = dashboard(MountRegistry::all());
        d.initial_draw();
        let mut rng = StdRng::seed_from_u64(7);
        let v = d.refresh_quality(&mut rng, &Perturbation::default());
        let pushed = engine.last_update_for("quality-chart").unwrap();
        assert_eq!(pushed.datasets[0].values, DatasetValues::Numbers(v.to_vec()));
        assert_eq!(engine.constructed(), 5);
    }

    #[test]
    fn test_refresh_all_updates_mounted_only() {
        let (_engine, mut d) = dashboard(MountRegistry::from_names(["quality-chart"]));
        d.initial_draw();
        assert_eq!(d.refresh_all(), 1);
    }

    #[test]
    fn test_toggle_chart() {
        let (_engine, mut d) = dashboard(MountRegistry::all());
        d.initial_draw();
        d.toggle_chart(ChartId::Velocity);
        assert_eq!(d.renderer().kind_of(ChartId::Velocity), Some(ChartKind::Bar));
    }

    #[test]
    fn test_shutdown_disposes_everything() {
        let (engine, mut d) = dashboard(MountRegistry::all());
        d.initial_draw();
        d.shutdown();
        assert_eq!(engine.live_instances(), 0);
        assert!(d.renderer().is_empty());
    }
}
