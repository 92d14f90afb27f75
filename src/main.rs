use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use tokio::sync::Mutex;

use projectdash::chart::gate::EngineGate;
use projectdash::chart::recording::RecordingLoader;
use projectdash::chart::ChartRenderer;
use projectdash::config::DashboardConfig;
use projectdash::dashboard::Dashboard;
use projectdash::export::write_export;
use projectdash::logging::{log, obj, v_num, v_str, Domain, Level};
use projectdash::model::ProjectModel;
use projectdash::portal::counter::format_counter;
use projectdash::refresh::spawn_refresh;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = DashboardConfig::from_env();
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("refresh_secs", json!(cfg.refresh_secs)),
            ("amplitude", v_num(cfg.perturb_amplitude)),
            ("mounts", json!(cfg.mounts)),
            ("run_ticks", json!(cfg.run_ticks)),
        ]),
    );

    // Nothing renders until the engine is confirmed loaded.
    let gate = EngineGate::new();
    let ready = gate.subscribe();
    if !gate.load_with(&RecordingLoader::new()).await {
        log(Level::Warn, Domain::System, "engine.unavailable", obj(&[]));
        return Ok(());
    }
    let Some(engine) = ready.wait().await else {
        return Ok(());
    };

    let model = ProjectModel::reference();
    model.validate().context("reference model")?;
    let renderer = ChartRenderer::new(engine, cfg.mount_registry());
    let mut dashboard = Dashboard::new(model, renderer);
    dashboard.initial_draw();

    for card in dashboard.overview().cards() {
        log(
            Level::Info,
            Domain::Portal,
            "metric_card",
            obj(&[
                ("id", v_str(card.id)),
                ("label", v_str(card.label)),
                ("display", v_str(&format_counter(card.target, card.suffix))),
            ]),
        );
    }
    for insight in dashboard.insights() {
        log(
            Level::Info,
            Domain::Portal,
            "insight",
            obj(&[
                ("kind", json!(insight.kind)),
                ("icon", v_str(insight.kind.icon())),
                ("title", v_str(&insight.title)),
                ("action", v_str(&insight.action)),
            ]),
        );
    }

    let dashboard = Arc::new(Mutex::new(dashboard));
    let handle = spawn_refresh(dashboard.clone(), cfg.refresh_config());
    if cfg.run_ticks.is_some() {
        handle.join().await;
    } else {
        tokio::signal::ctrl_c().await.context("wait for ctrl-c")?;
        handle.stop().await;
    }

    let dash = dashboard.lock().await;
    let receipt = write_export(dash.model(), Path::new(&cfg.export_path))?;
    log(
        Level::Info,
        Domain::System,
        "shutdown",
        obj(&[
            ("export", v_str(&receipt.path.to_string_lossy())),
            ("bytes", json!(receipt.bytes)),
            ("sha256", v_str(&receipt.sha256)),
        ]),
    );
    Ok(())
}
