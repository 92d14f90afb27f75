//! Write the reference model export without running the dashboard loop.
//!
//! Usage: EXPORT_PATH=out/project-metrics.json cargo run --bin export_snapshot

use std::path::Path;

use anyhow::{ensure, Result};

use projectdash::config::DashboardConfig;
use projectdash::export::{read_export, write_export};
use projectdash::model::ProjectModel;

fn main() -> Result<()> {
    let cfg = DashboardConfig::from_env();
    let path = Path::new(&cfg.export_path);
    let model = ProjectModel::reference();
    let receipt = write_export(&model, path)?;
    ensure!(
        read_export(path)? == model,
        "export at {} does not read back to the same model",
        path.display()
    );
    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}
