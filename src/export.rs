//! Export of the current model as a JSON document.
//!
//! The document is exactly the serialized [`ProjectModel`]: parsing it back
//! yields an equal model, and unknown keys are rejected.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::logging::{log, obj, v_str, Domain, Level};
use crate::model::ProjectModel;

pub const DEFAULT_EXPORT_FILE: &str = "project-metrics.json";

pub fn serialize(model: &ProjectModel) -> Result<String> {
    serde_json::to_string_pretty(model).context("serialize project model")
}

pub fn parse(doc: &str) -> Result<ProjectModel> {
    let model: ProjectModel = serde_json::from_str(doc).context("parse project export")?;
    model.validate().context("exported model violates invariants")?;
    Ok(model)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}

pub fn write_export(model: &ProjectModel, path: &Path) -> Result<ExportReceipt> {
    let doc = serialize(model)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    fs::write(path, &doc).with_context(|| format!("write export to {}", path.display()))?;

    let receipt = ExportReceipt {
        path: path.to_path_buf(),
        bytes: doc.len() as u64,
        sha256: hex::encode(Sha256::digest(doc.as_bytes())),
    };
    log(
        Level::Info,
        Domain::Export,
        "export.written",
        obj(&[
            ("path", v_str(&receipt.path.to_string_lossy())),
            ("bytes", json!(receipt.bytes)),
            ("sha256", v_str(&receipt.sha256)),
        ]),
    );
    Ok(receipt)
}

pub fn read_export(path: &Path) -> Result<ProjectModel> {
    let doc = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse(&doc)
}
