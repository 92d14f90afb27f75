//! In-process engine that records every call it receives.
//!
//! The binaries use it as the rendering sink and the tests assert against
//! its call log.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use crate::logging::{log_chart, v_str, Level};

use super::engine::{
    ChartData, ChartEngine, ChartHandle, ChartKind, ChartOptions, RedrawMode, SharedEngine,
};
use super::gate::EngineLoader;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Construct { instance: u64, kind: ChartKind, mount: String },
    UpdateData { instance: u64, data: ChartData },
    Redraw { instance: u64, mode: RedrawMode },
    Dispose { instance: u64 },
}

type CallLog = Arc<Mutex<Vec<EngineCall>>>;

fn record(log: &CallLog, call: EngineCall) {
    if let Ok(mut calls) = log.lock() {
        calls.push(call);
    }
}

#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: CallLog,
    next_instance: AtomicU64,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn constructed(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Construct { .. }))
    }

    pub fn disposed(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Dispose { .. }))
    }

    pub fn live_instances(&self) -> usize {
        self.constructed().saturating_sub(self.disposed())
    }

    /// Data most recently pushed to instances bound to `mount`.
    pub fn last_update_for(&self, mount: &str) -> Option<ChartData> {
        let calls = self.calls();
        let instances: Vec<u64> = calls
            .iter()
            .filter_map(|c| match c {
                EngineCall::Construct { instance, mount: m, .. } if m == mount => Some(*instance),
                _ => None,
            })
            .collect();
        calls.into_iter().rev().find_map(|c| match c {
            EngineCall::UpdateData { instance, data } if instances.contains(&instance) => {
                Some(data)
            }
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&EngineCall) -> bool) -> usize {
        self.calls.lock().map(|c| c.iter().filter(|x| pred(x)).count()).unwrap_or(0)
    }
}

impl ChartEngine for RecordingEngine {
    fn construct(
        &self,
        kind: ChartKind,
        mount: &str,
        data: &ChartData,
        _options: &ChartOptions,
    ) -> Box<dyn ChartHandle> {
        let instance = self.next_instance.fetch_add(1, Ordering::SeqCst) + 1;
        record(
            &self.calls,
            EngineCall::Construct {
                instance,
                kind,
                mount: mount.to_string(),
            },
        );
        log_chart(
            Level::Trace,
            "engine.construct",
            mount,
            &[
                ("instance", json!(instance)),
                ("kind", v_str(kind.as_str())),
                ("data", json!(data)),
            ],
        );
        Box::new(RecordingHandle {
            instance,
            calls: self.calls.clone(),
            disposed: false,
        })
    }
}

struct RecordingHandle {
    instance: u64,
    calls: CallLog,
    disposed: bool,
}

impl ChartHandle for RecordingHandle {
    fn update_data(&mut self, data: &ChartData) {
        record(
            &self.calls,
            EngineCall::UpdateData {
                instance: self.instance,
                data: data.clone(),
            },
        );
    }

    fn redraw(&mut self, mode: RedrawMode) {
        record(&self.calls, EngineCall::Redraw { instance: self.instance, mode });
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        record(&self.calls, EngineCall::Dispose { instance: self.instance });
    }
}

/// Loader that hands out a fresh [`RecordingEngine`], keeping a reference
/// for inspection.
#[derive(Default)]
pub struct RecordingLoader {
    engine: Arc<RecordingEngine>,
}

impl RecordingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(&self) -> Arc<RecordingEngine> {
        self.engine.clone()
    }
}

#[async_trait]
impl EngineLoader for RecordingLoader {
    async fn load(&self) -> Result<SharedEngine> {
        let engine: SharedEngine = self.engine.clone();
        Ok(engine)
    }
}
