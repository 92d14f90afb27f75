//! Ready signal for the charting engine. Nothing is drawn until an engine
//! has been published through the gate.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::watch;

use crate::logging::{log, obj, v_str, Domain, Level};

use super::engine::SharedEngine;

#[async_trait]
pub trait EngineLoader: Send + Sync {
    async fn load(&self) -> Result<SharedEngine>;
}

pub struct EngineGate {
    tx: watch::Sender<Option<SharedEngine>>,
}

impl Default for EngineGate {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineGate {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn is_ready(&self) -> bool {
        self.tx.borrow().is_some()
    }

    pub fn publish(&self, engine: SharedEngine) {
        self.tx.send_replace(Some(engine));
        log(Level::Info, Domain::Chart, "engine.ready", obj(&[]));
    }

    /// Run `loader` and publish its engine. A failed load leaves the gate
    /// closed; charts then never render.
    pub async fn load_with(&self, loader: &dyn EngineLoader) -> bool {
        match loader.load().await {
            Ok(engine) => {
                self.publish(engine);
                true
            }
            Err(err) => {
                log(
                    Level::Warn,
                    Domain::Chart,
                    "engine.load_failed",
                    obj(&[("error", v_str(&err.to_string()))]),
                );
                false
            }
        }
    }

    pub fn subscribe(&self) -> EngineReady {
        EngineReady {
            rx: self.tx.subscribe(),
        }
    }
}

pub struct EngineReady {
    rx: watch::Receiver<Option<SharedEngine>>,
}

impl EngineReady {
    /// Resolves once an engine is published, or `None` if the gate is
    /// dropped first.
    pub async fn wait(mut self) -> Option<SharedEngine> {
        let ready = self.rx.wait_for(|engine| engine.is_some()).await.ok()?;
        (*ready).clone()
    }
}
