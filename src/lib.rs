//! Project dashboard core: a static project model, the per-chart series
//! derived from it, a render adapter over an external charting engine and a
//! periodic driver that simulates live quality telemetry.
//!
//! ```text
//! model ──► derive ──► chart::views ──► ChartRenderer ──► ChartEngine
//!   ▲                                        ▲
//!   └──────────────── refresh ───────────────┘  (every REFRESH_SECS)
//! ```

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod derive;
pub mod export;
pub mod logging;
pub mod model;
pub mod overview;
pub mod portal;
pub mod refresh;
