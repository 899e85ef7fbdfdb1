// Page Layout Engine: card grid geometry, title fitting, drawing instructions.
// Pure synchronous computation; callers run it inside tokio::task::spawn_blocking.

pub mod engine;
pub mod font_metrics;
pub mod instructions;
pub mod sheet;
pub mod title_fit;
pub mod units;
pub mod winansi;
