//! shoplab - synthetic shop data and analytical query demo
//!
//! Library side of the `shoplab` binary: the seeded data generator, the
//! monthly revenue chart and the demo report files. The store itself lives
//! in `shoplab_db`.

pub mod chart;
pub mod report;
pub mod synth;

pub use report::{DemoArtifacts, CHART_FILE_NAME, PLANS_FILE_NAME};
pub use synth::Synth;
