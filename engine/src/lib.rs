// Engine library root
// Loading, statistics, chart data and the interactive menu behind the `pnate` binary.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
