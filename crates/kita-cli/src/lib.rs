//! Library components of the `kita-import` command-line tool.

pub mod logging;
pub mod plan;
pub mod report;
pub mod settings;
