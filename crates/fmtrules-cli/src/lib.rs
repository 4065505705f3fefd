//! CLI library components for the fmtrules registry front end.

pub mod logging;
pub mod report;
pub mod rules_file;
