//! Report export (CSV and JSON).

pub mod export;
