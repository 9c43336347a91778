//! Terminal output for the operator CLI

pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{header, info, muted, success, summary_row};
pub use table::{TableBuilder, ranking_table, stats_table};
pub use theme::{theme, Theme};
