pub mod formatter;

pub use formatter::{
    format_deletion_summary, format_dependents, format_points, format_standings_table,
    format_tsv, should_use_colors,
};
