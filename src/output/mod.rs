pub mod export;
pub mod formatter;

pub use export::{export_filename, to_csv, write_export};
pub use formatter::{
    format_facets, format_json, format_millions, format_platform_top, format_ranking_table, format_summary,
    format_views, should_use_colors,
};
