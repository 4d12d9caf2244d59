pub mod export;
pub mod format;
pub mod table;

pub use export::ExportDocument;
pub use format::{display_number, escape_cell, export_number, unescape_cell, NOT_AVAILABLE};
pub use table::{format_table, should_use_colors};
