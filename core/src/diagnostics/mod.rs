pub mod line_col;
pub mod source_map;

pub use line_col::LineCol;
pub use source_map::{SourceMap, SourcePos};
