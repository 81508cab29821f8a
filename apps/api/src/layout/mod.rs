// Text measurement for the PDF backend: Helvetica width tables and greedy line breaking.

pub mod font_metrics;
pub mod wrap;

pub use font_metrics::{get_metrics, FontFace};
pub use wrap::wrap_lines;
