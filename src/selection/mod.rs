pub mod lines;
pub mod mode;
pub mod select;

pub use lines::{join_lines, split_lines};
pub use mode::{PopMode, PopSpec};
pub use select::{extracted_indices, select, Selection};
