pub mod line_rewriter;

pub use line_rewriter::{read_lines, LineRewriter, PopOutcome, WriteStrategy};
