pub mod completions;
pub mod send;
