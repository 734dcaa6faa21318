pub mod completions;
pub mod repositories;
