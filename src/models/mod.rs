pub mod assembled;
pub mod meeting;

pub use assembled::*;
pub use meeting::*;
