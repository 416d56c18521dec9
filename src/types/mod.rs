pub mod span;
pub mod tag;
