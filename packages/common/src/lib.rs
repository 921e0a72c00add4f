pub mod names;
pub mod visitor;

pub use names::*;
pub use visitor::*;
