pub mod element;
pub mod name;
pub mod project;

pub use element::*;
pub use name::*;
pub use project::*;
