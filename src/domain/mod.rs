//! Domain layer: entities, the terminal decision, and repository traits.

pub mod decision;
pub mod entities;
pub mod repositories;

pub use decision::Decision;
