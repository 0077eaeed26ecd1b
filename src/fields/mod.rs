//! Expected-field schemas per document type and the intake scaffolding
//! built from them.

mod registry;
mod seeder;

pub use registry::*;
pub use seeder::*;
