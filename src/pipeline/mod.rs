//! Document processing pipeline: intake of uploaded files and the
//! preparer review flow over their scaffolded fields.

pub mod intake;
pub mod review;
