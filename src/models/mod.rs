pub mod enums;

mod client;
mod document;
mod extracted_field;
mod message;
mod task;
mod tax_info;

pub use client::*;
pub use document::*;
pub use extracted_field::*;
pub use message::*;
pub use task::*;
pub use tax_info::*;
