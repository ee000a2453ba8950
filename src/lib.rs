pub mod core;
pub mod export;
pub mod layout;
pub mod ocr;
pub mod pipeline;

pub use crate::core::error::ExtractError;
pub use crate::core::model::{Heading, HeadingLevel, Outline};
