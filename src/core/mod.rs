//! Core types shared by every dialogue.

mod constants;
mod error;
mod key;
mod status;
mod traits;

pub use constants::*;
pub use error::*;
pub use key::*;
pub use status::*;
pub use traits::*;
