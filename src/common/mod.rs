pub mod bit_buffer;
pub mod codec;
pub mod error;
pub mod function_modules;
pub mod galois;
pub mod iter;
pub mod mask;
pub mod matrix;
pub mod metadata;

pub(crate) mod version_db;

pub use bit_buffer::*;
pub use codec::*;
pub use error::*;
pub use function_modules::*;
pub use iter::*;
pub use mask::*;
pub use matrix::*;
pub use metadata::*;
