pub mod histogram;
mod pixel_buffer;
pub mod transform;
mod types;

use std::path::Path;

pub use histogram::Histogram;
pub use pixel_buffer::*;
pub use types::*;

pub trait Persist {
    fn save_as(&self, _: &Path) -> crate::Result<()>;
}
