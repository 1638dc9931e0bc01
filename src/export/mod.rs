//! Export formats for conversion results.

pub mod nbt;
pub mod png;
pub mod schem;

pub use png::{render_preview, write_preview};
pub use schem::{write_schem, write_schem_to_path};
