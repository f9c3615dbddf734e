//! Common types for packaged device module blobs.
//!
//! These types are shared between `mblobc`, which serializes a compiled
//! module hierarchy into a single byte stream embedded in generated C
//! source, and embedders that parse the stream back into modules at load
//! time.

#![deny(bare_trait_objects)]

pub mod error;
pub mod load;
pub mod mock;

mod blob;
mod module;
mod sink;

pub use crate::blob::{read_blob, BlobHeader, LoadedBlob};
pub use crate::error::Error;
pub use crate::load::{loader_for, register_loader, LoadFn};
pub use crate::mock::{MockModule, MockModuleBuilder};
pub use crate::module::{is_dso_module, Module, DEV_MBLOB_SYM};
pub use crate::sink::{ByteReader, ByteSink};
