//! Packages a compiled module hierarchy into a single embeddable C
//! translation unit.
//!
//! A top-level host/device module may import submodules produced by
//! other backend targets. [`pack_imports_to_c`] serializes that
//! hierarchy plus each module's binary payload into one contiguous byte
//! stream and wraps it in a C file that embeds the stream under
//! [`DEV_MBLOB_SYM`](mblob_module::DEV_MBLOB_SYM). [`build`] dispatches
//! lowered functions to the backend registered for a target string.

#![deny(bare_trait_objects)]

pub mod ir;
pub mod registry;

mod build;
mod csource;
mod error;
mod import_tree;
mod output;
mod pack;

pub use crate::build::{build, BuildConfig};
pub use crate::csource::emit_dev_mblob;
pub use crate::error::Error;
pub use crate::output::CSource;
pub use crate::pack::{pack_import_blob, pack_imports_to_c};
