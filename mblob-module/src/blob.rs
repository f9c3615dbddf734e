use crate::error::Error;
use crate::load;
use crate::module::Module;
use crate::sink::ByteReader;
use log::debug;
use std::sync::Arc;

/// Header of a serialized module blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobHeader {
    /// Import-tree layout: vertex count plus the visit order the payload
    /// modules were written in. The order may hold fewer entries than
    /// `num_vertices`, and entries at or past it.
    Tree { num_vertices: u64, order: Vec<u64> },
    /// Flat layout: the root is host DSO code and only its direct
    /// imports are carried.
    Flat { import_count: u64 },
}

/// A parsed module blob: the header plus every payload module in blob
/// order. In tree layout the first module is the root; re-attaching the
/// remaining modules as its imports is the embedder's concern, since the
/// header carries the visit order but no adjacency.
pub struct LoadedBlob {
    pub header: BlobHeader,
    pub modules: Vec<Arc<dyn Module>>,
}

impl LoadedBlob {
    /// Root module of a tree-layout blob.
    pub fn root(&self) -> Option<&Arc<dyn Module>> {
        match self.header {
            BlobHeader::Tree { .. } => self.modules.first(),
            BlobHeader::Flat { .. } => None,
        }
    }
}

/// Parse a blob produced by the packager back into its modules,
/// dispatching each tagged payload to the loader registered for its type
/// key.
pub fn read_blob(bytes: &[u8]) -> Result<LoadedBlob, Error> {
    let mut reader = ByteReader::new(bytes);
    let num_vertices = reader.read_u64()?;
    let header = if num_vertices != 0 {
        BlobHeader::Tree {
            num_vertices,
            order: reader.read_u64_vec()?,
        }
    } else {
        BlobHeader::Flat {
            import_count: reader.read_u64()?,
        }
    };

    let mut modules = Vec::new();
    while !reader.is_empty() {
        let type_key = reader.read_str()?;
        let load = load::loader_for(&type_key)
            .ok_or_else(|| Error::UnknownTypeKey(type_key.clone()))?;
        debug!("loading module payload with type key `{}`", type_key);
        modules.push(load(&type_key, &mut reader)?);
    }
    Ok(LoadedBlob { header, modules })
}
