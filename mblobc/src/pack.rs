use crate::csource::emit_dev_mblob;
use crate::error::Error;
use crate::import_tree::ImportTree;
use log::debug;
use mblob_module::{is_dso_module, ByteSink, Module, DEV_MBLOB_SYM};

// Two hierarchy shapes are accepted:
//
//   wrapper module
//       llvm module
//           cuda module
//       opencl module
//
//   llvm module
//       cuda module
//       opencl module
//
// The first serializes with an import-tree header, the second flat.

/// Serialize `module` and its imports into a single blob: the import
/// tree header followed by one tagged payload per carried module.
pub fn pack_import_blob(module: &dyn Module) -> Result<Vec<u8>, Error> {
    let mut sink = ByteSink::new();

    let mut num_vertices = 1 + module.imports().len() as u64;
    for im in module.imports() {
        num_vertices += im.imports().len() as u64;
    }
    let mut tree = ImportTree::new(num_vertices);

    if !is_dso_module(module.type_key()) {
        // vertex 1 is the root; 0 stays the DSO sentinel
        tree.set_root(1);
        let mut mod_index = 1u64;
        let mut next_mod_index = 2u64;
        for im in module.imports() {
            if is_dso_module(im.type_key()) {
                tree.add_edge(mod_index, 0);
                mod_index += 1;
            } else {
                tree.add_edge(mod_index, next_mod_index);
                mod_index += 1;
                next_mod_index += 1;
            }
            for subm in im.imports() {
                if !subm.imports().is_empty() {
                    return Err(Error::HierarchyTooDeep(subm.type_key().to_string()));
                }
                // sub-imports are classified by their parent's type key
                if is_dso_module(im.type_key()) {
                    tree.add_edge(0, mod_index);
                    mod_index += 1;
                } else {
                    tree.add_edge(mod_index, next_mod_index);
                    mod_index += 1;
                    next_mod_index += 1;
                }
            }
        }
    }

    if tree.root() != 0 {
        let module_order = tree.bfs(tree.root());
        debug!(
            "packing import tree: {} vertices, visit order {:?}",
            tree.num_vertices(),
            module_order
        );
        sink.write_u64(tree.num_vertices())?;
        sink.write_u64_vec(&module_order)?;
    } else {
        // no import tree; write the sentinel and the flat import count
        debug!("packing {} imports flat", module.imports().len());
        sink.write_u64(0)?;
        sink.write_u64(module.imports().len() as u64)?;
    }

    if tree.root() != 0 {
        sink.write_str(module.type_key())?;
        module.save_to_binary(&mut sink)?;
        for im in module.imports() {
            // only "llvm" payloads live in the host DSO; a "c" child is
            // shaped as DSO above but still carries its payload here
            if im.type_key() != "llvm" {
                sink.write_str(im.type_key())?;
                im.save_to_binary(&mut sink)?;
            }
            for subm in im.imports() {
                if subm.type_key() != "llvm" {
                    sink.write_str(subm.type_key())?;
                    subm.save_to_binary(&mut sink)?;
                }
            }
        }
    } else {
        for im in module.imports() {
            if !im.imports().is_empty() {
                return Err(Error::HierarchyTooDeep(im.type_key().to_string()));
            }
            sink.write_str(im.type_key())?;
            im.save_to_binary(&mut sink)?;
        }
    }

    Ok(sink.into_bytes())
}

/// Pack `module` and wrap the blob in a C translation unit embedding it
/// under [`DEV_MBLOB_SYM`].
pub fn pack_imports_to_c(module: &dyn Module, system_lib: bool) -> Result<String, Error> {
    let blob = pack_import_blob(module)?;
    Ok(emit_dev_mblob(&blob, DEV_MBLOB_SYM, system_lib))
}
