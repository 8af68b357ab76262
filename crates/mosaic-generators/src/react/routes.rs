//! Initial route scaffolding for React shells.
//!
//! Patches the generated application shell instead of shipping a second
//! template: the router import goes after the imports, the routes block
//! goes just inside the outermost JSX closing tag, and everything else in
//! the file stays byte-identical.

use tracing::warn;

use mosaic_core::application::patch::{
    add_import, apply_string_changes, insert_before_outermost_closing,
};
use mosaic_core::application::tree::FsTree;
use mosaic_core::error::MosaicResult;

const ROUTER_IMPORT: &str = "import { Route, Routes, Link } from 'react-router-dom';";

const INITIAL_ROUTES: &str = "\
      {/* START: routes */}\n\
      {/* These routes and navigation have been generated for you */}\n\
      {/* Feel free to move and update them to fit your needs */}\n\
      <br />\n\
      <hr />\n\
      <br />\n\
      <div role=\"navigation\">\n\
        <ul>\n\
          <li><Link to=\"/\">Home</Link></li>\n\
          <li><Link to=\"/page-2\">Page 2</Link></li>\n\
        </ul>\n\
      </div>\n\
      <Routes>\n\
        <Route path=\"/\" element={<div>This is the generated root route.</div>} />\n\
        <Route path=\"/page-2\" element={<div>This is page 2.</div>} />\n\
      </Routes>\n\
      {/* END: routes */}\n    ";

/// Insert the starter routes into the shell at `path`.
///
/// Skips (with a warning) when the file has no JSX root to anchor on;
/// the shell may have been rewritten by hand before routing was added.
pub fn add_initial_routes(tree: &mut FsTree, path: &str) -> MosaicResult<()> {
    let source = tree.read(path)?;
    let inserts = insert_before_outermost_closing(&source, INITIAL_ROUTES);
    if inserts.is_empty() {
        warn!(path, "could not find JSX elements; skipping route insertion");
        return Ok(());
    }

    let mut changes = add_import(&source, ROUTER_IMPORT);
    changes.extend(inserts);
    let updated = apply_string_changes(&source, &changes)?;
    tree.write(path, updated);
    Ok(())
}
