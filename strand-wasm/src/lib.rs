use wasm_bindgen::prelude::*;

mod api;
mod error;
mod interop;

use strand::interaction::Editor;
use strand::model::{ImageInfo, PathConfig};
use strand::Path;

/// One editable annotation path, exposed to the browser.
#[wasm_bindgen]
pub struct VectorPath {
    pub(crate) inner: Editor,
}

impl VectorPath {
    pub fn rs_new(config: PathConfig, image: ImageInfo) -> VectorPath {
        VectorPath { inner: Editor::new(Path::new(config, image)) }
    }
}
