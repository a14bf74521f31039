//! Browser entry point: hands control to the shared `ui` crate as soon as
//! the wasm module is instantiated.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    ui::boot::boot();
}
