#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod app;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod shortcuts;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("spark-web starting");

    let slot: app::AppSlot = Rc::new(RefCell::new(None));
    spawn_local(async move {
        dom::sleep_ms(constants::BOOT_DELAY_MS).await;
        match app::boot(&slot) {
            Ok(true) => {}
            Ok(false) => log::info!("[app] running without the effect"),
            Err(e) => log::error!("init error: {:?}", e),
        }
    });
    Ok(())
}
