use super::listen;
use crate::app::{self, AppSlot};
use crate::shortcuts::{shortcut_for, Shortcut};
use spark_core::Subscription;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub fn handle_keydown(ev: &web::KeyboardEvent, slot: &AppSlot) {
    let Some(shortcut) = shortcut_for(&ev.key(), ev.ctrl_key() || ev.meta_key()) else {
        return;
    };
    ev.prevent_default();
    log::info!("[keys] {}", shortcut.label());

    match shortcut {
        Shortcut::Reset => {
            // Resetting drops this listener, so it runs outside the handler.
            spawn_local(app::reset(slot.clone()));
        }
        Shortcut::ToggleStats => {
            if let Ok(mut guard) = slot.try_borrow_mut() {
                if let Some(app) = guard.as_mut() {
                    app.toggle_stats();
                }
            }
        }
        Shortcut::ToggleEffect => {
            if let Ok(mut guard) = slot.try_borrow_mut() {
                if let Some(app) = guard.as_mut() {
                    app.toggle_running();
                }
            }
        }
    }
}

pub fn wire(document: &web::Document, slot: &AppSlot) -> Option<Subscription> {
    let slot = slot.clone();
    listen(document.as_ref(), "keydown", move |ev: web::KeyboardEvent| {
        handle_keydown(&ev, &slot);
    })
}
