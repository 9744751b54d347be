//! DOM event wiring. Every registration comes back as a [`Subscription`]
//! that removes the listener (or clears the timer) when released.

pub mod keyboard;
pub mod lifecycle;
pub mod pointer;

use spark_core::Subscription;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Add `handler` for `kind` events on `target`. `E` is the concrete event
/// type the caller expects for this event kind.
pub fn listen<E>(
    target: &web::EventTarget,
    kind: &'static str,
    mut handler: impl FnMut(E) + 'static,
) -> Option<Subscription>
where
    E: JsCast,
{
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        handler(ev.unchecked_into::<E>());
    }) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        log::warn!("[events] could not listen for {}: {:?}", kind, e);
        return None;
    }
    let target = target.clone();
    Some(Subscription::new(kind, move || {
        _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    }))
}

/// Run `tick` every `period_ms` until released.
pub fn every(period_ms: i32, tick: impl FnMut() + 'static) -> Option<Subscription> {
    let window = web::window()?;
    let closure = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
    let id = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms,
        )
        .map_err(|e| log::warn!("[events] setInterval failed: {:?}", e))
        .ok()?;
    Some(Subscription::new("interval", move || {
        window.clear_interval_with_handle(id);
        drop(closure);
    }))
}

/// Run `fire` once after `delay_ms`, unless released first.
pub fn after(delay_ms: i32, fire: impl FnOnce() + 'static) -> Option<Subscription> {
    let window = web::window()?;
    let closure = Closure::once(fire);
    let id = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms,
        )
        .map_err(|e| log::warn!("[events] setTimeout failed: {:?}", e))
        .ok()?;
    Some(Subscription::new("timeout", move || {
        window.clear_timeout_with_handle(id);
        drop(closure);
    }))
}
