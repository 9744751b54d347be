use crate::constants::{MOBILE_UA_MARKERS, OPTIONS_GLOBAL, REDUCED_MOTION_QUERY};
use spark_core::{DeviceProfile, EffectOptions, OptionValue};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

/// Milliseconds on the same clock as `Event.timeStamp` and rAF timestamps.
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

pub fn reduced_motion_query(window: &web::Window) -> Option<web::MediaQueryList> {
    window.match_media(REDUCED_MOTION_QUERY).ok().flatten()
}

pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    reduced_motion_query(window).is_some_and(|q| q.matches())
}

pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (read(window.inner_width()), read(window.inner_height()))
}

pub fn device_profile(window: &web::Window) -> DeviceProfile {
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let (width, height) = viewport_size(window);
    DeviceProfile {
        is_mobile: MOBILE_UA_MARKERS.iter().any(|m| user_agent.contains(m)),
        pixel_ratio: window.device_pixel_ratio(),
        width,
        height,
    }
}

/// Options from `window.sparkOptions`, if the page set any. Values of
/// unsupported JS types are skipped.
pub fn read_options(window: &web::Window) -> EffectOptions {
    let mut options = EffectOptions::new();
    let Ok(raw) = js_sys::Reflect::get(window, &JsValue::from_str(OPTIONS_GLOBAL)) else {
        return options;
    };
    let Some(object) = raw.dyn_ref::<js_sys::Object>() else {
        return options;
    };
    for entry in js_sys::Object::entries(object).iter() {
        let pair = js_sys::Array::from(&entry);
        let Some(key) = pair.get(0).as_string() else {
            continue;
        };
        let value = pair.get(1);
        let value = if let Some(n) = value.as_f64() {
            OptionValue::Number(n)
        } else if let Some(b) = value.as_bool() {
            OptionValue::Bool(b)
        } else if let Some(s) = value.as_string() {
            OptionValue::Text(s)
        } else {
            log::debug!("[config] skipping option `{}` of unsupported type", key);
            continue;
        };
        options.set(&key, value);
    }
    options
}

/// Resolve after `ms` milliseconds via `setTimeout`.
pub async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web::window() {
            _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    _ = JsFuture::from(promise).await;
}
