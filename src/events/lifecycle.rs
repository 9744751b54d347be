use super::listen;
use crate::app::AppSlot;
use crate::dom;
use spark_core::Subscription;
use web_sys as web;

/// Window resize, tab visibility and the reduced-motion media query.
pub fn wire(window: &web::Window, document: &web::Document, slot: &AppSlot) -> Vec<Subscription> {
    let mut subs = Vec::new();

    let s = slot.clone();
    subs.extend(listen(window.as_ref(), "resize", move |_: web::Event| {
        if let Ok(guard) = s.try_borrow() {
            if let Some(app) = guard.as_ref() {
                app.resize();
            }
        }
    }));

    let s = slot.clone();
    let doc = document.clone();
    subs.extend(listen(document.as_ref(), "visibilitychange", move |_: web::Event| {
        let Ok(guard) = s.try_borrow() else {
            return;
        };
        let Some(app) = guard.as_ref() else {
            return;
        };
        if doc.hidden() {
            app.pause();
        } else {
            app.resume();
        }
    }));

    if let Some(query) = dom::reduced_motion_query(window) {
        let s = slot.clone();
        let q = query.clone();
        subs.extend(listen(query.as_ref(), "change", move |_: web::Event| {
            if let Ok(mut guard) = s.try_borrow_mut() {
                if let Some(app) = guard.as_mut() {
                    app.sync_reduced_motion(q.matches());
                }
            }
        }));
    }

    subs
}
