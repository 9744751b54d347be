use super::listen;
use crate::app::Engine;
use crate::constants::RIPPLE_HUE;
use glam::Vec2;
use spark_core::{EffectScheduler, Ripple, Subscription, TouchPoint};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys as web;

type Scheduler = EffectScheduler<crate::render::CanvasPainter>;

fn touch_points(list: &web::TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| TouchPoint {
            id: t.identifier(),
            x: t.client_x() as f32,
            y: t.client_y() as f32,
        })
        .collect()
}

/// Run `f` against the engine if it is still alive and not already borrowed.
fn with_engine(engine: &Weak<RefCell<Scheduler>>, f: impl FnOnce(&mut Scheduler)) {
    if let Some(engine) = engine.upgrade() {
        if let Ok(mut scheduler) = engine.try_borrow_mut() {
            f(&mut scheduler);
        }
    }
}

fn tap_ripple(scheduler: &mut Scheduler, x: f32, y: f32) {
    if !scheduler.spawn_effect(Box::new(Ripple::new(Vec2::new(x, y), RIPPLE_HUE))) {
        log::debug!("[pointer] ripple dropped at effect cap");
    }
}

/// Mouse and touch input on the whole document, forwarded to the scheduler.
pub fn wire(document: &web::Document, engine: &Engine) -> Vec<Subscription> {
    let target: &web::EventTarget = document.as_ref();
    let weak = Rc::downgrade(engine);
    let mut subs = Vec::new();

    let e = weak.clone();
    subs.extend(listen(target, "mousemove", move |ev: web::MouseEvent| {
        with_engine(&e, |s| {
            s.pointer_moved(ev.client_x() as f32, ev.client_y() as f32, ev.time_stamp())
        });
    }));

    let e = weak.clone();
    subs.extend(listen(target, "mouseleave", move |ev: web::MouseEvent| {
        with_engine(&e, |s| s.pointer_left(ev.time_stamp()));
    }));

    let e = weak.clone();
    subs.extend(listen(target, "mousedown", move |ev: web::MouseEvent| {
        with_engine(&e, |s| tap_ripple(s, ev.client_x() as f32, ev.client_y() as f32));
    }));

    let e = weak.clone();
    subs.extend(listen(target, "touchstart", move |ev: web::TouchEvent| {
        let touches = touch_points(&ev.touches());
        with_engine(&e, |s| {
            s.touch_start(&touches, ev.time_stamp());
            if let Some(first) = touches.first() {
                tap_ripple(s, first.x, first.y);
            }
        });
    }));

    let e = weak.clone();
    subs.extend(listen(target, "touchmove", move |ev: web::TouchEvent| {
        let touches = touch_points(&ev.touches());
        with_engine(&e, |s| s.touch_move(&touches, ev.time_stamp()));
    }));

    for kind in ["touchend", "touchcancel"] {
        let e = weak.clone();
        subs.extend(listen(target, kind, move |ev: web::TouchEvent| {
            let remaining = touch_points(&ev.touches());
            with_engine(&e, |s| s.touch_end(&remaining, ev.time_stamp()));
        }));
    }

    log::debug!("[pointer] {} listeners wired", subs.len());
    subs
}
