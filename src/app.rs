use crate::constants::{HELP_FADE_MS, RESET_DELAY_MS, STATS_REFRESH_MS};
use crate::dom;
use crate::events;
use crate::frame::FrameLoop;
use crate::overlay::{HelpText, StatsPanel};
use crate::render::CanvasPainter;
use crate::shortcuts;
use anyhow::anyhow;
use spark_core::{EffectScheduler, EngineSettings, EngineState, Environment};
use std::cell::RefCell;
use std::rc::Rc;

pub type Engine = Rc<RefCell<EffectScheduler<CanvasPainter>>>;

/// Holds the running app, if any. Event handlers keep a clone so they can
/// reach it; resetting swaps the contents.
pub type AppSlot = Rc<RefCell<Option<App>>>;

pub struct App {
    engine: Engine,
    frames: FrameLoop,
    stats: Option<StatsPanel>,
    help: Option<HelpText>,
    stopped_for_motion: bool,
}

impl App {
    pub fn pause(&self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            if engine.pause() {
                self.frames.cancel();
            }
        }
    }

    pub fn resume(&self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            if engine.resume(dom::now_ms()) {
                self.frames.arm();
            }
        }
    }

    pub fn toggle_running(&mut self) {
        let Ok(mut engine) = self.engine.try_borrow_mut() else {
            return;
        };
        match engine.state() {
            EngineState::Running | EngineState::Paused => {
                engine.stop();
                self.frames.cancel();
            }
            EngineState::Idle => {
                if engine.start(dom::now_ms()) {
                    self.frames.arm();
                }
            }
            EngineState::Destroyed => {}
        }
    }

    pub fn toggle_stats(&mut self) {
        if let Some(panel) = self.stats.as_mut() {
            let shown = panel.toggle();
            log::debug!("[app] stats panel {}", if shown { "shown" } else { "hidden" });
        }
        self.refresh_stats();
    }

    pub fn refresh_stats(&self) {
        let (Some(panel), Ok(engine)) = (self.stats.as_ref(), self.engine.try_borrow()) else {
            return;
        };
        panel.update(&engine.stats(), &engine.field_stats(), &engine.motion_stats());
    }

    pub fn resize(&self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            if let Some(painter) = engine.surface_mut() {
                painter.resize();
            }
        }
    }

    /// Follow a runtime change of the reduced-motion preference. An effect
    /// stopped because of it comes back once the preference clears.
    pub fn sync_reduced_motion(&mut self, active: bool) {
        let Ok(mut engine) = self.engine.try_borrow_mut() else {
            return;
        };
        if engine.set_reduced_motion(active) {
            self.frames.cancel();
            self.stopped_for_motion = true;
        } else if !active && self.stopped_for_motion {
            self.stopped_for_motion = false;
            if engine.start(dom::now_ms()) {
                self.frames.arm();
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.frames.cancel();
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.destroy();
        }
    }
}

/// Build the effect and put it into `slot`. Returns `Ok(false)` when the
/// engine declined to run (reduced motion, no canvas).
pub fn boot(slot: &AppSlot) -> anyhow::Result<bool> {
    let (window, document) = dom::window_document().ok_or_else(|| anyhow!("no window/document"))?;

    let options = dom::read_options(&window);
    let settings = EngineSettings::from_options(&options);
    let mut scheduler = EffectScheduler::new(settings, rand::random());
    let env = Environment {
        reduced_motion: dom::prefers_reduced_motion(&window),
        device: dom::device_profile(&window),
    };
    if !scheduler.initialize(&env, dom::now_ms(), || CanvasPainter::attach(&document)) {
        log::info!("[app] effect not started");
        return Ok(false);
    }

    let engine: Engine = Rc::new(RefCell::new(scheduler));
    let frames = {
        let engine = Rc::downgrade(&engine);
        FrameLoop::new(move |timestamp| {
            let Some(engine) = engine.upgrade() else {
                return false;
            };
            let Ok(mut scheduler) = engine.try_borrow_mut() else {
                return true;
            };
            scheduler.tick(timestamp)
        })
    };

    let mut subscriptions = Vec::new();
    subscriptions.extend(events::pointer::wire(&document, &engine));
    subscriptions.extend(events::keyboard::wire(&document, slot));
    subscriptions.extend(events::lifecycle::wire(&window, &document, slot));

    let s = slot.clone();
    subscriptions.extend(events::every(STATS_REFRESH_MS, move || {
        if let Ok(guard) = s.try_borrow() {
            if let Some(app) = guard.as_ref() {
                app.refresh_stats();
            }
        }
    }));

    let help = HelpText::show(&document, &shortcuts::help_text());
    let s = slot.clone();
    subscriptions.extend(events::after(HELP_FADE_MS, move || {
        if let Ok(guard) = s.try_borrow() {
            if let Some(help) = guard.as_ref().and_then(|app| app.help.as_ref()) {
                help.fade_out();
            }
        }
    }));

    let started = {
        let mut scheduler = engine.borrow_mut();
        scheduler.hold(subscriptions);
        scheduler.start(dom::now_ms())
    };
    if started {
        frames.arm();
    }

    let app = App {
        engine,
        frames,
        stats: StatsPanel::new(&document),
        help,
        stopped_for_motion: false,
    };
    let previous = slot.borrow_mut().replace(app);
    drop(previous);
    log::info!("[app] booted");
    Ok(started)
}

/// Tear the current app down and boot a fresh one after a short pause.
pub async fn reset(slot: AppSlot) {
    let previous = slot.borrow_mut().take();
    drop(previous);
    dom::sleep_ms(RESET_DELAY_MS).await;
    if let Err(e) = boot(&slot) {
        log::error!("[app] reset failed: {:?}", e);
    }
}
