//! DOM input wiring: offset and bounds buttons, keyboard mirrors, and the
//! interval timer that auto-advances the Z rotation. Every handler mutates
//! through the shared synchronizer, which pushes immediately.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Document, KeyboardEvent};

use super::render::{GlSink, SharedSync};
use crate::uniforms::{Adjust, Axis, Synchronizer, OFFSET_STEP};

/// Cadence of the rotation timer. Deliberately its own clock rather than a
/// hook in the render loop, so the turn rate does not drift with the frame
/// rate.
const ROTATION_TICK_MS: i32 = 16;

fn on_click<F>(document: &Document, id: &str, sync: &SharedSync, handler: F) -> Result<(), JsValue>
where
    F: Fn(&mut Synchronizer<GlSink>) + 'static,
{
    let target = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("button #{id} not found")))?;
    let sync = sync.clone();
    let closure = Closure::wrap(Box::new(move || {
        handler(&mut sync.borrow_mut());
    }) as Box<dyn FnMut()>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Attaches all click/keyboard handlers and starts the rotation timer.
pub fn install(document: &Document, sync: &SharedSync) -> Result<(), JsValue> {
    on_click(document, "leftBtn", sync, |s| {
        s.nudge_offset(-OFFSET_STEP, 0.0, 0.0)
    })?;
    on_click(document, "rightBtn", sync, |s| {
        s.nudge_offset(OFFSET_STEP, 0.0, 0.0)
    })?;
    on_click(document, "topBtn", sync, |s| {
        s.nudge_offset(0.0, OFFSET_STEP, 0.0)
    })?;
    on_click(document, "bottomBtn", sync, |s| {
        s.nudge_offset(0.0, -OFFSET_STEP, 0.0)
    })?;
    on_click(document, "resetBtn", sync, |s| s.reset_offset())?;

    on_click(document, "incrementXBtn", sync, |s| {
        s.adjust_bounds(Axis::X, Adjust::By(1))
    })?;
    on_click(document, "resetXBtn", sync, |s| {
        s.adjust_bounds(Axis::X, Adjust::Reset)
    })?;
    on_click(document, "incrementYBtn", sync, |s| {
        s.adjust_bounds(Axis::Y, Adjust::By(1))
    })?;
    on_click(document, "resetYBtn", sync, |s| {
        s.adjust_bounds(Axis::Y, Adjust::Reset)
    })?;
    on_click(document, "incrementZBtn", sync, |s| {
        s.adjust_bounds(Axis::Z, Adjust::By(1))
    })?;
    on_click(document, "resetZBtn", sync, |s| {
        s.adjust_bounds(Axis::Z, Adjust::Reset)
    })?;

    // Arrow keys mirror the offset buttons; r resets.
    let key_closure = {
        let sync = sync.clone();
        Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let mut s = sync.borrow_mut();
            match event.key().as_str() {
                "ArrowLeft" => {
                    event.prevent_default();
                    s.nudge_offset(-OFFSET_STEP, 0.0, 0.0);
                }
                "ArrowRight" => {
                    event.prevent_default();
                    s.nudge_offset(OFFSET_STEP, 0.0, 0.0);
                }
                "ArrowUp" => {
                    event.prevent_default();
                    s.nudge_offset(0.0, OFFSET_STEP, 0.0);
                }
                "ArrowDown" => {
                    event.prevent_default();
                    s.nudge_offset(0.0, -OFFSET_STEP, 0.0);
                }
                "r" | "R" => {
                    event.prevent_default();
                    s.reset_offset();
                }
                _ => {}
            }
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    document.add_event_listener_with_callback("keydown", key_closure.as_ref().unchecked_ref())?;
    key_closure.forget();

    let tick_closure = {
        let sync = sync.clone();
        Closure::wrap(Box::new(move || {
            sync.borrow_mut().rotation_tick();
        }) as Box<dyn FnMut()>)
    };
    window()
        .ok_or("no window")?
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick_closure.as_ref().unchecked_ref(),
            ROTATION_TICK_MS,
        )?;
    tick_closure.forget();

    Ok(())
}
