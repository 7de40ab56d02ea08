use ecoloop_core::Viewport;
use gloo::events::EventListener;
use yew::prelude::*;

use crate::dom;

pub(crate) fn current_viewport() -> Viewport {
    let Ok(window) = dom::window() else {
        return Viewport::default();
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    if width <= 0.0 || height <= 0.0 {
        return Viewport::default();
    }
    Viewport::new(width, height)
}

/// Window size, refreshed on resize and orientation changes.
#[hook]
pub(crate) fn use_viewport() -> Viewport {
    let viewport = use_state(current_viewport);
    {
        let viewport = viewport.clone();
        use_effect_with((), move |_| {
            let listeners = dom::window().ok().map(|window| {
                let on_resize = {
                    let viewport = viewport.clone();
                    EventListener::new(&window, "resize", move |_| {
                        viewport.set(current_viewport());
                    })
                };
                let on_orientation = EventListener::new(&window, "orientationchange", move |_| {
                    viewport.set(current_viewport());
                });
                (on_resize, on_orientation)
            });
            move || drop(listeners)
        });
    }
    *viewport
}
