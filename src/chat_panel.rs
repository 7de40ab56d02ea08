use std::cell::RefCell;
use std::rc::Rc;

use ecoloop_core::config::CHAT_SETTLE_MS;
use ecoloop_core::window::maximize_forced;
use ecoloop_core::{
    InteractionMode, LoadPlan, Orientation, Viewport, WidgetLoadState, WidgetLoader, WidgetNotice,
    WindowManager, WindowState,
};
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, PointerEvent};
use yew::prelude::*;

use crate::dom::{self, BodyStyleGuard};
use crate::embed;
use crate::notify::{use_notifier, Notifier};
use crate::theme::use_theme;
use crate::viewport::use_viewport;

const DRAG_CURSOR: &str = "move";
const RESIZE_CURSOR: &str = "nwse-resize";

/// Loader shared with async continuations, mirrored into render state.
#[derive(Clone)]
struct LoaderStore {
    state: UseStateHandle<WidgetLoadState>,
    live: Rc<RefCell<WidgetLoader>>,
    settle: Rc<RefCell<Option<Timeout>>>,
    notifier: Option<Notifier>,
}

impl LoaderStore {
    fn sync(&self) {
        self.state.set(self.live.borrow().state());
    }

    fn notify(&self, notice: WidgetNotice) {
        let Some(notifier) = self.notifier.as_ref() else {
            return;
        };
        if notice.is_error() {
            notifier.error(notice.message());
        } else {
            notifier.success(notice.message());
        }
    }

    fn cancel_settle(&self) {
        self.settle.borrow_mut().take();
    }

    fn run(&self, plan: LoadPlan) {
        match plan {
            LoadPlan::Idle => {}
            LoadPlan::Reuse => {
                gloo::console::log!("chat embed: reusing loaded script");
                self.sync();
            }
            LoadPlan::Inject(request) => {
                self.cancel_settle();
                self.sync();
                let token = request.token;
                let on_load = {
                    let store = self.clone();
                    move || {
                        let settle = embed::with_registry(|registry| {
                            store.live.borrow_mut().script_loaded(token, registry)
                        });
                        if !settle {
                            gloo::console::warn!("chat embed: dropped stale load", token.value());
                            return;
                        }
                        let timer_store = store.clone();
                        let timeout = Timeout::new(CHAT_SETTLE_MS, move || {
                            let notice = timer_store.live.borrow_mut().settle(token);
                            if let Some(notice) = notice {
                                gloo::console::log!("chat embed: ready", token.value());
                                timer_store.sync();
                                timer_store.notify(notice);
                            }
                        });
                        *store.settle.borrow_mut() = Some(timeout);
                    }
                };
                let on_error = {
                    let store = self.clone();
                    move || store.fail(token)
                };
                if let Err(err) = embed::inject_script(request, on_load, on_error) {
                    gloo::console::warn!("chat embed: injection failed", err.to_string());
                    self.fail(token);
                }
            }
        }
    }

    fn fail(&self, token: ecoloop_core::SessionToken) {
        let notice = embed::with_registry(|registry| {
            self.live.borrow_mut().script_failed(token, registry)
        });
        match notice {
            Some(notice) => {
                gloo::console::warn!("chat embed: script failed", token.value());
                self.sync();
                self.notify(notice);
            }
            None => {
                gloo::console::warn!("chat embed: dropped stale error", token.value());
            }
        }
    }
}

/// Window manager shared with document listeners, mirrored into render state.
#[derive(Clone)]
struct WindowStore {
    state: UseStateHandle<Option<WindowState>>,
    live: Rc<RefCell<Option<WindowManager>>>,
    styles: Rc<RefCell<Option<BodyStyleGuard>>>,
}

impl WindowStore {
    fn sync(&self) {
        self.state.set(self.live.borrow().as_ref().map(WindowManager::state));
    }

    fn open(&self, viewport: Viewport) {
        *self.live.borrow_mut() = Some(WindowManager::open(viewport));
        self.sync();
    }

    fn close(&self) {
        self.styles.borrow_mut().take();
        self.live.borrow_mut().take();
        self.state.set(None);
    }

    fn begin(&self, mode: InteractionMode, x: f64, y: f64) -> bool {
        let result = {
            let mut live = self.live.borrow_mut();
            let Some(manager) = live.as_mut() else {
                return false;
            };
            match mode {
                InteractionMode::Drag => manager.begin_drag(x, y),
                InteractionMode::Resize => manager.begin_resize(x, y),
            }
        };
        if let Err(err) = result {
            gloo::console::log!("chat window: interaction refused", err.to_string());
            return false;
        }
        let cursor = match mode {
            InteractionMode::Drag => DRAG_CURSOR,
            InteractionMode::Resize => RESIZE_CURSOR,
        };
        match BodyStyleGuard::acquire(cursor) {
            Ok(guard) => *self.styles.borrow_mut() = Some(guard),
            Err(err) => gloo::console::warn!("chat window: cursor override failed", err.to_string()),
        }
        self.sync();
        true
    }

    fn pointer_move(&self, x: f64, y: f64) {
        let changed = self
            .live
            .borrow_mut()
            .as_mut()
            .map(|manager| manager.pointer_move(x, y))
            .unwrap_or(false);
        if changed {
            self.sync();
        }
    }

    fn finish(&self, cancel: bool) {
        let ended = self.live.borrow_mut().as_mut().and_then(|manager| {
            if cancel {
                manager.cancel_interaction()
            } else {
                manager.pointer_up()
            }
        });
        self.styles.borrow_mut().take();
        if ended.is_some() {
            self.sync();
        }
    }

    fn is_interacting(&self) -> bool {
        self.live
            .borrow()
            .as_ref()
            .and_then(WindowManager::interaction)
            .is_some()
    }

    fn set_viewport(&self, viewport: Viewport) {
        let had_interaction = self.is_interacting();
        if let Some(manager) = self.live.borrow_mut().as_mut() {
            manager.set_viewport(viewport);
        }
        if had_interaction && !self.is_interacting() {
            self.styles.borrow_mut().take();
        }
        self.sync();
    }

    fn toggle_maximize(&self) {
        if let Some(manager) = self.live.borrow_mut().as_mut() {
            manager.toggle_maximize();
        }
        self.styles.borrow_mut().take();
        self.sync();
    }
}

fn pointer_target_is_control(event: &PointerEvent) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|element| element.closest("button").ok().flatten().is_some())
        .unwrap_or(false)
}

fn capture_listener(
    target: &web_sys::EventTarget,
    event_type: &'static str,
    callback: impl FnMut(&Event) + 'static,
) -> EventListener {
    EventListener::new_with_options(
        target,
        event_type,
        EventListenerOptions {
            phase: EventListenerPhase::Capture,
            passive: false,
        },
        callback,
    )
}

#[derive(Properties, PartialEq)]
pub(crate) struct ChatPanelProps {
    pub(crate) open: bool,
    pub(crate) on_close: Callback<()>,
}

#[function_component(ChatPanel)]
pub(crate) fn chat_panel(props: &ChatPanelProps) -> Html {
    let theme = use_theme().theme;
    let viewport = use_viewport();
    let notifier = use_notifier();
    let container_ref = use_node_ref();

    let load_state = use_state(WidgetLoadState::default);
    let loader_live = use_mut_ref(|| WidgetLoader::new(theme));
    let settle_timer = use_mut_ref(|| None::<Timeout>);
    let loader = LoaderStore {
        state: load_state.clone(),
        live: loader_live,
        settle: settle_timer,
        notifier,
    };

    let window_state = use_state(|| None::<WindowState>);
    let window_live = use_mut_ref(|| None::<WindowManager>);
    let style_guard = use_mut_ref(|| None::<BodyStyleGuard>);
    let window = WindowStore {
        state: window_state.clone(),
        live: window_live,
        styles: style_guard,
    };

    {
        let loader = loader.clone();
        let window = window.clone();
        let container_ref = container_ref.clone();
        use_effect_with(props.open, move |open| {
            let active = *open;
            let mut listeners = Vec::new();
            if active {
                window.open(viewport);
                let handle_present = embed::handle_present();
                let plan = embed::with_registry(|registry| {
                    loader.live.borrow_mut().open(registry, handle_present)
                });
                loader.run(plan);

                if let Ok(document) = dom::document() {
                    let move_window = window.clone();
                    listeners.push(capture_listener(&document, "pointermove", move |event| {
                        if let Some(event) = event.dyn_ref::<PointerEvent>() {
                            if move_window.is_interacting() {
                                move_window
                                    .pointer_move(event.client_x() as f64, event.client_y() as f64);
                            }
                        }
                    }));
                    let up_window = window.clone();
                    listeners.push(capture_listener(&document, "pointerup", move |_| {
                        up_window.finish(false);
                    }));
                    let cancel_window = window.clone();
                    listeners.push(capture_listener(&document, "pointercancel", move |_| {
                        cancel_window.finish(false);
                    }));
                    let key_window = window.clone();
                    listeners.push(capture_listener(&document, "keydown", move |event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        if event.key() == "Escape" && key_window.is_interacting() {
                            event.prevent_default();
                            key_window.finish(true);
                        }
                    }));
                }
            }
            move || {
                drop(listeners);
                if active {
                    loader.cancel_settle();
                    loader.live.borrow_mut().close();
                    loader.sync();
                    if let Some(container) = container_ref.cast::<Element>() {
                        container.set_inner_html("");
                    }
                    window.close();
                }
            }
        });
    }

    {
        let window = window.clone();
        use_effect_with(viewport, move |viewport| {
            window.set_viewport(*viewport);
            || ()
        });
    }

    {
        let loader = loader.clone();
        let container_ref = container_ref.clone();
        use_effect_with(theme, move |theme| {
            let handle_present = embed::handle_present();
            let plan = embed::with_registry(|registry| {
                loader
                    .live
                    .borrow_mut()
                    .set_theme(*theme, registry, handle_present)
            });
            if matches!(plan, LoadPlan::Inject(_)) {
                if let Some(container) = container_ref.cast::<Element>() {
                    container.set_inner_html("");
                }
            }
            loader.run(plan);
            || ()
        });
    }

    let Some(state) = *window_state else {
        return html! {};
    };

    let on_drag_start = {
        let window = window.clone();
        Callback::from(move |event: PointerEvent| {
            if event.button() != 0 || pointer_target_is_control(&event) {
                return;
            }
            let x = event.client_x() as f64;
            let y = event.client_y() as f64;
            if window.begin(InteractionMode::Drag, x, y) {
                event.prevent_default();
            }
        })
    };
    let on_resize_start = {
        let window = window.clone();
        Callback::from(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            event.stop_propagation();
            let x = event.client_x() as f64;
            let y = event.client_y() as f64;
            if window.begin(InteractionMode::Resize, x, y) {
                event.prevent_default();
            }
        })
    };
    let on_maximize = {
        let window = window.clone();
        Callback::from(move |_: MouseEvent| window.toggle_maximize())
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_retry = {
        let loader = loader.clone();
        Callback::from(move |_: MouseEvent| {
            let handle_present = embed::handle_present();
            let plan = embed::with_registry(|registry| {
                loader.live.borrow_mut().retry(registry, handle_present)
            });
            loader.run(plan);
        })
    };

    let locked = maximize_forced(viewport);
    let handles = !state.maximized;
    let style = format!(
        "left: {}px; top: {}px; width: {}px; height: {}px;",
        state.x, state.y, state.width, state.height
    );
    let class = classes!(
        "chat-window",
        match viewport.orientation() {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        },
        state.maximized.then_some("maximized"),
        state.dragging.then_some("dragging"),
        state.resizing.then_some("resizing"),
    );
    let widget_id = loader.live.borrow().widget_id();

    let status = match *load_state {
        WidgetLoadState::Loading => html! {
            <div class="chat-status">
                <span class="spinner" aria-hidden="true"></span>
                <span>{ "Connecting to the recycling assistant…" }</span>
            </div>
        },
        WidgetLoadState::Error => html! {
            <div class="chat-status chat-error" role="alert">
                <span>{ WidgetNotice::Failed.message() }</span>
                <button type="button" onclick={on_retry}>{ "Try again" }</button>
            </div>
        },
        WidgetLoadState::Loaded => html! {},
    };

    html! {
        <section class={class} style={style} role="dialog" aria-label="Recycling assistant">
            <header class="chat-titlebar" onpointerdown={handles.then_some(on_drag_start)}>
                <span class="chat-title">{ "Ask Ecoloop" }</span>
                <div class="window-controls">
                    if !locked {
                        <button type="button" class="chat-maximize" onclick={on_maximize}
                            aria-label={if state.maximized { "Restore" } else { "Maximize" }}>
                            { if state.maximized { "❐" } else { "□" } }
                        </button>
                    }
                    <button type="button" class="chat-close" aria-label="Close" onclick={on_close}>
                        { "×" }
                    </button>
                </div>
            </header>
            <div class="chat-body">
                { status }
                <div id={widget_id} class="chat-embed" ref={container_ref}></div>
            </div>
            if handles {
                <div class="chat-resize-handle" onpointerdown={on_resize_start}></div>
            }
        </section>
    }
}
