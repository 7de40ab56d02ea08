use std::rc::Rc;

use ecoloop_core::frame::FRAME_ERROR_MESSAGE;
use ecoloop_core::{FrameController, FrameKey, FrameStatus, GAME_LEVELS};
use gloo::events::EventListener;
use web_sys::Element;
use yew::prelude::*;

use crate::dom;
use crate::router::{self, Route};

#[derive(Clone, PartialEq)]
struct FrameModel(FrameController);

enum FrameAction {
    Loaded(FrameKey),
    Failed(FrameKey),
    Reload,
    Advance,
    Back,
    Select(usize),
    Follow(usize),
    Fullscreen(bool),
}

impl Reducible for FrameModel {
    type Action = FrameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut frame = self.0.clone();
        let changed = match action {
            FrameAction::Loaded(key) => frame.frame_loaded(key),
            FrameAction::Failed(key) => frame.frame_failed(key, FRAME_ERROR_MESSAGE),
            FrameAction::Reload => {
                frame.reload();
                true
            }
            FrameAction::Advance => frame.advance(),
            FrameAction::Back => frame.back(),
            FrameAction::Select(index) => match frame.select(index) {
                Ok(()) => true,
                Err(err) => {
                    gloo::console::warn!("game player: level select refused", err.to_string());
                    false
                }
            },
            FrameAction::Follow(index) => {
                index != frame.progress().current_index() && frame.select(index).is_ok()
            }
            FrameAction::Fullscreen(active) => {
                let changed = frame.is_fullscreen() != active;
                frame.fullscreen_changed(active);
                changed
            }
        };
        if !changed {
            return self;
        }
        Rc::new(FrameModel(frame))
    }
}

fn toggle_fullscreen(container: Option<Element>) {
    let Ok(document) = dom::document() else {
        return;
    };
    let result = if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
        Ok(())
    } else if let Some(container) = container {
        container.request_fullscreen()
    } else {
        Ok(())
    };
    if let Err(err) = result {
        gloo::console::warn!("game player: fullscreen request failed", dom::js_err(err));
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct GamePlayerProps {
    #[prop_or_default]
    pub(crate) start_level: usize,
}

#[function_component(GamePlayer)]
pub(crate) fn game_player(props: &GamePlayerProps) -> Html {
    let start_level = props.start_level;
    let frame = use_reducer(move || {
        let mut frame = FrameController::for_catalog();
        if start_level > 0 && frame.select(start_level).is_err() {
            gloo::console::warn!("game player: unknown start level", start_level);
        }
        FrameModel(frame)
    });
    let container_ref = use_node_ref();

    // The platform can leave fullscreen on its own (Escape), so track the
    // notification rather than the toggle.
    {
        let dispatcher = frame.dispatcher();
        use_effect_with((), move |_| {
            let listener = dom::document().ok().map(|document| {
                let target = document.clone();
                EventListener::new(&document, "fullscreenchange", move |_| {
                    let active = target.fullscreen_element().is_some();
                    dispatcher.dispatch(FrameAction::Fullscreen(active));
                })
            });
            move || drop(listener)
        });
    }

    // The route and the player each move the level; whichever moved last
    // wins and the other catches up.
    {
        let dispatcher = frame.dispatcher();
        use_effect_with(start_level, move |level| {
            dispatcher.dispatch(FrameAction::Follow(*level));
            || ()
        });
    }

    {
        let index = frame.0.progress().current_index();
        use_effect_with(index, move |index| {
            if let Some(level) = GAME_LEVELS.get(*index) {
                gloo::console::log!("game player: level", *index as u32, level.title);
                router::show_route(Route::Games { level: *index });
            }
            || ()
        });
    }

    let controller = &frame.0;
    let Some(level) = controller.current_level() else {
        return html! {
            <div class="game-player game-empty">{ "No games are available right now." }</div>
        };
    };
    let key = controller.key();
    let progress = controller.progress();

    let on_load = {
        let dispatcher = frame.dispatcher();
        Callback::from(move |_: Event| dispatcher.dispatch(FrameAction::Loaded(key)))
    };
    let on_error = {
        let dispatcher = frame.dispatcher();
        Callback::from(move |_: Event| dispatcher.dispatch(FrameAction::Failed(key)))
    };
    let on_retry = {
        let dispatcher = frame.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(FrameAction::Reload))
    };
    let on_next = {
        let dispatcher = frame.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(FrameAction::Advance))
    };
    let on_prev = {
        let dispatcher = frame.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(FrameAction::Back))
    };
    let on_fullscreen = {
        let container_ref = container_ref.clone();
        Callback::from(move |_: MouseEvent| toggle_fullscreen(container_ref.cast::<Element>()))
    };

    let levels = GAME_LEVELS.iter().enumerate().map(|(index, entry)| {
        let dispatcher = frame.dispatcher();
        let onclick = Callback::from(move |_: MouseEvent| {
            dispatcher.dispatch(FrameAction::Select(index));
        });
        let current = index == progress.current_index();
        html! {
            <li key={index}>
                <button type="button" class={classes!("level-pick", current.then_some("current"))}
                    aria-current={current.then_some("step")} {onclick}>
                    { format!("{}. {}", index + 1, entry.title) }
                </button>
            </li>
        }
    });

    let overlay = match controller.status() {
        FrameStatus::Loading => html! {
            <div class="game-overlay">
                <span class="spinner" aria-hidden="true"></span>
                <span>{ "Loading game…" }</span>
            </div>
        },
        FrameStatus::Error(message) => html! {
            <div class="game-overlay game-error" role="alert">
                <p>{ message.clone() }</p>
                <button type="button" onclick={on_retry}>{ "Retry" }</button>
            </div>
        },
        FrameStatus::Ready => html! {},
    };

    let fullscreen = controller.is_fullscreen();
    html! {
        <div class="game-player">
            <div class={classes!("game-stage", fullscreen.then_some("fullscreen"))} ref={container_ref}>
                <iframe
                    key={key.value().to_string()}
                    class="game-frame"
                    src={level.url}
                    title={level.title}
                    allow="fullscreen; autoplay"
                    onload={on_load}
                    onerror={on_error}
                ></iframe>
                { overlay }
            </div>
            <div class="game-controls">
                <button type="button" onclick={on_prev} disabled={progress.is_first()}>
                    { "Previous" }
                </button>
                <span class="game-progress">
                    { format!("Level {} of {}", progress.current_index() + 1, progress.total()) }
                </span>
                <button type="button" onclick={on_next} disabled={progress.is_last()}>
                    { "Next level" }
                </button>
                <button type="button" onclick={on_fullscreen}>
                    { if fullscreen { "Exit fullscreen" } else { "Fullscreen" } }
                </button>
            </div>
            <ol class="level-list">{ for levels }</ol>
        </div>
    }
}
