use ecoloop_core::{resolve_theme, ThemePreference};
use gloo::events::EventListener;
use yew::prelude::*;

use crate::dom;

const THEME_KEY: &str = "ecoloop.theme";
const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Resolved appearance plus the setter shared through context.
#[derive(Clone, PartialEq)]
pub(crate) struct ThemeContext {
    pub(crate) theme: ThemePreference,
    pub(crate) toggle: Callback<()>,
}

fn load_stored_theme() -> Option<String> {
    let storage = dom::window().ok()?.local_storage().ok()??;
    storage.get_item(THEME_KEY).ok()?
}

fn persist_theme(theme: ThemePreference) {
    let Ok(window) = dom::window() else {
        return;
    };
    let Ok(Some(storage)) = window.local_storage() else {
        return;
    };
    if storage.set_item(THEME_KEY, theme.as_str()).is_err() {
        gloo::console::warn!("theme: failed to persist preference");
    }
}

fn system_prefers_dark() -> bool {
    dom::window()
        .ok()
        .and_then(|window| window.match_media(DARK_QUERY).ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

fn apply_theme(theme: ThemePreference) {
    match dom::body() {
        Ok(body) => {
            let _ = body.set_attribute("data-theme", theme.as_str());
        }
        Err(err) => gloo::console::warn!("theme: cannot apply", err.to_string()),
    }
}

pub(crate) fn initial_theme() -> ThemePreference {
    resolve_theme(load_stored_theme().as_deref(), system_prefers_dark())
}

#[hook]
pub(crate) fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().unwrap_or_else(|| ThemeContext {
        theme: ThemePreference::default(),
        toggle: Callback::noop(),
    })
}

#[derive(Properties, PartialEq)]
pub(crate) struct ThemeProviderProps {
    pub(crate) children: Html,
}

#[function_component(ThemeProvider)]
pub(crate) fn theme_provider(props: &ThemeProviderProps) -> Html {
    let theme = use_state(initial_theme);
    let theme_value = *theme;

    use_effect_with(theme_value, move |theme| {
        apply_theme(*theme);
        || ()
    });

    // Follow the platform scheme until the user picks one explicitly.
    {
        let theme = theme.clone();
        use_effect_with((), move |_| {
            let listener = dom::window()
                .ok()
                .and_then(|window| window.match_media(DARK_QUERY).ok().flatten())
                .map(|query| {
                    let target = query.clone();
                    EventListener::new(&query, "change", move |_| {
                        if load_stored_theme().is_some() {
                            return;
                        }
                        theme.set(resolve_theme(None, target.matches()));
                    })
                });
            move || drop(listener)
        });
    }

    let toggle = {
        let theme = theme.clone();
        Callback::from(move |_: ()| {
            let next = theme.toggled();
            persist_theme(next);
            gloo::console::log!("theme: switched to", next.as_str());
            theme.set(next);
        })
    };

    let context = ThemeContext {
        theme: theme_value,
        toggle,
    };

    html! {
        <ContextProvider<ThemeContext> context={context}>
            { props.children.clone() }
        </ContextProvider<ThemeContext>>
    }
}
