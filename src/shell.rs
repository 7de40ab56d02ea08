use ecoloop_core::ThemePreference;
use yew::prelude::*;

use crate::router::{Route, NAV_ROUTES};
use crate::theme::use_theme;
use crate::viewport::use_viewport;

#[derive(Properties, PartialEq)]
pub(crate) struct NavBarProps {
    pub(crate) route: Route,
    pub(crate) chat_open: bool,
    pub(crate) on_chat: Callback<()>,
}

#[function_component(NavBar)]
pub(crate) fn nav_bar(props: &NavBarProps) -> Html {
    let theme = use_theme();
    let mobile = use_viewport().is_mobile();
    let menu_open = use_state(|| false);

    {
        let menu_open = menu_open.clone();
        use_effect_with((props.route, mobile), move |_| {
            menu_open.set(false);
            || ()
        });
    }

    let on_theme = {
        let toggle = theme.toggle.clone();
        Callback::from(move |_: MouseEvent| toggle.emit(()))
    };
    let on_chat = {
        let on_chat = props.on_chat.clone();
        Callback::from(move |_: MouseEvent| on_chat.emit(()))
    };
    let on_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let links = NAV_ROUTES.iter().map(|route| {
        let active = route.same_page(props.route);
        html! {
            <li>
                <a href={route.href()} class={classes!(active.then_some("active"))}
                    aria-current={active.then_some("page")}>
                    { route.label() }
                </a>
            </li>
        }
    });

    let theme_label = match theme.theme {
        ThemePreference::Light => "Dark mode",
        ThemePreference::Dark => "Light mode",
    };
    let show_links = !mobile || *menu_open;

    html! {
        <nav class="nav-bar">
            <a class="brand" href={Route::Home.href()}>{ "♻ Ecoloop" }</a>
            if mobile {
                <button type="button" class="menu-toggle" aria-expanded={menu_open.to_string()}
                    aria-label="Menu" onclick={on_menu}>
                    { "☰" }
                </button>
            }
            if show_links {
                <ul class="nav-links">{ for links }</ul>
            }
            <div class="nav-actions">
                <button type="button" class="theme-toggle" onclick={on_theme}>{ theme_label }</button>
                <button type="button" class={classes!("chat-launch", props.chat_open.then_some("active"))}
                    onclick={on_chat}>
                    { if props.chat_open { "Close chat" } else { "Ask a question" } }
                </button>
            </div>
        </nav>
    }
}

#[function_component(Footer)]
pub(crate) fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <p>{ "Ecoloop is run by students and staff who want less waste and more reuse at school." }</p>
            <p class="fine-print">
                { "Games and the chat assistant are provided by third parties and load from their own servers." }
            </p>
        </footer>
    }
}
