use yew::prelude::*;

use crate::chat_panel::ChatPanel;
use crate::notify::ToastProvider;
use crate::pages::{AboutPage, GamesPage, HomePage, RecyclingPage};
use crate::router::{use_route, Route};
use crate::shell::{Footer, NavBar};
use crate::theme::ThemeProvider;

#[function_component(App)]
pub(crate) fn app() -> Html {
    html! {
        <ThemeProvider>
            <ToastProvider>
                <Site />
            </ToastProvider>
        </ThemeProvider>
    }
}

#[function_component(Site)]
fn site() -> Html {
    let route = use_route();
    let chat_open = use_state(|| false);

    let on_chat = {
        let chat_open = chat_open.clone();
        Callback::from(move |_: ()| chat_open.set(!*chat_open))
    };
    let on_chat_close = {
        let chat_open = chat_open.clone();
        Callback::from(move |_: ()| chat_open.set(false))
    };

    let page = match route {
        Route::Home => html! { <HomePage /> },
        Route::Recycling => html! { <RecyclingPage /> },
        Route::Games { level } => html! { <GamesPage {level} /> },
        Route::About => html! { <AboutPage /> },
    };

    html! {
        <div class="site">
            <NavBar {route} chat_open={*chat_open} {on_chat} />
            { page }
            <Footer />
            <ChatPanel open={*chat_open} on_close={on_chat_close} />
        </div>
    }
}
