mod app;
mod chat_panel;
mod dom;
mod embed;
mod game_player;
mod notify;
mod pages;
mod router;
mod shell;
mod theme;
mod viewport;

fn main() {
    console_error_panic_hook::set_once();
    gloo::console::log!("ecoloop: starting");
    yew::Renderer::<app::App>::new().render();
}
