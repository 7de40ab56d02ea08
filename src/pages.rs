use ecoloop_core::GAME_LEVELS;
use yew::prelude::*;

use crate::game_player::GamePlayer;
use crate::router::Route;

struct BinGuide {
    bin: &'static str,
    class: &'static str,
    accepts: &'static [&'static str],
}

const BIN_GUIDES: &[BinGuide] = &[
    BinGuide {
        bin: "Paper & card",
        class: "bin-paper",
        accepts: &["Clean paper", "Flattened boxes", "Newspapers and magazines"],
    },
    BinGuide {
        bin: "Plastic & metal",
        class: "bin-plastic",
        accepts: &["Rinsed bottles", "Cans and tins", "Yoghurt pots"],
    },
    BinGuide {
        bin: "Compost",
        class: "bin-compost",
        accepts: &["Fruit and vegetable scraps", "Tea bags", "Napkins"],
    },
    BinGuide {
        bin: "General waste",
        class: "bin-general",
        accepts: &["Crisp packets", "Chewing gum", "Anything dirty or mixed"],
    },
];

#[function_component(HomePage)]
pub(crate) fn home_page() -> Html {
    html! {
        <main class="page page-home">
            <section class="hero">
                <h1>{ "Less waste, more loops." }</h1>
                <p>{ "Ecoloop helps our school sort, reuse and recycle more of what we throw away." }</p>
                <div class="hero-actions">
                    <a class="button" href={Route::Recycling.href()}>{ "Learn the bins" }</a>
                    <a class="button secondary" href={Route::Games { level: 0 }.href()}>
                        { "Play a game" }
                    </a>
                </div>
            </section>
            <section class="cards">
                <article class="card">
                    <h2>{ "Sort it right" }</h2>
                    <p>{ "Every classroom has four bins. A quick rinse keeps recycling clean." }</p>
                </article>
                <article class="card">
                    <h2>{ "Learn by playing" }</h2>
                    <p>{ format!("{} short games teach sorting, composting and reuse.", GAME_LEVELS.len()) }</p>
                </article>
                <article class="card">
                    <h2>{ "Ask anything" }</h2>
                    <p>{ "Not sure where something goes? Open the chat and ask our assistant." }</p>
                </article>
            </section>
        </main>
    }
}

#[function_component(RecyclingPage)]
pub(crate) fn recycling_page() -> Html {
    let guides = BIN_GUIDES.iter().map(|guide| {
        html! {
            <article class={classes!("bin-card", guide.class)} key={guide.bin}>
                <h2>{ guide.bin }</h2>
                <ul>
                    { for guide.accepts.iter().map(|item| html! { <li>{ *item }</li> }) }
                </ul>
            </article>
        }
    });
    html! {
        <main class="page page-recycling">
            <h1>{ "How to recycle at school" }</h1>
            <div class="bin-grid">{ for guides }</div>
        </main>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct GamesPageProps {
    pub(crate) level: usize,
}

#[function_component(GamesPage)]
pub(crate) fn games_page(props: &GamesPageProps) -> Html {
    html! {
        <main class="page page-games">
            <h1>{ "Recycling games" }</h1>
            <p>{ "Work through the levels in order, or jump to any game from the list." }</p>
            <GamePlayer start_level={props.level} />
        </main>
    }
}

#[function_component(AboutPage)]
pub(crate) fn about_page() -> Html {
    html! {
        <main class="page page-about">
            <h1>{ "About Ecoloop" }</h1>
            <p>{ "Ecoloop started as a student project to cut the amount of rubbish leaving our school." }</p>
            <p>{ "Eco-club members run weekly bin checks, share results in assembly and keep this site up to date." }</p>
        </main>
    }
}
