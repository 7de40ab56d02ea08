use ecoloop_core::level_count;
use gloo::events::EventListener;
use yew::prelude::*;

use crate::dom;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Route {
    Home,
    Recycling,
    Games { level: usize },
    About,
}

impl Route {
    pub(crate) fn href(self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::Recycling => "#/recycling".to_string(),
            Route::Games { level: 0 } => "#/games".to_string(),
            Route::Games { level } => format!("#/games/{}", level + 1),
            Route::About => "#/about".to_string(),
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Recycling => "How to recycle",
            Route::Games { .. } => "Games",
            Route::About => "About",
        }
    }

    pub(crate) fn same_page(self, other: Route) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

pub(crate) const NAV_ROUTES: [Route; 4] = [
    Route::Home,
    Route::Recycling,
    Route::Games { level: 0 },
    Route::About,
];

/// Unknown hashes land on the home page. Game levels are 1-based in URLs.
pub(crate) fn parse_hash(hash: &str) -> Route {
    let raw = hash.trim().trim_start_matches('#').trim_start_matches('/').trim();
    let raw = raw.trim_end_matches('/');
    let mut parts = raw.split('/').map(str::trim).filter(|part| !part.is_empty());
    let Some(page) = parts.next() else {
        return Route::Home;
    };
    if page.eq_ignore_ascii_case("recycling") {
        Route::Recycling
    } else if page.eq_ignore_ascii_case("about") {
        Route::About
    } else if page.eq_ignore_ascii_case("games") {
        let level = parts
            .next()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|value| *value >= 1 && *value <= level_count())
            .map(|value| value - 1)
            .unwrap_or(0);
        Route::Games { level }
    } else {
        Route::Home
    }
}

/// New hash to write so the address bar shows `route`, if it does not already.
pub(crate) fn hash_update(current_hash: &str, route: Route) -> Option<String> {
    (parse_hash(current_hash) != route).then(|| route.href())
}

pub(crate) fn show_route(route: Route) {
    let Ok(location) = dom::window().map(|window| window.location()) else {
        return;
    };
    let current = location.hash().unwrap_or_default();
    if let Some(hash) = hash_update(&current, route) {
        if let Err(err) = location.set_hash(&hash) {
            gloo::console::warn!("router: hash update failed", dom::js_err(err));
        }
    }
}

fn current_route() -> Route {
    dom::window()
        .ok()
        .and_then(|window| window.location().hash().ok())
        .map(|hash| parse_hash(&hash))
        .unwrap_or(Route::Home)
}

#[hook]
pub(crate) fn use_route() -> Route {
    let route = use_state(current_route);
    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let listener = dom::window().ok().map(|window| {
                EventListener::new(&window, "hashchange", move |_| {
                    route.set(current_route());
                })
            });
            move || drop(listener)
        });
    }
    *route
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn parses_known_pages() {
        assert_eq!(parse_hash(""), Route::Home);
        assert_eq!(parse_hash("#/"), Route::Home);
        assert_eq!(parse_hash("#/recycling"), Route::Recycling);
        assert_eq!(parse_hash("#/About/"), Route::About);
        assert_eq!(parse_hash("#/games"), Route::Games { level: 0 });
    }

    #[wasm_bindgen_test]
    fn parses_game_levels() {
        assert_eq!(parse_hash("#/games/2"), Route::Games { level: 1 });
        assert_eq!(parse_hash("#/games/0"), Route::Games { level: 0 });
        assert_eq!(parse_hash("#/games/9999"), Route::Games { level: 0 });
        assert_eq!(parse_hash("#/games/abc"), Route::Games { level: 0 });
    }

    #[wasm_bindgen_test]
    fn unknown_falls_back_home() {
        assert_eq!(parse_hash("#/recycle-bin"), Route::Home);
        assert_eq!(parse_hash("#room=abc"), Route::Home);
    }

    #[wasm_bindgen_test]
    fn level_changes_rewrite_the_hash() {
        assert_eq!(
            hash_update("#/games", Route::Games { level: 1 }),
            Some("#/games/2".to_string())
        );
        assert_eq!(
            hash_update("#/games/2", Route::Games { level: 0 }),
            Some("#/games".to_string())
        );
        assert_eq!(hash_update("#/games/2", Route::Games { level: 1 }), None);
        assert_eq!(hash_update("#/games/abc", Route::Games { level: 0 }), None);
    }

    #[wasm_bindgen_test]
    fn href_round_trips() {
        for route in NAV_ROUTES {
            assert_eq!(parse_hash(&route.href()), route);
        }
        let level = Route::Games { level: 1 };
        assert_eq!(parse_hash(&level.href()), level);
    }
}
