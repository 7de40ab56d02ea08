use std::cell::RefCell;

use ecoloop_core::config::CHAT_HANDLE;
use ecoloop_core::{EmbedRegistry, ScriptRequest};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::dom::{self, DomError};

const EMBED_ATTR: &str = "data-ecoloop-embed";
const WIDGET_ID_ATTR: &str = "data-widget-id";
const EMBED_KIND: &str = "chat";

thread_local! {
    static REGISTRY: RefCell<EmbedRegistry> = RefCell::new(EmbedRegistry::new());
}

pub(crate) fn with_registry<R>(action: impl FnOnce(&mut EmbedRegistry) -> R) -> R {
    REGISTRY.with(|slot| action(&mut slot.borrow_mut()))
}

fn script_selector() -> String {
    format!("script[{EMBED_ATTR}=\"{EMBED_KIND}\"]")
}

/// Widget id carried by the embed script currently in the document.
pub(crate) fn script_widget_id() -> Option<String> {
    let document = dom::document().ok()?;
    let script = document.query_selector(&script_selector()).ok()??;
    script.get_attribute(WIDGET_ID_ATTR)
}

/// True when the script tag is in the document and has published its handle.
pub(crate) fn handle_present() -> bool {
    script_widget_id().is_some() && dom::has_global(CHAT_HANDLE)
}

pub(crate) fn remove_scripts() -> Result<usize, DomError> {
    let document = dom::document()?;
    let nodes = document.query_selector_all(&script_selector())?;
    let mut removed = 0;
    for idx in 0..nodes.length() {
        if let Some(node) = nodes.item(idx) {
            if let Ok(element) = node.dyn_into::<web_sys::Element>() {
                element.remove();
                removed += 1;
            }
        }
    }
    Ok(removed)
}

/// Replaces any existing embed script with one for `request`.
pub(crate) fn inject_script<L, E>(
    request: ScriptRequest,
    on_load: L,
    on_error: E,
) -> Result<(), DomError>
where
    L: FnOnce() + 'static,
    E: FnOnce() + 'static,
{
    let document = dom::document()?;
    let removed = remove_scripts()?;
    if removed > 0 {
        gloo::console::log!("chat embed: replaced stale script", removed);
    }
    let script: HtmlScriptElement = document.create_element("script")?.dyn_into().map_err(|_| {
        DomError::Js("created element is not a script".to_string())
    })?;
    script.set_async(true);
    script.set_src(request.script_url);
    script.set_attribute(EMBED_ATTR, EMBED_KIND)?;
    script.set_attribute(WIDGET_ID_ATTR, request.widget_id)?;

    let onload = Closure::once(on_load);
    let onerror = Closure::once(on_error);
    script.set_onload(Some(onload.as_ref().unchecked_ref()));
    script.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    let head = document.head().ok_or(DomError::NoDocument)?;
    head.append_child(&script)?;
    gloo::console::log!(
        "chat embed: injected",
        request.widget_id,
        request.token.value()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoloop_core::{LoadPlan, ThemePreference, WidgetLoader};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn script_count() -> u32 {
        dom::document()
            .unwrap()
            .query_selector_all(&script_selector())
            .unwrap()
            .length()
    }

    #[wasm_bindgen_test]
    fn injection_replaces_previous_script() {
        let mut registry = EmbedRegistry::new();
        let mut loader = WidgetLoader::new(ThemePreference::Light);
        let LoadPlan::Inject(light) = loader.open(&mut registry, false) else {
            panic!("expected injection");
        };
        inject_script(light, || {}, || {}).expect("inject light");
        assert_eq!(script_count(), 1);
        assert_eq!(script_widget_id().as_deref(), Some(light.widget_id));

        let LoadPlan::Inject(dark) = loader.set_theme(ThemePreference::Dark, &mut registry, false)
        else {
            panic!("expected injection");
        };
        inject_script(dark, || {}, || {}).expect("inject dark");
        assert_eq!(script_count(), 1);
        assert_eq!(script_widget_id().as_deref(), Some(dark.widget_id));

        assert_eq!(remove_scripts().unwrap(), 1);
        assert_eq!(script_widget_id(), None);
        assert!(!handle_present());
    }
}
