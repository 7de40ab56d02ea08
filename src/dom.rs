use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

#[derive(Debug, thiserror::Error)]
pub(crate) enum DomError {
    #[error("window unavailable")]
    NoWindow,
    #[error("document unavailable")]
    NoDocument,
    #[error("document body unavailable")]
    NoBody,
    #[error("dom call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(js_err(value))
    }
}

pub(crate) fn js_err(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub(crate) fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub(crate) fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub(crate) fn body() -> Result<HtmlElement, DomError> {
    document()?.body().ok_or(DomError::NoBody)
}

pub(crate) fn has_global(name: &str) -> bool {
    let Ok(window) = window() else {
        return false;
    };
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}

/// Overrides the body cursor and disables text selection until dropped.
pub(crate) struct BodyStyleGuard {
    body: HtmlElement,
    prev_cursor: String,
    prev_user_select: String,
}

impl BodyStyleGuard {
    pub(crate) fn acquire(cursor: &str) -> Result<Self, DomError> {
        let body = body()?;
        let style = body.style();
        let prev_cursor = style.get_property_value("cursor")?;
        let prev_user_select = style.get_property_value("user-select")?;
        style.set_property("cursor", cursor)?;
        style.set_property("user-select", "none")?;
        Ok(Self {
            body,
            prev_cursor,
            prev_user_select,
        })
    }
}

impl Drop for BodyStyleGuard {
    fn drop(&mut self) {
        let style = self.body.style();
        let _ = restore_property(&style, "cursor", &self.prev_cursor);
        let _ = restore_property(&style, "user-select", &self.prev_user_select);
    }
}

fn restore_property(
    style: &web_sys::CssStyleDeclaration,
    name: &str,
    value: &str,
) -> Result<(), JsValue> {
    if value.is_empty() {
        style.remove_property(name).map(|_| ())
    } else {
        style.set_property(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn style_guard_restores_on_drop() {
        let style = body().expect("body available").style();
        style.set_property("cursor", "pointer").unwrap();
        {
            let _guard = BodyStyleGuard::acquire("move").expect("guard");
            assert_eq!(style.get_property_value("cursor").unwrap(), "move");
        }
        assert_eq!(style.get_property_value("cursor").unwrap(), "pointer");
        style.remove_property("cursor").unwrap();
    }

    #[wasm_bindgen_test]
    fn missing_global_is_absent() {
        assert!(!has_global("__ecoloop_missing_handle"));
    }
}
