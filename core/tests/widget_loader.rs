use ecoloop_core::config::{CHAT_SCRIPT_URL, CHAT_WIDGET_ID_DARK, CHAT_WIDGET_ID_LIGHT};
use ecoloop_core::{
    EmbedRegistry, LoadPlan, ThemePreference, WidgetLoadState, WidgetLoader, WidgetNotice,
};

fn expect_inject(plan: LoadPlan) -> ecoloop_core::ScriptRequest {
    match plan {
        LoadPlan::Inject(request) => request,
        other => panic!("expected injection, got {other:?}"),
    }
}

#[test]
fn first_open_injects_light_widget() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Light);
    assert_eq!(loader.state(), WidgetLoadState::Loading);
    let request = expect_inject(loader.open(&mut registry, false));
    assert_eq!(request.script_url, CHAT_SCRIPT_URL);
    assert_eq!(request.widget_id, CHAT_WIDGET_ID_LIGHT);
    assert_eq!(registry.injected_widget(), Some(CHAT_WIDGET_ID_LIGHT));
    assert_eq!(registry.in_flight(), Some(request.token));
    assert_eq!(loader.state(), WidgetLoadState::Loading);
}

#[test]
fn load_then_settle_marks_loaded() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Light);
    let request = expect_inject(loader.open(&mut registry, false));
    assert!(loader.script_loaded(request.token, &mut registry));
    assert_eq!(loader.state(), WidgetLoadState::Loading);
    assert_eq!(loader.settle(request.token), Some(WidgetNotice::Ready));
    assert_eq!(loader.state(), WidgetLoadState::Loaded);
    assert_eq!(loader.settle(request.token), None);
}

#[test]
fn script_error_marks_error() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Dark);
    let request = expect_inject(loader.open(&mut registry, false));
    let notice = loader.script_failed(request.token, &mut registry);
    assert_eq!(notice, Some(WidgetNotice::Failed));
    assert!(notice.is_some_and(WidgetNotice::is_error));
    assert_eq!(loader.state(), WidgetLoadState::Error);
    assert_eq!(registry.injected_widget(), None);
}

#[test]
fn open_twice_does_not_inject_again() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Light);
    expect_inject(loader.open(&mut registry, false));
    assert_eq!(loader.open(&mut registry, false), LoadPlan::Idle);
}

#[test]
fn reopen_reuses_loaded_script() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Light);
    let request = expect_inject(loader.open(&mut registry, false));
    loader.script_loaded(request.token, &mut registry);
    loader.settle(request.token);
    loader.close();
    assert_eq!(loader.state(), WidgetLoadState::Loading);

    assert_eq!(loader.open(&mut registry, true), LoadPlan::Reuse);
    assert_eq!(loader.state(), WidgetLoadState::Loaded);
}

#[test]
fn reopen_without_handle_injects() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Light);
    let request = expect_inject(loader.open(&mut registry, false));
    loader.script_loaded(request.token, &mut registry);
    loader.settle(request.token);
    loader.close();
    expect_inject(loader.open(&mut registry, false));
}

#[test]
fn stale_load_after_close_is_ignored() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Light);
    let stale = expect_inject(loader.open(&mut registry, false));
    loader.close();
    let fresh = expect_inject(loader.open(&mut registry, false));
    assert_ne!(stale.token, fresh.token);

    assert!(!loader.script_loaded(stale.token, &mut registry));
    assert_eq!(loader.settle(stale.token), None);
    assert_eq!(loader.script_failed(stale.token, &mut registry), None);
    assert_eq!(loader.state(), WidgetLoadState::Loading);
    assert_eq!(registry.in_flight(), Some(fresh.token));

    assert!(loader.script_loaded(fresh.token, &mut registry));
    assert_eq!(loader.settle(fresh.token), Some(WidgetNotice::Ready));
}

#[test]
fn stale_settle_after_close_is_ignored() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Light);
    let request = expect_inject(loader.open(&mut registry, false));
    assert!(loader.script_loaded(request.token, &mut registry));
    loader.close();
    assert_eq!(loader.settle(request.token), None);
    assert_eq!(loader.state(), WidgetLoadState::Loading);
    assert!(!loader.is_open());
}

#[test]
fn theme_switch_while_open_restarts_with_new_id() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Light);
    let light = expect_inject(loader.open(&mut registry, false));
    loader.script_loaded(light.token, &mut registry);
    loader.settle(light.token);
    assert_eq!(loader.state(), WidgetLoadState::Loaded);

    let dark = expect_inject(loader.set_theme(ThemePreference::Dark, &mut registry, true));
    assert_eq!(dark.widget_id, CHAT_WIDGET_ID_DARK);
    assert_eq!(loader.state(), WidgetLoadState::Loading);
    assert_eq!(registry.injected_widget(), Some(CHAT_WIDGET_ID_DARK));
    assert_eq!(loader.settle(light.token), None);
}

#[test]
fn theme_switch_while_closed_waits_for_open() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Light);
    assert_eq!(
        loader.set_theme(ThemePreference::Dark, &mut registry, false),
        LoadPlan::Idle
    );
    assert_eq!(registry.injected_widget(), None);
    let request = expect_inject(loader.open(&mut registry, false));
    assert_eq!(request.widget_id, CHAT_WIDGET_ID_DARK);
}

#[test]
fn same_theme_is_not_a_switch() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Dark);
    expect_inject(loader.open(&mut registry, false));
    assert_eq!(
        loader.set_theme(ThemePreference::Dark, &mut registry, false),
        LoadPlan::Idle
    );
}

#[test]
fn retry_only_from_error() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Light);
    let request = expect_inject(loader.open(&mut registry, false));
    assert_eq!(loader.retry(&mut registry, false), LoadPlan::Idle);
    loader.script_failed(request.token, &mut registry);
    let retried = expect_inject(loader.retry(&mut registry, false));
    assert_ne!(retried.token, request.token);
    assert_eq!(loader.state(), WidgetLoadState::Loading);
}

#[test]
fn reopen_after_closed_theme_switch_injects_new_widget() {
    let mut registry = EmbedRegistry::new();
    let mut loader = WidgetLoader::new(ThemePreference::Light);
    let light = expect_inject(loader.open(&mut registry, false));
    loader.script_loaded(light.token, &mut registry);
    loader.settle(light.token);
    assert!(registry.is_loaded_for(CHAT_WIDGET_ID_LIGHT));
    loader.close();

    assert_eq!(
        loader.set_theme(ThemePreference::Dark, &mut registry, true),
        LoadPlan::Idle
    );
    let dark = expect_inject(loader.open(&mut registry, true));
    assert_eq!(dark.widget_id, CHAT_WIDGET_ID_DARK);
    assert_eq!(registry.injected_widget(), Some(CHAT_WIDGET_ID_DARK));
    assert!(!registry.is_loaded_for(CHAT_WIDGET_ID_LIGHT));
    assert_eq!(loader.state(), WidgetLoadState::Loading);
}
