use crate::config::CHAT_SCRIPT_URL;
use crate::theme::ThemePreference;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidgetLoadState {
    #[default]
    Loading,
    Loaded,
    Error,
}

/// Identifies one open session of the chat panel. Continuations carrying a
/// token that is no longer live are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

impl SessionToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptRequest {
    pub token: SessionToken,
    pub script_url: &'static str,
    pub widget_id: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPlan {
    Idle,
    /// Script and global handle are already present for this widget.
    Reuse,
    Inject(ScriptRequest),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetNotice {
    Ready,
    Failed,
}

impl WidgetNotice {
    pub fn message(self) -> &'static str {
        match self {
            WidgetNotice::Ready => "Chat assistant is ready.",
            WidgetNotice::Failed => "The chat assistant failed to load. Close the panel and try again.",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, WidgetNotice::Failed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScriptRecord {
    widget_id: &'static str,
    owner: SessionToken,
    loaded: bool,
}

/// Process-wide record of the single injected embed script.
#[derive(Clone, Debug, Default)]
pub struct EmbedRegistry {
    script: Option<ScriptRecord>,
}

impl EmbedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn injected_widget(&self) -> Option<&'static str> {
        self.script.map(|record| record.widget_id)
    }

    pub fn is_loaded_for(&self, widget_id: &str) -> bool {
        self.script
            .map(|record| record.loaded && record.widget_id == widget_id)
            .unwrap_or(false)
    }

    pub fn in_flight(&self) -> Option<SessionToken> {
        self.script
            .filter(|record| !record.loaded)
            .map(|record| record.owner)
    }

    fn claim(&mut self, owner: SessionToken, widget_id: &'static str) {
        self.script = Some(ScriptRecord {
            widget_id,
            owner,
            loaded: false,
        });
    }

    /// Only the session that injected the current script may mark it.
    fn mark_loaded(&mut self, owner: SessionToken) -> bool {
        match self.script.as_mut() {
            Some(record) if record.owner == owner => {
                record.loaded = true;
                true
            }
            _ => false,
        }
    }

    fn forget(&mut self, owner: SessionToken) {
        if self.script.map(|record| record.owner) == Some(owner) {
            self.script = None;
        }
    }
}

/// Load sequence for the third-party chat widget.
#[derive(Clone, Debug)]
pub struct WidgetLoader {
    state: WidgetLoadState,
    theme: ThemePreference,
    open: bool,
    session: u64,
    injected: bool,
}

impl WidgetLoader {
    pub fn new(theme: ThemePreference) -> Self {
        Self {
            state: WidgetLoadState::Loading,
            theme,
            open: false,
            session: 0,
            injected: false,
        }
    }

    pub fn state(&self) -> WidgetLoadState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn widget_id(&self) -> &'static str {
        self.theme.widget_id()
    }

    pub fn token(&self) -> SessionToken {
        SessionToken(self.session)
    }

    pub fn is_live(&self, token: SessionToken) -> bool {
        self.open && token.0 == self.session
    }

    /// Opens a session. Calling it again while open does not inject twice.
    pub fn open(&mut self, registry: &mut EmbedRegistry, handle_present: bool) -> LoadPlan {
        if self.open {
            return LoadPlan::Idle;
        }
        self.open = true;
        self.start_session(registry, handle_present)
    }

    pub fn close(&mut self) {
        self.open = false;
        self.injected = false;
        self.state = WidgetLoadState::Loading;
        self.session = self.session.wrapping_add(1);
    }

    /// Switching theme while open restarts the load with the new widget id.
    pub fn set_theme(
        &mut self,
        theme: ThemePreference,
        registry: &mut EmbedRegistry,
        handle_present: bool,
    ) -> LoadPlan {
        if theme == self.theme {
            return LoadPlan::Idle;
        }
        self.theme = theme;
        if !self.open {
            return LoadPlan::Idle;
        }
        self.start_session(registry, handle_present)
    }

    pub fn retry(&mut self, registry: &mut EmbedRegistry, handle_present: bool) -> LoadPlan {
        if !self.open || self.state != WidgetLoadState::Error {
            return LoadPlan::Idle;
        }
        self.start_session(registry, handle_present)
    }

    fn start_session(&mut self, registry: &mut EmbedRegistry, handle_present: bool) -> LoadPlan {
        self.session = self.session.wrapping_add(1);
        self.state = WidgetLoadState::Loading;
        self.injected = false;
        let widget_id = self.widget_id();
        if handle_present && registry.is_loaded_for(widget_id) {
            self.state = WidgetLoadState::Loaded;
            return LoadPlan::Reuse;
        }
        let token = self.token();
        registry.claim(token, widget_id);
        self.injected = true;
        LoadPlan::Inject(ScriptRequest {
            token,
            script_url: CHAT_SCRIPT_URL,
            widget_id,
        })
    }

    /// Script `load` fired. Returns true when the settle delay should be
    /// scheduled for this token.
    pub fn script_loaded(&mut self, token: SessionToken, registry: &mut EmbedRegistry) -> bool {
        let owned = registry.mark_loaded(token);
        owned && self.is_live(token) && self.injected && self.state == WidgetLoadState::Loading
    }

    pub fn settle(&mut self, token: SessionToken) -> Option<WidgetNotice> {
        if !self.is_live(token) || self.state != WidgetLoadState::Loading {
            return None;
        }
        self.state = WidgetLoadState::Loaded;
        self.injected = false;
        Some(WidgetNotice::Ready)
    }

    pub fn script_failed(
        &mut self,
        token: SessionToken,
        registry: &mut EmbedRegistry,
    ) -> Option<WidgetNotice> {
        registry.forget(token);
        if !self.is_live(token) || self.state != WidgetLoadState::Loading {
            return None;
        }
        self.state = WidgetLoadState::Error;
        self.injected = false;
        Some(WidgetNotice::Failed)
    }
}
