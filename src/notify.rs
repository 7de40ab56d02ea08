use std::rc::Rc;

use gloo::timers::callback::Timeout;
use yew::prelude::*;

const TOAST_TTL_MS: u32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Toast {
    id: u64,
    kind: ToastKind,
    message: AttrValue,
}

#[derive(Clone, Default, PartialEq)]
struct ToastList {
    next_id: u64,
    items: Vec<Toast>,
}

enum ToastAction {
    Push(ToastKind, AttrValue),
    Dismiss(u64),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(kind, message) => {
                let id = next.next_id;
                next.next_id = next.next_id.wrapping_add(1);
                next.items.push(Toast { id, kind, message });
            }
            ToastAction::Dismiss(id) => {
                next.items.retain(|toast| toast.id != id);
            }
        }
        Rc::new(next)
    }
}

/// Handle for raising notifications from any component.
#[derive(Clone, PartialEq)]
pub(crate) struct Notifier {
    list: UseReducerDispatcher<ToastList>,
}

impl Notifier {
    pub(crate) fn success(&self, message: impl Into<AttrValue>) {
        self.push(ToastKind::Success, message.into());
    }

    pub(crate) fn error(&self, message: impl Into<AttrValue>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: AttrValue) {
        self.list.dispatch(ToastAction::Push(kind, message));
    }
}

#[hook]
pub(crate) fn use_notifier() -> Option<Notifier> {
    use_context::<Notifier>()
}

#[derive(Properties, PartialEq)]
pub(crate) struct ToastProviderProps {
    pub(crate) children: Html,
}

#[function_component(ToastProvider)]
pub(crate) fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);
    let notifier = Notifier {
        list: list.dispatcher(),
    };

    let toasts = list.items.iter().map(|toast| {
        let class = match toast.kind {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        };
        html! {
            <ToastItem key={toast.id} id={toast.id} variant={class} message={toast.message.clone()}
                dispatcher={list.dispatcher()} />
        }
    });

    html! {
        <ContextProvider<Notifier> context={notifier}>
            { props.children.clone() }
            <div class="toast-stack" role="status" aria-live="polite">
                { for toasts }
            </div>
        </ContextProvider<Notifier>>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    id: u64,
    variant: &'static str,
    message: AttrValue,
    dispatcher: UseReducerDispatcher<ToastList>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    {
        let id = props.id;
        let dispatcher = props.dispatcher.clone();
        use_effect_with(id, move |id| {
            let id = *id;
            let timeout = Timeout::new(TOAST_TTL_MS, move || {
                dispatcher.dispatch(ToastAction::Dismiss(id));
            });
            move || drop(timeout)
        });
    }
    let on_dismiss = {
        let id = props.id;
        let dispatcher = props.dispatcher.clone();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };
    html! {
        <div class={props.variant}>
            <span>{ props.message.clone() }</span>
            <button type="button" class="toast-close" aria-label="Dismiss" onclick={on_dismiss}>
                { "×" }
            </button>
        </div>
    }
}
