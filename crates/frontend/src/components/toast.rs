//! Transient login/logout notices

use cms_admin_frontend_common::platform::{Notice, NoticeLevel};
use std::rc::Rc;
use yew::prelude::*;

/// At most this many toasts are kept; older ones are dropped first
const MAX_TOASTS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: usize,
    pub notice: Notice,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastList {
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Push { id: usize, notice: Notice },
    Dismiss(usize),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            ToastAction::Push { id, notice } => {
                let mut toasts = self.toasts.clone();
                toasts.push(Toast { id, notice });
                let overflow = toasts.len().saturating_sub(MAX_TOASTS);
                toasts.drain(..overflow);
                Rc::new(Self { toasts })
            }
            ToastAction::Dismiss(id) => {
                if !self.toasts.iter().any(|toast| toast.id == id) {
                    return self;
                }
                Rc::new(Self {
                    toasts: self
                        .toasts
                        .iter()
                        .filter(|toast| toast.id != id)
                        .cloned()
                        .collect(),
                })
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: ToastList,
    pub on_dismiss: Callback<usize>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="fixed top-4 right-4 z-50 space-y-2">
            { for props.toasts.toasts.iter().map(|toast| {
                let class = match toast.notice.level {
                    NoticeLevel::Success => "bg-green-600",
                    NoticeLevel::Error => "bg-red-600",
                };
                let on_click = {
                    let id = toast.id;
                    props.on_dismiss.reform(move |_: MouseEvent| id)
                };
                html! {
                    <div key={toast.id} class={classes!("text-white", "rounded-lg", "shadow", "px-4", "py-3", class)}>
                        <span class="mr-4">{ &toast.notice.message }</span>
                        <button class="opacity-75 hover:opacity-100" onclick={on_click}>{"×"}</button>
                    </div>
                }
            }) }
        </div>
    }
}
