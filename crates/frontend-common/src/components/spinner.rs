//! Loading spinner component

use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub text: Option<String>,
    /// Center in the viewport instead of inline
    #[prop_or_default]
    pub full_screen: bool,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &SpinnerProps) -> Html {
    let container = if props.full_screen {
        "flex flex-col items-center justify-center min-h-screen"
    } else {
        "text-center p-10"
    };

    html! {
        <div class={container} role="status" aria-live="polite">
            <div class="w-10 h-10 border-4 border-gray-200 border-t-indigo-500 rounded-full animate-spin mx-auto mb-4"></div>
            if let Some(text) = &props.text {
                <p class="text-gray-600 text-sm m-0">{text}</p>
            }
        </div>
    }
}
