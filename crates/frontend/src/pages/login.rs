use crate::app::Route;
use cms_admin_frontend_common::{RequireUnauthenticated, use_session};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Values typed into the login form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

/// Guest-only login route.
///
/// The form values live here, above the guard, so they survive the guard
/// swapping the form for a spinner while a login is pending.
#[function_component(LoginRoute)]
pub fn login_route() -> Html {
    let form = use_state(LoginForm::default);

    html! {
        <RequireUnauthenticated<Route> default_route={Route::Dashboard}>
            <Login form={form} />
        </RequireUnauthenticated<Route>>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    pub form: UseStateHandle<LoginForm>,
}

#[function_component(Login)]
pub fn login(props: &LoginProps) -> Html {
    let session = use_session();
    let form = props.form.clone();

    let on_email_input = {
        let form = form.clone();
        let session = session.session.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(LoginForm {
                email: input.value(),
                ..(*form).clone()
            });
            if session.state().error.is_some() {
                session.clear_error();
            }
        })
    };

    let on_password_input = {
        let form = form.clone();
        let session = session.session.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(LoginForm {
                password: input.value(),
                ..(*form).clone()
            });
            if session.state().error.is_some() {
                session.clear_error();
            }
        })
    };

    let on_submit = {
        let form = form.clone();
        let session = session.session.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let session = session.clone();
            let email = form.email.trim().to_string();
            let password = form.password.clone();
            wasm_bindgen_futures::spawn_local(async move {
                // Outcome is already reflected in session state and notices
                let _ = session.login(&email, &password).await;
            });
        })
    };

    let is_loading = session.state.is_loading;
    let can_submit = !is_loading && form.is_complete();

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100">
            <form class="w-full max-w-sm bg-white rounded-xl shadow p-8 space-y-4" onsubmit={on_submit}>
                <h1 class="text-2xl font-semibold text-gray-800 text-center">{"Admin Sign In"}</h1>

                if let Some(error) = &session.state.error {
                    <div class="bg-red-50 border border-red-200 rounded-lg p-3 text-center">
                        <p class="text-red-700 text-sm">{error}</p>
                    </div>
                }

                <input
                    type="email"
                    class="w-full px-4 py-3 border border-gray-300 rounded-lg focus:outline-none focus:border-indigo-500"
                    placeholder="Email"
                    autocomplete="username"
                    value={form.email.clone()}
                    oninput={on_email_input}
                />
                <input
                    type="password"
                    class="w-full px-4 py-3 border border-gray-300 rounded-lg focus:outline-none focus:border-indigo-500"
                    placeholder="Password"
                    autocomplete="current-password"
                    value={form.password.clone()}
                    oninput={on_password_input}
                />
                <button
                    type="submit"
                    class="w-full px-4 py-3 bg-indigo-600 hover:bg-indigo-700 text-white rounded-lg font-medium transition-all disabled:opacity-50 disabled:cursor-not-allowed"
                    disabled={!can_submit}
                >
                    { if is_loading { "Signing in..." } else { "Sign In" } }
                </button>
            </form>
        </div>
    }
}
