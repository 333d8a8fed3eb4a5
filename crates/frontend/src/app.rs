use crate::components::{ToastAction, ToastList, ToastStack};
use crate::pages::{Dashboard, LoginRoute};
use cms_admin_frontend_common::platform::Notice;
use cms_admin_frontend_common::{RequireAuthenticated, SessionProvider};
use gloo::timers::callback::Timeout;
use yew::prelude::*;
use yew_router::prelude::*;

/// How long a toast stays on screen
const TOAST_LIFETIME_MS: u32 = 4_000;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::Login => html! { <LoginRoute /> },
        Route::Dashboard => html! {
            <RequireAuthenticated<Route> login={Route::Login}>
                <Dashboard />
            </RequireAuthenticated<Route>>
        },
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center text-gray-600">
                {"Page not found"}
            </div>
        },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let toasts = use_reducer(ToastList::default);
    let next_toast_id = use_mut_ref(|| 0_usize);

    let notify = {
        let toasts = toasts.clone();
        use_callback((), move |notice: Notice, _| {
            let id = {
                let mut next = next_toast_id.borrow_mut();
                *next += 1;
                *next
            };
            toasts.dispatch(ToastAction::Push { id, notice });

            let toasts = toasts.clone();
            Timeout::new(TOAST_LIFETIME_MS, move || {
                toasts.dispatch(ToastAction::Dismiss(id));
            })
            .forget();
        })
    };

    let on_dismiss = {
        let toasts = toasts.clone();
        use_callback((), move |id: usize, _| toasts.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <BrowserRouter>
            <SessionProvider notify={notify}>
                <ToastStack toasts={(*toasts).clone()} on_dismiss={on_dismiss} />
                <Switch<Route> render={switch} />
            </SessionProvider>
        </BrowserRouter>
    }
}
