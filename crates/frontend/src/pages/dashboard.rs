use cms_admin_frontend_common::use_session;
use yew::prelude::*;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let session = use_session();

    let on_logout = {
        let session = session.session.clone();
        Callback::from(move |_: MouseEvent| {
            let session = session.clone();
            wasm_bindgen_futures::spawn_local(async move {
                session.logout().await;
            });
        })
    };

    let Some(user) = &session.state.user else {
        return html! {};
    };

    html! {
        <div class="min-h-screen bg-gray-100">
            <header class="flex items-center justify-between bg-white shadow px-6 py-4">
                <h1 class="text-xl font-semibold text-gray-800">{"Dashboard"}</h1>
                <div class="flex items-center gap-4">
                    <span class="text-sm text-gray-600">{ user.display_name() }</span>
                    <button
                        class="px-3 py-2 text-sm bg-gray-200 hover:bg-gray-300 rounded-lg disabled:opacity-50"
                        onclick={on_logout}
                        disabled={session.state.is_loading}
                    >
                        {"Log out"}
                    </button>
                </div>
            </header>
            <main class="p-6">
                <div class="bg-white rounded-xl shadow p-6 max-w-md space-y-2">
                    <p class="text-gray-800">{"Signed in as "}<strong>{ &user.email }</strong></p>
                    <p class="text-sm text-gray-600">{"Role: "}{ &user.role }</p>
                    if !user.is_email_verified {
                        <p class="text-sm text-amber-600">{"Email address not verified"}</p>
                    }
                </div>
            </main>
        </div>
    }
}
