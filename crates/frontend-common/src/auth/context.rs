//! Global session context and provider

use super::session::Session;
use super::state::SessionState;
use crate::config::SessionConfig;
use crate::platform::{Notice, log_notices};
use std::rc::Rc;
use yew::prelude::*;

/// What components see: the session handle plus the state it rendered with
#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub session: Session,
    pub state: Rc<SessionState>,
}

/// Session provider props
#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
    /// Receives login/logout notices; defaults to logging
    #[prop_or_default]
    pub notify: Option<Callback<Notice>>,
    /// Pre-built session, mainly for tests and embedding; defaults to a browser session
    #[prop_or_default]
    pub session: Option<Session>,
}

/// Session provider component
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = {
        let provided = props.session.clone();
        let notify = props.notify.clone().unwrap_or_else(log_notices);
        use_memo((), move |_| match provided {
            Some(session) => Ok(session),
            None => Session::browser(SessionConfig::from_browser(), notify)
                .map_err(|error| error.to_string()),
        })
    };

    match &*session {
        Ok(session) => html! {
            <SessionHost session={session.clone()}>
                { props.children.clone() }
            </SessionHost>
        },
        Err(error) => {
            tracing::error!(%error, "Failed to initialise session");
            html! {
                <div class="p-6 text-red-700">{ format!("Unable to start: {error}") }</div>
            }
        }
    }
}

#[derive(Properties, PartialEq)]
struct SessionHostProps {
    session: Session,
    children: Children,
}

#[function_component(SessionHost)]
fn session_host(props: &SessionHostProps) -> Html {
    let snapshot = use_state(|| props.session.state());

    // Mirror store changes into render state, then run the startup check
    {
        let snapshot = snapshot.clone();
        use_effect_with(props.session.clone(), move |session| {
            let subscription = session
                .store()
                .subscribe(Callback::from(move |state: Rc<SessionState>| {
                    snapshot.set(state);
                }));
            session.bootstrap();

            move || drop(subscription)
        });
    }

    let context = SessionContext {
        session: props.session.clone(),
        state: (*snapshot).clone(),
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            { props.children.clone() }
        </ContextProvider<SessionContext>>
    }
}

/// Hook to use the session context
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("SessionContext not found. Make sure to wrap your component with SessionProvider")
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    use_session().state.is_authenticated
}
