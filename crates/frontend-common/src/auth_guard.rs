//! Route guards for protected and guest-only pages

use crate::auth::{SessionPhase, SessionState, use_session};
use crate::components::Spinner;
use serde::{Deserialize, Serialize};
use yew::prelude::*;
use yew_router::prelude::*;

/// Location a visitor tried to reach before being sent to log in
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousLocation {
    pub pathname: String,
}

/// History state attached to guard redirects
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectState {
    pub from: Option<PreviousLocation>,
}

impl RedirectState {
    pub fn from_path(pathname: impl Into<String>) -> Self {
        Self {
            from: Some(PreviousLocation {
                pathname: pathname.into(),
            }),
        }
    }

    fn return_path(&self) -> Option<&str> {
        self.from.as_ref().map(|from| from.pathname.as_str())
    }
}

/// What a guard should do with the current session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session still resolving; show a placeholder and do not redirect
    Pending,
    Render,
    /// Replace the current history entry with `to`
    Redirect {
        to: String,
        state: Option<RedirectState>,
    },
}

/// Decision for a page that needs a signed-in user
pub fn guard_authenticated(
    session: &SessionState,
    current_path: &str,
    login_path: &str,
) -> GuardOutcome {
    match session.phase() {
        SessionPhase::Loading => GuardOutcome::Pending,
        SessionPhase::Authenticated => GuardOutcome::Render,
        SessionPhase::Unauthenticated => GuardOutcome::Redirect {
            to: login_path.to_string(),
            state: Some(RedirectState::from_path(current_path)),
        },
    }
}

/// Decision for a page only guests should see (the login screen)
pub fn guard_unauthenticated(
    session: &SessionState,
    navigation_state: Option<&RedirectState>,
    default_path: &str,
) -> GuardOutcome {
    match session.phase() {
        SessionPhase::Loading => GuardOutcome::Pending,
        SessionPhase::Unauthenticated => GuardOutcome::Render,
        SessionPhase::Authenticated => GuardOutcome::Redirect {
            to: navigation_state
                .and_then(RedirectState::return_path)
                .unwrap_or(default_path)
                .to_string(),
            state: None,
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct RequireAuthenticatedProps<R: Routable> {
    /// Route of the login screen
    pub login: R,
    pub children: Children,
}

/// Renders its children only for signed-in users
#[function_component(RequireAuthenticated)]
pub fn require_authenticated<R>(props: &RequireAuthenticatedProps<R>) -> Html
where
    R: Routable + 'static,
{
    let session = use_session();
    let navigator = use_navigator();
    let location = use_location();

    let current_path = location
        .as_ref()
        .map(|location| location.path().to_string())
        .unwrap_or_default();
    let outcome = guard_authenticated(&session.state, &current_path, &props.login.to_path());

    {
        let login = props.login.clone();
        use_effect_with(outcome.clone(), move |outcome| {
            if let (GuardOutcome::Redirect { state, .. }, Some(navigator)) = (outcome, navigator) {
                navigator.replace_with_state(&login, state.clone().unwrap_or_default());
            }
        });
    }

    render_outcome(&outcome, "Checking authentication...", &props.children)
}

#[derive(Properties, PartialEq)]
pub struct RequireUnauthenticatedProps<R: Routable> {
    /// Where signed-in visitors go when no return path was remembered
    pub default_route: R,
    pub children: Children,
}

/// Renders its children only for guests; signed-in users are sent onwards
#[function_component(RequireUnauthenticated)]
pub fn require_unauthenticated<R>(props: &RequireUnauthenticatedProps<R>) -> Html
where
    R: Routable + 'static,
{
    let session = use_session();
    let navigator = use_navigator();
    let location = use_location();

    let navigation_state = location
        .as_ref()
        .and_then(|location| location.state::<RedirectState>());
    let outcome = guard_unauthenticated(
        &session.state,
        navigation_state.as_deref(),
        &props.default_route.to_path(),
    );

    {
        let default_route = props.default_route.clone();
        use_effect_with(outcome.clone(), move |outcome| {
            if let (GuardOutcome::Redirect { to, .. }, Some(navigator)) = (outcome, navigator) {
                let target = R::recognize(to).unwrap_or(default_route);
                navigator.replace(&target);
            }
        });
    }

    render_outcome(&outcome, "Loading...", &props.children)
}

fn render_outcome(outcome: &GuardOutcome, loading_text: &str, children: &Children) -> Html {
    match outcome {
        GuardOutcome::Pending => html! {
            <Spinner text={Some(loading_text.to_string())} full_screen=true />
        },
        GuardOutcome::Render => html! { <>{ children.clone() }</> },
        GuardOutcome::Redirect { .. } => html! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionAction;
    use cms_admin_http::types::AdminUser;

    fn signed_in() -> SessionState {
        SessionState::default().apply(SessionAction::LoginFulfilled {
            user: AdminUser {
                id: "u1".into(),
                first_name: "Ada".into(),
                last_name: String::new(),
                email: "ada@example.com".into(),
                role: "admin".into(),
                is_email_verified: true,
                is_two_factor_verified: false,
                is_active: true,
            },
            token: "tok".into(),
        })
    }

    fn loading() -> SessionState {
        SessionState::default().apply(SessionAction::SilentCheckPending)
    }

    #[test]
    fn test_protected_page_redirects_guests_with_return_path() {
        let outcome = guard_authenticated(&SessionState::default(), "/blogs/edit/7", "/login");

        assert_eq!(
            outcome,
            GuardOutcome::Redirect {
                to: "/login".into(),
                state: Some(RedirectState::from_path("/blogs/edit/7")),
            }
        );
    }

    #[test]
    fn test_protected_page_renders_for_signed_in_user() {
        assert_eq!(
            guard_authenticated(&signed_in(), "/dashboard", "/login"),
            GuardOutcome::Render
        );
    }

    #[test]
    fn test_loading_never_redirects() {
        assert_eq!(
            guard_authenticated(&loading(), "/dashboard", "/login"),
            GuardOutcome::Pending
        );
        assert_eq!(
            guard_unauthenticated(&loading(), None, "/dashboard"),
            GuardOutcome::Pending
        );

        // A loading signed-in session (e.g. logging out) is still loading
        let logging_out = signed_in().apply(SessionAction::LogoutPending);
        assert_eq!(
            guard_authenticated(&logging_out, "/dashboard", "/login"),
            GuardOutcome::Pending
        );
    }

    #[test]
    fn test_guest_page_honors_return_path() {
        let state = RedirectState::from_path("/careers");
        assert_eq!(
            guard_unauthenticated(&signed_in(), Some(&state), "/dashboard"),
            GuardOutcome::Redirect {
                to: "/careers".into(),
                state: None,
            }
        );
    }

    #[test]
    fn test_guest_page_falls_back_to_default() {
        assert_eq!(
            guard_unauthenticated(&signed_in(), None, "/dashboard"),
            GuardOutcome::Redirect {
                to: "/dashboard".into(),
                state: None,
            }
        );
        assert_eq!(
            guard_unauthenticated(&signed_in(), Some(&RedirectState::default()), "/dashboard"),
            GuardOutcome::Redirect {
                to: "/dashboard".into(),
                state: None,
            }
        );
    }

    #[test]
    fn test_guest_page_renders_for_guests() {
        assert_eq!(
            guard_unauthenticated(&SessionState::default(), None, "/dashboard"),
            GuardOutcome::Render
        );
    }

    #[test]
    fn test_redirect_state_shape() {
        let value = serde_json::to_value(RedirectState::from_path("/faqs")).unwrap();
        assert_eq!(value, serde_json::json!({"from": {"pathname": "/faqs"}}));
    }
}
