//! Request/response interception for session-aware clients
//!
//! The interceptor is the seam between the HTTP client and whatever owns the
//! session: it supplies the bearer token for outbound requests and is told
//! about unauthorized responses from auth-scoped endpoints.

use std::fmt;
use std::rc::Rc;

/// Path segments whose 401 responses are trusted as session invalidation
pub const AUTH_SCOPED_SEGMENTS: &[&str] = &["auth", "profile"];

/// Whether a 401 on `path` should end the session
pub fn is_auth_scoped(path: &str) -> bool {
    path.split('/')
        .any(|segment| AUTH_SCOPED_SEGMENTS.contains(&segment))
}

/// Hooks installed on an [`AdminClient`](super::AdminClient)
#[derive(Clone)]
pub struct Interceptor {
    token: Rc<dyn Fn() -> Option<String>>,
    on_unauthorized: Rc<dyn Fn(&str)>,
}

impl Interceptor {
    /// Create an interceptor from a current-token accessor and an unauthorized hook.
    ///
    /// The accessor is called for every request, so a token that changes while
    /// other requests are in flight is picked up by the next one.
    pub fn new(
        token: impl Fn() -> Option<String> + 'static,
        on_unauthorized: impl Fn(&str) + 'static,
    ) -> Self {
        Self {
            token: Rc::new(token),
            on_unauthorized: Rc::new(on_unauthorized),
        }
    }

    /// Current bearer token, if any
    pub fn current_token(&self) -> Option<String> {
        (self.token)()
    }

    /// Inspect a failed response; fires the hook for 401s on auth-scoped paths
    pub fn inspect_failure(&self, status: u16, path: &str) -> bool {
        if status != 401 {
            return false;
        }
        if !is_auth_scoped(path) {
            tracing::debug!(path, "Unauthorized response outside auth scope; passing through");
            return false;
        }

        (self.on_unauthorized)(path);
        true
    }
}

impl fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_auth_scoped_paths() {
        assert!(is_auth_scoped("/api/auth/profile"));
        assert!(is_auth_scoped("/api/auth/logout"));
        assert!(is_auth_scoped("/api/admin/profile"));
        assert!(!is_auth_scoped("/api/blogs"));
        assert!(!is_auth_scoped("/api/authors"));
        assert!(!is_auth_scoped("/api/profiles-export"));
    }

    #[test]
    fn test_hook_fires_only_for_scoped_401() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let interceptor = {
            let seen = seen.clone();
            Interceptor::new(|| None, move |path| seen.borrow_mut().push(path.to_string()))
        };

        assert!(!interceptor.inspect_failure(500, "/api/auth/profile"));
        assert!(!interceptor.inspect_failure(401, "/api/jobs"));
        assert!(interceptor.inspect_failure(401, "/api/auth/profile"));

        assert_eq!(*seen.borrow(), vec!["/api/auth/profile".to_string()]);
    }

    #[test]
    fn test_token_accessor_is_read_each_time() {
        let token = Rc::new(RefCell::new(None::<String>));
        let interceptor = {
            let token = token.clone();
            Interceptor::new(move || token.borrow().clone(), |_| {})
        };

        assert_eq!(interceptor.current_token(), None);
        *token.borrow_mut() = Some("rotated".into());
        assert_eq!(interceptor.current_token().as_deref(), Some("rotated"));
    }
}
