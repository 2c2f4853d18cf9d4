//! Path → route mapping and the access guard in front of every view.

use std::fmt;

use crate::models::capabilities::ADMIN_ACCESS;
use crate::session::SessionStore;

/// Sections of the administration area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSection {
    Users,
    Profiles,
    Repos,
    Modules,
    SystemInfo,
}

impl AdminSection {
    pub const ALL: [AdminSection; 5] = [
        AdminSection::Users,
        AdminSection::Profiles,
        AdminSection::Repos,
        AdminSection::Modules,
        AdminSection::SystemInfo,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            AdminSection::Users => "users",
            AdminSection::Profiles => "profiles",
            AdminSection::Repos => "repos",
            AdminSection::Modules => "modules",
            AdminSection::SystemInfo => "system-info",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdminSection::Users => "Users",
            AdminSection::Profiles => "Profiles",
            AdminSection::Repos => "Repositories",
            AdminSection::Modules => "Modules",
            AdminSection::SystemInfo => "System info",
        }
    }

    fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Dashboard,
    Repos,
    /// `/admin` alone is `Admin(None)`.
    Admin(Option<AdminSection>),
    ResetPassword { uid: String, token: String },
    Shared { link_id: String },
    NotFound,
}

impl Route {
    /// Parse a path such as `/admin/users` or `/reset-password/MQ/abc-123`.
    /// Query strings and trailing slashes are ignored.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["dashboard"] => Route::Dashboard,
            ["repos"] => Route::Repos,
            ["admin"] => Route::Admin(None),
            ["admin", section] => match AdminSection::from_slug(section) {
                Some(section) => Route::Admin(Some(section)),
                None => Route::NotFound,
            },
            ["reset-password", uid, token] => Route::ResetPassword {
                uid: uid.to_string(),
                token: token.to_string(),
            },
            ["shared", link_id] => Route::Shared {
                link_id: link_id.to_string(),
            },
            _ => Route::NotFound,
        }
    }

    /// Reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Route::Login | Route::ResetPassword { .. } | Route::Shared { .. }
        )
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Route::Admin(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => write!(f, "/login"),
            Route::Home => write!(f, "/"),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Repos => write!(f, "/repos"),
            Route::Admin(None) => write!(f, "/admin"),
            Route::Admin(Some(section)) => write!(f, "/admin/{}", section.slug()),
            Route::ResetPassword { uid, token } => write!(f, "/reset-password/{}/{}", uid, token),
            Route::Shared { link_id } => write!(f, "/shared/{}", link_id),
            Route::NotFound => write!(f, "/404"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not settled yet; show a placeholder.
    Loading,
    Redirect(Route),
    Render(Route),
}

/// Decide what happens when `route` is entered. Pure.
pub fn guard(session: &SessionStore, route: Route) -> GuardDecision {
    if session.is_loading() {
        return GuardDecision::Loading;
    }
    if route.is_public() {
        if route == Route::Login && session.is_authenticated() {
            return GuardDecision::Redirect(Route::Home);
        }
        return GuardDecision::Render(route);
    }
    if !session.is_authenticated() {
        return GuardDecision::Redirect(Route::Login);
    }
    if route.is_admin() && !session.has_permission(ADMIN_ACCESS) {
        return GuardDecision::Redirect(Route::Home);
    }
    if route == Route::NotFound {
        return GuardDecision::Redirect(Route::Home);
    }
    GuardDecision::Render(route)
}

/// Follow redirects until a view renders or the session is still loading.
/// Redirect chains are at most two hops, so this always terminates.
pub fn resolve(session: &SessionStore, route: Route) -> GuardDecision {
    let mut decision = guard(session, route);
    for _ in 0..4 {
        match decision {
            GuardDecision::Redirect(next) => decision = guard(session, next),
            settled => return settled,
        }
    }
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn user(admin: bool) -> User {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "email": "ana@archivo.mx",
            "perfil_info": {
                "id": 1,
                "permisos": {"puede_acceder_administracion": admin}
            }
        }))
        .unwrap()
    }

    /// `None` leaves the store loading.
    fn session(admin: Option<bool>) -> SessionStore {
        let mut store = SessionStore::new();
        if let Some(admin) = admin {
            store.login(user(admin));
        }
        store
    }

    async fn anonymous_session() -> SessionStore {
        struct Nobody;
        #[async_trait::async_trait]
        impl crate::auth::IdentityBackend for Nobody {
            async fn current_user(&self) -> crate::errors::ApiResult<Option<User>> {
                Ok(None)
            }
            async fn logout(&self) -> crate::errors::ApiResult<()> {
                Ok(())
            }
        }
        let mut store = SessionStore::new();
        store.initialize(&Nobody).await;
        store
    }

    #[test]
    fn parses_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/login/"), Route::Login);
        assert_eq!(Route::parse("/admin"), Route::Admin(None));
        assert_eq!(
            Route::parse("/admin/system-info"),
            Route::Admin(Some(AdminSection::SystemInfo))
        );
        assert_eq!(
            Route::parse("/reset-password/MQ/abc-123?x=1"),
            Route::ResetPassword {
                uid: "MQ".into(),
                token: "abc-123".into()
            }
        );
        assert_eq!(
            Route::parse("/shared/f00d"),
            Route::Shared {
                link_id: "f00d".into()
            }
        );
        assert_eq!(Route::parse("/admin/nope"), Route::NotFound);
        assert_eq!(Route::parse("/whatever/else"), Route::NotFound);
    }

    #[test]
    fn display_round_trips_known_routes() {
        for path in ["/", "/login", "/dashboard", "/repos", "/admin", "/admin/users"] {
            assert_eq!(Route::parse(path).to_string(), path);
        }
    }

    #[test]
    fn loading_wins_over_everything() {
        let store = session(None);
        assert_eq!(guard(&store, Route::Login), GuardDecision::Loading);
        assert_eq!(guard(&store, Route::Admin(None)), GuardDecision::Loading);
    }

    #[test]
    fn authenticated_visitor_leaves_login() {
        let store = session(Some(false));
        assert_eq!(
            guard(&store, Route::Login),
            GuardDecision::Redirect(Route::Home)
        );
    }

    #[test]
    fn non_admin_is_sent_home_from_admin() {
        let store = session(Some(false));
        assert_eq!(
            guard(&store, Route::Admin(Some(AdminSection::Users))),
            GuardDecision::Redirect(Route::Home)
        );
        assert_eq!(guard(&store, Route::Repos), GuardDecision::Render(Route::Repos));
    }

    #[test]
    fn admin_renders_admin() {
        let store = session(Some(true));
        assert_eq!(
            guard(&store, Route::Admin(None)),
            GuardDecision::Render(Route::Admin(None))
        );
    }

    #[test]
    fn unknown_path_goes_home() {
        let store = session(Some(false));
        assert_eq!(
            guard(&store, Route::parse("/missing")),
            GuardDecision::Redirect(Route::Home)
        );
    }

    #[tokio::test]
    async fn anonymous_is_sent_to_login() {
        let store = anonymous_session().await;
        assert_eq!(
            guard(&store, Route::Dashboard),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(
            guard(&store, Route::parse("/missing")),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(guard(&store, Route::Login), GuardDecision::Render(Route::Login));
        assert_eq!(
            resolve(&store, Route::Admin(None)),
            GuardDecision::Render(Route::Login)
        );
    }
}
