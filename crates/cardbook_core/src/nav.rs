//! Navigable surface and its access rules.
//!
//! # Responsibility
//! - Parse request paths into routes.
//! - Decide, from authentication state alone, whether a route renders or
//!   redirects.
//!
//! # Invariants
//! - `/login` and `/register` render only for anonymous visitors.
//! - Account pages render only for authenticated visitors.
//! - `/profile/:username` renders for everyone; any username may be probed.

/// Landing page for authenticated visitors bounced off the auth pages.
pub const AUTHENTICATED_HOME: &str = "/personal-data";
/// Landing page for authenticated visitors hitting the root path.
pub const DASHBOARD: &str = "/business-cards";
pub const LOGIN: &str = "/login";

const PROFILE_PREFIX: &str = "/profile/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Register,
    PersonalData,
    ProfessionalData,
    BusinessCards,
    CreateCard,
    Gallery,
    EditProfile,
    Profile(String),
    Unknown(String),
}

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    AnonymousOnly,
    AuthenticatedOnly,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    Redirect(&'static str),
}

impl Route {
    /// Parses a path. Query strings and a trailing slash are ignored, and
    /// fixed segments match regardless of ASCII case. The username of a
    /// profile path keeps its case.
    pub fn parse(path: &str) -> Self {
        let without_query = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = without_query.trim_end_matches('/');
        let lowered = trimmed.to_ascii_lowercase();

        match lowered.as_str() {
            "" => Self::Root,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/personal-data" => Self::PersonalData,
            "/professional-data" => Self::ProfessionalData,
            "/business-cards" => Self::BusinessCards,
            "/create-card" => Self::CreateCard,
            "/gallery" => Self::Gallery,
            "/edit-profile" => Self::EditProfile,
            other if other.starts_with(PROFILE_PREFIX) => {
                let username = &trimmed[PROFILE_PREFIX.len()..];
                if username.is_empty() || username.contains('/') {
                    Self::Unknown(path.to_string())
                } else {
                    Self::Profile(username.to_string())
                }
            }
            _ => Self::Unknown(path.to_string()),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Self::Login | Self::Register => Access::AnonymousOnly,
            Self::PersonalData
            | Self::ProfessionalData
            | Self::BusinessCards
            | Self::CreateCard
            | Self::Gallery
            | Self::EditProfile => Access::AuthenticatedOnly,
            Self::Root | Self::Profile(_) | Self::Unknown(_) => Access::Public,
        }
    }
}

/// Applies the access rules for one visit.
pub fn resolve(route: Route, authenticated: bool) -> RouteDecision {
    if route == Route::Root {
        return RouteDecision::Redirect(if authenticated { DASHBOARD } else { LOGIN });
    }

    match (route.access(), authenticated) {
        (Access::AnonymousOnly, true) => RouteDecision::Redirect(AUTHENTICATED_HOME),
        (Access::AuthenticatedOnly, false) => RouteDecision::Redirect(LOGIN),
        _ => RouteDecision::Render(route),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve, Route, RouteDecision};

    #[test]
    fn parse_handles_profiles_and_trailing_slashes() {
        assert_eq!(Route::parse("/"), Route::Root);
        assert_eq!(Route::parse("/gallery/"), Route::Gallery);
        assert_eq!(
            Route::parse("/profile/5550100?ref=qr"),
            Route::Profile("5550100".to_string())
        );
        assert_eq!(
            Route::parse("/profile/"),
            Route::Unknown("/profile/".to_string())
        );
        assert_eq!(
            Route::parse("/nowhere"),
            Route::Unknown("/nowhere".to_string())
        );
    }

    #[test]
    fn parse_ignores_case_of_fixed_segments() {
        assert_eq!(Route::parse("/Gallery"), Route::Gallery);
        assert_eq!(Route::parse("/BUSINESS-CARDS/"), Route::BusinessCards);
        assert_eq!(
            Route::parse("/Profile/AdaK"),
            Route::Profile("AdaK".to_string())
        );
        assert_eq!(
            Route::parse("/Nowhere"),
            Route::Unknown("/Nowhere".to_string())
        );
    }

    #[test]
    fn root_redirect_depends_on_auth_state() {
        assert_eq!(
            resolve(Route::Root, true),
            RouteDecision::Redirect("/business-cards")
        );
        assert_eq!(resolve(Route::Root, false), RouteDecision::Redirect("/login"));
    }

    #[test]
    fn auth_pages_bounce_signed_in_visitors() {
        assert_eq!(
            resolve(Route::Register, true),
            RouteDecision::Redirect("/personal-data")
        );
        assert_eq!(
            resolve(Route::Login, false),
            RouteDecision::Render(Route::Login)
        );
    }

    #[test]
    fn account_pages_require_a_session() {
        for route in [
            Route::PersonalData,
            Route::ProfessionalData,
            Route::BusinessCards,
            Route::CreateCard,
            Route::Gallery,
            Route::EditProfile,
        ] {
            assert_eq!(
                resolve(route.clone(), false),
                RouteDecision::Redirect("/login")
            );
            assert_eq!(resolve(route.clone(), true), RouteDecision::Render(route));
        }
    }

    #[test]
    fn profile_pages_are_public() {
        let route = Route::Profile("doesnotexist".to_string());
        assert_eq!(
            resolve(route.clone(), false),
            RouteDecision::Render(route)
        );
    }
}
