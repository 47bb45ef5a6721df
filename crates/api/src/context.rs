use hotelbook_auth::User;
use hotelbook_bookings::RequestScope;

/// Per-request state threaded from the transport through middleware to the
/// endpoints.
///
/// The transport fills in the scope and the raw bearer token; the
/// authorization middleware adds the identity. Immutable once built: each
/// stage produces a new value.
#[derive(Clone, Default)]
pub struct RequestContext {
    scope: RequestScope,
    bearer_token: Option<String>,
    identity: Option<User>,
}

impl RequestContext {
    pub fn new(scope: RequestScope) -> Self {
        Self {
            scope,
            bearer_token: None,
            identity: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_identity(mut self, user: User) -> Self {
        self.identity = Some(user);
        self
    }

    pub fn scope(&self) -> &RequestScope {
        &self.scope
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Authenticated caller, if the authorization middleware ran and succeeded.
    pub fn identity(&self) -> Option<&User> {
        self.identity.as_ref()
    }
}

impl core::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RequestContext")
            .field("scope", &self.scope)
            .field("has_bearer_token", &self.bearer_token.is_some())
            .field("identity", &self.identity)
            .finish()
    }
}
