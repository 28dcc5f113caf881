//! Request resolution core.
//!
//! Maps an inbound deep-link request to a terminal [`Decision`]: resolve the
//! caller's session, look up the deep-link configuration, evaluate the
//! guest/SSO access policy, resolve the optional object argument, and record
//! the pending link. Every failure folds into a decision; nothing propagates
//! to the transport layer as an error.

use std::sync::Arc;

use tracing::{debug, error, trace};

use crate::domain::entities::{DeepLink, Session};
use crate::domain::repositories::{
    DeepLinkRepository, ObjectRepository, PendingLinkRepository, SessionStore,
};
use crate::domain::Decision;
use crate::utils::request_parser::{self, ParsedRequest};

use super::PendingLinkService;

/// Process-wide access policy, read once at startup.
///
/// Replaces what would otherwise be global configuration state; constructed
/// from [`crate::config::Config`] and passed into the resolver.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    /// When false, requests without a session are served the login page
    /// before anything else happens.
    pub guest_login_enabled: bool,
    /// Whether an SSO handler is configured for routing anonymous users.
    pub sso_configured: bool,
}

/// The outcome of resolving one request.
#[derive(Debug)]
pub struct Resolution {
    pub decision: Decision,
    /// Set when a fresh guest session was created for this request; the
    /// transport adapter turns it into a session cookie.
    pub guest_session: Option<Session>,
}

impl Resolution {
    fn terminal(decision: Decision) -> Self {
        Self {
            decision,
            guest_session: None,
        }
    }
}

/// What the access-policy table decides for an anonymous caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Proceed,
    Login,
    Sso,
}

/// Evaluates the guest/SSO access policy.
///
/// Authenticated sessions always proceed. Anonymous sessions are served the
/// login page when the deep link disallows guests; otherwise they are routed
/// through the SSO handler unless they are already returning from it (the
/// `sso_callback` marker) or no handler is configured.
fn evaluate_access(
    is_anonymous: bool,
    allow_guests: bool,
    sso_configured: bool,
    sso_callback_present: bool,
) -> Access {
    if !is_anonymous {
        return Access::Proceed;
    }
    if !allow_guests {
        return Access::Login;
    }
    if sso_configured && !sso_callback_present {
        return Access::Sso;
    }
    Access::Proceed
}

/// Returns true when the query string carries the `sso_callback` marker
/// parameter, with or without a value.
fn has_sso_callback(query_string: &str) -> bool {
    url::form_urlencoded::parse(query_string.as_bytes()).any(|(key, _)| key == "sso_callback")
}

/// The request-resolution core.
///
/// One synchronous pass per request: every external call is awaited in order
/// and none are retried. The service holds no per-request state and is shared
/// across the transport's worker tasks.
pub struct ResolverService<D, O, P, S>
where
    D: DeepLinkRepository,
    O: ObjectRepository,
    P: PendingLinkRepository,
    S: SessionStore,
{
    deep_links: Arc<D>,
    objects: Arc<O>,
    sessions: Arc<S>,
    pending_links: PendingLinkService<P>,
    policy: AccessPolicy,
}

impl<D, O, P, S> ResolverService<D, O, P, S>
where
    D: DeepLinkRepository,
    O: ObjectRepository,
    P: PendingLinkRepository,
    S: SessionStore,
{
    pub fn new(
        deep_links: Arc<D>,
        objects: Arc<O>,
        sessions: Arc<S>,
        pending_links: PendingLinkService<P>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            deep_links,
            objects,
            sessions,
            pending_links,
            policy,
        }
    }

    /// Resolves one inbound request into a terminal decision.
    ///
    /// `path` is relative to the handler's mount point; `session_id` is the
    /// value of the session cookie, when present.
    ///
    /// The session is resolved before the deep-link name is validated, so the
    /// login page can be served without ever touching the registry.
    pub async fn resolve(
        &self,
        path: &str,
        query: Option<&str>,
        session_id: Option<&str>,
    ) -> Resolution {
        let request = request_parser::parse(path, query);

        let inbound = match self.lookup_inbound_session(session_id).await {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, "session lookup failed");
                return Resolution::terminal(Decision::Serve404);
            }
        };

        let (session, guest_session) = match inbound {
            Some(session) => (session, None),
            None if !self.policy.guest_login_enabled => {
                // No session and no anonymous users allowed: straight to login.
                return Resolution::terminal(Decision::ServeLogin);
            }
            None => match self.sessions.create_guest().await {
                Ok(session) => (session.clone(), Some(session)),
                Err(e) => {
                    error!(error = %e, "guest session creation failed");
                    return Resolution::terminal(Decision::Serve404);
                }
            },
        };

        let decision = self.resolve_with_session(&request, &session).await;

        Resolution {
            decision,
            guest_session,
        }
    }

    async fn lookup_inbound_session(
        &self,
        session_id: Option<&str>,
    ) -> Result<Option<Session>, crate::error::AppError> {
        match session_id {
            Some(id) => self.sessions.find(id).await,
            None => Ok(None),
        }
    }

    async fn resolve_with_session(&self, request: &ParsedRequest, session: &Session) -> Decision {
        if request.deeplink_name.is_empty() {
            return Decision::Serve404;
        }

        let config = match self.lookup_configuration(&request.deeplink_name).await {
            Some(config) => config,
            None => return Decision::Serve404,
        };

        trace!(
            deep_link = %config.name,
            session = %session.id,
            "handling deep link with existing session"
        );

        match evaluate_access(
            session.is_anonymous,
            config.allow_guests,
            self.policy.sso_configured,
            has_sso_callback(&request.query_string),
        ) {
            Access::Login => return Decision::ServeLogin,
            Access::Sso => return Decision::ServeSso,
            Access::Proceed => {}
        }

        let object_argument_id = if config.has_object_argument() {
            match self.resolve_object_argument(&config, request).await {
                Some(id) => Some(id),
                None => return Decision::Serve404,
            }
        } else {
            None
        };

        match self
            .pending_links
            .replace(&config, session, request, object_argument_id)
            .await
        {
            Ok(_) => Decision::ServeIndex(config.index_page),
            Err(_) => Decision::Serve404,
        }
    }

    /// Looks up the deep-link configuration by name.
    ///
    /// Exactly one match is success. Zero and more-than-one are both treated
    /// as "not found": ambiguous configuration is an operator error worth a
    /// diagnostic, not a fault.
    async fn lookup_configuration(&self, name: &str) -> Option<DeepLink> {
        let mut matches = match self.deep_links.find_by_name(name).await {
            Ok(matches) => matches,
            Err(e) => {
                error!(deep_link = %name, error = %e, "deep link lookup failed");
                return None;
            }
        };

        if matches.len() != 1 {
            debug!(
                deep_link = %name,
                count = matches.len(),
                "deep link name is not configured exactly once"
            );
            return None;
        }

        Some(matches.remove(0))
    }

    /// Resolves the path argument to a persisted object identifier.
    ///
    /// Exactly one match is success; zero or multiple abort the request.
    async fn resolve_object_argument(
        &self,
        config: &DeepLink,
        request: &ParsedRequest,
    ) -> Option<i64> {
        // has_object_argument() was checked by the caller.
        let object_type = config.object_type.as_deref()?;
        let object_attribute = config.object_attribute.as_deref()?;
        let value = request.path_argument.as_deref().unwrap_or("");

        let ids = match self
            .objects
            .find_ids_by_attribute(object_type, object_attribute, value)
            .await
        {
            Ok(ids) => ids,
            Err(e) => {
                error!(
                    deep_link = %config.name,
                    object_type,
                    error = %e,
                    "object lookup failed"
                );
                return None;
            }
        };

        if ids.len() == 1 {
            Some(ids[0])
        } else {
            debug!(
                deep_link = %config.name,
                object_type,
                object_attribute,
                value,
                count = ids.len(),
                "object argument did not resolve to exactly one record"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NewPendingLink, PendingLink};
    use crate::domain::repositories::{
        MockDeepLinkRepository, MockObjectRepository, MockPendingLinkRepository, MockSessionStore,
    };
    use chrono::Utc;

    type TestResolver = ResolverService<
        MockDeepLinkRepository,
        MockObjectRepository,
        MockPendingLinkRepository,
        MockSessionStore,
    >;

    struct Mocks {
        deep_links: MockDeepLinkRepository,
        objects: MockObjectRepository,
        sessions: MockSessionStore,
        pending_links: MockPendingLinkRepository,
        policy: AccessPolicy,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                deep_links: MockDeepLinkRepository::new(),
                objects: MockObjectRepository::new(),
                sessions: MockSessionStore::new(),
                pending_links: MockPendingLinkRepository::new(),
                policy: AccessPolicy {
                    guest_login_enabled: true,
                    sso_configured: false,
                },
            }
        }

        fn build(self) -> TestResolver {
            ResolverService::new(
                Arc::new(self.deep_links),
                Arc::new(self.objects),
                Arc::new(self.sessions),
                PendingLinkService::new(Arc::new(self.pending_links)),
                self.policy,
            )
        }
    }

    fn welcome_config() -> DeepLink {
        DeepLink {
            id: 1,
            name: "welcome".to_string(),
            allow_guests: true,
            use_string_argument: false,
            separate_get_parameters: false,
            object_type: None,
            object_attribute: None,
            index_page: "index.html".to_string(),
        }
    }

    fn invoice_config() -> DeepLink {
        DeepLink {
            id: 2,
            name: "invoice".to_string(),
            allow_guests: true,
            use_string_argument: false,
            separate_get_parameters: false,
            object_type: Some("Invoice".to_string()),
            object_attribute: Some("Number".to_string()),
            index_page: "invoice.html".to_string(),
        }
    }

    fn authenticated_session() -> Session {
        Session::new("sess-auth", "alice", false)
    }

    fn guest_session() -> Session {
        Session::new("sess-guest", "guest-a1b2c3d4", true)
    }

    fn persisted(new_link: &NewPendingLink) -> PendingLink {
        PendingLink {
            id: 1,
            deep_link_id: new_link.deep_link_id,
            user_name: new_link.user_name.clone(),
            string_argument: new_link.string_argument.clone(),
            object_argument_id: new_link.object_argument_id,
            session_id: new_link.session_id.clone(),
            created_at: Utc::now(),
        }
    }

    fn expect_session(mocks: &mut Mocks, session: Session) {
        mocks
            .sessions
            .expect_find()
            .returning(move |_| Ok(Some(session.clone())));
    }

    fn expect_pending_link_written(mocks: &mut Mocks) {
        mocks.pending_links.expect_delete_for().returning(|_, _| Ok(0));
        mocks
            .pending_links
            .expect_create()
            .returning(|new_link| Ok(persisted(&new_link)));
    }

    // ── Access policy decision table ────────────────────────────────────────

    #[test]
    fn test_access_policy_decision_table() {
        // (is_anonymous, allow_guests, sso_configured, sso_callback) → decision
        let cases = [
            (false, false, false, false, Access::Proceed),
            (false, true, true, true, Access::Proceed),
            (true, false, false, false, Access::Login),
            (true, false, true, true, Access::Login),
            (true, true, true, false, Access::Sso),
            (true, true, true, true, Access::Proceed),
            (true, true, false, false, Access::Proceed),
            (true, true, false, true, Access::Proceed),
        ];

        for (anonymous, guests, sso, callback, expected) in cases {
            assert_eq!(
                evaluate_access(anonymous, guests, sso, callback),
                expected,
                "anonymous={anonymous} guests={guests} sso={sso} callback={callback}"
            );
        }
    }

    #[test]
    fn test_sso_callback_marker_detection() {
        assert!(has_sso_callback("sso_callback=1"));
        assert!(has_sso_callback("sso_callback"));
        assert!(has_sso_callback("a=b&sso_callback=&c=d"));
        assert!(!has_sso_callback(""));
        assert!(!has_sso_callback("a=b"));
        assert!(!has_sso_callback("not_sso_callback=1"));
    }

    // ── Session resolution ──────────────────────────────────────────────────

    #[tokio::test]
    async fn test_no_session_and_guest_login_disabled_serves_login_before_registry() {
        let mut mocks = Mocks::new();
        mocks.policy.guest_login_enabled = false;

        // The registry must be observably unreached.
        mocks.deep_links.expect_find_by_name().times(0);
        mocks.sessions.expect_create_guest().times(0);

        let resolver = mocks.build();
        let resolution = resolver.resolve("welcome", None, None).await;

        assert_eq!(resolution.decision, Decision::ServeLogin);
        assert!(resolution.guest_session.is_none());
    }

    #[tokio::test]
    async fn test_missing_session_creates_guest_when_enabled() {
        let mut mocks = Mocks::new();
        mocks
            .sessions
            .expect_create_guest()
            .times(1)
            .returning(|| Ok(guest_session()));
        mocks
            .deep_links
            .expect_find_by_name()
            .returning(|_| Ok(vec![welcome_config()]));
        expect_pending_link_written(&mut mocks);

        let resolver = mocks.build();
        let resolution = resolver.resolve("welcome", None, None).await;

        assert_eq!(
            resolution.decision,
            Decision::ServeIndex("index.html".to_string())
        );
        assert_eq!(
            resolution.guest_session.map(|s| s.id),
            Some("sess-guest".to_string())
        );
    }

    #[tokio::test]
    async fn test_unknown_cookie_falls_back_to_guest() {
        let mut mocks = Mocks::new();
        mocks.sessions.expect_find().returning(|_| Ok(None));
        mocks
            .sessions
            .expect_create_guest()
            .times(1)
            .returning(|| Ok(guest_session()));
        mocks
            .deep_links
            .expect_find_by_name()
            .returning(|_| Ok(vec![welcome_config()]));
        expect_pending_link_written(&mut mocks);

        let resolver = mocks.build();
        let resolution = resolver.resolve("welcome", None, Some("stale")).await;

        assert!(resolution.guest_session.is_some());
    }

    #[tokio::test]
    async fn test_existing_session_used_unchanged() {
        let mut mocks = Mocks::new();
        expect_session(&mut mocks, authenticated_session());
        mocks.sessions.expect_create_guest().times(0);
        mocks
            .deep_links
            .expect_find_by_name()
            .returning(|_| Ok(vec![welcome_config()]));
        mocks.pending_links.expect_delete_for().returning(|_, _| Ok(0));
        mocks
            .pending_links
            .expect_create()
            .withf(|new_link| new_link.user_name == "alice")
            .returning(|new_link| Ok(persisted(&new_link)));

        let resolver = mocks.build();
        let resolution = resolver.resolve("welcome", None, Some("sess-auth")).await;

        assert_eq!(
            resolution.decision,
            Decision::ServeIndex("index.html".to_string())
        );
        assert!(resolution.guest_session.is_none());
    }

    // ── Name validation and registry lookup ─────────────────────────────────

    #[tokio::test]
    async fn test_empty_name_serves_404_without_registry_lookup() {
        let mut mocks = Mocks::new();
        expect_session(&mut mocks, authenticated_session());
        mocks.deep_links.expect_find_by_name().times(0);

        let resolver = mocks.build();
        let resolution = resolver.resolve("", None, Some("sess-auth")).await;

        assert_eq!(resolution.decision, Decision::Serve404);
    }

    #[tokio::test]
    async fn test_unknown_name_serves_404() {
        let mut mocks = Mocks::new();
        expect_session(&mut mocks, authenticated_session());
        mocks
            .deep_links
            .expect_find_by_name()
            .times(1)
            .returning(|_| Ok(vec![]));

        let resolver = mocks.build();
        let resolution = resolver.resolve("nosuch", None, Some("sess-auth")).await;

        assert_eq!(resolution.decision, Decision::Serve404);
    }

    #[tokio::test]
    async fn test_ambiguous_name_serves_404() {
        let mut mocks = Mocks::new();
        expect_session(&mut mocks, authenticated_session());
        mocks
            .deep_links
            .expect_find_by_name()
            .times(1)
            .returning(|_| Ok(vec![welcome_config(), welcome_config()]));
        // No pending link may be touched on ambiguity.
        mocks.pending_links.expect_delete_for().times(0);
        mocks.pending_links.expect_create().times(0);

        let resolver = mocks.build();
        let resolution = resolver.resolve("welcome", None, Some("sess-auth")).await;

        assert_eq!(resolution.decision, Decision::Serve404);
    }

    // ── Access policy through the resolver ──────────────────────────────────

    #[tokio::test]
    async fn test_anonymous_session_disallowed_serves_login() {
        let mut mocks = Mocks::new();
        expect_session(&mut mocks, guest_session());
        mocks.deep_links.expect_find_by_name().returning(|_| {
            Ok(vec![DeepLink {
                allow_guests: false,
                ..welcome_config()
            }])
        });

        let resolver = mocks.build();
        let resolution = resolver.resolve("welcome", None, Some("sess-guest")).await;

        assert_eq!(resolution.decision, Decision::ServeLogin);
    }

    #[tokio::test]
    async fn test_anonymous_session_routed_through_sso() {
        let mut mocks = Mocks::new();
        mocks.policy.sso_configured = true;
        expect_session(&mut mocks, guest_session());
        mocks
            .deep_links
            .expect_find_by_name()
            .returning(|_| Ok(vec![welcome_config()]));
        mocks.pending_links.expect_create().times(0);

        let resolver = mocks.build();
        let resolution = resolver.resolve("welcome", None, Some("sess-guest")).await;

        assert_eq!(resolution.decision, Decision::ServeSso);
    }

    #[tokio::test]
    async fn test_sso_callback_marker_proceeds_to_pending_link() {
        let mut mocks = Mocks::new();
        mocks.policy.sso_configured = true;
        expect_session(&mut mocks, guest_session());
        mocks
            .deep_links
            .expect_find_by_name()
            .returning(|_| Ok(vec![welcome_config()]));
        expect_pending_link_written(&mut mocks);

        let resolver = mocks.build();
        let resolution = resolver
            .resolve("welcome", Some("sso_callback=1"), Some("sess-guest"))
            .await;

        assert_eq!(
            resolution.decision,
            Decision::ServeIndex("index.html".to_string())
        );
    }

    // ── Object argument resolution ──────────────────────────────────────────

    #[tokio::test]
    async fn test_object_argument_resolved_and_recorded() {
        let mut mocks = Mocks::new();
        expect_session(&mut mocks, authenticated_session());
        mocks
            .deep_links
            .expect_find_by_name()
            .returning(|_| Ok(vec![invoice_config()]));
        mocks
            .objects
            .expect_find_ids_by_attribute()
            .withf(|t, a, v| t == "Invoice" && a == "Number" && v == "INV-42")
            .times(1)
            .returning(|_, _, _| Ok(vec![42]));
        mocks.pending_links.expect_delete_for().returning(|_, _| Ok(0));
        mocks
            .pending_links
            .expect_create()
            .withf(|new_link| {
                new_link.object_argument_id == Some(42)
                    && new_link.session_id.as_deref() == Some("sess-auth")
            })
            .times(1)
            .returning(|new_link| Ok(persisted(&new_link)));

        let resolver = mocks.build();
        let resolution = resolver
            .resolve("invoice/INV-42", None, Some("sess-auth"))
            .await;

        assert_eq!(
            resolution.decision,
            Decision::ServeIndex("invoice.html".to_string())
        );
    }

    #[tokio::test]
    async fn test_object_argument_zero_matches_serves_404_without_pending_link() {
        let mut mocks = Mocks::new();
        expect_session(&mut mocks, authenticated_session());
        mocks
            .deep_links
            .expect_find_by_name()
            .returning(|_| Ok(vec![invoice_config()]));
        mocks
            .objects
            .expect_find_ids_by_attribute()
            .returning(|_, _, _| Ok(vec![]));
        mocks.pending_links.expect_delete_for().times(0);
        mocks.pending_links.expect_create().times(0);

        let resolver = mocks.build();
        let resolution = resolver
            .resolve("invoice/INV-42", None, Some("sess-auth"))
            .await;

        assert_eq!(resolution.decision, Decision::Serve404);
    }

    #[tokio::test]
    async fn test_object_argument_multiple_matches_serves_404() {
        let mut mocks = Mocks::new();
        expect_session(&mut mocks, authenticated_session());
        mocks
            .deep_links
            .expect_find_by_name()
            .returning(|_| Ok(vec![invoice_config()]));
        mocks
            .objects
            .expect_find_ids_by_attribute()
            .returning(|_, _, _| Ok(vec![41, 42]));
        mocks.pending_links.expect_create().times(0);
        mocks.pending_links.expect_delete_for().times(0);

        let resolver = mocks.build();
        let resolution = resolver
            .resolve("invoice/INV-42", None, Some("sess-auth"))
            .await;

        assert_eq!(resolution.decision, Decision::Serve404);
    }

    // ── Persistence failure and end-to-end ──────────────────────────────────

    #[tokio::test]
    async fn test_persistence_failure_serves_404() {
        let mut mocks = Mocks::new();
        expect_session(&mut mocks, authenticated_session());
        mocks
            .deep_links
            .expect_find_by_name()
            .returning(|_| Ok(vec![welcome_config()]));
        mocks.pending_links.expect_delete_for().returning(|_, _| Ok(0));
        mocks.pending_links.expect_create().returning(|_| {
            Err(crate::error::AppError::internal(
                "Database error",
                serde_json::json!({}),
            ))
        });

        let resolver = mocks.build();
        let resolution = resolver.resolve("welcome", None, Some("sess-auth")).await;

        assert_eq!(resolution.decision, Decision::Serve404);
    }

    #[tokio::test]
    async fn test_guest_welcome_end_to_end() {
        let mut mocks = Mocks::new();
        mocks
            .sessions
            .expect_create_guest()
            .returning(|| Ok(guest_session()));
        mocks
            .deep_links
            .expect_find_by_name()
            .returning(|_| Ok(vec![welcome_config()]));
        mocks.pending_links.expect_delete_for().returning(|_, _| Ok(0));
        mocks
            .pending_links
            .expect_create()
            .withf(|new_link| {
                new_link.string_argument.is_none()
                    && new_link.object_argument_id.is_none()
                    && new_link.session_id.is_none()
                    && new_link.user_name == "guest-a1b2c3d4"
            })
            .times(1)
            .returning(|new_link| Ok(persisted(&new_link)));

        let resolver = mocks.build();
        let resolution = resolver.resolve("welcome", None, None).await;

        assert_eq!(
            resolution.decision,
            Decision::ServeIndex("index.html".to_string())
        );
    }
}
