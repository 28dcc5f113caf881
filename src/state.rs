//! Shared application state injected into HTTP handlers.

use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::{AccessPolicy, PendingLinkService, ResolverService};
use crate::infrastructure::persistence::{
    PgDeepLinkRepository, PgObjectRepository, PgPendingLinkRepository, PgSessionStore,
};

/// The resolver wired to the PostgreSQL implementations.
pub type PgResolverService = ResolverService<
    PgDeepLinkRepository,
    PgObjectRepository,
    PgPendingLinkRepository,
    PgSessionStore,
>;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<PgResolverService>,
    pub db: PgPool,
    /// Path prefix the deep-link handler is mounted on, for reconstructing
    /// the original URL in login/SSO responses.
    pub mount_path: String,
    /// SSO handler location the ServeSso decision redirects to.
    pub sso_handler_location: Option<String>,
    /// Directory the index (application shell) pages are read from.
    pub web_root: PathBuf,
}

impl AppState {
    /// Wires the PostgreSQL repositories and the resolver around one pool.
    pub fn new(
        pool: PgPool,
        policy: AccessPolicy,
        mount_path: String,
        sso_handler_location: Option<String>,
        web_root: PathBuf,
    ) -> Self {
        let shared = Arc::new(pool.clone());

        let deep_links = Arc::new(PgDeepLinkRepository::new(shared.clone()));
        let objects = Arc::new(PgObjectRepository::new(shared.clone()));
        let sessions = Arc::new(PgSessionStore::new(shared.clone()));
        let pending_links =
            PendingLinkService::new(Arc::new(PgPendingLinkRepository::new(shared)));

        let resolver = Arc::new(ResolverService::new(
            deep_links,
            objects,
            sessions,
            pending_links,
            policy,
        ));

        Self {
            resolver,
            db: pool,
            mount_path,
            sso_handler_location,
            web_root,
        }
    }
}
