//! Pending-link clearing and creation.

use std::sync::Arc;

use tracing::{error, trace};

use crate::domain::entities::{DeepLink, NewPendingLink, PendingLink, Session};
use crate::domain::repositories::PendingLinkRepository;
use crate::error::AppError;
use crate::utils::request_parser::ParsedRequest;

/// Service maintaining the at-most-one pending link per (deep link, user)
/// invariant.
///
/// The invariant is enforced by deleting every existing match before
/// inserting the new record, not by a uniqueness constraint. The delete and
/// the insert are two separate statements with no surrounding transaction:
/// two concurrent requests from the same user for the same deep link can
/// interleave so that both inserts survive, or a delete races a commit and
/// zero remain. That window is an accepted property of the design, not a
/// bug; sequential requests always leave exactly one record.
pub struct PendingLinkService<P: PendingLinkRepository> {
    pending_links: Arc<P>,
}

impl<P: PendingLinkRepository> PendingLinkService<P> {
    pub fn new(pending_links: Arc<P>) -> Self {
        Self { pending_links }
    }

    /// Replaces the pending link for `(config, session.user_name)` with a new
    /// record built from the request.
    ///
    /// The string argument is the remaining request path, or the raw query
    /// string when the configuration separates GET parameters. When an object
    /// argument was resolved, its identifier and the current session id are
    /// recorded together.
    ///
    /// # Errors
    ///
    /// Returns the underlying storage error; the caller maps it to a 404
    /// decision. No partial record is left behind for a failed attempt.
    pub async fn replace(
        &self,
        config: &DeepLink,
        session: &Session,
        request: &ParsedRequest,
        object_argument_id: Option<i64>,
    ) -> Result<PendingLink, AppError> {
        // Clearing runs regardless of which session created the old records,
        // so a guest's transient context cannot block cleanup of another
        // user's stale link for the same deep link.
        let cleared = self
            .pending_links
            .delete_for(config.id, &session.user_name)
            .await?;

        if cleared > 0 {
            trace!(
                deep_link = %config.name,
                user = %session.user_name,
                cleared,
                "cleared stale pending links"
            );
        }

        let string_argument = if config.use_string_argument {
            if config.separate_get_parameters {
                Some(request.query_string.clone())
            } else {
                Some(request.remaining_path.clone())
            }
        } else {
            None
        };

        let new_link = NewPendingLink {
            deep_link_id: config.id,
            user_name: session.user_name.clone(),
            string_argument,
            object_argument_id,
            session_id: object_argument_id.map(|_| session.id.clone()),
        };

        match self.pending_links.create(new_link).await {
            Ok(link) => {
                trace!(
                    session = %session.id,
                    user = %session.user_name,
                    "created new pending link"
                );
                Ok(link)
            }
            Err(e) => {
                error!(
                    deep_link = %config.name,
                    user = %session.user_name,
                    error = %e,
                    "failed to persist pending link"
                );
                Err(e)
            }
        }
    }
}
