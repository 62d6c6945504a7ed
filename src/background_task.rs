use std::sync::Arc;

use tokio::time::{interval, Duration};

use crate::auth::revocation::RevocationList;

/// Periodically forgets revoked tokens that have expired on their own.
pub async fn start_purge_task(revoked: Arc<RevocationList>) {
    let mut interval = interval(Duration::from_secs(60 * 15));

    loop {
        interval.tick().await;

        let purged = revoked.purge_expired();
        if purged > 0 {
            tracing::info!("Purged {} expired revoked tokens", purged);
        }
    }
}
