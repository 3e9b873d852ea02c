//! Business services over the repositories.

pub mod product;
pub mod user;

use std::future::Future;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};

/// Upper bound for a single repository call.
pub const REPOSITORY_TIMEOUT: Duration = Duration::from_secs(10);

/// Run a repository call, failing with [`CoreError::Internal`] once `limit` elapses.
pub(crate) async fn bounded<T, F>(limit: Duration, call: F) -> CoreResult<T>
where
    F: Future<Output = CoreResult<T>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| CoreError::Internal(format!("repository call exceeded {limit:?}")))?
}
