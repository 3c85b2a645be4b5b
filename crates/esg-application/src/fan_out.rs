//! All-or-nothing fan-out/fan-in.

use futures::future::try_join_all;
use std::future::Future;

/// Runs every future concurrently and collects the outputs in input order.
///
/// The first error wins: as soon as any future fails, the remaining ones are
/// dropped (which cancels in-flight requests) and that error is returned.
pub async fn join_all_or_nothing<I, F, T, E>(tasks: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    try_join_all(tasks).await
}
