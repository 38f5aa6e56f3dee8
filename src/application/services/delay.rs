use std::time::Duration;

/// Suspends the current task for at least `duration`.
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
