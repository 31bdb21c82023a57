use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Repeating timer on a spawned task: runs `tick` immediately, then again
/// after every `period`. A tick always runs to completion before the next
/// wait starts, so ticks never overlap.
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            loop {
                tick().await;
                sleep(period).await;
            }
        });
        Self { handle }
    }

    /// Stops the timer. Safe to call more than once.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    #[tokio::test]
    async fn ticker_fires_repeatedly_until_canceled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(Duration::from_millis(10), move || {
            let tx = tx.clone();
            async move {
                let _ = tx.send(());
            }
        });

        for _ in 0..3 {
            timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("tick within deadline")
                .expect("ticker still running");
        }

        ticker.cancel();

        // Once the task is gone its sender is dropped, so draining the
        // channel must finish instead of seeing ticks forever.
        let drained = timeout(Duration::from_secs(5), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok(), "ticker kept firing after cancel");
    }

    #[tokio::test]
    async fn the_first_tick_runs_without_waiting_a_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _ticker = Ticker::spawn(Duration::from_secs(3600), move || {
            let tx = tx.clone();
            async move {
                let _ = tx.send(());
            }
        });

        timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("first tick should not wait for the period")
            .expect("ticker still running");
    }
}
