use std::time::Duration;

use tokio::select;
use tokio::sync::watch;
use tokio::time::sleep;

/// Debounces a rapidly changing value: the returned receiver observes a
/// new value only once the sender has been quiet for the full period,
/// and always the most recent one. Intermediate values never fire.
///
/// The driver task exits when the sender is dropped.
pub fn debounce<T>(initial: T, quiet_period: Duration) -> (watch::Sender<T>, watch::Receiver<T>)
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let (input_tx, mut input_rx) = watch::channel(initial.clone());
    let (output_tx, output_rx) = watch::channel(initial);

    tokio::spawn(async move {
        loop {
            if input_rx.changed().await.is_err() {
                break;
            }

            // Restart the quiet period every time another change lands
            // before the current one expires.
            loop {
                let candidate = input_rx.borrow_and_update().clone();
                select! {
                    _ = sleep(quiet_period) => {
                        output_tx.send_if_modified(|current| {
                            if *current == candidate {
                                false
                            } else {
                                *current = candidate.clone();
                                true
                            }
                        });
                        break;
                    }
                    changed = input_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                }
            }
        }
    });

    (input_tx, output_rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::yield_now;
    use tokio::time::advance;

    const QUIET: Duration = Duration::from_millis(300);

    async fn settle() {
        // let the driver task observe pending changes
        for _ in 0..4 {
            yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_fire_on_intermediate_keystrokes() {
        let (tx, rx) = debounce(String::new(), QUIET);

        for value in ["a", "al", "ali", "alic", "alice"] {
            tx.send(value.to_string()).unwrap();
            settle().await;
            advance(Duration::from_millis(100)).await;
            settle().await;
        }

        assert!(!rx.has_changed().unwrap());
        assert_eq!(*rx.borrow(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_with_the_latest_value_after_quiet_period() {
        let (tx, mut rx) = debounce(String::new(), QUIET);

        tx.send("ali".to_string()).unwrap();
        settle().await;
        advance(Duration::from_millis(100)).await;
        settle().await;

        tx.send("alice".to_string()).unwrap();
        settle().await;
        advance(QUIET).await;
        settle().await;

        assert!(rx.has_changed().unwrap());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "alice");

        // nothing further queued
        advance(QUIET).await;
        settle().await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn fires_again_for_a_second_burst() {
        let (tx, mut rx) = debounce(String::new(), QUIET);

        tx.send("alice".to_string()).unwrap();
        settle().await;
        advance(QUIET).await;
        settle().await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "alice");

        tx.send("alice_b".to_string()).unwrap();
        settle().await;
        advance(QUIET).await;
        settle().await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "alice_b");
    }

    #[tokio::test(start_paused = true)]
    async fn returning_to_the_settled_value_does_not_refire() {
        let (tx, rx) = debounce("alice".to_string(), QUIET);

        tx.send("alice_".to_string()).unwrap();
        settle().await;
        advance(Duration::from_millis(100)).await;
        settle().await;

        tx.send("alice".to_string()).unwrap();
        settle().await;
        advance(QUIET).await;
        settle().await;

        assert!(!rx.has_changed().unwrap());
    }
}
