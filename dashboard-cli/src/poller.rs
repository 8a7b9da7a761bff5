use crate::{app::Update, client::FanClient};
use log::{debug, trace};
use std::time::Duration;
use tokio::sync::{mpsc::Sender, watch};

/// Requests a status snapshot every `interval` until told to exit or the receiver goes away.
///
/// Each request runs in its own task so a slow response never delays the next one. Failed
/// requests are dropped without retrying.
pub(crate) async fn run(
    client: FanClient,
    interval: Duration,
    tx: Sender<Update>,
    mut exit: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if tx.is_closed() {
                    debug!("Update receiver closed, stopping poller");
                    return;
                }

                let client = client.clone();
                let tx = tx.clone();

                tokio::spawn(async move {
                    match client.status().await {
                        Ok(status) => {
                            trace!("Status: {:?}", status);
                            let _ = tx.send(Update::Status(status)).await;
                        }
                        Err(e) => debug!("Status poll failed: {e}"),
                    }
                });
            }
            Ok(_) = exit.changed() => {
                return;
            }
        }
    }
}
