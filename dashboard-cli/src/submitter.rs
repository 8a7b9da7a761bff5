use crate::{app::Update, client::FanClient};
use fan_dashboard_protocol::{Clamped, InputError, Setpoint};
use log::{debug, warn};
use tokio::sync::mpsc::Sender;

/// Validates user input and, if it is a number, sends the clamped setpoint in the background.
///
/// The returned [`Clamped`] says whether the value was changed so the caller can warn about it.
/// The server's confirmation arrives later as [`Update::SetpointConfirmed`].
pub(crate) fn submit(
    client: &FanClient,
    input: &str,
    tx: &Sender<Update>,
) -> Result<Clamped, InputError> {
    let clamped = Setpoint::parse(input)?;
    let setpoint = clamped.setpoint;

    let client = client.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        match client.set_fan_output(setpoint).await {
            Ok(response) => {
                debug!("Fan output confirmed as {}", response.set_fan_output_text());
                let _ = tx.send(Update::SetpointConfirmed(response)).await;
            }
            Err(e) => warn!("Setting fan output to {setpoint} failed: {e}"),
        }
    });

    Ok(clamped)
}

/// Asks the server to switch the fan on or off, the new status arrives as [`Update::FanToggled`].
pub(crate) fn toggle(client: &FanClient, tx: &Sender<Update>) {
    let client = client.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        match client.toggle_fan().await {
            Ok(response) => {
                debug!("Fan toggled to {}", response.fan_status);
                let _ = tx.send(Update::FanToggled(response)).await;
            }
            Err(e) => warn!("Toggling fan failed: {e}"),
        }
    });
}
