use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use deepshield_core::client::detect_client::{DetectClient, DetectError, DEFAULT_TIMEOUT};
use deepshield_core::client::detect_response::DetectResult;

/// Messages sent from the worker thread to the UI.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Complete(DetectResult),
    Error(String),
}

/// Parameters for one detection request.
pub struct DetectParams {
    pub server_url: String,
    pub real: PathBuf,
    pub fake: PathBuf,
}

/// Spawn a background request. The receiver yields exactly one message.
pub fn spawn(params: DetectParams) -> Receiver<WorkerMessage> {
    let (tx, rx) = crossbeam_channel::bounded::<WorkerMessage>(1);

    thread::spawn(move || {
        let message = match run_detect(&params) {
            Ok(result) => WorkerMessage::Complete(result),
            Err(e) => {
                log::warn!("Detection request failed: {e}");
                WorkerMessage::Error(e.user_message())
            }
        };
        send(&tx, message);
    });

    rx
}

fn run_detect(params: &DetectParams) -> Result<DetectResult, DetectError> {
    let client = DetectClient::new(&params.server_url, DEFAULT_TIMEOUT)?;
    log::info!(
        "Uploading {} and {} to {}",
        params.real.display(),
        params.fake.display(),
        client.base_url()
    );
    client.detect(&params.real, &params.fake)
}

fn send(tx: &Sender<WorkerMessage>, message: WorkerMessage) {
    // The UI may have dropped the receiver.
    let _ = tx.send(message);
}
