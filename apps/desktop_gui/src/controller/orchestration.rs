//! Command orchestration from UI actions to the store worker queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::Refresh => "refresh",
        BackendCommand::AddItem { .. } => "add_item",
        BackendCommand::UpdateItem { .. } => "update_item",
        BackendCommand::RemoveItem { .. } => "remove_item",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->store command"),
        Err(TrySendError::Full(_)) => {
            *status = "Store command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Store worker disconnected (possible startup failure); restart the app".to_string();
        }
    }
}
