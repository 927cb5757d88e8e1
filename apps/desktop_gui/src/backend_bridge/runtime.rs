//! Store worker: owns the tokio runtime, opens the inventory store, and
//! services UI commands sequentially. Every mutation is followed by a full
//! refetch so the UI cache is replaced, never patched.

use crossbeam_channel::{Receiver, Sender};
use std::thread;

use storage::Storage;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::Startup,
                    format!("store worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build store worker runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let store = match Storage::new(&settings.database_url).await {
                Ok(store) => store,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::Startup,
                        err.to_string(),
                    )));
                    tracing::error!(
                        database_url = %settings.database_url,
                        "failed to open inventory store: {err}"
                    );
                    return;
                }
            };

            let _ = ui_tx.try_send(UiEvent::StoreReady);
            // Initial load, mirroring the mount-time fetch of the UI.
            refresh_and_publish(&store, &ui_tx).await;

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Refresh => {
                        refresh_and_publish(&store, &ui_tx).await;
                    }
                    BackendCommand::AddItem {
                        name,
                        quantity,
                        cost,
                    } => match store.upsert(&name, quantity, cost).await {
                        Ok(()) => refresh_and_publish(&store, &ui_tx).await,
                        Err(err) => {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::AddItem,
                                err.to_string(),
                            )));
                        }
                    },
                    BackendCommand::UpdateItem {
                        name,
                        quantity,
                        cost,
                    } => match store.replace(&name, quantity, cost).await {
                        Ok(()) => refresh_and_publish(&store, &ui_tx).await,
                        Err(err) => {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::UpdateItem,
                                err.to_string(),
                            )));
                        }
                    },
                    BackendCommand::RemoveItem { name } => match store.remove(&name).await {
                        Ok(()) => refresh_and_publish(&store, &ui_tx).await,
                        Err(err) => {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::RemoveItem,
                                err.to_string(),
                            )));
                        }
                    },
                }
            }
        });
    });
}

async fn refresh_and_publish(store: &Storage, ui_tx: &Sender<UiEvent>) {
    match store.list_all().await {
        Ok(items) => {
            let _ = ui_tx.try_send(UiEvent::InventoryRefreshed(items));
        }
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::Refresh,
                err.to_string(),
            )));
        }
    }
}
