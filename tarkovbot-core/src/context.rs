//! tarkovbot-core/src/context.rs
//!
//! The application context shared by every action: host handle, API client
//! and read access to the two trader datasets.
//!
//! Each dataset has exactly one writer ([`DatasetWriter`], owned by its
//! refresher task) and any number of readers ([`TraderDatasets`]). A
//! snapshot is swapped in whole, so readers never see a half-applied poll.

use std::sync::Arc;
use tokio::sync::watch;

use tarkovbot_common::models::{GameMode, TraderSnapshot};

use crate::api::RemoteDataClient;
use crate::config::PluginConfig;
use crate::host::HostHandle;

pub struct PluginContext {
    pub host: HostHandle,
    pub api: Arc<RemoteDataClient>,
    pub traders: TraderDatasets,
    pub config: PluginConfig,
}

impl PluginContext {
    pub fn new(
        host: HostHandle,
        api: Arc<RemoteDataClient>,
        traders: TraderDatasets,
        config: PluginConfig,
    ) -> Self {
        Self {
            host,
            api,
            traders,
            config,
        }
    }
}

/// Read side of both datasets.
#[derive(Debug, Clone)]
pub struct TraderDatasets {
    regular: watch::Receiver<Arc<TraderSnapshot>>,
    pve: watch::Receiver<Arc<TraderSnapshot>>,
}

impl TraderDatasets {
    /// Latest snapshot for `mode`; empty until the first successful poll.
    pub fn snapshot(&self, mode: GameMode) -> Arc<TraderSnapshot> {
        match mode {
            GameMode::Regular => self.regular.borrow().clone(),
            GameMode::Pve => self.pve.borrow().clone(),
        }
    }
}

/// Sole writer of one dataset.
#[derive(Debug)]
pub struct DatasetWriter {
    mode: GameMode,
    tx: watch::Sender<Arc<TraderSnapshot>>,
}

impl DatasetWriter {
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn current(&self) -> Arc<TraderSnapshot> {
        self.tx.borrow().clone()
    }

    /// Replace the whole snapshot.
    pub fn publish(&self, snapshot: TraderSnapshot) {
        self.tx.send_replace(Arc::new(snapshot));
    }
}

#[derive(Debug)]
pub struct DatasetWriters {
    pub regular: DatasetWriter,
    pub pve: DatasetWriter,
}

/// Create both datasets, empty.
pub fn trader_datasets() -> (DatasetWriters, TraderDatasets) {
    let (regular_tx, regular_rx) = watch::channel(Arc::new(TraderSnapshot::default()));
    let (pve_tx, pve_rx) = watch::channel(Arc::new(TraderSnapshot::default()));
    (
        DatasetWriters {
            regular: DatasetWriter {
                mode: GameMode::Regular,
                tx: regular_tx,
            },
            pve: DatasetWriter {
                mode: GameMode::Pve,
                tx: pve_tx,
            },
        },
        TraderDatasets {
            regular: regular_rx,
            pve: pve_rx,
        },
    )
}
