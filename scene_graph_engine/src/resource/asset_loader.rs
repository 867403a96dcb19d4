/// Asynchronous asset loading boundary.
///
/// A loader returns a PendingAsset immediately and completes it later
/// (possibly from another thread) through the paired AssetPromise. The
/// graph attach that consumes a loaded asset is deferred to the render
/// loop: completed assets are drained at the top of a tick, so the attach
/// always happens before that tick's world-transform recomputation.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use crate::error::{Error, Result};
use crate::scene::SceneGraph;
use crate::{engine_error, engine_info};

const SOURCE: &str = "scenegraph::AssetAttachQueue";

/// Opaque resource handle (font, texture, ...) produced by an AssetLoader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle(u64);

impl ResourceHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// State of a pending load
#[derive(Debug, Clone, PartialEq)]
pub enum AssetPoll {
    Pending,
    Ready(ResourceHandle),
    Failed(String),
}

/// Receiving half of a load: polled by the render loop
pub struct PendingAsset {
    uri: String,
    receiver: Receiver<std::result::Result<ResourceHandle, String>>,
}

impl PendingAsset {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Non-blocking check for completion
    pub fn poll(&self) -> AssetPoll {
        match self.receiver.try_recv() {
            Ok(Ok(handle)) => AssetPoll::Ready(handle),
            Ok(Err(message)) => AssetPoll::Failed(message),
            Err(TryRecvError::Empty) => AssetPoll::Pending,
            Err(TryRecvError::Disconnected) => {
                AssetPoll::Failed("loader dropped the request without completing it".to_string())
            }
        }
    }
}

/// Completing half of a load: kept by the loader
pub struct AssetPromise {
    sender: Sender<std::result::Result<ResourceHandle, String>>,
}

impl AssetPromise {
    pub fn complete(self, handle: ResourceHandle) {
        // Receiver gone means nobody waits for this asset anymore
        let _ = self.sender.send(Ok(handle));
    }

    pub fn fail(self, message: &str) {
        let _ = self.sender.send(Err(message.to_string()));
    }
}

/// Create a connected promise / pending pair for `uri`
pub fn asset_channel(uri: &str) -> (AssetPromise, PendingAsset) {
    let (sender, receiver) = mpsc::channel();
    (
        AssetPromise { sender },
        PendingAsset { uri: uri.to_string(), receiver },
    )
}

/// Starts loads. Implementations complete the returned PendingAsset later.
pub trait AssetLoader {
    fn load(&mut self, uri: &str) -> PendingAsset;
}

/// Graph attach to run once an asset is loaded
pub type AttachFn = Box<dyn FnOnce(&mut SceneGraph, ResourceHandle) -> Result<()> + Send>;

struct PendingAttach {
    pending: PendingAsset,
    attach: AttachFn,
}

/// Pending loads paired with the graph attach each one performs on completion.
pub struct AssetAttachQueue {
    entries: Vec<PendingAttach>,
}

impl AssetAttachQueue {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Run `attach` on the graph once `pending` completes
    pub fn enqueue<F>(&mut self, pending: PendingAsset, attach: F)
    where
        F: FnOnce(&mut SceneGraph, ResourceHandle) -> Result<()> + Send + 'static,
    {
        self.entries.push(PendingAttach {
            pending,
            attach: Box::new(attach),
        });
    }

    /// Start a load on `loader` and enqueue its attach
    pub fn load_and_attach<F>(&mut self, loader: &mut dyn AssetLoader, uri: &str, attach: F)
    where
        F: FnOnce(&mut SceneGraph, ResourceHandle) -> Result<()> + Send + 'static,
    {
        let pending = loader.load(uri);
        self.enqueue(pending, attach);
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attach every completed asset, in enqueue order.
    ///
    /// Failed loads are logged and dropped. A structural error from an
    /// attach closure is returned; entries not yet processed stay queued.
    /// Returns the number of attaches performed.
    pub fn drain_completed(&mut self, graph: &mut SceneGraph) -> Result<usize> {
        let mut attached = 0;
        let mut index = 0;
        while index < self.entries.len() {
            match self.entries[index].pending.poll() {
                AssetPoll::Pending => index += 1,
                AssetPoll::Ready(handle) => {
                    let entry = self.entries.remove(index);
                    let uri = entry.pending.uri().to_string();
                    (entry.attach)(graph, handle)?;
                    engine_info!(SOURCE, "Attached asset '{}' ({:?})", uri, handle);
                    attached += 1;
                }
                AssetPoll::Failed(message) => {
                    let entry = self.entries.remove(index);
                    let error = Error::AssetFailed(format!("{}: {}", entry.pending.uri(), message));
                    engine_error!(SOURCE, "{}", error);
                }
            }
        }
        Ok(attached)
    }
}

impl Default for AssetAttachQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "asset_loader_tests.rs"]
mod tests;
