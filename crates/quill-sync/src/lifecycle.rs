//! Model lifecycle: export → upload, download → verify → hot-swap.
//!
//! Snapshots are transient: built for export, consumed for a swap, then
//! dropped. The only durable artifact is the staged model file, which is
//! only ever replaced by an atomic rename of a fully-verified blob. A
//! partial or malformed download can never reach the live engine or the
//! disk copy.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use quill_core::config::{defaults, EngineConfig};
use quill_core::errors::{QuillResult, SyncError};
use quill_core::snapshot::ModelSnapshot;
use quill_core::traits::PredictionBackend;
use quill_core::vocabulary::{TokenId, Vocabulary};
use quill_prediction::{LivePredictor, NgramBackend, PredictionEngine};

use crate::identity::DeviceIdentity;
use crate::transport::SyncClient;

/// Filename of the staged model blob under the data directory.
const MODEL_FILENAME: &str = "model.quill";

/// Per-device sync bookkeeping.
#[derive(Debug)]
struct SyncState {
    last_sync: Mutex<Option<DateTime<Utc>>>,
    in_flight: AtomicBool,
}

/// Outcome of one sync cycle. Step failures are recorded, never propagated.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// A downloaded snapshot was verified and swapped in.
    pub swapped: bool,
    /// A fresh export was accepted by the aggregator.
    pub uploaded: bool,
    /// Why the download half failed, if it did.
    pub download_error: Option<String>,
    /// Why the upload half failed, if it did.
    pub upload_error: Option<String>,
}

impl CycleReport {
    /// Whether both halves of the cycle succeeded.
    pub fn is_clean(&self) -> bool {
        self.swapped && self.uploaded
    }
}

/// Orchestrates snapshot export/upload and download/verify/swap.
pub struct ModelLifecycleManager {
    live: Arc<LivePredictor>,
    vocab: Arc<Vocabulary>,
    client: SyncClient,
    identity: DeviceIdentity,
    engine_config: EngineConfig,
    model_path: PathBuf,
    state: SyncState,
}

impl ModelLifecycleManager {
    pub fn new(
        live: Arc<LivePredictor>,
        vocab: Arc<Vocabulary>,
        client: SyncClient,
        identity: DeviceIdentity,
        engine_config: EngineConfig,
        data_dir: &Path,
    ) -> Self {
        Self {
            live,
            vocab,
            client,
            identity,
            engine_config,
            model_path: data_dir.join(MODEL_FILENAME),
            state: SyncState {
                last_sync: Mutex::new(None),
                in_flight: AtomicBool::new(false),
            },
        }
    }

    /// Rebuild the live engine from the staged model file, if one exists.
    ///
    /// Called at service start. Any failure (missing file, corrupt blob,
    /// vocabulary mismatch) leaves the current engine in place and the
    /// caller stays in fallback-only mode for the process lifetime.
    pub fn load_persisted(&self) -> QuillResult<()> {
        let bytes = fs::read(&self.model_path)?;
        let snapshot = ModelSnapshot::decode(&bytes)?;
        let engine =
            PredictionEngine::from_snapshot(self.vocab.clone(), &snapshot, self.engine_config.clone())?;
        self.live.install(engine);
        tracing::info!("sync: restored model from {}", self.model_path.display());
        Ok(())
    }

    /// Serialize the current learned state.
    ///
    /// Folds the bounded history statistics into a training copy of the
    /// live backend's weights. Pure with respect to live state, and
    /// idempotent: two exports without intervening observations produce
    /// identical blobs.
    pub fn export_snapshot(&self) -> QuillResult<ModelSnapshot> {
        let mut trainer = match self.live.engine().export() {
            Ok(snapshot) => NgramBackend::from_snapshot(&snapshot)?,
            // No backend loaded yet; start from empty weights.
            Err(_) => NgramBackend::new(defaults::DEFAULT_INPUT_LEN, self.vocab.len()),
        };

        let history = self.live.history_snapshot();
        let tokens: Vec<TokenId> = history
            .history
            .iter()
            .map(|word| self.vocab.id_or_pad(word))
            .collect();
        trainer.train(&tokens);
        trainer.export()
    }

    /// Hand a snapshot to the transport. The artifact is discarded whether
    /// or not the upload succeeds; the next cycle re-exports from scratch.
    pub fn upload_snapshot(&self, snapshot: &ModelSnapshot) -> QuillResult<()> {
        let blob = snapshot.encode()?;
        self.client.upload(blob, self.identity.as_str())
    }

    /// Download, verify, stage, and atomically swap in the new engine.
    ///
    /// Order matters: the engine is fully constructed (and the blob fully
    /// verified) before either the disk copy or the live slot changes. On
    /// any failure the live engine and the staged file are left untouched.
    pub fn download_and_swap(&self) -> QuillResult<()> {
        let bytes = self.client.download()?;
        let snapshot = ModelSnapshot::decode(&bytes)?;
        let engine =
            PredictionEngine::from_snapshot(self.vocab.clone(), &snapshot, self.engine_config.clone())?;

        self.stage_model_file(&bytes)?;
        self.live.install(engine);
        tracing::info!("sync: new aggregated model is live");
        Ok(())
    }

    /// Run one full cycle: download/swap, then export/upload.
    ///
    /// At most one cycle runs at a time; overlapping calls get
    /// [`SyncError::AlreadyInFlight`]. Step failures are logged and recorded
    /// in the report; the loop never dies from a bad cycle.
    pub fn run_cycle(&self) -> QuillResult<CycleReport> {
        if self
            .state
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SyncError::AlreadyInFlight.into());
        }

        let report = self.cycle_inner();
        self.state.in_flight.store(false, Ordering::SeqCst);
        Ok(report)
    }

    fn cycle_inner(&self) -> CycleReport {
        let mut report = CycleReport::default();

        match self.download_and_swap() {
            Ok(()) => report.swapped = true,
            Err(e) => {
                tracing::warn!("sync: download failed: {e}");
                report.download_error = Some(e.to_string());
            }
        }

        match self
            .export_snapshot()
            .and_then(|snapshot| self.upload_snapshot(&snapshot))
        {
            Ok(()) => report.uploaded = true,
            Err(e) => {
                tracing::warn!("sync: upload failed: {e}");
                report.upload_error = Some(e.to_string());
            }
        }

        if report.swapped || report.uploaded {
            let mut last = self
                .state
                .last_sync
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *last = Some(Utc::now());
        }
        report
    }

    /// Timestamp of the last cycle that made progress.
    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        *self
            .state
            .last_sync
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Whether a cycle is currently running.
    pub fn is_in_flight(&self) -> bool {
        self.state.in_flight.load(Ordering::SeqCst)
    }

    /// Path of the staged model blob.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    // Verified bytes → temp file → atomic rename over the staged path.
    fn stage_model_file(&self, bytes: &[u8]) -> QuillResult<()> {
        let dir = self.model_path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(bytes)?;
        file.persist(&self.model_path).map_err(|e| e.error)?;
        Ok(())
    }
}
