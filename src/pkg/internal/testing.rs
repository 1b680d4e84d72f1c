//! In-memory stand-ins for the external collaborators, recording every call.

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

use super::{
    assets::{AssetStore, StoredAsset, Upload},
    notify::{Channel, ChatNotifier},
    sheets::SheetAppender,
};
use crate::prelude::{AppError, Result};

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(Channel, String)>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(Channel, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ChatNotifier for RecordingNotifier {
    async fn send(&self, channel: Channel, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((channel, text.to_string()));
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("chat unavailable".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSheet {
    rows: Mutex<Vec<Vec<String>>>,
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl RecordingSheet {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Rows that were accepted.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SheetAppender for RecordingSheet {
    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("quota exceeded".into()));
        }
        self.rows.lock().unwrap().extend(rows);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAssets {
    uploaded: Mutex<Vec<String>>,
    destroyed: Mutex<Vec<String>>,
    counter: AtomicUsize,
    fail: AtomicBool,
}

impl RecordingAssets {
    pub fn failing() -> Self {
        let store = RecordingAssets::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AssetStore for RecordingAssets {
    async fn upload(&self, folder: &str, upload: Upload) -> Result<StoredAsset> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("asset host unavailable".into()));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let path = format!("media/{}/{}_{}", folder, n, upload.file_name);
        self.uploaded.lock().unwrap().push(path.clone());
        Ok(StoredAsset {
            url: format!("https://assets.test/{}", &path),
            path,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<()> {
        self.destroyed.lock().unwrap().push(public_id.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("asset host unavailable".into()));
        }
        Ok(())
    }
}
