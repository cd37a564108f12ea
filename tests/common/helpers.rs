#![allow(dead_code)]

use reqwest::StatusCode;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::subscriber::DefaultGuard;

use beatmap_sampler::catalog::{Catalog, CatalogItem, SinceCursor, YearMonth};
use beatmap_sampler::collector::{CollectedEntry, CollectorOptions};
use beatmap_sampler::transfer::{DownloadEntry, ProgressSnapshot, Status, Summary, Transfer};
use beatmap_sampler::{Error, Result};

pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates an archive as if it had been downloaded before
pub fn create_archive(dir: &Path, set_id: u64) -> PathBuf {
    let path = dir.join(format!("{}.osz", set_id));
    fs::write(&path, b"PK").expect("Failed to write archive");
    path
}

/// An approved osu! standard item rated 5 stars
pub fn catalog_item(set_id: u64) -> CatalogItem {
    CatalogItem {
        set_id,
        beatmap_id: Some(set_id * 10),
        difficulty_rating: 5.0,
        mode: 0,
        approved: 1,
        artist: format!("Artist {}", set_id),
        title: format!("Title {}", set_id),
        version: None,
    }
}

pub fn catalog_item_with(set_id: u64, rating: f64, mode: u8, approved: i32) -> CatalogItem {
    CatalogItem {
        difficulty_rating: rating,
        mode,
        approved,
        ..catalog_item(set_id)
    }
}

pub fn collected_entries(count: u64) -> Vec<CollectedEntry> {
    (1..=count)
        .map(|id| CollectedEntry::new(id, format!("Artist {} - Title {}", id, id)))
        .collect()
}

/// Options with a fixed cursor range so tests do not depend on the clock
pub fn test_options(max_attempts: Option<u64>) -> CollectorOptions {
    CollectorOptions {
        epoch: YearMonth::new(2010, 1),
        until: Some(YearMonth::new(2020, 12)),
        max_attempts,
        ..CollectorOptions::default()
    }
}

// === Catalog Fakes ===

/// Answers queries from a script, then from a fallback batch forever
pub struct ScriptedCatalog {
    script: Mutex<VecDeque<Result<Vec<CatalogItem>>>>,
    fallback: Vec<CatalogItem>,
    calls: AtomicUsize,
    cursors: Mutex<Vec<SinceCursor>>,
}

impl ScriptedCatalog {
    pub fn new(fallback: Vec<CatalogItem>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
            cursors: Mutex::new(Vec::new()),
        }
    }

    pub fn then_ok(self, items: Vec<CatalogItem>) -> Self {
        self.script.lock().unwrap().push_back(Ok(items));
        self
    }

    pub fn then_err(self) -> Self {
        self.then_fail(Error::Internal("catalog unavailable".into()))
    }

    pub fn then_fail(self, error: Error) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn cursors(&self) -> Vec<SinceCursor> {
        self.cursors.lock().unwrap().clone()
    }
}

impl Catalog for &ScriptedCatalog {
    async fn fetch_since(&self, since: &SinceCursor) -> Result<Vec<CatalogItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.cursors.lock().unwrap().push(*since);
        match self.script.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(self.fallback.clone()),
        }
    }
}

// === Transfer Fakes ===

/// What the fake transfers did, shared with the test
#[derive(Default)]
pub struct TransferLog {
    pub created: Cell<usize>,
    pub batches: RefCell<Vec<(usize, Vec<u64>)>>,
}

/// Writes `<id>.osz` for every entry without touching the network
pub struct FakeTransfer {
    index: usize,
    dir: PathBuf,
    fail: bool,
    lose: Vec<u64>,
    queue: RefCell<Vec<DownloadEntry>>,
    total: Cell<usize>,
    finished: Cell<usize>,
    current: RefCell<Option<String>>,
    log: Rc<TransferLog>,
}

impl FakeTransfer {
    pub fn new(index: usize, dir: &Path, log: Rc<TransferLog>) -> Self {
        log.created.set(log.created.get() + 1);
        Self {
            index,
            dir: dir.to_path_buf(),
            fail: false,
            lose: Vec::new(),
            queue: RefCell::new(Vec::new()),
            total: Cell::new(0),
            finished: Cell::new(0),
            current: RefCell::new(None),
            log,
        }
    }

    /// Make `download_all` fail as a whole
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Report success for `ids` without writing their archive
    pub fn losing(mut self, ids: Vec<u64>) -> Self {
        self.lose = ids;
        self
    }
}

impl Transfer for FakeTransfer {
    fn add_entries(&self, entries: Vec<DownloadEntry>) {
        self.total.set(self.total.get() + entries.len());
        self.log
            .batches
            .borrow_mut()
            .push((self.index, entries.iter().map(|e| e.id).collect()));
        self.queue.borrow_mut().extend(entries);
    }

    async fn download_all(&self) -> Result<Vec<Summary>> {
        if self.fail {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let cause = io::Error::new(io::ErrorKind::ConnectionRefused, "mirror unreachable");
            return Err(cause.into());
        }

        let pending: Vec<DownloadEntry> = self.queue.borrow_mut().drain(..).collect();
        let mut summaries = Vec::new();
        for entry in pending {
            *self.current.borrow_mut() = Some(entry.filename());
            tokio::time::sleep(Duration::from_millis(10)).await;
            if !self.lose.contains(&entry.id) {
                fs::write(self.dir.join(entry.filename()), b"PK")?;
            }
            self.finished.set(self.finished.get() + 1);
            summaries.push(
                Summary::new(entry, reqwest::StatusCode::OK, 2).with_status(Status::Success),
            );
        }
        *self.current.borrow_mut() = None;
        Ok(summaries)
    }

    fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot::new(self.total.get(), self.finished.get())
    }

    fn current_file(&self) -> Option<String> {
        self.current.borrow().clone()
    }
}

// === Local HTTP Server ===

/// What the local server answers for a path
#[derive(Clone)]
pub enum Reply {
    /// Status code and complete body
    Body(u16, Vec<u8>),
    /// 200 announcing more bytes than it sends, then hangs up
    Truncated(Vec<u8>),
    /// 200 with the body after a pause
    Delayed(Duration, Vec<u8>),
}

/// Serves `routes` on a loopback port and returns `http://127.0.0.1:<port>`.
///
/// Unknown paths answer 404. The query string is ignored when matching.
pub async fn serve(routes: Vec<(&str, Reply)>) -> String {
    let routes: Arc<HashMap<String, Reply>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, reply)| (path.to_string(), reply))
            .collect(),
    );
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind local server");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(answer(stream, routes.clone()));
        }
    });

    format!("http://{}", addr)
}

/// A loopback URL nothing listens on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind local server");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{}", addr)
}

async fn answer(mut stream: TcpStream, routes: Arc<HashMap<String, Reply>>) {
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
        }
    }

    let reply = {
        let head = String::from_utf8_lossy(&request);
        let target = head.split_whitespace().nth(1).unwrap_or("/");
        let path = target.split('?').next().unwrap_or(target);
        routes
            .get(path)
            .cloned()
            .unwrap_or_else(|| Reply::Body(404, b"not found".to_vec()))
    };

    let (status, body, announced) = match reply {
        Reply::Body(status, body) => {
            let len = body.len();
            (status, body, len)
        }
        Reply::Truncated(body) => {
            let len = body.len() + 100;
            (200, body, len)
        }
        Reply::Delayed(pause, body) => {
            tokio::time::sleep(pause).await;
            let len = body.len();
            (200, body, len)
        }
    };

    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("");
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status, reason, announced
    );
    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream.write_all(&body).await;
    let _ = stream.flush().await;
    let _ = stream.shutdown().await;
}

/// Names of the files in `dir`, sorted
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| {
            entry
                .expect("Failed to read directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

// === Log Capture ===

/// Formatted log output collected by [`capture_logs`]
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Routes this thread's log events into a buffer until the guard is dropped
pub fn capture_logs() -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}
