//! Fakes shared by the unit tests.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use futures_util::stream;
use tokio::net::TcpListener;

use crate::core::cache::{CacheStore, FreshnessPolicy};
use crate::core::dependency::Dependency;
use crate::core::downloader::Downloader;
use crate::core::error::{SetupError, SetupResult};
use crate::core::fonts::FontProvisioner;
use crate::core::http::build_http_client;
use crate::core::library::GameLibrary;
use crate::core::notify::{Alert, AlertSurface, StatusEvent, StatusSink};
use crate::core::runtime::{
    translate_guest_path, ExecOutput, GameRuntime, GameSettings, InstallInfo, Runner,
};

// ── HTTP ────────────────────────────────────────────────

/// Local server answering every request to `/installer.exe` with a fixed
/// status and body, counting requests.
pub struct InstallerServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl InstallerServer {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub async fn spawn_installer_server(status: StatusCode, body: &'static [u8]) -> InstallerServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/installer.exe",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (status, body)
            }
        }),
    );

    serve(app, hits).await
}

/// Local server streaming `chunks` chunks of `chunk_len` copies of `fill`,
/// pausing `delay` between chunks.
pub async fn spawn_streaming_server(
    fill: u8,
    chunk_len: usize,
    chunks: usize,
    delay: Duration,
) -> InstallerServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/installer.exe",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                let body = stream::unfold(0usize, move |sent| async move {
                    if sent == chunks {
                        return None;
                    }
                    tokio::time::sleep(delay).await;
                    Some((Ok::<_, std::io::Error>(vec![fill; chunk_len]), sent + 1))
                });
                Body::from_stream(body)
            }
        }),
    );

    serve(app, hits).await
}

async fn serve(app: Router, hits: Arc<AtomicUsize>) -> InstallerServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    InstallerServer {
        url: format!("http://{addr}/installer.exe"),
        hits,
    }
}

pub fn cache_store(root: &Path) -> CacheStore {
    CacheStore::new(
        root.to_path_buf(),
        Downloader::new(build_http_client().expect("http client")),
        FreshnessPolicy::default(),
    )
}

// ── Processes ───────────────────────────────────────────

/// Write an executable `dir/name` shell script that appends its arguments
/// and wine environment to `log`, prints `exit <code>` to stderr and exits
/// with `code`.
#[cfg(unix)]
pub fn write_recording_script(dir: &Path, name: &str, log: &Path, code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    std::fs::create_dir_all(dir).expect("script dir");
    let path = dir.join(name);
    let script = format!(
        "#!/bin/sh\n\
         {{\n\
         printf 'args=%s\\n' \"$*\"\n\
         printf 'WINE=%s\\n' \"$WINE\"\n\
         printf 'WINESERVER=%s\\n' \"$WINESERVER\"\n\
         printf 'WINEPREFIX=%s\\n' \"$WINEPREFIX\"\n\
         printf 'WINEDEBUG=%s\\n' \"$WINEDEBUG\"\n\
         }} >> '{log}'\n\
         echo 'exit {code}' >&2\n\
         exit {code}\n",
        log = log.display(),
    );
    std::fs::write(&path, script).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}

// ── Games ───────────────────────────────────────────────

/// What running the installer inside a [`FakeGame`] does.
#[derive(Clone)]
pub enum InstallerBehavior {
    /// Exits 0 and leaves the dependency's files in the prefix.
    Installs(Dependency),
    /// Exits 0 but installs nothing.
    SucceedsWithoutInstalling,
    /// Installs the files, then exits non-zero.
    FailsAfterInstalling(Dependency),
    /// Exits non-zero, installs nothing.
    Fails,
}

pub struct FakeGame {
    app_name: String,
    runner: Runner,
    install: Option<InstallInfo>,
    root: tempfile::TempDir,
    prefix: Mutex<PathBuf>,
    behavior: InstallerBehavior,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeGame {
    pub fn new(app_name: &str, executable: &str) -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let prefix = root.path().join("pfx");
        Self {
            app_name: app_name.to_string(),
            runner: Runner::Legendary,
            install: Some(InstallInfo {
                executable: executable.to_string(),
                is_dlc: false,
                install_path: Some(root.path().join("game")),
            }),
            root,
            prefix: Mutex::new(prefix),
            behavior: InstallerBehavior::SucceedsWithoutInstalling,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_installer(mut self, behavior: InstallerBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn uninstalled(mut self) -> Self {
        self.install = None;
        self
    }

    fn prefix(&self) -> PathBuf {
        self.prefix.lock().expect("prefix lock").clone()
    }

    /// Create the dependency's probe file in the current prefix. Fake prefixes
    /// have no `dosdevices`, so `C:` lives at `drive_c`.
    pub fn place_probe_file(&self, dependency: &Dependency) {
        let guest = dependency.probe_path.replace('\\', "/");
        let relative = guest.strip_prefix("C:/").expect("probe path on C:");
        let host = self.prefix().join("drive_c").join(relative);
        std::fs::create_dir_all(host.parent().expect("parent")).expect("create dirs");
        std::fs::write(host, b"MZ").expect("write probe file");
    }

    /// Point the settings at a different, empty prefix.
    pub fn switch_prefix(&self) {
        *self.prefix.lock().expect("prefix lock") = self.root.path().join("pfx-other");
    }

    /// Arguments of every `run_in_prefix` call.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl GameRuntime for FakeGame {
    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn runner(&self) -> Runner {
        self.runner
    }

    async fn install_info(&self) -> Option<InstallInfo> {
        self.install.clone()
    }

    async fn settings(&self) -> SetupResult<GameSettings> {
        Ok(GameSettings {
            compat_layer_version: "wine-test".to_string(),
            prefix_path: self.prefix(),
        })
    }

    async fn run_in_prefix(&self, args: &[OsString]) -> SetupResult<ExecOutput> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(args.iter().map(|a| a.to_string_lossy().to_string()).collect());

        let failure = || SetupError::Execution {
            program: "wine".to_string(),
            code: Some(1),
            stderr: "installer failed".to_string(),
        };

        match &self.behavior {
            InstallerBehavior::Installs(dependency) => {
                self.place_probe_file(dependency);
                Ok(ExecOutput {
                    code: Some(0),
                    ..ExecOutput::default()
                })
            }
            InstallerBehavior::SucceedsWithoutInstalling => Ok(ExecOutput {
                code: Some(0),
                ..ExecOutput::default()
            }),
            InstallerBehavior::FailsAfterInstalling(dependency) => {
                self.place_probe_file(dependency);
                Err(failure())
            }
            InstallerBehavior::Fails => Err(failure()),
        }
    }

    async fn translate_path(&self, guest: &str, settings: &GameSettings) -> SetupResult<PathBuf> {
        translate_guest_path(&settings.prefix_path, guest).await
    }
}

#[derive(Default)]
pub struct FakeLibrary {
    games: Mutex<HashMap<String, Arc<FakeGame>>>,
}

impl FakeLibrary {
    pub fn insert(&self, game: FakeGame) -> Arc<FakeGame> {
        let game = Arc::new(game);
        self.games
            .lock()
            .expect("library lock")
            .insert(game.app_name.clone(), game.clone());
        game
    }
}

#[async_trait]
impl GameLibrary for FakeLibrary {
    async fn get(&self, app_name: &str) -> Option<Arc<dyn GameRuntime>> {
        let game = self.games.lock().expect("library lock").get(app_name).cloned()?;
        Some(game as Arc<dyn GameRuntime>)
    }
}

// ── Side channels ───────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<StatusEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().expect("sink lock").clone()
    }
}

impl StatusSink for RecordingSink {
    fn publish(&self, event: StatusEvent) {
        self.events.lock().expect("sink lock").push(event);
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingAlerts {
    pub fn shown(&self) -> Vec<Alert> {
        self.alerts.lock().expect("alerts lock").clone()
    }
}

impl AlertSurface for RecordingAlerts {
    fn show(&self, alert: Alert) {
        self.alerts.lock().expect("alerts lock").push(alert);
    }
}

pub type FontCall = (String, PathBuf, Vec<String>);

#[derive(Default)]
pub struct FakeFonts {
    fail: bool,
    calls: Mutex<Vec<FontCall>>,
}

impl FakeFonts {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<FontCall> {
        self.calls.lock().expect("fonts lock").clone()
    }
}

#[async_trait]
impl FontProvisioner for FakeFonts {
    async fn provision(
        &self,
        compat_layer_version: &str,
        prefix: &Path,
        packages: &[String],
    ) -> SetupResult<()> {
        self.calls.lock().expect("fonts lock").push((
            compat_layer_version.to_string(),
            prefix.to_path_buf(),
            packages.to_vec(),
        ));

        if self.fail {
            return Err(SetupError::Execution {
                program: "winetricks".to_string(),
                code: Some(1),
                stderr: "arial download failed".to_string(),
            });
        }
        Ok(())
    }
}
