//! Async-friendly session API (simple worker-backed abstraction).

use std::sync::mpsc::{self, Sender};
use std::thread;

use tokio::sync::oneshot;

use crate::session::Session;
use crate::theme::Theme;
use crate::{Error, PageSnapshot, Result};

enum Command {
    Start(oneshot::Sender<PageSnapshot>),
    Click(String, oneshot::Sender<PageSnapshot>),
    PopState(oneshot::Sender<PageSnapshot>),
    ToggleTheme(oneshot::Sender<Result<Theme>>),
    Snapshot(oneshot::Sender<PageSnapshot>),
    Close(oneshot::Sender<()>),
}

/// An async-friendly session handle backed by a dedicated worker thread.
///
/// The worker thread owns a synchronous `Session` and executes commands
/// sent from async tasks, so callers get an async interface without the
/// session needing to cross threads. Commands are processed strictly in
/// arrival order: a click issued while another navigation is in flight
/// resolves after it, so the last command's content always wins.
#[derive(Clone)]
pub struct AsyncSession {
    cmd_tx: Sender<Command>,
}

impl AsyncSession {
    /// Create a new handle. `build` runs on the worker thread and
    /// constructs the session that thread will own.
    pub async fn new<F>(build: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Session> + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            // Build the session on the worker thread
            let mut session = match build() {
                Ok(s) => s,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };

            let _ = init_tx.send(Ok(()));

            // Command loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Start(resp) => {
                        session.start();
                        let _ = resp.send(session.snapshot());
                    }
                    Command::Click(href, resp) => {
                        session.click(&href);
                        let _ = resp.send(session.snapshot());
                    }
                    Command::PopState(resp) => {
                        session.pop_state();
                        let _ = resp.send(session.snapshot());
                    }
                    Command::ToggleTheme(resp) => {
                        let _ = resp.send(session.toggle_theme());
                    }
                    Command::Snapshot(resp) => {
                        let _ = resp.send(session.snapshot());
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
        });

        match init_rx.await {
            Ok(Ok(())) => Ok(Self { cmd_tx }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(Error::Other(
                "session worker exited during initialization".to_string(),
            )),
        }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .map_err(|_| Error::Other("session worker is gone".to_string()))?;
        rx.await
            .map_err(|_| Error::Other("session worker dropped the reply".to_string()))
    }

    /// Initial page load; see [`Session::start`]
    pub async fn start(&self) -> Result<PageSnapshot> {
        self.request(Command::Start).await
    }

    /// Intercepted nav-link click; see [`Session::click`]
    pub async fn click(&self, href: &str) -> Result<PageSnapshot> {
        let href = href.to_string();
        self.request(|tx| Command::Click(href, tx)).await
    }

    /// Back/forward notification; see [`Session::pop_state`]
    pub async fn pop_state(&self) -> Result<PageSnapshot> {
        self.request(Command::PopState).await
    }

    pub async fn toggle_theme(&self) -> Result<Theme> {
        self.request(Command::ToggleTheme).await?
    }

    pub async fn snapshot(&self) -> Result<PageSnapshot> {
        self.request(Command::Snapshot).await
    }

    /// Shut down the worker thread.
    pub async fn close(&self) -> Result<()> {
        self.request(Command::Close).await
    }
}
