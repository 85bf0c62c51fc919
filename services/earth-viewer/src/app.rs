//! Line-driven event loop.
//!
//! Input lines, map clicks and settled fetches are handled one at a time.
//! Fetches run on their own tasks and report back through a channel tagged
//! with their [`RequestToken`].

use std::fmt::Display;
use std::path::Path;

use anyhow::Result;
use futures::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use imagery_client::{FetchResult, ImageryClient, ImageryParams};
use imagery_common::ViewerError;

use crate::commands::{Command, HELP};
use crate::controller::{Controller, FetchStart, RequestToken, Settlement};
use crate::presentation::{describe_map, describe_state, present};

type Settled = (RequestToken, FetchResult);

enum Flow {
    Continue,
    Quit,
}

pub struct App {
    controller: Controller,
    client: ImageryClient,
}

impl App {
    pub fn new(controller: Controller, client: ImageryClient) -> Self {
        Self { controller, client }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Run until `quit` or end of input.
    ///
    /// At end of input the loop keeps waiting while the latest fetch is
    /// still loading, so its result is always shown. Returns the controller
    /// in its final state.
    pub async fn run<R, W>(mut self, input: R, mut out: W) -> Result<Controller>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (tx, mut settled) = mpsc::unbounded_channel::<Settled>();
        let mut clicks = self.controller.subscribe_clicks();
        let mut lines = input.lines();
        let mut input_open = true;

        write_line(&mut out, "Type 'help' for commands.").await?;

        loop {
            tokio::select! {
                biased;

                Some(click) = clicks.next() => {
                    self.controller.apply_click(&click);
                    write_line(&mut out, format!("Map clicked: {}, {}", click.lat, click.lon)).await?;
                }
                Some((token, result)) = settled.recv() => {
                    if self.controller.complete_fetch(token, result) == Settlement::Applied {
                        write_line(&mut out, present(self.controller.state())).await?;
                    }
                }
                line = lines.next_line(), if input_open => {
                    match line? {
                        Some(line) => {
                            if let Flow::Quit = self.handle_line(&line, &tx, &mut out).await? {
                                break;
                            }
                        }
                        None => input_open = false,
                    }
                }
            }

            if !input_open && !self.controller.state().is_loading() {
                break;
            }
        }

        info!(latest = ?self.controller.latest_token(), "Viewer exiting");
        Ok(self.controller)
    }

    async fn handle_line<W>(
        &mut self,
        line: &str,
        tx: &mpsc::UnboundedSender<Settled>,
        out: &mut W,
    ) -> Result<Flow>
    where
        W: AsyncWrite + Unpin,
    {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                write_line(out, err).await?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::SetLatitude(raw) => self.controller.set_latitude(raw),
            Command::SetLongitude(raw) => self.controller.set_longitude(raw),
            Command::SetDate(raw) => self.controller.set_date(raw),
            Command::SetLayer(raw) => {
                if let Err(err) = self.controller.set_layer(&raw) {
                    write_line(out, err).await?;
                }
            }
            Command::ClearLayer => self.controller.clear_layer(),
            Command::Click { x, y } => {
                if let Err(err) = self.controller.click(x, y) {
                    write_line(out, err).await?;
                }
            }
            Command::Zoom(zoom) => self.controller.set_zoom(zoom),
            Command::Fetch => {
                if let FetchStart::Pending { token, params } = self.controller.begin_fetch() {
                    spawn_fetch(self.client.clone(), token, params, tx.clone());
                }
                write_line(out, present(self.controller.state())).await?;
            }
            Command::Show => write_line(out, describe_state(self.controller.state())).await?,
            Command::Map => write_line(out, describe_map(&self.controller.map_frame())).await?,
            Command::Save(path) => self.save(&path, out).await?,
            Command::Help => write_line(out, HELP).await?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn save<W>(&self, path: &Path, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let Some(image) = self.controller.state().image() else {
            return write_line(out, "No image to save.").await;
        };

        match image.save(path).await {
            Ok(()) => write_line(out, format!("Saved {} bytes to {}", image.len(), path.display())).await,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Save failed");
                write_line(out, err).await
            }
        }
    }
}

/// Run one fetch on its own task and report the settled result.
///
/// A fetch task that dies settles as an unknown failure.
fn spawn_fetch(
    client: ImageryClient,
    token: RequestToken,
    params: ImageryParams,
    tx: mpsc::UnboundedSender<Settled>,
) {
    tokio::spawn(async move {
        let fetch = tokio::spawn(async move { client.fetch_image(&params).await });
        let result = match fetch.await {
            Ok(result) => result,
            Err(join_err) => {
                error!(token = %token, error = %join_err, "Fetch task failed");
                FetchResult::failure(&ViewerError::Unknown)
            }
        };
        // The loop may already have exited.
        let _ = tx.send((token, result));
    });
}

async fn write_line<W>(out: &mut W, text: impl Display) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(format!("{}\n", text).as_bytes()).await?;
    out.flush().await?;
    Ok(())
}
