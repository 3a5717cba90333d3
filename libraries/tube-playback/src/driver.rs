//! Async host for the controller
//!
//! [`spawn_driver`] moves a [`PlaybackController`] onto a tokio task. The task
//! is the single logical thread: commands and player signals arrive over an
//! unbounded channel, timers are mapped onto `tokio::time`, and recorded
//! events are forwarded to the presentation layer.
//!
//! Metadata lookups run on the caller's task, never inside the driver, and
//! finish with an unconditional append. The queue may change shape while a
//! lookup is in flight.

use crate::{
    controller::PlaybackController,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    player::{MediaPlayer, PlayerSignal},
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use tube_core::{Item, MetadataLookup};

/// Commands accepted by the driver
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Append(Item),
    RemoveAt(usize),
    MoveItem { from: usize, to: usize },
    SetCursor(usize),
    PlayAt(usize),
    Next,
    Previous,
    Play,
    Pause,
    TogglePlayPause,
    Seek(f64),
    Clear,
    SetUiFlag(bool),
    ToggleUiFlag,
    /// Lifecycle callback from the external player
    Signal(PlayerSignal),
    /// Stop the driver and hand the controller back
    Shutdown,
}

/// Cloneable sender side of a running driver
#[derive(Debug, Clone)]
pub struct DriverHandle {
    commands: mpsc::UnboundedSender<PlayerCommand>,
}

impl DriverHandle {
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| PlaybackError::InvalidOperation("driver has stopped".to_string()))
    }

    /// Forward a player callback
    pub fn signal(&self, signal: PlayerSignal) -> Result<()> {
        self.send(PlayerCommand::Signal(signal))
    }

    /// Resolve `link`, look up its metadata and append the item
    ///
    /// Nothing is added when the link does not resolve or the lookup fails.
    /// The append targets whatever the queue looks like when the lookup
    /// completes.
    pub async fn add_song(&self, lookup: &dyn MetadataLookup, link: &str) -> Result<Item> {
        let item = tube_metadata::fetch_item(lookup, link).await?;
        debug!(id = %item.id, title = %item.title, "Metadata resolved, appending");
        self.send(PlayerCommand::Append(item.clone()))?;
        Ok(item)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(PlayerCommand::Shutdown)
    }
}

/// Run `controller` on a new tokio task
///
/// Returns the command handle, the event stream, and a join handle that
/// yields the controller back after [`PlayerCommand::Shutdown`] or once every
/// handle is dropped.
pub fn spawn_driver<P>(
    controller: PlaybackController<P>,
) -> (
    DriverHandle,
    mpsc::UnboundedReceiver<PlaybackEvent>,
    JoinHandle<PlaybackController<P>>,
)
where
    P: MediaPlayer + 'static,
{
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(run_driver(controller, command_rx, event_tx));
    (
        DriverHandle {
            commands: command_tx,
        },
        event_rx,
        task,
    )
}

async fn run_driver<P: MediaPlayer>(
    mut controller: PlaybackController<P>,
    mut commands: mpsc::UnboundedReceiver<PlayerCommand>,
    events: mpsc::UnboundedSender<PlaybackEvent>,
) -> PlaybackController<P> {
    // Logical time zero, so that controller.now() lines up with the wall clock
    let origin = Instant::now()
        .checked_sub(controller.now())
        .unwrap_or_else(Instant::now);

    info!("Playback driver started");
    forward_events(&mut controller, &events);

    loop {
        let deadline = controller.next_deadline();

        tokio::select! {
            command = commands.recv() => {
                controller.run_until(origin.elapsed());
                match command {
                    Some(PlayerCommand::Shutdown) | None => break,
                    Some(command) => {
                        if let Err(e) = apply(&mut controller, command) {
                            warn!(error = %e, "Command failed");
                            forward_events(&mut controller, &events);
                            // Same as forward_events: no listener is not a failure
                            let _ = events.send(PlaybackEvent::Error {
                                message: e.to_string(),
                            });
                        }
                    }
                }
            }
            () = sleep_until_deadline(origin, deadline) => {
                controller.run_until(origin.elapsed());
            }
        }

        forward_events(&mut controller, &events);
    }

    controller.shutdown();
    forward_events(&mut controller, &events);
    info!("Playback driver stopped");
    controller
}

fn apply<P: MediaPlayer>(
    controller: &mut PlaybackController<P>,
    command: PlayerCommand,
) -> Result<()> {
    debug!(?command, "Applying command");
    match command {
        PlayerCommand::Append(item) => controller.append(item),
        PlayerCommand::RemoveAt(index) => {
            controller.remove_at(index);
        }
        PlayerCommand::MoveItem { from, to } => {
            controller.move_item(from, to);
        }
        PlayerCommand::SetCursor(index) => {
            controller.set_cursor(index);
        }
        PlayerCommand::PlayAt(index) => controller.play_at(index)?,
        PlayerCommand::Next => controller.next()?,
        PlayerCommand::Previous => controller.previous()?,
        PlayerCommand::Play => controller.play()?,
        PlayerCommand::Pause => controller.pause(),
        PlayerCommand::TogglePlayPause => controller.toggle_play_pause()?,
        PlayerCommand::Seek(seconds) => {
            controller.seek(seconds)?;
        }
        PlayerCommand::Clear => controller.clear(),
        PlayerCommand::SetUiFlag(visible) => controller.set_ui_flag(visible),
        PlayerCommand::ToggleUiFlag => {
            controller.toggle_ui_flag();
        }
        PlayerCommand::Signal(signal) => controller.on_signal(signal),
        PlayerCommand::Shutdown => {}
    }
    Ok(())
}

async fn sleep_until_deadline(origin: Instant, deadline: Option<Duration>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(origin + deadline).await,
        None => std::future::pending::<()>().await,
    }
}

fn forward_events<P: MediaPlayer>(
    controller: &mut PlaybackController<P>,
    events: &mpsc::UnboundedSender<PlaybackEvent>,
) {
    for event in controller.drain_events() {
        // A closed receiver only means nobody is listening
        let _ = events.send(event);
    }
}
