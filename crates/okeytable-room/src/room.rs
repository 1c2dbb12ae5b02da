//! Room actor: an isolated Tokio task that owns one game session.
//!
//! The actor serializes everything that touches the session: inbound
//! player actions, info queries, and the delayed bot wake commands. A
//! wake is scheduled as a sleep-then-send task carrying the generation
//! observed at schedule time; when it is finally processed the actor
//! re-validates it against the live session, so a timer queued during a
//! previous deal can never mutate the game that replaced it.

use std::collections::HashMap;

use okeytable_game::{bot, engine, GamePhase, GameSession};
use okeytable_protocol::{Audience, ClientAction, ConnId, RoomKey, SeatInfo, ServerEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, oneshot};
use tokio::time;

use crate::{RoomConfig, RoomError};

/// Channel sender for delivering outbound events to one connection.
/// The transport layer drains the receiving end.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent to a room actor through its channel.
pub(crate) enum RoomCommand {
    /// Seat a connection, registering its outbound channel.
    Join {
        conn: ConnId,
        name: String,
        sender: EventSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// A game action from a connection (fire-and-forget; rule rejections
    /// are silent by policy).
    Action { conn: ConnId, action: ClientAction },

    /// A bot wake timer fired. Carries the generation captured when the
    /// timer was scheduled.
    BotWake { generation: u64 },

    /// Request a state snapshot.
    Info { reply: oneshot::Sender<RoomInfo> },

    /// Shut down the room.
    Shutdown,
}

/// A snapshot of a room's observable state (no hand contents).
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub room: RoomKey,
    pub phase: GamePhase,
    pub turn: usize,
    pub generation: u64,
    pub hand_sizes: Vec<usize>,
    pub deck_size: usize,
    pub discard_size: usize,
    pub seats: Vec<SeatInfo>,
}

/// Handle to a running room actor. Cheap to clone.
#[derive(Clone)]
pub struct RoomHandle {
    room: RoomKey,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// The room this handle talks to.
    pub fn room(&self) -> &RoomKey {
        &self.room
    }

    /// Seats a connection in the room.
    pub async fn join(
        &self,
        conn: ConnId,
        name: impl Into<String>,
        sender: EventSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                conn,
                name: name.into(),
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room.clone()))?
    }

    /// Delivers a game action (fire-and-forget).
    pub async fn action(&self, conn: ConnId, action: ClientAction) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Action { conn, action })
            .await
            .map_err(|_| RoomError::Unavailable(self.room.clone()))
    }

    /// Requests the current room snapshot.
    pub async fn info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Info { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room.clone()))
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable(self.room.clone()))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    session: GameSession,
    config: RoomConfig,
    /// Outbound channels, keyed by connection.
    senders: HashMap<ConnId, EventSender>,
    rng: StdRng,
    /// Clone of the actor's own command sender, used by wake timers.
    self_tx: mpsc::Sender<RoomCommand>,
    receiver: mpsc::Receiver<RoomCommand>,
    /// A wake timer is in flight. Prevents double-scheduling; cleared
    /// when the wake is processed.
    bot_wake_pending: bool,
}

impl RoomActor {
    /// Runs the actor loop, processing commands until shutdown.
    async fn run(mut self) {
        tracing::info!(room = %self.session.room, "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    conn,
                    name,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(conn, name, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Action { conn, action } => {
                    self.handle_action(conn, action);
                }
                RoomCommand::BotWake { generation } => {
                    self.handle_bot_wake(generation);
                }
                RoomCommand::Info { reply } => {
                    let _ = reply.send(self.info());
                }
                RoomCommand::Shutdown => {
                    tracing::info!(room = %self.session.room, "room shutting down");
                    break;
                }
            }

            // Whatever just happened, a stand-in may now hold the turn.
            self.maybe_schedule_bot();
        }

        tracing::info!(room = %self.session.room, "room actor stopped");
    }

    fn handle_join(
        &mut self,
        conn: ConnId,
        name: String,
        sender: EventSender,
    ) -> Result<(), RoomError> {
        if self.session.seat_of_conn(conn).is_some() {
            return Err(RoomError::AlreadySeated(conn, self.session.room.clone()));
        }

        let events = engine::join(&mut self.session, conn, &name);
        if events.is_empty() {
            return Err(RoomError::NotJoinable(self.session.room.clone()));
        }

        self.senders.insert(conn, sender);
        self.dispatch(events);
        Ok(())
    }

    fn handle_action(&mut self, conn: ConnId, action: ClientAction) {
        let Some(seat_index) = self.session.seat_of_conn(conn) else {
            tracing::debug!(
                room = %self.session.room,
                %conn,
                "action from an unseated connection ignored"
            );
            return;
        };

        let events = match action {
            // Joins arrive as RoomCommand::Join; a join action reaching
            // this path is from a connection that is already seated.
            ClientAction::Join { .. } => Vec::new(),
            ClientAction::Start { .. } => engine::start(&mut self.session, &mut self.rng),
            ClientAction::Draw { .. } => engine::draw(&mut self.session, seat_index, &mut self.rng),
            ClientAction::Play { tile, .. } => engine::play(&mut self.session, seat_index, tile),
            ClientAction::End { winner, .. } => engine::end(&mut self.session, winner),
        };

        self.dispatch(events);
    }

    /// Processes a fired wake timer. The generation captured at schedule
    /// time must match the live session or the wake is stale: the deal
    /// it belonged to has ended or been replaced by a restart.
    fn handle_bot_wake(&mut self, generation: u64) {
        self.bot_wake_pending = false;

        if generation != self.session.generation {
            tracing::debug!(
                room = %self.session.room,
                stale = generation,
                current = self.session.generation,
                "stale bot wake dropped"
            );
            return;
        }
        if !self.session.stand_in_to_move() {
            return;
        }

        let events = bot::run_once(&mut self.session, &mut self.rng);
        self.dispatch(events);
    }

    /// Schedules a bot wake if a stand-in holds the turn and none is in
    /// flight. The timer task only sleeps and sends; all state checks
    /// happen when the wake is processed, on the live session.
    fn maybe_schedule_bot(&mut self) {
        if self.bot_wake_pending || !self.session.stand_in_to_move() {
            return;
        }
        self.bot_wake_pending = true;

        let generation = self.session.generation;
        let delay = self.config.bot_delay;
        let tx = self.self_tx.clone();
        tracing::debug!(
            room = %self.session.room,
            seat = self.session.turn,
            delay_ms = delay.as_millis() as u64,
            "bot wake scheduled"
        );
        tokio::spawn(async move {
            time::sleep(delay).await;
            // A closed channel means the room is gone; nothing to do.
            let _ = tx.send(RoomCommand::BotWake { generation }).await;
        });
    }

    /// Dispatches events to their audiences. Missing receivers (gone
    /// connections, stand-in seats) are dropped silently.
    fn dispatch(&self, events: Vec<(Audience, ServerEvent)>) {
        for (audience, event) in events {
            match audience {
                Audience::Table => {
                    for sender in self.senders.values() {
                        let _ = sender.send(event.clone());
                    }
                }
                Audience::Seat(index) => {
                    let conn = self.session.seats.get(index).and_then(|seat| seat.conn);
                    if let Some(sender) = conn.and_then(|c| self.senders.get(&c)) {
                        let _ = sender.send(event);
                    }
                }
            }
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            room: self.session.room.clone(),
            phase: self.session.phase,
            turn: self.session.turn,
            generation: self.session.generation,
            hand_sizes: self.session.hand_sizes(),
            deck_size: self.session.deck.len(),
            discard_size: self.session.discard.len(),
            seats: self.session.seat_infos(),
        }
    }
}

/// Spawns a new room actor task and returns a handle to it.
pub(crate) fn spawn_room(room: RoomKey, config: RoomConfig) -> RoomHandle {
    let (tx, rx) = mpsc::channel(config.channel_size);

    let actor = RoomActor {
        session: GameSession::new(room.clone()),
        config,
        senders: HashMap::new(),
        rng: StdRng::from_os_rng(),
        self_tx: tx.clone(),
        receiver: rx,
        bot_wake_pending: false,
    };

    tokio::spawn(actor.run());

    RoomHandle { room, sender: tx }
}
