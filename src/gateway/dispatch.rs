#![allow(dead_code)]
//! Routes one inbound envelope to the right collaborator: auth handled
//! in-gateway against the user store, lobby intents forwarded to the
//! `LobbyService`, game intents forwarded to the game's `GameRuntime`.

use std::sync::Arc;

use crate::auth::session::verify_token;
use crate::cosmos_db::database_abstractions::{LobbyDbTrait, UserDbTrait};
use crate::rules_engine::domain::player::PlayerId;
use crate::rules_engine::intents::Intent;
use crate::runtime::game_runtime::SubmitOutcome;
use crate::shared::errors::ProtocolErrorCode;
use crate::shared::wire::{ClientMessage, ControlMessage, LobbyMemberView, LobbyView, ServerMessage};

use super::state::AppState;

/// Per-connection state the session actor owns and mutates as a result of
/// dispatch — not persisted, rebuilt on every reconnect from `session_state`.
/// Passed into `dispatch` by value and handed back updated, so the actor
/// never needs to hold a borrow of it across an await point.
#[derive(Default, Clone)]
pub struct ConnectionSession {
    pub user_id: Option<PlayerId>,
    pub display_name: Option<String>,
    pub lobby_id: Option<String>,
    pub game_id: Option<String>,
}

fn to_lobby_view(lobby: &crate::lobby::lobby::PersistLobby) -> LobbyView {
    LobbyView {
        id: lobby.id.clone(),
        code: lobby.code.clone(),
        name: lobby.name.clone(),
        host_user_id: lobby.host_user_id.clone(),
        player_mode: lobby.player_mode,
        use_beginner_layout: lobby.use_beginner_layout,
        members: lobby
            .members
            .iter()
            .map(|m| LobbyMemberView { user_id: m.user_id.clone(), display_name: m.display_name.clone(), color: m.color.clone(), ready: m.ready })
            .collect(),
        status: match lobby.status {
            crate::lobby::lobby::LobbyStatus::Waiting => "waiting".into(),
            crate::lobby::lobby::LobbyStatus::Started => "started".into(),
        },
        game_id: lobby.game_id.clone(),
    }
}

/// Takes the connection's session state by value and hands back the
/// updated copy alongside the reply, so a caller driving this from an
/// actor never needs to keep a live `&mut` across the `.await`s inside.
/// `connection_id` identifies the calling connection so a submitted
/// game intent's resulting events can be tagged with their origin and
/// skipped by that same connection's broadcast forwarder.
pub async fn dispatch(state: &Arc<AppState>, mut session: ConnectionSession, message: ClientMessage, connection_id: &str) -> (ServerMessage, ConnectionSession) {
    let reply = match message {
        ClientMessage::Control(control) => dispatch_control(state, &mut session, control, connection_id).await,
        ClientMessage::Game(intent) => dispatch_game(state, &mut session, intent, connection_id).await,
    };
    (reply, session)
}

async fn dispatch_control(state: &Arc<AppState>, session: &mut ConnectionSession, message: ControlMessage, connection_id: &str) -> ServerMessage {
    match message {
        ControlMessage::Authenticate { token } => match verify_token(&token) {
            Some(user_id) => match state.db.as_user_db().find_user_by_id(&user_id).await {
                Ok(Some(user)) => {
                    session.user_id = Some(user.id.clone());
                    session.display_name = Some(user.display_name.clone());
                    ServerMessage::Authenticated { user_id: user.id, display_name: user.display_name }
                }
                _ => ServerMessage::AuthenticationFailed { message: "unknown user".into() },
            },
            None => ServerMessage::AuthenticationFailed { message: "invalid or expired token".into() },
        },
        ControlMessage::Ping => ServerMessage::Pong,
        ControlMessage::GetSessionState => {
            let lobby = match &session.lobby_id {
                Some(id) => state.db.as_lobby_db().find_lobby_by_id(id).await.ok().flatten().map(|l| to_lobby_view(&l)),
                None => None,
            };
            ServerMessage::SessionState { user_id: session.user_id.clone(), lobby, game_id: session.game_id.clone() }
        }
        ControlMessage::CreateLobby { name, player_mode, use_beginner_layout } => {
            let (Some(user_id), Some(display_name)) = (session.user_id.clone(), session.display_name.clone()) else {
                return ServerMessage::ProtocolError { code: ProtocolErrorCode::Unauthorized, message: "authenticate first".into() };
            };
            match state.lobbies.create(user_id, display_name, name, player_mode, use_beginner_layout).await {
                Ok(lobby) => {
                    session.lobby_id = Some(lobby.id.clone());
                    ServerMessage::LobbyCreated { lobby: to_lobby_view(&lobby) }
                }
                Err(e) => ServerMessage::LobbyError { kind: e.kind, message: e.message },
            }
        }
        ControlMessage::JoinLobby { code } => {
            let (Some(user_id), Some(display_name)) = (session.user_id.clone(), session.display_name.clone()) else {
                return ServerMessage::ProtocolError { code: ProtocolErrorCode::Unauthorized, message: "authenticate first".into() };
            };
            match state.lobbies.join(&code, user_id, display_name).await {
                Ok(lobby) => {
                    session.lobby_id = Some(lobby.id.clone());
                    ServerMessage::LobbyJoined { lobby: to_lobby_view(&lobby) }
                }
                Err(e) => ServerMessage::LobbyError { kind: e.kind, message: e.message },
            }
        }
        ControlMessage::LeaveLobby => {
            let (Some(lobby_id), Some(user_id)) = (session.lobby_id.clone(), session.user_id.clone()) else {
                return ServerMessage::ProtocolError { code: ProtocolErrorCode::Unauthorized, message: "not in a lobby".into() };
            };
            session.lobby_id = None;
            match state.lobbies.leave(&lobby_id, &user_id).await {
                Ok(_) => ServerMessage::LobbyLeft,
                Err(e) => ServerMessage::LobbyError { kind: e.kind, message: e.message },
            }
        }
        ControlMessage::SelectColor { color } => {
            let (Some(lobby_id), Some(user_id)) = (session.lobby_id.clone(), session.user_id.clone()) else {
                return ServerMessage::ProtocolError { code: ProtocolErrorCode::Unauthorized, message: "not in a lobby".into() };
            };
            match state.lobbies.select_color(&lobby_id, &user_id, color).await {
                Ok(lobby) => ServerMessage::LobbyUpdated { lobby: to_lobby_view(&lobby) },
                Err(e) => ServerMessage::LobbyError { kind: e.kind, message: e.message },
            }
        }
        ControlMessage::SetReady { ready } => {
            let (Some(lobby_id), Some(user_id)) = (session.lobby_id.clone(), session.user_id.clone()) else {
                return ServerMessage::ProtocolError { code: ProtocolErrorCode::Unauthorized, message: "not in a lobby".into() };
            };
            match state.lobbies.set_ready(&lobby_id, &user_id, ready).await {
                Ok(lobby) => ServerMessage::LobbyUpdated { lobby: to_lobby_view(&lobby) },
                Err(e) => ServerMessage::LobbyError { kind: e.kind, message: e.message },
            }
        }
        ControlMessage::StartGame => {
            let (Some(lobby_id), Some(user_id)) = (session.lobby_id.clone(), session.user_id.clone()) else {
                return ServerMessage::ProtocolError { code: ProtocolErrorCode::Unauthorized, message: "not in a lobby".into() };
            };
            match state.lobbies.start(&lobby_id, &user_id).await {
                Ok((_lobby, game_id)) => {
                    session.game_id = Some(game_id.clone());
                    ServerMessage::GameStarted { game_id }
                }
                Err(e) => ServerMessage::LobbyError { kind: e.kind, message: e.message },
            }
        }
        ControlMessage::Reconnect { last_seen_event_index } => {
            let Some(game_id) = session.game_id.clone() else {
                return ServerMessage::ProtocolError { code: ProtocolErrorCode::Unauthorized, message: "not in a game".into() };
            };
            match state.games.get_or_recover(&game_id).await {
                Ok(runtime) => {
                    let state_snapshot = runtime.current_state().await;
                    match runtime.reconnection_tail(last_seen_event_index).await {
                        Ok(crate::runtime::game_runtime::TailResult::Events { start_index, end_index, events }) => {
                            ServerMessage::GameReconnected(crate::shared::wire::GameReconnectedPayload {
                                player_order: state_snapshot.players.iter().map(|p| p.id.clone()).collect(),
                                board_seed: state_snapshot.config.board_seed,
                                config: state_snapshot.config.clone(),
                                roster: state_snapshot
                                    .players
                                    .iter()
                                    .map(|p| crate::rules_engine::domain::state::RosterEntry { id: p.id.clone(), display_name: p.display_name.clone(), color: p.color.clone() })
                                    .collect(),
                                current_turn: state_snapshot.turn.active_player.clone(),
                                start_index,
                                end_index,
                                tail_events: events,
                            })
                        }
                        Ok(crate::runtime::game_runtime::TailResult::Snapshot { state: snap, start_index, end_index, events }) => {
                            ServerMessage::GameReconnected(crate::shared::wire::GameReconnectedPayload {
                                player_order: snap.players.iter().map(|p| p.id.clone()).collect(),
                                board_seed: snap.config.board_seed,
                                config: snap.config.clone(),
                                roster: snap
                                    .players
                                    .iter()
                                    .map(|p| crate::rules_engine::domain::state::RosterEntry { id: p.id.clone(), display_name: p.display_name.clone(), color: p.color.clone() })
                                    .collect(),
                                current_turn: snap.turn.active_player.clone(),
                                start_index,
                                end_index,
                                tail_events: events,
                            })
                        }
                        Err(e) => ServerMessage::ProtocolError { code: ProtocolErrorCode::InternalError, message: e.to_string() },
                    }
                }
                Err(e) => ServerMessage::ProtocolError { code: ProtocolErrorCode::InternalError, message: e.to_string() },
            }
        }
        ControlMessage::SupplyTrade { proposal_id } => {
            let Some(caller) = session.user_id.clone() else {
                return ServerMessage::ProtocolError { code: ProtocolErrorCode::Unauthorized, message: "authenticate first".into() };
            };
            let Some(game_id) = session.game_id.clone() else {
                return ServerMessage::ProtocolError { code: ProtocolErrorCode::Unauthorized, message: "not in a game".into() };
            };
            let runtime = match state.games.get_or_recover(&game_id).await {
                Ok(r) => r,
                Err(e) => return ServerMessage::ProtocolError { code: ProtocolErrorCode::InternalError, message: e.to_string() },
            };
            let current = runtime.current_state().await;
            let Some(trade) = current.turn.open_trades.iter().find(|t| t.id == proposal_id) else {
                return ServerMessage::ProtocolError { code: ProtocolErrorCode::MalformedMessage, message: "no such trade proposal".into() };
            };
            let Some(accepter) = trade.accepters.iter().min().cloned() else {
                return ServerMessage::ProtocolError { code: ProtocolErrorCode::MalformedMessage, message: "trade has no accepter yet".into() };
            };
            dispatch_game(state, session, Intent::ExecuteTrade { player: caller, trade_id: proposal_id, accepter }, connection_id).await
        }
    }
}

async fn dispatch_game(state: &Arc<AppState>, session: &mut ConnectionSession, intent: Intent, connection_id: &str) -> ServerMessage {
    let Some(game_id) = session.game_id.clone() else {
        return ServerMessage::ProtocolError { code: ProtocolErrorCode::Unauthorized, message: "not in a game".into() };
    };
    let runtime = match state.games.get_or_recover(&game_id).await {
        Ok(r) => r,
        Err(e) => return ServerMessage::ProtocolError { code: ProtocolErrorCode::InternalError, message: e.to_string() },
    };
    match runtime.submit(intent, Some(connection_id.to_string())).await {
        SubmitOutcome::Accepted { start_index, end_index, events } => {
            ServerMessage::GameEvents { game_id, start_index, end_index, events }
        }
        SubmitOutcome::Rejected(violations) => ServerMessage::IntentRejected { request_id: String::new(), violations },
        SubmitOutcome::InternalError(e) => ServerMessage::ProtocolError { code: ProtocolErrorCode::InternalError, message: e.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::issue_token;
    use crate::auth::users::PersistUser;
    use crate::cosmos_db::database_abstractions::DatabaseWrapper;
    use crate::rules_engine::domain::state::PlayerMode;

    async fn signed_in_session(state: &Arc<AppState>, identifier: &str, display_name: &str) -> ConnectionSession {
        let user = PersistUser::new(identifier, display_name, "hunter2").unwrap();
        state.db.as_user_db().create_user(&user).await.unwrap();
        let (token, _) = issue_token(&user.id).unwrap();
        let (reply, session) = dispatch(state, ConnectionSession::default(), ClientMessage::Control(ControlMessage::Authenticate { token }), "test-conn").await;
        assert!(matches!(reply, ServerMessage::Authenticated { .. }));
        session
    }

    /// A full walk from three anonymous connections to a running game: sign
    /// in, one host creates a lobby, two guests join by code, everyone picks
    /// a color and readies up, the host starts the game, and the resulting
    /// `game_id` accepts a real intent.
    #[tokio::test]
    async fn lobby_flow_ends_with_a_submittable_game() {
        let db = Arc::new(DatabaseWrapper::new_memory());
        let state = AppState::new(db);

        let mut host = signed_in_session(&state, "host@example.com", "Host").await;
        let mut guest1 = signed_in_session(&state, "g1@example.com", "Guest One").await;
        let mut guest2 = signed_in_session(&state, "g2@example.com", "Guest Two").await;

        let (reply, updated) = dispatch(
            &state,
            host,
            ClientMessage::Control(ControlMessage::CreateLobby { name: "Game Night".into(), player_mode: PlayerMode::ThreeOrFour, use_beginner_layout: true }),
            "host-conn",
        )
        .await;
        host = updated;
        let code = match reply {
            ServerMessage::LobbyCreated { lobby } => lobby.code,
            other => panic!("expected LobbyCreated, got {other:?}"),
        };

        for guest in [&mut guest1, &mut guest2] {
            let (reply, updated) = dispatch(&state, guest.clone(), ClientMessage::Control(ControlMessage::JoinLobby { code: code.clone() }), "guest-conn").await;
            *guest = updated;
            assert!(matches!(reply, ServerMessage::LobbyJoined { .. }));
        }

        for (session, color) in [(&mut host, "red"), (&mut guest1, "blue"), (&mut guest2, "orange")] {
            let (_, updated) = dispatch(&state, session.clone(), ClientMessage::Control(ControlMessage::SelectColor { color: color.into() }), "conn").await;
            *session = updated;
            let (_, updated) = dispatch(&state, session.clone(), ClientMessage::Control(ControlMessage::SetReady { ready: true }), "conn").await;
            *session = updated;
        }

        let (reply, host) = dispatch(&state, host, ClientMessage::Control(ControlMessage::StartGame), "host-conn").await;
        let game_id = match reply {
            ServerMessage::GameStarted { game_id } => game_id,
            other => panic!("expected GameStarted, got {other:?}"),
        };
        assert_eq!(host.game_id.as_deref(), Some(game_id.as_str()));

        let runtime = state.games.get(&game_id).await.expect("game just started must be registered");
        let player = runtime.current_state().await.turn.active_player.clone();
        let node = runtime.current_state().await.board.nodes()[0].id;
        let (reply, _) = dispatch(&state, host, ClientMessage::Game(Intent::PlaceSetupSettlement { player, node }), "host-conn").await;
        assert!(matches!(reply, ServerMessage::GameEvents { .. }), "expected GameEvents, got {reply:?}");
    }
}
