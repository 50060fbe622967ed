//! Human-readable formatting for server console lines and the CLI client.

use artline_shared::{RoomPhase, RoomView, ServerMsg, WorkKind};
use owo_colors::OwoColorize;

pub fn format_card_brief(title: &str, year_text: &str, kind: WorkKind, color: bool) -> String {
    let text = format!("{} ({})", title, year_text);
    if !color {
        return text;
    }
    match kind {
        WorkKind::Painting => text.yellow().to_string(),
        WorkKind::Sculpture => text.cyan().to_string(),
        WorkKind::Other => text.to_string(),
    }
}

fn phase_str(phase: RoomPhase) -> &'static str {
    match phase {
        RoomPhase::Waiting => "waiting",
        RoomPhase::Playing => "playing",
        RoomPhase::Terminated => "terminated",
    }
}

/// One-line room summary: code, phase, board size, whose turn.
pub fn format_room_line(view: &RoomView, color: bool) -> String {
    let turn = view
        .turn
        .and_then(|id| view.players.iter().find(|p| p.id == id))
        .map(|p| p.name.as_str())
        .unwrap_or("-");
    let line = format!(
        "[{}] {} | board {} | turn {}",
        view.code,
        phase_str(view.phase),
        view.board.len(),
        turn
    );
    if color {
        line.bold().to_string()
    } else {
        line
    }
}

/// Multi-line view dump used by the CLI watch mode.
pub fn format_view(view: &RoomView, color: bool) -> String {
    let mut out = Vec::new();
    out.push(format_room_line(view, color));
    let board = view
        .board
        .iter()
        .map(|c| format_card_brief(&c.title, &c.year_text, c.kind, color))
        .collect::<Vec<_>>()
        .join("  |  ");
    out.push(format!("  timeline: {}", board));
    for p in &view.players {
        match &p.hand {
            Some(hand) => {
                let cards = hand
                    .iter()
                    .map(|c| format_card_brief(&c.title, &c.year_text, c.kind, color))
                    .collect::<Vec<_>>()
                    .join(", ");
                out.push(format!("  {} ({} cards): {}", p.name, p.hand_count, cards));
            }
            None => out.push(format!("  {} ({} cards)", p.name, p.hand_count)),
        }
    }
    if let Some(msg) = &view.last_move {
        out.push(format!("  last move: {}", msg));
    }
    out.join("\n")
}

/// Render any server message for the CLI client.
pub fn format_server_msg(msg: &ServerMsg, color: bool) -> String {
    match msg {
        ServerMsg::RoomCreated { code, name } => {
            let line = format!("room {} created for {}", code, name);
            if color {
                line.green().to_string()
            } else {
                line
            }
        }
        ServerMsg::RoomJoined { code, name } => format!("{} joined room {}", name, code),
        ServerMsg::MatchStarted { message } => message.clone(),
        ServerMsg::StateUpdated(view) => format_view(view, color),
        ServerMsg::MoveResult {
            correct, message, ..
        } => {
            if !color {
                message.clone()
            } else if *correct {
                message.green().to_string()
            } else {
                message.red().to_string()
            }
        }
        ServerMsg::MatchEnded {
            winner_name,
            by_forfeit,
            by_abandonment,
            ..
        } => {
            let how = if *by_forfeit {
                " (by forfeit)"
            } else if *by_abandonment {
                " (by abandonment)"
            } else {
                ""
            };
            let line = format!("match over: {} wins{}", winner_name, how);
            if color {
                line.bold().green().to_string()
            } else {
                line
            }
        }
        ServerMsg::RoomError { message } => {
            if color {
                format!("error: {}", message).red().to_string()
            } else {
                format!("error: {}", message)
            }
        }
        ServerMsg::OpponentDisconnected { message } => message.clone(),
        ServerMsg::Pong => "pong".to_string(),
    }
}
