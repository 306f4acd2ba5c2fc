//! JSON-lines plumbing between the game loop and a byte stream.
//!
//! Input lines become `GameCommand::Input`. Broadcasts go out as one
//! `HostMsg` per line.

use crate::game_loop::{GameBroadcast, GameCommand};
use hoops_shared::protocol::{HostMsg, InputMsg};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{broadcast, mpsc};

/// Decode one input line. Blank and malformed lines give `None`.
pub fn parse_input_line(line: &str) -> Option<InputMsg> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<InputMsg>(line) {
        Ok(msg) => Some(msg),
        Err(e) => {
            tracing::warn!("Skipping malformed input line: {}", e);
            None
        }
    }
}

/// Forward input lines to the game loop until the reader hits EOF or the
/// loop stops listening.
pub async fn forward_input<R>(reader: R, game_tx: &mpsc::Sender<GameCommand>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let Some(msg) = parse_input_line(&line) else {
                    continue;
                };
                if game_tx.send(GameCommand::Input(msg)).await.is_err() {
                    tracing::warn!("Game loop stopped, dropping input");
                    break;
                }
            }
            Ok(None) => {
                tracing::info!("Input closed");
                break;
            }
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        }
    }
}

/// Write `first`, then every broadcast, until the broadcast closes or the
/// output fails.
pub async fn write_host_messages<W>(
    mut out: W,
    first: HostMsg,
    mut rx: broadcast::Receiver<GameBroadcast>,
) where
    W: AsyncWrite + Unpin,
{
    if let Err(e) = write_line(&mut out, &first).await {
        tracing::error!("Failed to write output: {}", e);
        return;
    }

    loop {
        let msg = match rx.recv().await {
            Ok(GameBroadcast::Frame(frame)) => HostMsg::Frame(frame),
            Ok(GameBroadcast::Shot(shot)) => HostMsg::Shot(shot),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!("Output lagged, dropped {} messages", n);
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };
        if let Err(e) = write_line(&mut out, &msg).await {
            tracing::error!("Failed to write output: {}", e);
            break;
        }
    }
}

async fn write_line<W>(out: &mut W, msg: &HostMsg) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut json = serde_json::to_string(msg)?;
    json.push('\n');
    out.write_all(json.as_bytes()).await?;
    out.flush().await
}
