use std::sync::Arc;

use log::debug;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};

use product_import::clipboard::TerminalClipboard;
use product_import::render::render;
use product_import::store::Msg;
use product_import::{AiConfig, Session};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AiConfig::load()?;
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel();
    let mut session = Session::from_config(&config, Arc::new(TerminalClipboard), msg_tx.clone())?;

    let (quit_tx, mut quit_rx) = oneshot::channel();
    tokio::spawn(read_input(msg_tx, quit_tx));

    print!("{}", render(&session.view()));
    loop {
        tokio::select! {
            _ = &mut quit_rx => break,
            Some(msg) = msg_rx.recv() => {
                debug!("{:?}", msg);
                session.dispatch(msg);
                print!("{}", render(&session.view()));
            }
        }
    }

    Ok(())
}

/// Forward stdin lines as store messages until `:quit` or end of input.
async fn read_input(msg_tx: mpsc::UnboundedSender<Msg>, quit_tx: oneshot::Sender<()>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        let msg = if line == ":quit" {
            break;
        } else if line == ":copy" {
            Msg::CopySummary
        } else if let Some(index) = line.strip_prefix(":img") {
            match index.trim().parse() {
                Ok(index) => Msg::SelectImage(index),
                Err(_) => continue,
            }
        } else {
            Msg::Submit(line.to_string())
        };

        if msg_tx.send(msg).is_err() {
            break;
        }
    }

    let _ = quit_tx.send(());
}
