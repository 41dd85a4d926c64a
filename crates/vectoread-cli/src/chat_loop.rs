//! Interactive chat loop over stdin/stdout.

use std::io::Write;

use anyhow::Result;
use async_trait::async_trait;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use vectoread_client::{ChatEmitter, ChatSession};

/// Prints transcript updates straight to the terminal. Deltas are flushed
/// as they arrive so partial replies are visible immediately.
struct TerminalEmitter;

impl TerminalEmitter {
    fn flush() {
        let _ = std::io::stdout().flush();
    }
}

#[async_trait]
impl ChatEmitter for TerminalEmitter {
    async fn emit_user_message(&mut self, _content: &str) {
        // The turn has started; open the reply line.
        print!("{} ", "assistant:".cyan().bold());
        Self::flush();
    }

    async fn emit_assistant_delta(&mut self, delta: &str) {
        print!("{delta}");
        Self::flush();
    }

    async fn emit_stream_error(&mut self, sentinel: &str) {
        println!();
        println!("{}", sentinel.red());
    }

    async fn emit_turn_complete(&mut self, _content: &str) {
        println!();
    }
}

pub async fn run(mut session: ChatSession) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut emitter = TerminalEmitter;

    loop {
        print!("{} ", "you:".green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/quit" {
            break;
        }

        session.send(input, &mut emitter).await;
    }

    Ok(())
}
