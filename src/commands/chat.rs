//! Style assistant chat, one-shot or interactive.

use crate::catalog::{StorefrontApi, StorefrontClient};
use crate::chat::{ChatMessage, ChatSession};
use crate::config::{Config, OutputFormat};
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const PROMPT: &str = "you> ";

pub struct ChatCommand {
    config: Config,
}

impl ChatCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn render(&self, message: &ChatMessage) -> String {
        let formatter = Formatter::new(self.config.format);
        if self.config.format == OutputFormat::Json {
            return serde_json::json!({
                "reply": message.content,
                "products": message.products,
            })
            .to_string();
        }
        if message.products.is_empty() {
            format!("tiyara> {}", message.content)
        } else {
            format!(
                "tiyara> {}\n{}",
                message.content,
                formatter.format_chat_products(&message.products)
            )
        }
    }

    /// Sends one message and returns the formatted reply.
    pub async fn ask(&self, message: &str) -> Result<String> {
        let client = StorefrontClient::new(&self.config).context("Failed to create HTTP client")?;
        self.ask_with_client(&client, message).await
    }

    pub async fn ask_with_client(&self, client: &impl StorefrontApi, message: &str) -> Result<String> {
        let mut session = ChatSession::new();
        match session.send(client, message).await {
            Some(reply) => Ok(self.render(reply)),
            None => anyhow::bail!("Message cannot be empty"),
        }
    }

    /// Interactive session on stdin/stdout.
    pub async fn repl(&self) -> Result<()> {
        let client = StorefrontClient::new(&self.config).context("Failed to create HTTP client")?;
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.repl_with(&client, stdin, &mut std::io::stdout()).await
    }

    /// Reads one message per line until EOF or `quit`.
    pub async fn repl_with<R, W>(
        &self,
        client: &impl StorefrontApi,
        input: R,
        out: &mut W,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut session = ChatSession::new();
        if let Some(greeting) = session.messages().first() {
            writeln!(out, "{}", self.render(greeting))?;
        }

        let mut lines = input.lines();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if matches!(line, "quit" | "exit") {
                break;
            }

            if let Some(reply) = session.send(client, line).await {
                writeln!(out, "{}", self.render(reply))?;
            }
        }

        writeln!(out)?;
        debug!("Chat ended after {} messages", session.messages().len());
        Ok(())
    }
}
