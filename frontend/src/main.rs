/*
 * Responsibility
 * - tokio runtime 起動
 * - app::run() の呼び出し
 */
use anyhow::Result;

mod app;
mod config;
mod error;
mod pages;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
