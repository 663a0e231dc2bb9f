use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    ssr_cli::main_entry().await
}
