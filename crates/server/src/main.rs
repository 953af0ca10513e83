#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dhonkbot_server::start().await
}
