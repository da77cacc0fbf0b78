#[tokio::main]
async fn main() -> anyhow::Result<()> {
    symptomate::run().await
}
