#[tokio::main]
async fn main() -> anyhow::Result<()> {
    atlas_server::start_server().await
}
