use docsight_core::Config;

// Use mimalloc as the global allocator for lower fragmentation under upload load.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    // Database, storage, summarizer client and routes
    let (_state, router) = docsight_api::setup::initialize_app(config.clone()).await?;

    docsight_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
