use std::sync::Arc;

use range_serve::config::{AppState, Config};
use range_serve::error::Result;
use range_serve::{logger, server};

fn main() -> Result<()> {
    let cfg = Config::load()?;
    logger::init(&cfg.logging)?;

    // Worker thread count from config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<()> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::bind_listener(addr)?;

    let state = Arc::new(AppState::new(cfg));
    logger::log_server_start(&listener.local_addr()?, &state);
    server::run(listener, state, server::shutdown_signal()).await
}
