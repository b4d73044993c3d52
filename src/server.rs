use crate::browser;
use crate::config::Config;
use crate::cors;
use crate::err::Error;
use crate::http::run_simple_server;
use crate::routes::State;
use crate::tcp;
use hyper::body::Incoming;
use std::future::Future;

pub async fn run(config: Config, shutdown: impl Future<Output = ()>) -> Result<(), Error> {
    let listener = tcp::bind(config.listen_addr())?;
    log::info!("Bound to {}", config.listen_addr());

    let url = config.url();
    println!("Serving {} at {}", config.root.display(), url);
    println!("Press Ctrl+C to stop the server");

    browser::launch(&url);

    let state = State::new(config.root);
    run_simple_server(
        listener,
        state,
        cors::respond_to_request::<Incoming>,
        shutdown,
    )
    .await?;

    println!("Server stopped");

    Ok(())
}

/// Resolves on the first Ctrl+C. If the handler can't be installed, never resolves.
pub async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::debug!("Received interrupt"),
        Err(e) => {
            log::error!("Failed to listen for interrupt: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
