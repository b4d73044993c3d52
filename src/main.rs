mod body;
mod browser;
mod config;
mod cors;
mod err;
mod http;
mod opt;
mod path;
mod routes;
mod server;
mod tcp;

#[tokio::main]
async fn main() -> Result<(), err::DisplayError> {
    let opt::Options { verbose } = clap::Parser::parse();

    env_logger::Builder::new()
        .filter_level(match verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let config = config::Config::from_current_exe()?;
    server::run(config, server::interrupted()).await?;

    Ok(())
}
