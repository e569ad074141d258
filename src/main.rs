use stopover::config::Config;
use stopover::engine::Engine;
use stopover::error::Error;
use stopover::external::mapbox::MapboxGeocoder;
use stopover::{logging, server};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    logging::init(&config)?;

    let engine = Engine::new(MapboxGeocoder::new(&config));

    server::serve(engine, config.addr()).await
}
