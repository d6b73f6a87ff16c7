use igc::IgcClient;
use tracks::client::Client;
use web::{config::WebConfig, start_web_server, WebState};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let config = WebConfig::from_env().expect("expected a valid port in env.");

    // tracks
    let igc_client = IgcClient::new().expect("could not create http client.");
    let state = WebState::new(Client::from_source(igc_client));

    // web server
    if let Err(why) = start_web_server(state, config).await {
        log::error!("web server failed: {}", why);
        std::process::exit(1);
    }
}
