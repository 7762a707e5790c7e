use std::env;
use std::sync::Arc;

use tracing::{error, info};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use chooser_core::ChooserConfig;
use chooser_router::Chooser;

mod context;
mod handlers;
mod transport;

use context::Context;
use handlers::{handle_interaction, handle_message};
use transport::TwilightTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;
    let config = ChooserConfig::from_env()?;

    // One HTTP client shared by the transport and the handlers
    let http = Arc::new(Client::new(token.clone()));
    let chooser = Chooser::new(config, TwilightTransport::new(Arc::clone(&http)))?;
    let ctx = Context::new(Arc::clone(&http), chooser);

    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;
    let mut shard = Shard::new(ShardId::ONE, token, intents);

    info!("chooser bot is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("chooser bot is ready");
            }
            Event::MessageCreate(msg) => {
                if let Err(source) = handle_message(ctx.clone(), msg).await {
                    error!(?source, "failed to handle message");
                }
            }
            Event::InteractionCreate(interaction) => {
                if let Err(source) = handle_interaction(ctx.clone(), interaction).await {
                    error!(?source, "failed to handle interaction");
                }
            }
            _ => {}
        }
    }

    Ok(())
}
