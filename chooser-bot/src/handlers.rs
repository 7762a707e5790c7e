use chooser_router::{
    DispatchOutcome, InboundEvent, Interaction, MessageKey, Selection, TextMessage,
};
use tracing::{debug, error};
use twilight_http::Client;
use twilight_model::{
    application::interaction::InteractionData,
    channel::message::embed::Embed,
    gateway::payload::incoming::{InteractionCreate, MessageCreate},
    http::interaction::{InteractionResponse, InteractionResponseType},
};
use twilight_util::builder::embed::EmbedBuilder;

use crate::context::Context;

/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';

const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;
const DEFAULT_ITEM_COUNT: usize = 24;
const MAX_ITEM_COUNT: usize = 500;

/// Route a gateway message: `!choose` starts a selection, anything else may be
/// a typed page number for a pending page jump.
pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.trim();

    if let Some(command) = content.strip_prefix(COMMAND_PREFIX) {
        let mut parts = command.split_whitespace();
        if parts
            .next()
            .is_some_and(|name| name.eq_ignore_ascii_case("choose"))
        {
            return run_choose(ctx, &msg, parts.next()).await;
        }
        return Ok(());
    }

    let event = InboundEvent::Text(TextMessage {
        channel_id: msg.channel_id,
        message_id: msg.id,
        author_id: msg.author.id,
        content: msg.content.clone(),
    });

    dispatch(&ctx, event).await;
    Ok(())
}

/// Route a component interaction into the chooser.
pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let Some(InteractionData::MessageComponent(data)) = interaction.data.as_ref() else {
        return Ok(());
    };
    let Some(message) = interaction.message.as_ref() else {
        return Ok(());
    };

    let event = InboundEvent::Action(Interaction {
        message: MessageKey::new(message.channel_id, message.id),
        user_id: interaction.author_id(),
        action_tag: data.custom_id.clone(),
    });

    defer_component_update(&ctx.http, &interaction).await?;
    dispatch(&ctx, event).await;

    Ok(())
}

async fn dispatch(ctx: &Context, event: InboundEvent) {
    let channel_id = event.channel_id();
    // The guard drops at the end of this statement; handlers may lock the chooser again.
    let dispatched = ctx.chooser.lock().await.dispatch(event).await;

    let outcome = match dispatched {
        Ok(dispatched) => dispatched.complete().await,
        Err(source) => Err(source),
    };

    match outcome {
        Ok(DispatchOutcome::NotForChooser) => {}
        Ok(outcome) => debug!(channel_id = channel_id.get(), ?outcome, "chooser event handled"),
        Err(source) => error!(?source, channel_id = channel_id.get(), "chooser dispatch failed"),
    }
}

/// `!choose [count]`: offer `count` sample items and report the pick.
async fn run_choose(ctx: Context, msg: &MessageCreate, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(count) = parse_item_count(arg1) else {
        let usage = format!("Usage: `{COMMAND_PREFIX}choose [count]` (1-{MAX_ITEM_COUNT})");
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let items: Vec<String> = (1..=count).map(|index| format!("Item #{index}")).collect();
    let embed = choose_embed(items.len())?;

    let created = http
        .create_message(msg.channel_id)
        .embeds(&[embed])
        .await?
        .model()
        .await?;

    let chosen_http = ctx.http.clone();
    let cancelled_http = ctx.http.clone();
    let channel_id = msg.channel_id;
    let requester = msg.author.id;

    let selection = Selection::new(items, move |interaction, choice| async move {
        let picker = interaction.user_id.unwrap_or(requester);
        chosen_http
            .create_message(channel_id)
            .content(&format!("<@{picker}> picked **{choice}**."))
            .await?;
        anyhow::Ok(())
    })
    .on_cancel(move |_| async move {
        cancelled_http
            .create_message(channel_id)
            .content("Selection cancelled.")
            .await?;
        anyhow::Ok(())
    });

    ctx.chooser
        .lock()
        .await
        .start(MessageKey::new(created.channel_id, created.id), selection)
        .await?;

    Ok(())
}

fn parse_item_count(raw: Option<&str>) -> Option<usize> {
    match raw {
        Some(value) => value
            .parse::<usize>()
            .ok()
            .filter(|count| (1..=MAX_ITEM_COUNT).contains(count)),
        None => Some(DEFAULT_ITEM_COUNT),
    }
}

fn choose_embed(item_count: usize) -> anyhow::Result<Embed> {
    let embed = EmbedBuilder::new()
        .title("Pick an item")
        .color(DEFAULT_EMBED_COLOR)
        .description(format!(
            "{item_count} items. Use the arrows to page, tap the page number to jump."
        ))
        .validate()?
        .build();

    Ok(embed)
}

/// Acknowledge a component tap; the chooser edits the message itself.
async fn defer_component_update(
    http: &Client,
    interaction: &InteractionCreate,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::DeferredUpdateMessage,
        data: None,
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_count_defaults_and_bounds() {
        assert_eq!(parse_item_count(None), Some(DEFAULT_ITEM_COUNT));
        assert_eq!(parse_item_count(Some("7")), Some(7));
        assert_eq!(parse_item_count(Some("0")), None);
        assert_eq!(parse_item_count(Some("501")), None);
        assert_eq!(parse_item_count(Some("many")), None);
    }

    #[test]
    fn embed_mentions_item_count() {
        let embed = choose_embed(12).expect("valid embed");
        assert_eq!(embed.title.as_deref(), Some("Pick an item"));
        assert!(embed.description.is_some_and(|text| text.starts_with("12 items")));
    }
}
