//! Telegram transport for the admin bot

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode, UserId},
};

use crate::bot::{AdminBot, BotReply, Button};

/// Poll Telegram for updates until the task is dropped
pub async fn run(token: String, admin: AdminBot) {
    let bot = Bot::new(token);

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    tracing::info!("Telegram bot started");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![Arc::new(admin)])
        .build()
        .dispatch()
        .await;
}

async fn on_message(bot: Bot, msg: Message, admin: Arc<AdminBot>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let reply = if text.trim_start().starts_with("/start") {
        admin.start(msg.chat.id.0)
    } else {
        admin.handle_text(msg.chat.id.0, text)
    };
    send(&bot, msg.chat.id, reply).await
}

async fn on_callback(bot: Bot, query: CallbackQuery, admin: Arc<AdminBot>) -> ResponseResult<()> {
    bot.answer_callback_query(query.id.clone()).await?;

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };
    let chat_id = callback_chat(query.message.as_ref().map(|m| m.chat().id), query.from.id);
    let reply = admin.handle_action(chat_id.0, data);
    send(&bot, chat_id, reply).await
}

/// Chat the pressed button lives in; the presser's private chat when the
/// message is too old to be delivered with the query
fn callback_chat(message_chat: Option<ChatId>, from: UserId) -> ChatId {
    message_chat.unwrap_or(ChatId(from.0 as i64))
}

async fn send(bot: &Bot, chat_id: ChatId, reply: BotReply) -> ResponseResult<()> {
    let mut request = bot.send_message(chat_id, reply.text);
    if reply.markdown {
        request = request.parse_mode(ParseMode::Markdown);
    }
    if !reply.keyboard.is_empty() {
        request = request.reply_markup(keyboard(&reply.keyboard));
    }

    if let Err(e) = request.await {
        tracing::warn!("Failed to send reply to chat {}: {}", chat_id.0, e);
        return Err(e);
    }
    Ok(())
}

fn keyboard(rows: &[Vec<Button>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(rows.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.action.encode()))
            .collect::<Vec<_>>()
    }))
}
