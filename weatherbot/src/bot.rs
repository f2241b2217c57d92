//! Command routing and the long-polling update loop.

use std::{collections::HashMap, future::Future, sync::Arc, time::Duration};
use tokio::{
    sync::mpsc::{self, UnboundedSender, error::SendError},
    task::JoinSet,
};
use tracing::{debug, info, warn};
use weatherbot_core::{RenderedMessage, WeatherService};

use crate::telegram::{Message, TelegramClient};

/// Pause after a failed `getUpdates` call.
const RETRY_DELAY: Duration = Duration::from_secs(5);

pub const START_TEXT: &str = "Привет! Я бот для прогноза погоды с использованием Яндекс.Погоды.\n\
    Используйте команду /weather с параметрами:\n\
    /weather -location <город> [-date <дата> | -from <дата> -to <дата>] [-full]\n\n\
    Примеры:\n\
    /weather -location Москва -date завтра\n\
    /weather -location Санкт-Петербург -from 2023-12-25 -to 2023-12-31 -full";

pub const HELP_TEXT: &str = "📌 Использование:\n\
    /weather --location <город> [--date <дата> | --from <дата> --to <дата>] [--full]\n\n\
    📌 Параметры:\n\
    --location: город для прогноза (обязательный)\n\
    --date: дата (сегодня, завтра или YYYY-MM-DD)\n\
    --from и --to: начальная и конечная даты периода\n\
    --full: подробный прогноз (по умолчанию краткий)\n\n\
    📌 Примеры:\n\
    /weather --location Москва --date завтра\n\
    /weather -l Казань -t 2023-12-31 -f\n\
    /weather --location Сочи --from 2023-12-25 --to 2023-12-31 --full";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Weather,
}

impl Command {
    /// Recognize the leading `/command` of a message.
    ///
    /// A `/command@botname` form is accepted only when `botname` matches
    /// `username`, or when the bot's username is unknown.
    pub fn detect(text: &str, username: Option<&str>) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = match name.split_once('@') {
            Some((_, target)) if username.is_some_and(|me| !me.eq_ignore_ascii_case(target)) => {
                return None;
            }
            Some((name, _)) => name,
            None => name,
        };

        match name.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "weather" => Some(Command::Weather),
            _ => None,
        }
    }
}

/// Reply to a message text, or `None` when the message is not a command for this bot.
pub async fn respond(
    service: &WeatherService,
    text: &str,
    username: Option<&str>,
) -> Option<RenderedMessage> {
    let reply = match Command::detect(text, username)? {
        Command::Start => RenderedMessage::from_text(START_TEXT),
        Command::Help => RenderedMessage::from_text(HELP_TEXT),
        Command::Weather => service.answer(text).await,
    };
    Some(reply)
}

#[derive(Debug)]
pub struct Bot {
    telegram: TelegramClient,
    service: WeatherService,
    /// Username from `getMe`, used to filter `/command@botname` mentions.
    username: Option<String>,
}

impl Bot {
    pub fn new(
        telegram: TelegramClient,
        service: WeatherService,
        username: Option<String>,
    ) -> Self {
        Self {
            telegram,
            service,
            username,
        }
    }

    /// Poll for updates until `shutdown` completes, then wait for queued replies.
    ///
    /// Every chat gets one worker, so its commands are answered one at a time
    /// in arrival order while different chats proceed concurrently.
    pub async fn run(self: Arc<Self>, shutdown: impl Future<Output = ()>) {
        info!(username = ?self.username, "Bot is starting...");
        tokio::pin!(shutdown);

        let mut offset = None;
        let mut chats: HashMap<i64, UnboundedSender<Message>> = HashMap::new();
        let mut workers = JoinSet::new();

        loop {
            let polled = tokio::select! {
                () = &mut shutdown => break,
                polled = self.telegram.get_updates(offset) => polled,
            };

            let updates = match polled {
                Ok(updates) => updates,
                Err(err) => {
                    warn!(error = %format!("{err:#}"), "polling failed");
                    tokio::select! {
                        () = &mut shutdown => break,
                        () = tokio::time::sleep(RETRY_DELAY) => continue,
                    }
                }
            };

            for update in updates {
                offset = Some(update.update_id + 1);
                if let Some(message) = update.message {
                    self.enqueue(&mut chats, &mut workers, message);
                }
            }

            while let Some(res) = workers.try_join_next() {
                if let Err(err) = res {
                    warn!(error = %err, "chat worker failed");
                }
            }
        }

        // Closing the channels lets each worker finish its queue and exit.
        drop(chats);
        if !workers.is_empty() {
            info!(chats = workers.len(), "waiting for pending replies");
        }
        while let Some(res) = workers.join_next().await {
            if let Err(err) = res {
                warn!(error = %err, "chat worker failed");
            }
        }
        info!("Bot stopped");
    }

    fn enqueue(
        self: &Arc<Self>,
        chats: &mut HashMap<i64, UnboundedSender<Message>>,
        workers: &mut JoinSet<()>,
        message: Message,
    ) {
        let chat = message.chat.id;
        let message = match chats.get(&chat) {
            Some(tx) => match tx.send(message) {
                Ok(()) => return,
                // The worker is gone; start a new one below.
                Err(SendError(message)) => message,
            },
            None => message,
        };

        let (tx, mut rx) = mpsc::unbounded_channel();
        let bot = Arc::clone(self);
        workers.spawn(async move {
            bot.handle_message(message).await;
            while let Some(message) = rx.recv().await {
                bot.handle_message(message).await;
            }
        });
        chats.insert(chat, tx);
    }

    async fn handle_message(&self, message: Message) {
        let Some(text) = message.text.as_deref() else {
            return;
        };

        let user = message.from.as_ref().map(|u| u.id);
        let Some(reply) = respond(&self.service, text, self.username.as_deref()).await else {
            debug!(?user, "ignoring non-command message");
            return;
        };
        info!(?user, chat = message.chat.id, text, "command handled");

        if let Err(err) = self.telegram.deliver(message.chat.id, &reply).await {
            warn!(error = %format!("{err:#}"), chat = message.chat.id, "reply not delivered");
        }
    }
}
