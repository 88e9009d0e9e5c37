use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{error, info, trace, warn};

use twilight_gateway::{
    self as gateway, CloseFrame, Config, Event, EventTypeFlags, Intents, MessageSender, Shard,
    StreamExt,
};
use twilight_http::Client as HttpClient;
use twilight_http::client::ClientBuilder;
use twilight_model::gateway::payload::incoming::{InteractionCreate, Ready as ReadyPayload};
use twilight_model::id::Id;
use twilight_model::id::marker::{ApplicationMarker, ChannelMarker};

use streambell_common::traits::platform_traits::{
    ConnectionStatus, Notifier, PlatformAuth, PlatformIntegration,
};

use crate::Error;

/// The shard runner:
///   - calls `shard.next_event(...)`
///   - forwards slash-command interactions to `tx`.
async fn shard_runner(mut shard: Shard, tx: UnboundedSender<Box<InteractionCreate>>) {
    let shard_id = shard.id().number();
    info!("(ShardRunner) Shard {shard_id} started. Listening for events.");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        match item {
            Ok(event) => match event {
                Event::Ready(ready) => {
                    let data: &ReadyPayload = ready.as_ref();
                    info!(
                        "Shard {shard_id} => READY as {} (ID={})",
                        data.user.name, data.user.id
                    );
                }
                Event::InteractionCreate(interaction) => {
                    let _ = tx.send(interaction);
                }
                other => {
                    trace!("Shard {shard_id} => unhandled event: {other:?}");
                }
            },
            Err(err) => {
                error!("Shard {shard_id} => error receiving event: {err:?}");
            }
        }
    }

    warn!("(ShardRunner) Shard {shard_id} event loop ended.");
}

/// Gateway connection plus the HTTP client used for command registration,
/// interaction replies, and announcements.
pub struct DiscordPlatform {
    pub token: String,
    pub connection_status: ConnectionStatus,

    /// Receiver for inbound interactions; `None` until `connect`.
    rx: Mutex<Option<UnboundedReceiver<Box<InteractionCreate>>>>,

    shard_tasks: Vec<JoinHandle<()>>,
    shard_senders: Vec<MessageSender>,

    pub http: Option<Arc<HttpClient>>,
}

impl DiscordPlatform {
    pub fn new(token: String) -> Self {
        Self {
            token,
            connection_status: ConnectionStatus::Disconnected,
            rx: Mutex::new(None),
            shard_tasks: Vec::new(),
            shard_senders: Vec::new(),
            http: None,
        }
    }

    /// Callers can `await` the next inbound slash-command interaction.
    pub async fn next_interaction(&self) -> Option<Box<InteractionCreate>> {
        let mut guard = self.rx.lock().await;
        match guard.as_mut() {
            Some(r) => r.recv().await,
            None => None,
        }
    }

    /// The application id backing this bot token, needed for interaction
    /// endpoints.
    pub async fn application_id(&self) -> Result<Id<ApplicationMarker>, Error> {
        let http = self
            .http
            .as_ref()
            .ok_or_else(|| Error::Platform("Discord HTTP client not connected".into()))?;
        let app = http
            .current_user_application()
            .await
            .map_err(|e| Error::Platform(format!("fetching application info: {e}")))?
            .model()
            .await
            .map_err(|e| Error::Platform(format!("parsing application info: {e}")))?;
        Ok(app.id)
    }
}

#[async_trait]
impl PlatformAuth for DiscordPlatform {
    async fn authenticate(&mut self) -> Result<(), Error> {
        if self.token.is_empty() {
            return Err(Error::Auth("Discord token is empty".into()));
        }
        Ok(())
    }

    async fn is_authenticated(&self) -> Result<bool, Error> {
        Ok(!self.token.is_empty())
    }
}

#[async_trait]
impl PlatformIntegration for DiscordPlatform {
    async fn connect(&mut self) -> Result<(), Error> {
        if matches!(self.connection_status, ConnectionStatus::Connected) {
            info!("(DiscordPlatform) Already connected => skipping");
            return Ok(());
        }

        let (tx, rx) = unbounded_channel::<Box<InteractionCreate>>();
        {
            let mut guard = self.rx.lock().await;
            *guard = Some(rx);
        }

        let http_client = Arc::new(
            ClientBuilder::new()
                .token(self.token.clone())
                .timeout(Duration::from_secs(30))
                .build(),
        );
        self.http = Some(http_client.clone());

        // Slash commands arrive over the gateway without any privileged
        // intents.
        let config = Config::new(self.token.clone(), Intents::GUILDS);

        let shards = gateway::create_recommended(&http_client, config, |_, b| b.build())
            .await
            .map_err(|e| Error::Platform(format!("create_recommended error: {e}")))?;

        for shard in shards {
            self.shard_senders.push(shard.sender());

            let tx_for_shard = tx.clone();
            let handle = tokio::spawn(async move {
                shard_runner(shard, tx_for_shard).await;
            });
            self.shard_tasks.push(handle);
        }

        self.connection_status = ConnectionStatus::Connected;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), Error> {
        self.connection_status = ConnectionStatus::Disconnected;

        for sender in &self.shard_senders {
            let _ = sender.close(CloseFrame::NORMAL);
        }
        for task in &mut self.shard_tasks {
            let _ = task.await;
        }

        self.shard_senders.clear();
        self.shard_tasks.clear();

        {
            let mut guard = self.rx.lock().await;
            *guard = None;
        }

        Ok(())
    }

    async fn send_message(&self, channel: &str, message: &str) -> Result<(), Error> {
        let channel_id_u64: u64 = channel
            .parse()
            .map_err(|_| Error::Platform(format!("Invalid channel ID: {channel}")))?;
        let channel_id = Id::<ChannelMarker>::new(channel_id_u64);

        if let Some(http) = &self.http {
            http.create_message(channel_id)
                .content(message)
                .await
                .map_err(|e| Error::Platform(format!("Error sending Discord message: {e:?}")))?;
        }

        Ok(())
    }

    async fn get_connection_status(&self) -> Result<ConnectionStatus, Error> {
        Ok(self.connection_status.clone())
    }
}

/// Posts live announcements into the fixed, pre-configured channel.
pub struct DiscordNotifier {
    http: Arc<HttpClient>,
    channel_id: Id<ChannelMarker>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<HttpClient>, channel_id: &str) -> Result<Self, Error> {
        let id: u64 = channel_id
            .parse()
            .map_err(|_| Error::Platform(format!("Invalid announce channel ID: {channel_id}")))?;
        Ok(Self {
            http,
            channel_id: Id::new(id),
        })
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(&self, text: &str) -> Result<(), Error> {
        self.http
            .create_message(self.channel_id)
            .content(text)
            .await
            .map_err(|e| Error::Platform(format!("Error sending Discord message: {e:?}")))?;
        Ok(())
    }
}
