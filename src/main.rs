use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use picrelay::application::dto::{TriggerRequest, TriggerResponse};
use picrelay::application::use_cases::{
    AcquireImageUseCase, DeliverImageUseCase, HandleTriggerUseCase,
};
use picrelay::domain::ports::OutboundPort;
use picrelay::domain::services::CooldownTable;
use picrelay::infrastructure::config::{CLEANUP_GRACE, REQUEST_TIMEOUT};
use picrelay::infrastructure::{
    AppConfig, ChannelKind, CliArgs, ConsoleChannel, FetcherConfig, HttpEndpointFetcher,
    StorageManager, TransientImageStore, WebhookChannel,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = match &args.config {
        Some(path) => StorageManager::at(path.clone()),
        None => StorageManager::new()?,
    };
    let mut config = storage.load_config()?;
    config.merge_with_args(args);
    Ok(config)
}

fn create_channel(config: &AppConfig) -> Result<Arc<dyn OutboundPort>> {
    match config.channel.kind {
        ChannelKind::Console => Ok(Arc::new(ConsoleChannel::stdout())),
        ChannelKind::Webhook => {
            let url = config
                .channel
                .webhook_url
                .as_deref()
                .ok_or_else(|| eyre!("channel.webhook_url is required for the webhook channel"))?;
            Ok(Arc::new(WebhookChannel::new(url, REQUEST_TIMEOUT)?))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(
        version = picrelay::VERSION,
        sources = config.sources.len(),
        "Starting {}",
        picrelay::NAME
    );

    let store = Arc::new(TransientImageStore::new(config.effective_cache_dir(), CLEANUP_GRACE).await?);
    let fetcher = Arc::new(HttpEndpointFetcher::new(FetcherConfig {
        timeout: REQUEST_TIMEOUT,
        verify_ssl: config.verify_ssl,
    }));
    let outbound = create_channel(&config)?;

    let delivery = DeliverImageUseCase::new(store.clone(), config.delivery_policy());
    let acquire = AcquireImageUseCase::new(fetcher, delivery);
    let trigger = HandleTriggerUseCase::new(
        config.sources.clone(),
        Arc::new(CooldownTable::new(config.cooldown_duration())),
        acquire,
        outbound,
    );

    let response = trigger
        .execute(TriggerRequest::new(args.trigger_text(), args.user.as_str()))
        .await;

    match &response {
        TriggerResponse::Ignored => warn!("No source matched the trigger text"),
        TriggerResponse::Completed(outcome) => info!(%outcome, "Run finished"),
        other => info!(response = ?other, "Run finished"),
    }

    store.drain().await;

    Ok(())
}
