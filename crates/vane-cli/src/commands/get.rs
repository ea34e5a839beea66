use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use vane_core::Settings;
use vane_gateway::{HttpGateway, RolloutGateway};
use vane_view::{Palette, Renderer, Shutdown, ViewController, WatchOptions};

use crate::signals;

pub struct GetArgs {
    pub rollout_id: String,
    pub watch: bool,
    pub no_color: bool,
    pub timeout_seconds: Option<u64>,
}

pub async fn run(settings: &Settings, args: GetArgs) -> anyhow::Result<()> {
    let gateway: Arc<dyn RolloutGateway> = Arc::new(HttpGateway::new(settings)?);
    let palette = if args.no_color {
        Palette::plain()
    } else {
        Palette::colored()
    };
    let mut controller = ViewController::new(
        gateway,
        args.rollout_id.as_str(),
        Renderer::new(palette),
        std::io::stdout(),
    );

    if !args.watch {
        controller.show().await?;
        return Ok(());
    }

    // A rollout that cannot be read at all is reported once, not polled.
    controller.fetch().await?;

    let shutdown = Shutdown::new();
    signals::install(shutdown.clone());
    if let Some(secs) = args.timeout_seconds.filter(|secs| *secs > 0) {
        shutdown.trigger_after(Duration::from_secs(secs));
    }

    let options = WatchOptions {
        poll_interval: settings.poll_interval,
        ..WatchOptions::default()
    };
    let report = controller.watch(options, shutdown.subscribe()).await;
    debug!(
        rollout = %args.rollout_id,
        polls = report.polls,
        redraws = report.redraws,
        failures = report.failures,
        "watch finished"
    );
    Ok(())
}
