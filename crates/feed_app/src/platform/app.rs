use std::io::{self, Write};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use feed_core::{FeedState, ViewState};
use feed_engine::{ArticleFeedController, ReqwestArticleSource};
use feed_logging::{feed_info, feed_warn};

use super::config::FeedConfig;
use super::ui;

pub async fn run(config: FeedConfig) -> anyhow::Result<()> {
    let source = ReqwestArticleSource::new(config.fetch_settings())?;
    feed_info!(
        "Polling {} every {:?}",
        source.url(),
        config.poll_interval()
    );

    let mut controller = ArticleFeedController::new(Arc::new(source));
    let mut state = FeedState::with_poll_interval(config.poll_interval());
    let mut out = io::stdout().lock();

    controller.activate(&mut state);
    print_view(&mut out, &state.view(), None)?;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let stepped = tokio::select! {
            stepped = controller.step(&mut state) => Some(stepped),
            signal = &mut shutdown => {
                if let Err(err) = signal {
                    feed_warn!("Ctrl-C listener failed: {}", err);
                }
                None
            }
        };

        match stepped {
            Some(true) => {
                if state.consume_dirty() {
                    let refreshed = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
                    print_view(&mut out, &state.view(), Some(&refreshed))?;
                }
            }
            Some(false) => break,
            None => {
                feed_info!("Shutting down");
                controller.teardown(&mut state);
                break;
            }
        }
    }

    Ok(())
}

fn print_view(out: &mut impl Write, view: &ViewState, refreshed_at: Option<&str>) -> io::Result<()> {
    writeln!(out, "{}", ui::constants::SEPARATOR)?;
    for line in ui::render::render(view, refreshed_at) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
