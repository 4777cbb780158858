use std::time::Duration;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use futures::StreamExt;

use backer::adapters::ReqwestHttpClient;
use backer::api::ApiClient;
use backer::config::ClientConfig;
use backer::scheduler::UiLoop;
use backer::screens::{ActivityFeedAdapter, RowView};
use backer::sections::SectionedAdapter;
use backer::session::Session;
use backer::viewmodels::ActivityFeedViewModel;

const FIRST_PAGE_TIMEOUT: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = ClientConfig::from_env();
    backer::logging::init(&config.log_filter);
    tracing::info!(api = %config.api_base_url, "starting");

    let http = ReqwestHttpClient::new(config.request_timeout_secs)
        .wrap_err("failed to build HTTP client")?;
    let session = Session::new();
    let api = ApiClient::from_config(http, &config, session.clone());

    // This thread renders; the feed pipeline runs on the runtime's workers.
    let (mut ui_loop, scheduler) = UiLoop::new();
    let mut view_model = ActivityFeedViewModel::new(api, scheduler);
    let mut activities = view_model.activities();
    let mut logged_out_empty = view_model.logged_out_empty_state();
    let mut logged_in_empty = view_model.logged_in_empty_state();
    let mut errors = view_model
        .errors()
        .ok_or_else(|| eyre!("activity feed errors already taken"))?;
    let mut failures = view_model
        .failures()
        .ok_or_else(|| eyre!("activity feed failures already taken"))?;

    let mut adapter = ActivityFeedAdapter::new();

    let first_page = tokio::time::timeout(FIRST_PAGE_TIMEOUT, async {
        loop {
            ui_loop.run_pending();
            tokio::select! {
                Some(page) = activities.next() => return Ok(page),
                Some(envelope) = errors.next() => {
                    return Err(eyre!(
                        "activity feed request failed ({}): {}",
                        envelope.http_code,
                        envelope.error_message().unwrap_or("no message")
                    ));
                }
                Some(err) = failures.next() => {
                    return Err(eyre!("{}: {}", err.category().description(), err));
                }
                _ = tokio::time::sleep(Duration::from_millis(50)) => {}
            }
        }
    })
    .await
    .wrap_err("timed out waiting for the activity feed")??;

    adapter.take_activities(first_page);
    if let Some(shown) = logged_out_empty.next().await {
        adapter.show_logged_out_empty_state(shown);
    }
    if let Some(shown) = logged_in_empty.next().await {
        adapter.show_logged_in_empty_state(shown);
    }

    for position in 0..adapter.item_count() {
        let mut holder = adapter.create_view_holder(position, RowView::new())?;
        adapter.bind(&mut holder, position)?;
        println!("{:>3} {:?}: {}", position, holder.layout(), holder.view());
    }

    Ok(())
}
