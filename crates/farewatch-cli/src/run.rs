//! Orchestration for the sync-codes and check runs.
//!
//! Both runs walk the destination rows sequentially with a courtesy delay
//! between provider calls. Per-destination failures are logged and skipped
//! rather than propagated so a single bad destination does not abort the
//! full run.

use std::time::Duration;

use chrono::{Days, Utc};
use farewatch_amadeus::{select_cheapest, AmadeusClient, BestOffer, OfferQuery};
use farewatch_core::AppConfig;
use farewatch_notify::{ChatNotifier, EmailNotifier};
use farewatch_sheets::{DestinationRow, SheetClient};

/// Search departures from tomorrow up to roughly six months out.
const WINDOW_START_DAYS: u64 = 1;
const WINDOW_END_DAYS: u64 = 6 * 30;

/// The provider and notification clients one run needs.
pub(crate) struct Clients {
    pub amadeus: AmadeusClient,
    pub sheet: SheetClient,
    pub chat: Option<ChatNotifier>,
    pub email: Option<EmailNotifier>,
}

/// Builds all clients from config. Notification channels are optional;
/// whichever ones are configured get used.
pub(crate) fn build_clients(config: &AppConfig) -> anyhow::Result<Clients> {
    let amadeus = AmadeusClient::with_base_url(
        &config.amadeus_api_key,
        &config.amadeus_api_secret,
        config.request_timeout_secs,
        &config.amadeus_base_url,
    )?
    .with_retry_policy(config.max_retries, config.retry_backoff_base_ms);

    let sheet = SheetClient::new(
        &config.sheet_endpoint,
        &config.sheet_username,
        &config.sheet_password,
        config.request_timeout_secs,
    )?;

    let chat = config
        .chat_webhook_url
        .as_deref()
        .map(|url| ChatNotifier::new(url, config.request_timeout_secs))
        .transpose()?;

    let email = match (&config.email_api_key, &config.email_from) {
        (Some(key), Some(from)) => {
            Some(EmailNotifier::new(key, from, config.request_timeout_secs)?)
        }
        _ => None,
    };

    if chat.is_none() && email.is_none() {
        tracing::warn!("no notification channel configured; alerts will only be logged");
    }

    Ok(Clients {
        amadeus,
        sheet,
        chat,
        email,
    })
}

#[derive(Debug, Default)]
pub(crate) struct SyncTotals {
    /// Rows whose code was resolved and written back this run.
    pub resolved: usize,
    /// Rows that already carried a code.
    pub already: usize,
    /// Rows the provider could not match to a code.
    pub unresolved: usize,
    pub failed: usize,
}

/// Resolves missing IATA codes and writes them back to the sheet.
///
/// Rows that already carry a code are left untouched. Lookup misses leave the
/// row blank so the next run retries.
///
/// # Errors
///
/// Returns an error only if the destination rows cannot be listed; everything
/// per-row is recorded in the totals instead.
pub(crate) async fn sync_codes(
    config: &AppConfig,
    clients: &Clients,
) -> anyhow::Result<SyncTotals> {
    let rows = clients.sheet.list_destinations().await?;
    tracing::info!(rows = rows.len(), "starting sync-codes run");

    let mut totals = SyncTotals::default();
    for row in &rows {
        if row.has_code() {
            totals.already += 1;
            continue;
        }

        match clients.amadeus.city_code(&row.city).await {
            Ok(Some(code)) => match clients.sheet.update_iata_code(row.id, &code).await {
                Ok(()) => {
                    tracing::info!(city = %row.city, %code, "resolved IATA code");
                    totals.resolved += 1;
                }
                Err(e) => {
                    tracing::error!(city = %row.city, error = %e, "failed to write IATA code");
                    totals.failed += 1;
                }
            },
            Ok(None) => {
                tracing::warn!(city = %row.city, "no IATA code found; leaving row for retry");
                totals.unresolved += 1;
            }
            Err(e) => {
                tracing::error!(city = %row.city, error = %e, "IATA lookup failed");
                totals.failed += 1;
            }
        }

        pause(config).await;
    }

    Ok(totals)
}

#[derive(Debug, Default)]
pub(crate) struct CheckTotals {
    /// Destinations for which a usable fare came back.
    pub checked: usize,
    /// Fares that undercut the stored threshold.
    pub deals: usize,
    pub no_deals: usize,
    /// Destinations with no usable flight data.
    pub unavailable: usize,
    /// Rows skipped for want of a resolved IATA code.
    pub skipped: usize,
    pub failed: usize,
}

/// Runs one fare check over the destination rows.
///
/// For each row with a resolved code: search offers over the window, pick the
/// cheapest, compare against the row's threshold, and notify. With `dry_run`
/// the composed messages are logged instead of delivered.
///
/// # Errors
///
/// Returns an error if the destination rows cannot be listed or if
/// `city_filter` matches no row; per-destination search failures are recorded
/// in the totals instead.
pub(crate) async fn check_deals(
    config: &AppConfig,
    clients: &Clients,
    city_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<CheckTotals> {
    let mut rows = clients.sheet.list_destinations().await?;
    if let Some(city) = city_filter {
        rows.retain(|r| r.city.eq_ignore_ascii_case(city));
        if rows.is_empty() {
            anyhow::bail!("destination '{city}' not found in the sheet");
        }
    }

    let (departure_date, return_date) = search_window();
    tracing::info!(
        rows = rows.len(),
        origin = %config.origin_iata,
        %departure_date,
        %return_date,
        "starting fare check"
    );

    let mut totals = CheckTotals::default();
    for row in &rows {
        if !row.has_code() {
            tracing::warn!(city = %row.city, "skipping destination; IATA code not resolved yet");
            totals.skipped += 1;
            continue;
        }

        let query = OfferQuery {
            origin: config.origin_iata.clone(),
            destination: row.iata_code.clone(),
            departure_date,
            return_date,
            non_stop_only: config.non_stop_only,
            currency: config.currency.clone(),
            max_offers: config.search_max_offers,
        };

        tracing::info!(city = %row.city, code = %row.iata_code, "searching fares");
        match clients.amadeus.search_offers(&query).await {
            Ok(response) => {
                let best = select_cheapest(Some(&response));
                handle_best_offer(config, clients, row, &best, dry_run, &mut totals).await;
            }
            Err(e) => {
                tracing::error!(city = %row.city, error = %e, "fare search failed");
                totals.failed += 1;
            }
        }

        pause(config).await;
    }

    Ok(totals)
}

/// Compares the selected offer against the row threshold and dispatches the
/// matching notification.
async fn handle_best_offer(
    config: &AppConfig,
    clients: &Clients,
    row: &DestinationRow,
    best: &BestOffer,
    dry_run: bool,
    totals: &mut CheckTotals,
) {
    match best {
        BestOffer::Found(fare) => {
            totals.checked += 1;
            if fare.price < row.lowest_price {
                totals.deals += 1;
                tracing::info!(
                    city = %row.city,
                    price = %fare.price,
                    threshold = %row.lowest_price,
                    "cheaper fare found"
                );
                let text = farewatch_notify::deal_alert(&row.city, &config.currency, fare);
                deliver(config, clients, &row.city, &text, true, dry_run).await;
            } else {
                totals.no_deals += 1;
                tracing::info!(
                    city = %row.city,
                    price = %fare.price,
                    threshold = %row.lowest_price,
                    "no lower price"
                );
                let text = farewatch_notify::no_deal(&row.city, &config.currency, fare);
                deliver(config, clients, &row.city, &text, false, dry_run).await;
            }
        }
        BestOffer::Unavailable => {
            totals.unavailable += 1;
            let text = farewatch_notify::no_data(&row.city);
            deliver(config, clients, &row.city, &text, false, dry_run).await;
        }
    }
}

/// Sends `text` to the configured channels. Deal alerts also go out by email;
/// routine notices stay on chat. Delivery failures are logged, never
/// propagated.
async fn deliver(
    config: &AppConfig,
    clients: &Clients,
    city: &str,
    text: &str,
    is_deal: bool,
    dry_run: bool,
) {
    if dry_run {
        tracing::info!(%city, message = %text, "dry run; not delivering");
        return;
    }

    if let Some(chat) = &clients.chat {
        if let Err(e) = chat.send(text).await {
            tracing::error!(%city, error = %e, "chat delivery failed");
        }
    }

    if is_deal {
        if let Some(email) = &clients.email {
            if let Err(e) = email
                .send(
                    "farewatch: cheap fare found",
                    text,
                    &config.email_recipients,
                )
                .await
            {
                tracing::error!(%city, error = %e, "email delivery failed");
            }
        }
    }
}

/// Departure window: tomorrow until six months (6 x 30 days) from today.
fn search_window() -> (chrono::NaiveDate, chrono::NaiveDate) {
    let today = Utc::now().date_naive();
    (
        today + Days::new(WINDOW_START_DAYS),
        today + Days::new(WINDOW_END_DAYS),
    )
}

async fn pause(config: &AppConfig) {
    if config.inter_request_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(config.inter_request_delay_ms)).await;
    }
}

#[cfg(test)]
#[path = "run_test.rs"]
mod run_test;
