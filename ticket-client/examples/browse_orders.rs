// ticket-client/examples/browse_orders.rs
// Browse orders against a running order service
//
// Usage: browse_orders [status] [page]
//   ORDER_API_BASE_URL=http://localhost:8080/api cargo run --example browse_orders -- SHIPPED 0

use anyhow::Context;
use ticket_client::shared::{OrderStatus, SearchFilter};
use ticket_client::{ClientConfig, DirectorySink, OrderStore, RemoteOrderApi};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticket_client=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let status = args
        .get(1)
        .map(|s| s.parse::<OrderStatus>())
        .transpose()
        .context("invalid status argument")?;
    let page: u32 = args
        .get(2)
        .map(|p| p.parse::<u32>())
        .transpose()
        .context("invalid page argument")?
        .unwrap_or(0);

    let config = ClientConfig::from_env();
    tracing::info!("Connecting to {}", config.normalized_base_url());

    let api = RemoteOrderApi::from_config(&config)?;
    let store = OrderStore::new(api, DirectorySink::new(&config.download_dir));

    if let Some(status) = status {
        store
            .update_search_params(SearchFilter::default().with_status(status))
            .await;
    }

    store.change_page(page).await;
    store.fetch_statistics().await;

    let state = store.snapshot().await;
    if let Some(error) = &state.error {
        anyhow::bail!("{}", error);
    }

    println!(
        "Page {}/{} ({} orders)",
        state.current_page + 1,
        state.total_pages.max(1),
        state.total_elements
    );
    for order in &state.orders {
        println!(
            "  #{:<6} {:<16} {:<20} {:>10} {}",
            order.id.unwrap_or_default(),
            order.order_number,
            order.customer_name,
            order.total_amount,
            order.status
        );
    }

    if let Some(stats) = state.statistics {
        println!(
            "Total {} | pending {} | processing {} | delivered {} | cancelled {}",
            stats.total_orders,
            stats.pending_orders,
            stats.processing_orders,
            stats.delivered_orders,
            stats.cancelled_orders
        );
    }

    Ok(())
}
