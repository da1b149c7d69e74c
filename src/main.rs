use std::sync::Arc;

use chrono::Local;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tasklist::state::TracingObserver;
use tasklist::{ClientConfig, PageStatus, TodoHttpClient, TodoPage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tasklist=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::new_from_env()?;
    info!("using todo service at {}", config.base_url);

    let api = Arc::new(TodoHttpClient::new(config.clone())?);
    let mut page = TodoPage::new(api, &config, Arc::new(TracingObserver));

    if let Err(e) = page.mount().await {
        error!("Error loading tasks: {}", e);
    }

    match page.status() {
        PageStatus::Ready => {
            let today = Local::now().date_naive();
            for task in page.cache().items() {
                let urgency = task
                    .urgency(today)
                    .map(|u| format!("{:?}", u))
                    .unwrap_or_default();
                println!(
                    "[{}] {:>4} {:<40} {:<6} {} {}",
                    if task.state { "x" } else { " " },
                    task.id,
                    task.text,
                    task.priority,
                    task.due_date_label(),
                    urgency
                );
            }
            println!("{}", page.cursor().label());
        }
        PageStatus::Failed(e) => println!("Error loading tasks: {}", e),
        PageStatus::Loading | PageStatus::Idle => println!("Loading tasks"),
    }

    if let Some(summary) = page.time_summary().await {
        println!("Average time to finish tasks: {}", summary.total);
        println!(
            "Low= {}  Medium= {}  High= {}",
            summary.low, summary.medium, summary.high
        );
    }

    Ok(())
}
