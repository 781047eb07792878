use crate::board::Board;
use crate::client::{ClientError, HttpItemService};
use crate::config::resolve_api_url;
use crate::models::{Item, ItemKind, NewItem};
use crate::stats::ItemStats;
use crate::ticker::{LabelTicker, LABEL_REFRESH};
use crate::view::{build_cards, ItemCard};
use crate::window::TimeWindow;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chores", about = "Track recurring household chores from the terminal", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the chore tracker server (defaults to $CHORES_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List items with their status and statistics
    List(WindowArgs),
    /// Add a task or tracking item
    Add(AddArgs),
    /// Mark a task complete
    Complete(IdArgs),
    /// Log a new value for a tracking item
    Log(LogArgs),
    /// Keep labels on screen, refreshing once a minute
    Watch(WindowArgs),
}

#[derive(Args)]
pub struct WindowArgs {
    /// Time window for statistics: week, month, year or all
    #[arg(long, short, default_value = "week")]
    pub window: TimeWindow,
}

#[derive(Args)]
pub struct AddArgs {
    pub name: String,
    /// Expected days between completions, or the maximum value when tracking
    pub target: String,
    /// Create a tracking item instead of a task
    #[arg(long)]
    pub tracking: bool,
    #[arg(long, short, default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct IdArgs {
    pub id: String,
}

#[derive(Args)]
pub struct LogArgs {
    pub id: String,
    pub value: String,
}

pub async fn run(cli: Cli) -> Result<(), ClientError> {
    let service = HttpItemService::new(resolve_api_url(cli.api_url.as_deref()))?;
    let mut board = Board::new();

    match cli.command {
        Commands::List(args) => {
            board.refresh(&service).await?;
            print_cards(&build_cards(board.items(), args.window), cli.json);
        }
        Commands::Add(args) => {
            let kind = if args.tracking {
                ItemKind::Tracking
            } else {
                ItemKind::Task
            };
            let new = NewItem::parse(&args.name, &args.target, kind)?
                .with_description(args.description);
            let item = board.add_new(&service, new).await?;
            if cli.json {
                print_json(item);
            } else {
                println!("created {} ({})", item.name, item.id);
            }
        }
        Commands::Complete(args) => {
            board.complete(&service, &args.id).await?;
            print_item_card(&board, &args.id, cli.json);
        }
        Commands::Log(args) => {
            board.log_value(&service, &args.id, &args.value).await?;
            print_item_card(&board, &args.id, cli.json);
        }
        Commands::Watch(args) => watch(&mut board, &service, args.window).await?,
    }

    Ok(())
}

async fn watch(board: &mut Board, service: &HttpItemService, window: TimeWindow) -> Result<(), ClientError> {
    board.refresh(service).await?;
    let mut ticker = LabelTicker::new(LABEL_REFRESH);
    let mut labels = ticker.subscribe();
    print_cards(&build_cards(board.items(), window), false);
    ticker.display(board.items().to_vec());

    if !ticker.is_running() {
        return Ok(());
    }

    loop {
        tokio::select! {
            changed = labels.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = labels.borrow_and_update().clone();
                for item in board.items() {
                    if let Some(label) = snapshot.get(&item.id) {
                        println!("{:<24} {label}", item.name);
                    }
                }
                println!();
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    ticker.stop();
    Ok(())
}

/// Prints the card of the item an action just touched.
fn print_item_card(board: &Board, id: &str, json: bool) {
    print_cards(&item_cards(board.items(), id), json);
}

fn item_cards(items: &[Item], id: &str) -> Vec<ItemCard> {
    build_cards(items, TimeWindow::default())
        .into_iter()
        .filter(|card| card.id == id)
        .collect()
}

fn print_cards(cards: &[ItemCard], json: bool) {
    if json {
        print_json(cards);
        return;
    }
    if cards.is_empty() {
        println!("no items yet");
        return;
    }
    for card in cards {
        println!(
            "{} {:<24} {:<26} {:<16} {}",
            urgency_bar(card.urgency),
            card.name,
            card.label,
            card.target_label,
            summary(&card.stats),
        );
        println!("  id: {}", card.id);
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => tracing::error!("failed to encode output: {err}"),
    }
}

/// Four-cell bar scaled to the urgency cap.
fn urgency_bar(urgency: f64) -> String {
    let filled = ((urgency / crate::urgency::URGENCY_CAP) * 4.0).round().clamp(0.0, 4.0) as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(4 - filled))
}

fn summary(stats: &ItemStats) -> String {
    let fmt = |value: Option<f64>| value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}"));
    match stats {
        ItemStats::Tracking(stats) => format!(
            "latest {} avg {} trend {}",
            fmt(stats.latest),
            fmt(stats.average),
            fmt(stats.trend)
        ),
        ItemStats::Task(stats) => format!(
            "streak {} completions {} avg interval {}h",
            stats.streak,
            stats.completions,
            fmt(stats.mean_interval_hours)
        ),
    }
}
