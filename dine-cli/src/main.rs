//! dine — floor plans and table bookings from the terminal
//!
//! Talks to the restaurant API configured by `DINE_API_URL`:
//! - list restaurants, print a floor plan with its seat rings
//! - show which tables are free at a given time and book one
//! - nudge an item on the plan, or ask the server for a suggested layout

mod render;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dine_client::{
    ApiClient, BookingPicker, ClientConfig, LayoutBackend, LayoutEditor, NetworkHttpClient,
    Session,
};
use dine_floor::{ItemId, PixelDelta};
use shared::UserInfo;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dine", version, about = "Restaurant floor plans and table bookings")]
struct Cli {
    /// API base URL [default: $DINE_API_URL, else http://localhost:5000/api]
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token for authenticated calls
    #[arg(long, global = true, env = "DINE_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Signed-in user, required for booking
    #[arg(long, global = true, env = "DINE_USER_ID")]
    user_id: Option<i64>,

    /// Request timeout, seconds [default: $DINE_TIMEOUT_SECS, else 30]
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List restaurants
    Restaurants,

    /// Print a restaurant's floor plan
    Layout { restaurant_id: i64 },

    /// Show table availability at a local date and time (YYYY-MM-DDTHH:MM)
    Availability { restaurant_id: i64, date: String },

    /// Ask the server for a generated layout
    Suggest {
        restaurant_id: i64,
        /// Save the suggestion as the restaurant's layout
        #[arg(long)]
        save: bool,
    },

    /// Book a table
    Book {
        restaurant_id: i64,
        /// Local date and time, YYYY-MM-DDTHH:MM
        date: String,
        /// Layout item id of the table
        table_id: i64,
        #[arg(long, default_value_t = 2)]
        guests: u32,
        /// Special requests
        #[arg(long)]
        note: Option<String>,
    },

    /// Drag an item by a pixel offset on the 800x600 canvas and save
    #[command(allow_negative_numbers = true)]
    Move {
        restaurant_id: i64,
        item_id: i64,
        dx: f64,
        dy: f64,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dine_cli=info,dine_client=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

impl Cli {
    fn session(&self) -> Session {
        let session = match &self.token {
            Some(token) => Session::with_token(token),
            None => Session::anonymous(),
        };
        match self.user_id {
            Some(id) => session.with_user(UserInfo {
                id,
                name: String::new(),
                email: String::new(),
                is_admin: false,
            }),
            None => session,
        }
    }

    /// Environment first, flags on top
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.api_url {
            config.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        config
    }

    fn api(
        &self,
        config: &ClientConfig,
        session: &Session,
    ) -> anyhow::Result<ApiClient<NetworkHttpClient>> {
        let http = config
            .build_http_client(session)
            .context("Failed to build HTTP client")?;
        Ok(ApiClient::new(http))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = cli.config();
    let session = cli.session();
    let api = cli.api(&config, &session)?;
    tracing::debug!(
        api_url = %config.base_url,
        timeout = config.timeout,
        signed_in = session.token().is_some(),
        user_id = ?session.user_id(),
        "Starting"
    );

    match cli.command {
        Commands::Restaurants => {
            let restaurants = api
                .restaurants()
                .await
                .context("Failed to list restaurants")?;
            for restaurant in &restaurants {
                println!("{:>4}  {}", restaurant.id, render::restaurant_header(restaurant));
            }
        }
        Commands::Layout { restaurant_id } => {
            let mut editor = LayoutEditor::new(api);
            editor.load(restaurant_id).await?;
            print_plan(&editor);
        }
        Commands::Availability {
            restaurant_id,
            date,
        } => {
            let mut picker = BookingPicker::new(api, session);
            picker.load(restaurant_id).await?;
            picker.set_date(&date).await?;
            if let Some(restaurant) = picker.restaurant() {
                println!("{}", render::restaurant_header(restaurant));
            }
            for item in picker.items() {
                println!(
                    "{:>8}  {}",
                    render::status_label(picker.status(item)),
                    render::item_line(item)
                );
                if let Some(anchor) = render::booking_anchor(item) {
                    println!("{anchor}");
                }
            }
        }
        Commands::Suggest {
            restaurant_id,
            save,
        } => {
            let mut editor = LayoutEditor::new(api);
            editor.load(restaurant_id).await?;
            editor.suggest_layout().await?;
            print_plan(&editor);
            if save {
                let message = editor.save().await?;
                println!("{message}");
            }
        }
        Commands::Book {
            restaurant_id,
            date,
            table_id,
            guests,
            note,
        } => {
            let mut picker = BookingPicker::new(api, session);
            picker.load(restaurant_id).await?;
            picker.set_date(&date).await?;
            if !picker.select(ItemId::Persisted(table_id)) {
                bail!("Table {table_id} is not available at {date}");
            }
            let message = picker.book(guests, note).await?;
            println!("{message}");
        }
        Commands::Move {
            restaurant_id,
            item_id,
            dx,
            dy,
        } => {
            let mut editor = LayoutEditor::new(api);
            editor.load(restaurant_id).await?;
            if !editor.begin_drag(ItemId::Persisted(item_id)) {
                bail!("No item {item_id} in the layout of restaurant {restaurant_id}");
            }
            if let Some((x, y)) = editor.end_drag(PixelDelta::new(dx, dy)) {
                println!("Item {item_id} moved to ({x:.1}%, {y:.1}%)");
            }
            let message = editor.save().await?;
            println!("{message}");
        }
    }

    Ok(())
}

fn print_plan<B: LayoutBackend>(editor: &LayoutEditor<B>) {
    if let Some(restaurant) = editor.restaurant() {
        println!("{}", render::restaurant_header(restaurant));
    }
    let state = editor.store().state();
    println!(
        "{} tables, {} furniture{}",
        state.table_count(),
        state.furniture_count(),
        if editor.is_dirty() { " (unsaved)" } else { "" }
    );
    for item in editor.items() {
        println!("{}", render::item_line(item));
        if let Some(seats) = render::seat_line(item) {
            println!("{seats}");
        }
    }
}
