use std::sync::Arc;

use anyhow::{bail, Context};
use async_trait::async_trait;
use clap::Parser;
use tour_view::api::HttpListingApi;
use tour_view::tour::format::{floor_label, format_price, poi_icon, property_subtype_label};
use tour_view::tour::{
    share_listing, LogNotifier, PageState, RoomMedia, ShareContent, ShareTarget, TourPage,
    TourSession, VisitorForm,
};
use tour_view::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tour-view")]
#[command(about = "Walk through a listing's virtual tour from the terminal")]
#[command(version)]
struct Cli {
    /// Listing id
    listing_id: String,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    phone: String,

    /// Hour for the lighting simulation (6-20)
    #[arg(long, default_value_t = 12)]
    hour: u8,

    /// Visit every room and step through every photo
    #[arg(long)]
    walk: bool,

    /// Print the share link
    #[arg(long)]
    share: bool,

    /// Print the submitted visit record as JSON
    #[arg(long)]
    json: bool,
}

/// Terminals have no share sheet; "copying" prints the link
struct StdoutShare;

#[async_trait]
impl ShareTarget for StdoutShare {
    fn supports_share_sheet(&self) -> bool {
        false
    }

    async fn share_sheet(&self, _content: &ShareContent) -> tour_view::Result<()> {
        Ok(())
    }

    async fn copy_to_clipboard(&self, url: &str) -> tour_view::Result<()> {
        println!("🔗 {}", url);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tour_view=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let cli = Cli::parse();

    info!("🏠 Tour View");
    info!("Backend: {}", config.api_url());

    let api = Arc::new(HttpListingApi::new(&config).context("Failed to create HTTP client")?);
    let notifier = Arc::new(LogNotifier);
    let mut page = TourPage::new(api, notifier.clone());

    page.load(&cli.listing_id).await;
    if matches!(page.state(), PageState::NotFound) {
        bail!("Listing {} not found", cli.listing_id);
    }

    if let Some(gate) = page.gate_mut() {
        gate.form = VisitorForm::new(cli.first_name, cli.last_name, cli.phone);
    }
    page.submit_visitor()
        .await
        .context("Failed to register visitor")?;

    let Some(session) = page.session_mut() else {
        bail!("Page did not unlock after registration");
    };
    session.set_hour(cli.hour);
    print_summary(session);

    if cli.share {
        let url = config.page_url(&session.listing().id);
        share_listing(session.listing(), &url, &StdoutShare, notifier.as_ref()).await;
    }

    if cli.walk {
        walk(session).await;
    }

    if let Some(record) = page.teardown().await {
        info!(
            "💾 Visit recorded: {}s across {} rooms",
            record.duration,
            record.rooms_visited.len()
        );
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}

fn print_summary(session: &TourSession) {
    let listing = session.listing();

    if !listing.company_name.is_empty() {
        println!("{}", listing.company_name);
    }
    println!("{} ({})", listing.title, format_price(listing.price, listing.currency.as_deref()));
    println!("   {}, {}, {}", listing.address, listing.district, listing.city);
    if let Some(cover) = listing.cover_image_url() {
        println!("   🖼  {}", cover);
    }
    println!(
        "   {} · {} m² · Kat {} · {}",
        listing.room_count,
        listing.square_meters.unwrap_or_default(),
        floor_label(listing.floor, listing.total_floors),
        property_subtype_label(listing.property_type)
    );
    if let Some(age) = listing.building_age {
        println!("   Bina yaşı: {}", age);
    }
    if let Some(heating) = &listing.heating_type {
        println!("   Isıtma: {}", heating);
    }
    if let Some(facing) = &listing.facing_direction {
        println!("   Cephe: {}", facing);
    }
    if listing.is_panoramic() {
        println!("   360° Sanal Tur");
    }
    if !listing.description.is_empty() {
        println!("   {}", listing.description);
    }
    for poi in &listing.pois {
        println!(
            "   [{}] {} {}",
            poi_icon(poi.category),
            poi.name,
            poi.distance.as_deref().unwrap_or("")
        );
    }
    println!();
}

async fn walk(session: &mut TourSession) {
    session.open_tour();
    let filter = session.filter().css();
    info!("Lighting at {}: {}", session.hour(), filter);

    for index in 0..session.listing().rooms.len() {
        session.select_room(index);
        session.settle().await;

        let Some(room) = session.current_room() else {
            continue;
        };
        let entry = if session.listing().is_entry(room) { " (giriş)" } else { "" };
        println!("{}. {}{}", index + 1, room.display_name(), entry);
        if room.has_photos() {
            println!("   {} fotoğraf", room.photos.len());
        }

        let total = match session.room_media() {
            RoomMedia::Panorama { url } => {
                println!("   🔄 {}", url);
                0
            }
            RoomMedia::Photo { total, .. } => total,
            RoomMedia::Empty => {
                println!("   Bu oda için fotoğraf yok");
                0
            }
        };

        for _ in 0..total {
            if let RoomMedia::Photo { url, index: photo, total } = session.room_media() {
                println!("   📷 {}/{} {}", photo + 1, total, url);
            }
            session.next_photo();
            session.settle().await;
        }
    }

    info!("Visited {} rooms", session.visited_rooms().len());
}
