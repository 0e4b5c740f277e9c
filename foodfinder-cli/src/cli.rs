use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;

use foodfinder_core::{Category, Config, GeocoderId, SearchRequest, provider, search};

use crate::render::{self, App};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "foodfinder", version, about = "Nearby food place finder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "geoapify".
        provider: String,
    },

    /// Find food places near a postal code or the current location.
    Find {
        /// Postal code to search around; uses the current location when omitted.
        postal_code: Option<String>,

        /// Food category: restaurant, fast-food, cafe, bar or ice-cream.
        #[arg(long, default_value = "restaurant")]
        category: String,

        /// Only places whose name matches this keyword.
        #[arg(long)]
        keyword: Option<String>,

        /// Geocoder for postal codes: "geoapify" or "nominatim".
        #[arg(long)]
        geocoder: Option<String>,

        /// Render map markers instead of the result list.
        #[arg(long)]
        map: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Find { postal_code, category, keyword, geocoder, map } => {
                find(postal_code, &category, keyword, geocoder.as_deref(), map).await
            }
        }
    }
}

fn configure(provider: &str) -> Result<()> {
    let id = GeocoderId::try_from(provider)?;

    if id == GeocoderId::Nominatim {
        println!("Nominatim needs no API key; nothing to configure.");
        return Ok(());
    }

    let api_key = inquire::Password::new("API key:")
        .without_confirmation()
        .prompt()?;

    let mut config = Config::load()?;
    config.upsert_provider_api_key(id, api_key);
    config.save()?;

    println!(
        "Saved API key for '{id}' to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn find(
    postal_code: Option<String>,
    category: &str,
    keyword: Option<String>,
    geocoder: Option<&str>,
    map: bool,
) -> Result<()> {
    let config = Config::load()?;
    let category = Category::try_from(category)?;

    let geocoder_id = match geocoder {
        Some(name) => GeocoderId::try_from(name)?,
        None => config.default_geocoder_id()?,
    };
    debug!("using geocoder '{geocoder_id}'");

    // One Geoapify instance backs both places search and current-location
    // lookup; the geocoder backend is selected separately.
    let geoapify = provider::geoapify_from_config(&config)?;
    let geocoder = provider::geocoder_from_config(geocoder_id, &config)?;

    let mut app = App::default();

    let origin = match search::resolve_origin(
        geocoder.as_ref(),
        &geoapify,
        postal_code.as_deref(),
    )
    .await
    {
        Ok(origin) => origin,
        Err(err) => {
            render::resolve_failure(&err);
            return Ok(());
        }
    };
    app.origin = Some(origin);

    println!("🍽️ Searching nearby food places...");

    let request = SearchRequest { origin, category, keyword };
    match search::search(&geoapify, &request).await {
        Ok(results) => {
            app.results = results;
            if map {
                render::markers(&app);
            } else {
                render::list(&app);
            }
        }
        Err(err) => {
            debug!("search failed: {err}");
            render::search_failure();
        }
    }

    Ok(())
}
