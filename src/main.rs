//! tiyara - storefront CLI for the Tiyara fashion catalog
//!
//! Browse, filter and page through the catalog, and ask the style advisors.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tiyara::advisor::SkinTone;
use tiyara::catalog::models::{Measurements, QuizAnswers};
use tiyara::commands::{
    AdvisorCommand, BrowseCommand, CatalogCommand, ChatCommand, Listing, ListingCommand,
    ProductCommand,
};
use tiyara::config::{Config, OutputFormat};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tiyara",
    version,
    about = "Storefront CLI for the Tiyara fashion catalog",
    long_about = "Browse, filter and page through the Tiyara catalog, and ask the body-shape, \
                  skin-tone, visual-search and chat advisors."
)]
struct Cli {
    /// Base URL of the catalog backend
    #[arg(long, global = true, env = "TIYARA_API_URL")]
    api_url: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Filter and paging flags shared by listing commands.
#[derive(Args, Debug, Default)]
struct ListingArgs {
    /// Free-text search over brand, category and tags
    #[arg(short, long)]
    search: Option<String>,

    /// Minimum price
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price
    #[arg(long)]
    max_price: Option<f64>,

    /// Brand to include (repeatable)
    #[arg(short, long = "brand")]
    brands: Vec<String>,

    /// Minimum rating (0-5)
    #[arg(long)]
    min_rating: Option<f64>,

    /// Minimum discount percent
    #[arg(long)]
    min_discount: Option<f64>,

    /// Sub-category ("All" for every one)
    #[arg(long)]
    sub_category: Option<String>,

    /// Page to show (1-based)
    #[arg(short, long, default_value = "1")]
    page: usize,

    /// Products per page
    #[arg(long)]
    page_size: Option<usize>,
}

impl ListingArgs {
    /// Layers the flags over the configured default filters.
    fn apply(&self, config: &mut Config) {
        let filters = &mut config.filters;
        if let Some(search) = &self.search {
            filters.search = search.clone();
        }
        if self.min_price.is_some() {
            filters.min_price = self.min_price;
        }
        if self.max_price.is_some() {
            filters.max_price = self.max_price;
        }
        filters.brands.extend(self.brands.iter().cloned());
        if self.min_rating.is_some() {
            filters.min_rating = self.min_rating;
        }
        if self.min_discount.is_some() {
            filters.min_discount = self.min_discount;
        }
        if let Some(sub) = &self.sub_category {
            filters.sub_category = Some(sub.clone());
        }
        if let Some(size) = self.page_size.filter(|s| *s > 0) {
            config.page_size = size;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally from one category's catalog
    #[command(alias = "ls")]
    Products {
        /// Category catalog to list instead of everything
        #[arg(long)]
        category: Option<String>,

        /// Browse interactively (filters are read from stdin)
        #[arg(short, long)]
        interactive: bool,

        #[command(flatten)]
        listing: ListingArgs,
    },

    /// List a category's products
    Category {
        name: String,

        /// Print the category's sub-categories instead
        #[arg(long)]
        sub_categories: bool,

        #[command(flatten)]
        listing: ListingArgs,
    },

    /// List every category
    Categories,

    /// List the top-level categories
    MainCategories,

    /// List occasions
    Occasions,

    /// List products for an occasion
    Occasion {
        name: String,

        #[command(flatten)]
        listing: ListingArgs,
    },

    /// List products under a price
    Price {
        price: String,

        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Look up products by id
    #[command(alias = "p")]
    Product {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show a product and similar ones
    Recommend { id: String },

    /// List the brands available in a listing
    Brands {
        /// Restrict to one category's catalog
        #[arg(long)]
        category: Option<String>,
    },

    /// Body shape advisor
    #[command(subcommand)]
    BodyShape(BodyShapeCommands),

    /// Products that look like a photo
    ImageRecommend { image: PathBuf },

    /// Predict skin tone from a photo and show its colour guide
    SkinTone { image: PathBuf },

    /// Colour guide for a skin tone, or for all of them
    SkinGuide {
        /// fair, medium, olive or deep (or a backend bucket name)
        tone: Option<SkinTone>,
    },

    /// Chat with the style assistant
    Chat {
        /// Send one message and exit; otherwise start a session
        message: Option<String>,
    },
}

#[derive(Subcommand)]
enum BodyShapeCommands {
    /// Classify from measurements
    Measure {
        #[arg(long)]
        bust: f64,
        #[arg(long)]
        waist: f64,
        #[arg(long)]
        high_hip: f64,
        #[arg(long)]
        hip: f64,
        #[arg(long)]
        shoulder: f64,
    },

    /// Classify from quiz answers
    Quiz {
        #[arg(long, default_value = "")]
        widest_part: String,
        #[arg(long, default_value = "")]
        waist_defined: String,
        #[arg(long, default_value = "")]
        hips_description: String,
        #[arg(long, default_value = "")]
        broad_shoulders: String,
        #[arg(long, default_value = "")]
        weight_change: String,
        #[arg(long, default_value = "")]
        athletic_build: String,
        #[arg(long, default_value = "")]
        derriere: String,
        #[arg(long, default_value = "")]
        bust_size: String,
    },

    /// Products picked for a body shape
    Recommend {
        shape: String,

        #[command(flatten)]
        listing: ListingArgs,
    },
}

async fn list(mut config: Config, listing: Listing, args: &ListingArgs) -> Result<String> {
    args.apply(&mut config);
    ListingCommand::new(config).execute(&listing, args.page).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    let output = match cli.command {
        Commands::Products { category, interactive, listing } => {
            let source = category.map(Listing::Catalog).unwrap_or(Listing::All);
            if interactive {
                listing.apply(&mut config);
                return BrowseCommand::new(config).execute(&source).await;
            }
            list(config, source, &listing).await?
        }

        Commands::Category { name, sub_categories, listing } => {
            if sub_categories {
                CatalogCommand::new(config).sub_categories(&name).await?
            } else {
                list(config, Listing::Category(name), &listing).await?
            }
        }

        Commands::Categories => CatalogCommand::new(config).categories().await?,
        Commands::MainCategories => CatalogCommand::new(config).main_categories().await?,
        Commands::Occasions => CatalogCommand::new(config).occasions().await?,

        Commands::Occasion { name, listing } => {
            list(config, Listing::Occasion(name), &listing).await?
        }

        Commands::Price { price, listing } => {
            list(config, Listing::PriceUnder(price), &listing).await?
        }

        Commands::Product { ids } => {
            let cmd = ProductCommand::new(config);
            if ids.len() == 1 {
                cmd.execute(&ids[0]).await?
            } else {
                cmd.execute_batch(&ids).await?
            }
        }

        Commands::Recommend { id } => ProductCommand::new(config).recommend(&id).await?,

        Commands::Brands { category } => {
            let source = category.map(Listing::Catalog).unwrap_or(Listing::All);
            ListingCommand::new(config).brands(&source).await?
        }

        Commands::BodyShape(BodyShapeCommands::Measure { bust, waist, high_hip, hip, shoulder }) => {
            let measurements = Measurements { bust, waist, high_hip, hip, shoulder };
            AdvisorCommand::new(config).measure(&measurements).await?
        }

        Commands::BodyShape(BodyShapeCommands::Quiz {
            widest_part,
            waist_defined,
            hips_description,
            broad_shoulders,
            weight_change,
            athletic_build,
            derriere,
            bust_size,
        }) => {
            let answers = QuizAnswers {
                widest_part,
                waist_defined,
                hips_description,
                broad_shoulders,
                weight_change,
                athletic_build,
                derriere,
                bust_size,
            };
            AdvisorCommand::new(config).quiz(&answers).await?
        }

        Commands::BodyShape(BodyShapeCommands::Recommend { shape, listing }) => {
            list(config, Listing::BodyShape(shape), &listing).await?
        }

        Commands::ImageRecommend { image } => {
            AdvisorCommand::new(config).image_recommend(&image).await?
        }

        Commands::SkinTone { image } => AdvisorCommand::new(config).skin_tone(&image).await?,
        Commands::SkinGuide { tone } => AdvisorCommand::new(config).skin_guide(tone),

        Commands::Chat { message } => {
            let cmd = ChatCommand::new(config);
            match message {
                Some(message) => cmd.ask(&message).await?,
                None => return cmd.repl().await,
            }
        }
    };

    println!("{}", output);
    Ok(())
}
