//! Interactive listing browser: filters are edited line by line and the
//! current page is redrawn after every change.

use super::listing::{fetch_listing, Listing};
use crate::browse::BrowseSession;
use crate::catalog::{Product, StorefrontApi, StorefrontClient};
use crate::config::Config;
use crate::filters::{FilterComposer, FilterEvent};
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

const HELP: &str = "\
Commands:
  search <text>          search brand, category and tags (empty clears)
  brand <name>           toggle a brand
  price <min|-> <max|->  price range
  rating <n|->           minimum rating
  discount <n|->         minimum discount percent
  category <name|All>    sub-category
  clear                  reset every filter
  next | prev | page <n> move between pages
  show                   redraw the current page
  brands | categories    list what the current listing offers
  reload                 fetch the listing again
  quit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
enum Input {
    Filter(FilterEvent),
    Next,
    Previous,
    Page(usize),
    Show,
    Brands,
    Categories,
    Reload,
    Help,
    Quit,
}

fn optional_number(word: Option<&str>, what: &str) -> Result<Option<f64>, String> {
    match word {
        None | Some("-") => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("Invalid {}: '{}'", what, text)),
    }
}

fn parse_line(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut words = rest.split_whitespace();

    let input = match command.to_lowercase().as_str() {
        "search" | "s" => Input::Filter(FilterEvent::Search(rest.to_string())),
        "brand" | "b" if !rest.is_empty() => {
            Input::Filter(FilterEvent::ToggleBrand(rest.to_string()))
        }
        "price" => {
            let min = optional_number(words.next(), "minimum price")?;
            let max = optional_number(words.next(), "maximum price")?;
            Input::Filter(FilterEvent::PriceRange { min, max })
        }
        "rating" => Input::Filter(FilterEvent::MinRating(optional_number(words.next(), "rating")?)),
        "discount" => {
            Input::Filter(FilterEvent::MinDiscount(optional_number(words.next(), "discount")?))
        }
        "category" | "c" => {
            let category = match rest {
                "" | "-" => None,
                name if name.eq_ignore_ascii_case("all") => None,
                name => Some(name.to_string()),
            };
            Input::Filter(FilterEvent::SubCategory(category))
        }
        "clear" => Input::Filter(FilterEvent::Clear),
        "next" | "n" => Input::Next,
        "prev" | "p" => Input::Previous,
        "page" => {
            let page = rest.parse().map_err(|_| format!("Invalid page: '{}'", rest))?;
            Input::Page(page)
        }
        "" | "show" => Input::Show,
        "brands" => Input::Brands,
        "categories" => Input::Categories,
        "reload" => Input::Reload,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => return Err(format!("Unknown command: '{}' (type 'help')", line)),
    };
    Ok(input)
}

/// Browses one listing interactively.
pub struct BrowseCommand {
    config: Config,
}

impl BrowseCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs on stdin/stdout.
    pub async fn execute(&self, listing: &Listing) -> Result<()> {
        let client = StorefrontClient::new(&self.config).context("Failed to create HTTP client")?;
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.execute_with(&client, listing, stdin, &mut std::io::stdout()).await
    }

    pub async fn execute_with<R, W>(
        &self,
        client: &impl StorefrontApi,
        listing: &Listing,
        input: R,
        out: &mut W,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut session = BrowseSession::empty(self.config.page_size);
        let ticket = session.begin_load();
        let products = fetch_listing(client, listing).await?;
        session.finish_load(ticket, products.clone());

        let (tx, updates) = mpsc::unbounded_channel::<Vec<Product>>();
        let composer = FilterComposer::spawn(
            products,
            self.config.filters.clone(),
            self.config.debounce(),
            move |filtered| {
                let _ = tx.send(filtered);
            },
        );

        let mut view = View { session, composer, updates, search_pending: false };
        view.wait_for_update().await;
        info!("Browsing {} ({} products)", listing, view.session.products().len());
        writeln!(out, "{}", view.render(&self.formatter()).await)?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let parsed = match parse_line(&line) {
                Ok(parsed) => parsed,
                Err(message) => {
                    writeln!(out, "{}", message)?;
                    continue;
                }
            };
            debug!("Input: {:?}", parsed);

            match parsed {
                Input::Quit => break,
                Input::Help => {
                    writeln!(out, "{}", HELP)?;
                    continue;
                }
                Input::Filter(FilterEvent::Search(text)) => {
                    view.drain();
                    view.composer.send(FilterEvent::Search(text));
                    view.search_pending = true;
                    view.sync().await;
                }
                Input::Filter(event) => {
                    view.sync().await;
                    view.composer.send(event);
                    view.wait_for_update().await;
                }
                Input::Next => {
                    view.sync().await;
                    view.session.next_page();
                }
                Input::Previous => {
                    view.sync().await;
                    view.session.previous_page();
                }
                Input::Page(page) => {
                    view.sync().await;
                    view.session.go_to(page);
                }
                Input::Show => view.sync().await,
                Input::Brands => {
                    let brands = view.session.available_brands();
                    writeln!(out, "{}", self.formatter().format_names("Brands", &brands))?;
                    continue;
                }
                Input::Categories => {
                    let categories = view.session.sub_categories();
                    writeln!(
                        out,
                        "{}",
                        self.formatter().format_names("Sub-categories", &categories)
                    )?;
                    continue;
                }
                Input::Reload => {
                    view.sync().await;
                    let ticket = view.session.begin_load();
                    let products = fetch_listing(client, listing).await?;
                    if view.session.finish_load(ticket, products.clone()) {
                        view.composer.set_products(products);
                        view.wait_for_update().await;
                    }
                }
            }

            writeln!(out, "{}", view.render(&self.formatter()).await)?;
        }

        writeln!(out)?;
        Ok(())
    }

    fn formatter(&self) -> Formatter {
        Formatter::new(self.config.format)
    }
}

/// The session plus the composer feeding it.
struct View {
    session: BrowseSession,
    composer: FilterComposer,
    updates: mpsc::UnboundedReceiver<Vec<Product>>,
    search_pending: bool,
}

impl View {
    async fn wait_for_update(&mut self) {
        if let Some(filtered) = self.updates.recv().await {
            self.session.set_filtered(filtered);
        }
    }

    /// Takes whatever results have already arrived, keeping the newest.
    fn drain(&mut self) {
        let mut latest = None;
        while let Ok(filtered) = self.updates.try_recv() {
            latest = Some(filtered);
        }
        if let Some(filtered) = latest {
            self.session.set_filtered(filtered);
        }
    }

    /// Waits out a pending search so later edits see its result.
    async fn sync(&mut self) {
        if std::mem::take(&mut self.search_pending) {
            self.wait_for_update().await;
        }
        self.drain();
    }

    async fn render(&self, formatter: &Formatter) -> String {
        let filters = self
            .composer
            .state()
            .await
            .map(|state| state.chain().descriptions())
            .unwrap_or_default();
        formatter.format_page(&self.session.page(), &filters)
    }
}
