//! Output formatting for products, pages and advisor results
//! (table, JSON, markdown, CSV).

use crate::advisor::SkinTone;
use crate::catalog::models::{BodyShapeDetails, ChatProduct};
use crate::catalog::{Product, ScoredProduct};
use crate::config::OutputFormat;
use crate::paginate::Page;
use serde::Serialize;

/// Formats products for output.
pub struct Formatter {
    format: OutputFormat,
}

fn price(value: f64) -> String {
    if value.is_finite() {
        format!("₹{:.0}", value)
    } else {
        "N/A".to_string()
    }
}

fn rating(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}", value)
    } else {
        "N/A".to_string()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "-"
    } else {
        text
    }
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product.
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => Self::json(product, "{}"),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => Self::json(products, "[]"),
            OutputFormat::Table => {
                let mut out = self.table_products(products);
                out.push_str(&format!("\n\nTotal: {} products", products.len()));
                out
            }
            OutputFormat::Markdown => {
                let mut out = self.markdown_products(products);
                out.push_str(&format!("\n\n*{} products found*", products.len()));
                out
            }
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    /// Formats one page of a listing, with active filter descriptions.
    pub fn format_page(&self, page: &Page<Product>, filters: &[String]) -> String {
        match self.format {
            OutputFormat::Json => Self::json(page, "{}"),
            OutputFormat::Csv => {
                if page.items.is_empty() {
                    self.csv_header()
                } else {
                    self.csv_products(&page.items)
                }
            }
            OutputFormat::Table | OutputFormat::Markdown => {
                let mut lines = Vec::new();
                if !filters.is_empty() {
                    lines.push(format!("Filters: {}", filters.join(", ")));
                    lines.push(String::new());
                }

                if page.items.is_empty() {
                    lines.push("No products found.".to_string());
                    return lines.join("\n");
                }

                if self.format == OutputFormat::Table {
                    lines.push(self.table_products(&page.items));
                } else {
                    lines.push(self.markdown_products(&page.items));
                }
                lines.push(String::new());
                lines.push(format!(
                    "Page {} of {} ({} products)",
                    page.number, page.total_pages, page.total_items
                ));
                lines.join("\n")
            }
        }
    }

    /// Formats image-similarity results, best match first.
    pub fn format_scored(&self, results: &[ScoredProduct]) -> String {
        if results.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => format!("score,{}", self.csv_header()),
                _ => "No similar products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => Self::json(results, "[]"),
            OutputFormat::Csv => {
                let mut lines = vec![format!("score,{}", self.csv_header())];
                for result in results {
                    lines.push(format!("{:.4},{}", result.score, self.csv_row(&result.product)));
                }
                lines.join("\n")
            }
            OutputFormat::Table | OutputFormat::Markdown => {
                let markdown = self.format == OutputFormat::Markdown;
                let mut lines = Vec::new();
                if markdown {
                    lines.push("| Score | ID | Brand | Category | Price |".to_string());
                    lines.push("|-------|----|-------|----------|-------|".to_string());
                } else {
                    lines.push(format!(
                        "{:<6}  {:<8}  {:<20}  {:<20}  {:>8}",
                        "Score", "ID", "Brand", "Category", "Price"
                    ));
                    lines.push(format!("{:-<6}  {:-<8}  {:-<20}  {:-<20}  {:->8}", "", "", "", "", ""));
                }
                for ScoredProduct { product, score } in results {
                    let row = [
                        format!("{:.2}", score),
                        product.id.clone(),
                        truncate(&product.brand, 20),
                        truncate(&product.individual_category, 20),
                        price(product.original_price),
                    ];
                    if markdown {
                        lines.push(format!("| {} |", row.join(" | ")));
                    } else {
                        lines.push(format!(
                            "{:<6}  {:<8}  {:<20}  {:<20}  {:>8}",
                            row[0], row[1], row[2], row[3], row[4]
                        ));
                    }
                }
                lines.join("\n")
            }
        }
    }

    /// Formats a plain list of names under a heading.
    pub fn format_names(&self, heading: &str, names: &[String]) -> String {
        match self.format {
            OutputFormat::Json => Self::json(names, "[]"),
            OutputFormat::Csv => {
                let mut lines = vec![heading.to_lowercase().replace(' ', "_")];
                lines.extend(names.iter().map(|n| Self::csv_escape(n)));
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines = vec![format!("## {}", heading), String::new()];
                lines.extend(names.iter().map(|n| format!("- {}", n)));
                lines.join("\n")
            }
            OutputFormat::Table => {
                if names.is_empty() {
                    return format!("No {} found.", heading.to_lowercase());
                }
                let mut lines = vec![format!("{}:", heading)];
                lines.extend(names.iter().map(|n| format!("  {}", n)));
                lines.join("\n")
            }
        }
    }

    /// Formats skin-tone guidance.
    pub fn format_skin_tone(&self, tone: SkinTone) -> String {
        #[derive(Serialize)]
        struct Guide<'a> {
            tone: SkinTone,
            label: &'a str,
            description: &'a str,
            colors_to_avoid: &'a str,
            palettes: &'a [crate::advisor::Palette],
            hair_colors: &'a [crate::advisor::Swatch],
        }

        if self.format == OutputFormat::Json {
            return Self::json(
                &Guide {
                    tone,
                    label: tone.label(),
                    description: tone.description(),
                    colors_to_avoid: tone.colors_to_avoid(),
                    palettes: tone.palettes(),
                    hair_colors: tone.hair_colors(),
                },
                "{}",
            );
        }

        let markdown = self.format == OutputFormat::Markdown;
        let mut lines = Vec::new();
        lines.push(if markdown {
            format!("## {} skin tone", tone.label())
        } else {
            format!("Skin tone: {}", tone.label())
        });
        lines.push(String::new());
        lines.push(tone.description().to_string());
        lines.push(String::new());

        for palette in tone.palettes() {
            let swatches: Vec<String> =
                palette.swatches.iter().map(|s| format!("{} ({})", s.name, s.hex)).collect();
            if markdown {
                lines.push(format!("- **{}:** {}", palette.name, swatches.join(", ")));
            } else {
                lines.push(format!("{}: {}", palette.name, swatches.join(", ")));
            }
        }

        let hair: Vec<&str> = tone.hair_colors().iter().map(|s| s.name).collect();
        lines.push(if markdown {
            format!("- **Hair colors:** {}", hair.join(", "))
        } else {
            format!("Hair colors: {}", hair.join(", "))
        });
        lines.push(String::new());
        lines.push(if markdown {
            format!("**Colors to avoid:** {}", tone.colors_to_avoid())
        } else {
            format!("Colors to avoid: {}", tone.colors_to_avoid())
        });

        lines.join("\n")
    }

    /// Formats a body-shape classification.
    pub fn format_body_shape(
        &self,
        shape: &str,
        waist_hip_ratio: Option<f64>,
        details: &BodyShapeDetails,
    ) -> String {
        if self.format == OutputFormat::Json {
            #[derive(Serialize)]
            struct Shape<'a> {
                body_shape: &'a str,
                waist_hip_ratio: Option<f64>,
                details: &'a BodyShapeDetails,
            }
            return Self::json(&Shape { body_shape: shape, waist_hip_ratio, details }, "{}");
        }

        let mut lines = vec![format!("Body shape: {}", shape)];
        if let Some(ratio) = waist_hip_ratio.filter(|r| r.is_finite()) {
            lines.push(format!("Waist-hip ratio: {:.2}", ratio));
        }
        if !details.description.is_empty() {
            lines.push(String::new());
            lines.push(details.description.clone());
        }
        if !details.recommendations.is_empty() {
            lines.push(String::new());
            lines.push("Style tips:".to_string());
            for tip in &details.recommendations {
                if tip.description.is_empty() {
                    lines.push(format!("  - {}", tip.name));
                } else {
                    lines.push(format!("  - {}: {}", tip.name, tip.description));
                }
            }
        }
        lines.join("\n")
    }

    /// Formats product cards attached to a chat reply.
    pub fn format_chat_products(&self, products: &[ChatProduct]) -> String {
        if self.format == OutputFormat::Json {
            return Self::json(products, "[]");
        }
        products
            .iter()
            .map(|p| {
                let offer = if p.discount_offer.is_empty() {
                    String::new()
                } else {
                    format!(" {}", p.discount_offer)
                };
                format!(
                    "  [{}] {} {} {}{} ({} stars)",
                    p.product_id,
                    or_dash(&p.brand),
                    or_dash(&p.individual_category),
                    price(p.original_price),
                    offer,
                    rating(p.rating)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
    }

    // Table formatting

    fn table_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ID:       {}", product.id));
        lines.push(format!("Brand:    {}", or_dash(&product.brand)));
        lines.push(format!(
            "Category: {} / {}",
            or_dash(&product.category),
            or_dash(&product.individual_category)
        ));

        let offer = if product.discount_offer.is_empty() {
            String::new()
        } else {
            format!(" ({})", product.discount_offer)
        };
        if product.discount_price.is_finite() && product.discount_price != product.original_price
        {
            lines.push(format!(
                "Price:    {} (was {}){}",
                price(product.discount_price),
                price(product.original_price),
                offer
            ));
        } else {
            lines.push(format!("Price:    {}{}", price(product.original_price), offer));
        }

        match product.review_count() {
            Some(reviews) => lines.push(format!(
                "Rating:   {}/5 ({} reviews)",
                rating(product.rating),
                reviews
            )),
            None => lines.push(format!("Rating:   {}", rating(product.rating))),
        }

        let sizes = product.sizes();
        if !sizes.is_empty() {
            lines.push(format!("Sizes:    {}", sizes.join(", ")));
        }
        if !product.tags.is_empty() {
            lines.push(format!("Tags:     {}", product.tags));
        }
        if !product.description.is_empty() {
            lines.push(format!("About:    {}", product.description));
        }
        if !product.url.is_empty() {
            lines.push(format!("URL:      {}", product.url));
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[Product]) -> String {
        let id_width = 8;
        let brand_width = 20;
        let category_width = 20;
        let price_width = 8;
        let rating_width = 6;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$}  {:<brand_width$}  {:<category_width$}  {:>price_width$}  {:>rating_width$}  {}",
            "ID", "Brand", "Category", "Price", "Rating", "Offer"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<brand_width$}  {:-<category_width$}  {:->price_width$}  {:->rating_width$}  {:-<10}",
            "", "", "", "", "", ""
        ));

        for product in products {
            lines.push(format!(
                "{:<id_width$}  {:<brand_width$}  {:<category_width$}  {:>price_width$}  {:>rating_width$}  {}",
                truncate(&product.id, id_width),
                truncate(or_dash(&product.brand), brand_width),
                truncate(or_dash(&product.individual_category), category_width),
                price(product.original_price),
                rating(product.rating),
                or_dash(&product.discount_offer)
            ));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {} {}", or_dash(&product.brand), product.individual_category));
        lines.push(String::new());

        lines.push(format!("- **ID:** {}", product.id));
        if !product.url.is_empty() {
            lines.push(format!("- **URL:** [View product]({})", product.url));
        }
        if product.discount_price.is_finite() && product.discount_price != product.original_price
        {
            lines.push(format!(
                "- **Price:** {} ~~{}~~",
                price(product.discount_price),
                price(product.original_price)
            ));
        } else {
            lines.push(format!("- **Price:** {}", price(product.original_price)));
        }
        if !product.discount_offer.is_empty() {
            lines.push(format!("- **Offer:** {}", product.discount_offer));
        }
        if product.rating.is_finite() {
            lines.push(format!("- **Rating:** {}/5", rating(product.rating)));
        }
        let sizes = product.sizes();
        if !sizes.is_empty() {
            lines.push(format!("- **Sizes:** {}", sizes.join(", ")));
        }
        if !product.description.is_empty() {
            lines.push(String::new());
            lines.push(product.description.clone());
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Brand | Category | Price | Rating | Offer |".to_string());
        lines.push("|----|-------|----------|-------|--------|-------|".to_string());

        for product in products {
            let brand = truncate(or_dash(&product.brand), 30);
            let brand = if product.url.is_empty() {
                brand
            } else {
                format!("[{}]({})", brand, product.url)
            };
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                product.id,
                brand,
                or_dash(&product.individual_category),
                price(product.original_price),
                rating(product.rating),
                or_dash(&product.discount_offer)
            ));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "id,brand,category,individual_category,original_price,discount_price,discount_offer,rating,reviews,sizes,tags,url"
            .to_string()
    }

    fn csv_row(&self, product: &Product) -> String {
        let number = |v: f64| if v.is_finite() { v.to_string() } else { String::new() };
        [
            Self::csv_escape(&product.id),
            Self::csv_escape(&product.brand),
            Self::csv_escape(&product.category),
            Self::csv_escape(&product.individual_category),
            number(product.original_price),
            number(product.discount_price),
            Self::csv_escape(&product.discount_offer),
            number(product.rating),
            product.review_count().map(|r| r.to_string()).unwrap_or_default(),
            Self::csv_escape(&product.size_option),
            Self::csv_escape(&product.tags),
            Self::csv_escape(&product.url),
        ]
        .join(",")
    }

    fn csv_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::with_capacity(products.len() + 1);
        lines.push(self.csv_header());
        lines.extend(products.iter().map(|p| self.csv_row(p)));
        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::StyleTip;
    use crate::paginate::paginate;

    fn make_product() -> Product {
        Product {
            id: "101".to_string(),
            url: "https://tiyara.example/p/101".to_string(),
            category: "Western Wear".to_string(),
            image_url: "https://img.tiyara.example/101.jpg".to_string(),
            brand: "Roadster".to_string(),
            individual_category: "Tshirts".to_string(),
            description: "Cotton crew-neck tee".to_string(),
            discount_price: 329.0,
            original_price: 599.0,
            discount_offer: "45% OFF".to_string(),
            size_option: "S, M, L, XL".to_string(),
            rating: 4.2,
            reviews: 1234.0,
            tags: "Tops, T-Shirt, Casual".to_string(),
        }
    }

    fn make_minimal_product() -> Product {
        Product {
            id: "7".to_string(),
            url: String::new(),
            category: String::new(),
            image_url: String::new(),
            brand: String::new(),
            individual_category: "Kurtas".to_string(),
            description: String::new(),
            discount_price: f64::NAN,
            original_price: f64::NAN,
            discount_offer: String::new(),
            size_option: String::new(),
            rating: f64::NAN,
            reviews: f64::NAN,
            tags: String::new(),
        }
    }

    // JSON format tests

    #[test]
    fn test_json_single_product() {
        let output = Formatter::new(OutputFormat::Json).format_product(&make_product());

        assert!(output.contains("\"BrandName\": \"Roadster\""));
        assert!(output.contains("45% OFF"));
        assert!(output.contains("599"));
    }

    #[test]
    fn test_json_empty() {
        assert_eq!(Formatter::new(OutputFormat::Json).format_products(&[]), "[]");
    }

    #[test]
    fn test_json_page() {
        let products = vec![make_product(); 3];
        let page = paginate(&products, 2, 2);
        let output = Formatter::new(OutputFormat::Json).format_page(&page, &[]);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["number"], 2);
        assert_eq!(value["total_pages"], 2);
        assert_eq!(value["items"].as_array().unwrap().len(), 1);
    }

    // Table format tests

    #[test]
    fn test_table_single_product() {
        let output = Formatter::new(OutputFormat::Table).format_product(&make_product());

        assert!(output.contains("ID:       101"));
        assert!(output.contains("Brand:    Roadster"));
        assert!(output.contains("Category: Western Wear / Tshirts"));
        assert!(output.contains("Price:    ₹329 (was ₹599) (45% OFF)"));
        assert!(output.contains("Rating:   4.2/5 (1234 reviews)"));
        assert!(output.contains("Sizes:    S, M, L, XL"));
    }

    #[test]
    fn test_table_single_minimal_product() {
        let output = Formatter::new(OutputFormat::Table).format_product(&make_minimal_product());

        assert!(output.contains("Brand:    -"));
        assert!(output.contains("Price:    N/A"));
        assert!(output.contains("Rating:   N/A"));
        assert!(!output.contains("Sizes:"));
        assert!(!output.contains("URL:"));
    }

    #[test]
    fn test_table_multiple_products() {
        let products = vec![make_product(), make_minimal_product()];
        let output = Formatter::new(OutputFormat::Table).format_products(&products);

        assert!(output.contains("Brand"));
        assert!(output.contains("--------"));
        assert!(output.contains("Roadster"));
        assert!(output.contains("₹599"));
        assert!(output.contains("N/A"));
        assert!(output.contains("Total: 2 products"));
    }

    #[test]
    fn test_table_long_brand_truncation() {
        let mut product = make_product();
        product.brand = "An Exceptionally Long Designer Label Name".to_string();
        let output = Formatter::new(OutputFormat::Table).format_products(&[product]);
        assert!(output.contains("An Exceptionally ..."));
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(Formatter::new(OutputFormat::Table).format_products(&[]), "No products found.");
    }

    #[test]
    fn test_table_page_footer_and_filters() {
        let products = vec![make_product(); 45];
        let page = paginate(&products, 20, 3);
        let filters = vec!["Discount: >= 30%".to_string()];
        let output = Formatter::new(OutputFormat::Table).format_page(&page, &filters);

        assert!(output.starts_with("Filters: Discount: >= 30%"));
        assert!(output.contains("Page 3 of 3 (45 products)"));
    }

    #[test]
    fn test_table_empty_page() {
        let page = paginate::<Product>(&[], 20, 1);
        let output = Formatter::new(OutputFormat::Table).format_page(&page, &[]);
        assert_eq!(output, "No products found.");
    }

    // Markdown format tests

    #[test]
    fn test_markdown_single_product() {
        let output = Formatter::new(OutputFormat::Markdown).format_product(&make_product());

        assert!(output.contains("## Roadster Tshirts"));
        assert!(output.contains("- **URL:** [View product](https://tiyara.example/p/101)"));
        assert!(output.contains("- **Price:** ₹329 ~~₹599~~"));
        assert!(output.contains("- **Offer:** 45% OFF"));
    }

    #[test]
    fn test_markdown_multiple_products() {
        let products = vec![make_product(), make_minimal_product()];
        let output = Formatter::new(OutputFormat::Markdown).format_products(&products);

        assert!(output.contains("| ID | Brand | Category | Price | Rating | Offer |"));
        assert!(output.contains("[Roadster](https://tiyara.example/p/101)"));
        assert!(output.contains("| 7 | - | Kurtas | N/A | N/A | - |"));
        assert!(output.contains("*2 products found*"));
    }

    // CSV format tests

    #[test]
    fn test_csv_products() {
        let products = vec![make_product(), make_minimal_product()];
        let output = Formatter::new(OutputFormat::Csv).format_products(&products);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,brand,category"));
        assert!(lines[1].starts_with("101,Roadster,Western Wear,Tshirts,599,329,45% OFF,4.2,1234,"));
        assert!(lines[1].contains("\"S, M, L, XL\""));
        assert!(lines[2].starts_with("7,,,Kurtas,,,,,,"));
    }

    #[test]
    fn test_csv_empty() {
        let formatter = Formatter::new(OutputFormat::Csv);
        assert_eq!(formatter.format_products(&[]), formatter.csv_header());
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(Formatter::csv_escape("simple"), "simple");
        assert_eq!(Formatter::csv_escape("with,comma"), "\"with,comma\"");
        assert_eq!(Formatter::csv_escape("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(Formatter::csv_escape("with\nnewline"), "\"with\nnewline\"");
    }

    // Other views

    #[test]
    fn test_scored_table() {
        let results = vec![ScoredProduct { product: make_product(), score: 0.9731 }];
        let output = Formatter::new(OutputFormat::Table).format_scored(&results);
        assert!(output.contains("0.97"));
        assert!(output.contains("Roadster"));

        let csv = Formatter::new(OutputFormat::Csv).format_scored(&results);
        assert!(csv.lines().nth(1).unwrap().starts_with("0.9731,101,"));
    }

    #[test]
    fn test_names() {
        let names = vec!["Dresses".to_string(), "Kurtas".to_string()];
        let table = Formatter::new(OutputFormat::Table).format_names("Categories", &names);
        assert_eq!(table, "Categories:\n  Dresses\n  Kurtas");

        let md = Formatter::new(OutputFormat::Markdown).format_names("Categories", &names);
        assert!(md.contains("- Kurtas"));

        let empty = Formatter::new(OutputFormat::Table).format_names("Brands", &[]);
        assert_eq!(empty, "No brands found.");
    }

    #[test]
    fn test_skin_tone_guide() {
        let output = Formatter::new(OutputFormat::Table).format_skin_tone(SkinTone::Olive);
        assert!(output.starts_with("Skin tone: Olive"));
        assert!(output.contains("Terracotta (#E2725B)"));
        assert!(output.contains("Colors to avoid: Colors with too much yellow or green"));

        let json = Formatter::new(OutputFormat::Json).format_skin_tone(SkinTone::Deep);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tone"], "deep");
        assert_eq!(value["palettes"][1]["name"], "Metallics");
    }

    #[test]
    fn test_body_shape() {
        let details = BodyShapeDetails {
            name: "Hourglass".to_string(),
            description: "Balanced bust and hips with a defined waist.".to_string(),
            image: String::new(),
            recommendations: vec![StyleTip {
                name: "Wrap dresses".to_string(),
                description: "Highlight the waist".to_string(),
                image: String::new(),
            }],
        };
        let output =
            Formatter::new(OutputFormat::Table).format_body_shape("Hourglass", Some(0.72), &details);
        assert!(output.contains("Body shape: Hourglass"));
        assert!(output.contains("Waist-hip ratio: 0.72"));
        assert!(output.contains("  - Wrap dresses: Highlight the waist"));
    }
}
