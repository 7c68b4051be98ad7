//! Command-line arguments for the menu generator.
//!
//! Every knob lives here; there are no config files.
use crate::fetch::Source;
use crate::order::StyleOrder;
use crate::render::{BodyOptions, PdfOptions};
use crate::sheet::DEFAULT_ANCHOR;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "winemenu",
    version,
    about = "Render a printable wine menu from a shared inventory spreadsheet",
    after_help = "Examples:\n  winemenu 1AbCdEfGhIjKlMnOpQrStUvWxYz\n  winemenu --local inventory.csv --out-dir menus --currency NOK"
)]
pub struct Args {
    /// Spreadsheet id (or a CSV path with --local)
    #[arg(value_name = "SHEET_ID")]
    pub source: String,

    /// Read a downloaded CSV export instead of fetching the sheet
    #[arg(long)]
    pub local: bool,

    /// Directory the menu is written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Give up on the download after this many seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Title printed at the top of every page
    #[arg(long, default_value = "Wine Menu")]
    pub title: String,

    /// Currency code printed after each price
    #[arg(long, value_name = "CODE")]
    pub currency: Option<String>,

    /// Style priority list, highest first
    #[arg(long, value_name = "STYLES", value_delimiter = ',')]
    pub style_order: Option<Vec<String>>,

    /// Column name marking the header row of the export
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_ANCHOR)]
    pub anchor: String,

    /// Print a JSON summary instead of the plain result line
    #[arg(long)]
    pub json: bool,

    /// Log pipeline progress to stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    pub source: Source,
    pub out_dir: PathBuf,
    pub timeout: Duration,
    pub anchor: String,
    pub style_order: StyleOrder,
    pub pdf: PdfOptions,
    pub body: BodyOptions,
}

impl From<Args> for MenuConfig {
    fn from(args: Args) -> Self {
        let source = if args.local {
            Source::Local(PathBuf::from(args.source))
        } else {
            Source::Sheet(args.source)
        };
        let style_order = match args.style_order {
            Some(styles) => StyleOrder::new(
                styles
                    .into_iter()
                    .map(|style| style.trim().to_string())
                    .filter(|style| !style.is_empty()),
            ),
            None => StyleOrder::default(),
        };
        Self {
            source,
            out_dir: args.out_dir,
            timeout: Duration::from_secs(args.timeout_secs),
            anchor: args.anchor,
            style_order,
            pdf: PdfOptions { title: args.title },
            body: BodyOptions {
                currency: args.currency,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shared_sheet_layout() {
        let args = Args::try_parse_from(["winemenu", "sheet-id"]).expect("parse args");
        let config = MenuConfig::from(args);

        assert!(matches!(config.source, Source::Sheet(ref id) if id == "sheet-id"));
        assert_eq!(config.out_dir, PathBuf::from("."));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.anchor, "Bought Quantity");
        assert_eq!(config.pdf.title, "Wine Menu");
        assert!(config.body.currency.is_none());
        assert_eq!(config.style_order.rank("Champagne"), 0);
    }

    #[test]
    fn source_argument_is_required() {
        assert!(Args::try_parse_from(["winemenu"]).is_err());
    }

    #[test]
    fn style_order_override_is_comma_separated() {
        let args = Args::try_parse_from([
            "winemenu",
            "--local",
            "inventory.csv",
            "--style-order",
            "Red, White",
        ])
        .expect("parse args");
        let config = MenuConfig::from(args);

        assert!(matches!(config.source, Source::Local(_)));
        assert_eq!(config.style_order.rank("Red"), 0);
        assert_eq!(config.style_order.rank("White"), 1);
        assert_eq!(config.style_order.rank("Champagne"), 2);
    }
}
