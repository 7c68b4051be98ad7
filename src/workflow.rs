//! End-to-end menu generation: fetch, clean, order, render, write.
//!
//! Nothing touches the output directory until the document is fully
//! rendered in memory.
use crate::cli::MenuConfig;
use crate::fetch::fetch_inventory;
use crate::order::arrange;
use crate::output::write_menu;
use crate::render::{MenuRenderer, PdfDevice, RenderSummary};
use crate::schema::{load_records, INVENTORY_SCHEMA};
use crate::sheet::{locate_header, parse_rows};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// What a successful run produced.
#[derive(Debug, Serialize)]
pub struct MenuReport {
    pub path: PathBuf,
    pub loaded: usize,
    pub in_stock: usize,
    pub render: RenderSummary,
}

pub fn generate_menu(config: &MenuConfig) -> Result<MenuReport> {
    let text = fetch_inventory(&config.source, config.timeout)?;
    let report = build_menu(&text, config)?;
    let path = write_menu(&config.out_dir, &report.bytes)?;
    Ok(MenuReport {
        path,
        loaded: report.loaded,
        in_stock: report.in_stock,
        render: report.render,
    })
}

struct BuiltMenu {
    bytes: Vec<u8>,
    loaded: usize,
    in_stock: usize,
    render: RenderSummary,
}

fn build_menu(text: &str, config: &MenuConfig) -> Result<BuiltMenu> {
    let rows = parse_rows(text).context("parse inventory export")?;
    let table = locate_header(rows, &config.anchor)?;
    tracing::info!(
        header_row = table.header.number,
        data_rows = table.rows.len(),
        "header located"
    );

    let records = load_records(&table, INVENTORY_SCHEMA)?;
    let loaded = records.len();
    let records = arrange(records, &config.style_order);
    tracing::info!(loaded, in_stock = records.len(), "inventory arranged");

    let device = PdfDevice::new(config.pdf.clone());
    let rendered = MenuRenderer::new(device, config.body.clone())
        .render(&records)
        .context("render wine menu")?;
    Ok(BuiltMenu {
        bytes: rendered.bytes,
        loaded,
        in_stock: records.len(),
        render: rendered.summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use crate::error::MenuError;
    use clap::Parser;

    const EXPORT: &str = "\
Cellar inventory,,,,,,,,,
Country,Region,Producer,Title,Vintage,Purchase price,Main grape,Stock,Style,Bought Quantity
France,Bordeaux,Château A,Grand Vin,2015,450,Merlot,3,Red,6
France,Bordeaux,Château B,Second Vin,2018,200,Merlot,0,Red,6
France,Loire,Huet,Le Mont,2020,420,Chenin Blanc,1,White,2
";

    fn config(dir: &std::path::Path) -> MenuConfig {
        let args = Args::try_parse_from([
            "winemenu",
            "--local",
            "unused.csv",
            "--out-dir",
            dir.to_str().expect("utf8 temp dir"),
        ])
        .expect("parse args");
        MenuConfig::from(args)
    }

    #[test]
    fn builds_menu_from_noisy_export() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let built = build_menu(EXPORT, &config(dir.path())).expect("build menu");

        assert_eq!(built.loaded, 3);
        assert_eq!(built.in_stock, 2);
        assert_eq!(built.render.sections, 2);
        assert_eq!(built.render.sub_sections, 2);
        assert_eq!(built.render.pages, 1);
        assert!(built.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn all_out_of_stock_still_renders() {
        let export = EXPORT.replace(",3,Red", ",0,Red").replace(",1,White", ",0,White");
        let dir = tempfile::tempdir().expect("create temp dir");
        let built = build_menu(&export, &config(dir.path())).expect("build menu");

        assert_eq!(built.in_stock, 0);
        assert_eq!(built.render.sections, 0);
        assert_eq!(built.render.pages, 1);
    }

    #[test]
    fn failures_leave_output_dir_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let input = dir.path().join("inventory.csv");
        std::fs::write(&input, "Country,Region\nFrance,Loire\n").expect("write fixture");
        let out = dir.path().join("out");
        std::fs::create_dir(&out).expect("create out dir");

        let mut config = config(&out);
        config.source = crate::fetch::Source::Local(input);
        let err = generate_menu(&config).expect_err("anchor missing");

        assert!(matches!(
            err.downcast_ref::<MenuError>(),
            Some(MenuError::HeaderNotFound { .. })
        ));
        assert_eq!(std::fs::read_dir(&out).expect("list out dir").count(), 0);
    }
}
