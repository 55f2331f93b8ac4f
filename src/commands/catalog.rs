use std::{error::Error, path::Path, process};

use tracing::info;

use crate::{
    catalog::{listing, seed_catalog, CatalogIndex, CatalogSeed},
    cli::CatalogAction,
    config::Config,
    database::setup_database_connection,
};

pub async fn handle_catalog_command(config: &Config, action: CatalogAction) {
    let result = match action {
        CatalogAction::Seed { file } => seed(config, &file).await,
        CatalogAction::Show => show(config).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Catalog command failed: {e}");
        process::exit(1);
    }
}

async fn seed(config: &Config, file: &Path) -> Result<(), Box<dyn Error>> {
    let catalog = CatalogSeed::from_file(file)?;
    let db = setup_database_connection(&config.database).await?;

    info!("Seeding catalog from {}", file.display());
    let report = seed_catalog(&db, &catalog).await?;

    println!(
        "✅ Catalog seeded: {} inserted, {} updated, {} new link(s)",
        report.inserted, report.updated, report.links
    );
    Ok(())
}

async fn show(config: &Config) -> Result<(), Box<dyn Error>> {
    let db = setup_database_connection(&config.database).await?;
    let catalog = CatalogIndex::load(&db).await?;

    if catalog.is_empty() {
        println!("The catalog is empty. Load one with `catalog seed <file>`.");
        return Ok(());
    }

    print!("{}", serde_yaml::to_string(&listing(&catalog))?);
    Ok(())
}
