use anyhow::Result;

use crate::config::Config;

pub fn show_status(config: &Config) -> Result<()> {
    let catalog_path = config.catalog_path();
    let matrix_path = config.matrix_path();

    println!("\n📊 Timbre Status\n");
    println!("  Catalog: {}", catalog_path.display());
    println!("  Matrix:  {}", matrix_path.display());

    if !catalog_path.exists() || !matrix_path.exists() {
        println!("\n  Similarity data not found. Point --data-dir at the builder's output.");
        return Ok(());
    }

    let index = super::open_index(config)?;
    let matrix = index.matrix();

    println!("  Songs: {}", index.len());
    println!("  Matrix shape: {}x{}", matrix.rows(), matrix.cols());
    println!("  Default recommendations: {}", config.default_k);

    Ok(())
}
