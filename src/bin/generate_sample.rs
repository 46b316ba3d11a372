//! Write the built-in sample records as `<entity>.json` files, plus a CSV
//! export of each. Both open in the console under their entity's tab.
//!
//! Usage: `generate_sample [OUTPUT_DIR]` (default `sample_data`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use opsdesk::data::sample;
use opsdesk::{write_csv, Entity};

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let today = chrono::Local::now().date_naive();

    for entity in Entity::ALL {
        let records = sample::records(entity);

        let json_path = out_dir.join(format!("{}.json", entity.slug()));
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&json_path, json).with_context(|| format!("writing {}", json_path.display()))?;

        let csv_path = out_dir.join(entity.export_file_name(today));
        let file = fs::File::create(&csv_path)
            .with_context(|| format!("creating {}", csv_path.display()))?;
        write_csv(file, &records, &entity.columns())
            .with_context(|| format!("writing {}", csv_path.display()))?;

        log::info!("{}: {} records", entity.slug(), records.len());
        println!(
            "Wrote {} {} to {} and {}",
            records.len(),
            entity.slug(),
            json_path.display(),
            csv_path.display()
        );
    }

    Ok(())
}
