use log::info;
use std::env;
use std::path::Path;
use symmetry_detector::batch::{run_batch, write_reports};
use symmetry_detector::config::batch;
use symmetry_detector::image::io::{list_images, write_json_file};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = batch::load_config(Path::new(&config_path))?;
    let engine = config.engine.build_engine()?;

    let inputs = list_images(&config.input_dir, &config.extension)?;
    if inputs.is_empty() {
        return Err(format!(
            "No '{}' images found in {}",
            config.extension,
            config.input_dir.display()
        ));
    }
    info!(
        "Processing {} images (mode={}, parallel={})",
        inputs.len(),
        engine.params().mode,
        config.batch.parallel
    );

    let items = run_batch(&engine, &inputs, &config.batch);
    let summary = write_reports(&items, &config.output_dir)?;
    let summary_path = config.output_dir.join("summary.json");
    write_json_file(&summary_path, &summary)?;

    println!(
        "Processed {} images ({} failed); reports in {}",
        summary.processed + summary.failed,
        summary.failed,
        config.output_dir.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: symmetry_batch <config.json>".to_string()
}
