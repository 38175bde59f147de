use std::env;
use std::path::Path;
use symmetry_detector::batch::process_path;
use symmetry_detector::config::single;
use symmetry_detector::image::io::write_json_file;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = single::load_config(Path::new(&config_path))?;
    let engine = config.engine.build_engine()?;

    let report = process_path(&engine, &config.input).map_err(|e| e.to_string())?;
    write_json_file(&config.report_json, &report)?;

    println!(
        "axes={} rotations={} latency_ms={:.3}",
        report.result.axes.len(),
        report.result.rotations.len(),
        report.result.latency_ms
    );
    for stage in &report.trace.timings.stages {
        println!("  {:<12} {:>9.3} ms", stage.label, stage.elapsed_ms);
    }
    println!("Saved report to {}", config.report_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: symmetry_single <config.json>".to_string()
}
