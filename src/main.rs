use artifact_harvest::{HarvestConfig, Harvester};
use clap::Parser;

mod args;
use args::{Args, convert_renderer};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match HarvestConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                return;
            }
        },
        None => HarvestConfig::default(),
    };

    let mut harvester = Harvester::new(config.with_env_overrides());
    if let Some(renderer) = args.renderer {
        harvester = harvester.with_renderer(convert_renderer(renderer));
    }
    if let Some(webdriver_url) = args.webdriver_url {
        harvester = harvester.with_webdriver_url(webdriver_url);
    }
    if args.headless {
        harvester = harvester.with_headless(true);
    }

    ::log::info!(
        "Harvesting {} catalog pages with the {:?} renderer",
        harvester.config().catalog.len(),
        harvester.config().renderer
    );

    let start_time = std::time::Instant::now();
    match harvester.run().await {
        Ok(report) => {
            ::log::info!(
                "Finished in {:.2} seconds: {} saved, {} skipped, {} failed",
                start_time.elapsed().as_secs_f64(),
                report.saved,
                report.skipped,
                report.failed
            );
        }
        Err(e) => {
            ::log::error!("Failed to start harvester: {}", e);
        }
    }
}
