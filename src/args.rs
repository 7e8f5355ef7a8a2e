use artifact_harvest::RendererKind;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "artifact-harvest")]
#[command(about = "Downloads PDF and ZIP artifacts linked from product documentation pages")]
#[command(version)]
pub struct Args {
    /// JSON configuration file (defaults to the built-in catalog and PDFs/ + ZIPs/)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How pages are rendered
    #[arg(short, long, value_enum)]
    pub renderer: Option<RendererArg>,

    /// WebDriver endpoint (overrides the config file and WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RendererArg {
    /// Real browser over WebDriver
    Webdriver,
    /// Plain HTTP GET
    Http,
}

/// Convert from CLI argument renderer type to internal renderer type
pub fn convert_renderer(arg: RendererArg) -> RendererKind {
    match arg {
        RendererArg::Webdriver => RendererKind::WebDriver,
        RendererArg::Http => RendererKind::Http,
    }
}
