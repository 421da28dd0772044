use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use yield_media::ExtractorConfig;

#[derive(Parser, Debug)]
#[command(name = "yield-media")]
#[command(about = "Prints the media URL of public Instagram posts as JSON")]
#[command(version)]
pub struct Args {
    /// Post URLs (/p/, /reel/ or /tv/ links)
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// User-Agent header to send
    #[arg(short = 'A', long)]
    pub user_agent: Option<String>,

    /// Path to JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seconds to wait between posts
    #[arg(short, long, default_value_t = 2)]
    pub delay: u64,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

impl Args {
    /// Build the extractor configuration: file first, then flag overrides
    pub fn extractor_config(&self) -> Result<ExtractorConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => ExtractorConfig::from_file(path)?,
            None => ExtractorConfig::default(),
        };

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }

        Ok(config)
    }
}
