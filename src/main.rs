use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use yield_media::{ExtractError, MediaExtractor, MediaRecord, TransportFailure};

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match args.extractor_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let extractor = match MediaExtractor::with_config(config) {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0;
    for (index, url) in args.urls.iter().enumerate() {
        // Space out successive requests
        if index > 0 && args.delay > 0 {
            ::log::debug!("Waiting {}s before next post", args.delay);
            tokio::time::sleep(Duration::from_secs(args.delay)).await;
        }

        match extractor.download(url).await {
            Ok(record) => print_record(&record, args.pretty),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", url, e);
                eprintln!("  {}", remedy(&e));
            }
        }
    }

    ::log::info!(
        "Processed {} posts, {} failed",
        args.urls.len(),
        failures
    );

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_record(record: &MediaRecord, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(record)
    } else {
        serde_json::to_string(record)
    };

    match json {
        Ok(json) => println!("{}", json),
        Err(e) => ::log::error!("Failed to serialize record: {}", e),
    }
}

/// Suggested next step for each failure category
fn remedy(err: &ExtractError) -> &'static str {
    match err {
        ExtractError::InvalidInput(_) => {
            "Use a post link such as https://www.instagram.com/p/<shortcode>/"
        }
        ExtractError::Transport(TransportFailure::NotFound) => {
            "The post does not exist or was deleted."
        }
        ExtractError::Transport(TransportFailure::Forbidden) => {
            "Access was denied. The post may be private or your network may be blocked."
        }
        ExtractError::Transport(TransportFailure::RateLimited) => {
            "Too many requests. Wait a few minutes and use a longer --delay between posts."
        }
        ExtractError::Transport(TransportFailure::NetworkError(_)) => {
            "Check your connection or raise --timeout."
        }
        ExtractError::Transport(TransportFailure::UnexpectedStatus(_)) => {
            "The server returned an unexpected response. Try again later."
        }
        ExtractError::ExtractionFailed(_) => {
            "No media found. The post may be private, deleted or the page format changed."
        }
    }
}
