use clap::Parser;
use frontier_crawl::report::ConsoleReporter;
use frontier_crawl::utils::seed_to_url;
use frontier_crawl::{CrawlConfig, Crawler, Error, FetcherConfig};

mod args;
use args::Args;

fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let exit_code = match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            ::log::error!("Crawl could not run: {}", e);
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(args: &Args) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => {
            ::log::info!("Loading configuration from {}", path.display());
            CrawlConfig::from_file(path)?
        }
        None => CrawlConfig::new(""),
    };
    if let Some(seed) = &args.seed {
        config.seed = seed.clone();
    }
    args.apply(&mut config);

    if args.go_tour && config.seed.is_empty() {
        config.seed = "http://golang.org/".to_string();
    }
    if config.seed.is_empty() {
        return Err(Error::Config("no seed given".into()));
    }
    // Filesystem crawls accept plain paths as seeds
    if matches!(config.fetcher, FetcherConfig::Filesystem { .. }) {
        config.seed = seed_to_url(&config.seed)?;
    }

    let reporter = if args.json {
        ConsoleReporter::json()
    } else {
        ConsoleReporter::new()
    };

    let summary = Crawler::from_config(&config)?
        .with_reporter(reporter)
        .run_blocking()?;
    summary.log_summary();

    Ok(())
}
