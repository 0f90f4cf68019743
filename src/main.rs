use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use retitle::cli::Cli;
use retitle::config::Config;
use retitle::launcher::{self, SystemOpener};
use retitle::models::TitleRecord;
use retitle::normalize::Normalizer;
use retitle::protocol::Handler;
use retitle::source;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;
    let normalizer =
        Normalizer::from_config(&config.normalize).context("Failed to build term table")?;

    if cli.serve {
        let handler = Handler::new(&normalizer, &config.search, &SystemOpener).dry_run(cli.dry_run);
        let count = handler.serve(io::stdin().lock(), io::stdout().lock())?;
        info!("Answered {} requests", count);
        return Ok(());
    }

    let mut records = collect_records(&cli, &normalizer)?;

    if cli.open {
        let record = records
            .iter_mut()
            .find(|record| !record.title.is_empty())
            .context("No title available")?;
        let url = if cli.dry_run {
            launcher::search_url(&config.search, &record.title)?
        } else {
            launcher::open_search(&config.search, &record.title, &SystemOpener)?
        };
        record.search_url = Some(url);
    }

    write_records(&records, cli.json)
}

fn collect_records(cli: &Cli, normalizer: &Normalizer) -> Result<Vec<TitleRecord>> {
    if let Some(page) = &cli.page {
        if let Some(url) = cli
            .url
            .as_deref()
            .filter(|url| !source::is_supported_page(url))
        {
            bail!("Please open a YouTube video (got {})", url);
        }
        let html = fs::read_to_string(page)
            .with_context(|| format!("Failed to read page {}", page.display()))?;
        let lookup = source::lookup_title(&html, normalizer);
        if !lookup.success {
            bail!("Could not detect video title in {}", page.display());
        }
        return Ok(vec![TitleRecord {
            raw_title: lookup.raw_title,
            title: lookup.title,
            search_url: None,
        }]);
    }

    let raw_titles = if cli.stdin {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<String>>>()
            .context("Failed to read titles from stdin")?
    } else {
        cli.titles.clone()
    };

    let titles = normalizer.normalize_all(&raw_titles);
    Ok(raw_titles
        .into_iter()
        .zip(titles)
        .map(|(raw_title, title)| TitleRecord {
            raw_title,
            title,
            search_url: None,
        })
        .collect())
}

fn write_records(records: &[TitleRecord], json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, records)?;
        writeln!(stdout)?;
        return Ok(());
    }

    for record in records {
        writeln!(stdout, "{}", record.title)?;
    }
    for url in records.iter().filter_map(|record| record.search_url.as_deref()) {
        writeln!(stdout, "{}", url)?;
    }
    Ok(())
}
