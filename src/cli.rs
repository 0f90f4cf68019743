use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Raw titles to normalize
    #[arg(required_unless_present_any = ["stdin", "page", "serve"])]
    pub titles: Vec<String>,

    /// Read titles from stdin, one per line
    #[arg(long, conflicts_with_all = ["titles", "page", "serve"])]
    pub stdin: bool,

    /// Saved watch page (HTML) to extract the title from
    #[arg(short, long, conflicts_with_all = ["titles", "serve"])]
    pub page: Option<PathBuf>,

    /// Address the page was saved from; unsupported sites are refused
    #[arg(long, requires = "page")]
    pub url: Option<String>,

    /// Open a catalog search for the first non-empty title
    #[arg(short, long, conflicts_with = "serve")]
    pub open: bool,

    /// Print search URLs instead of opening them
    #[arg(long)]
    pub dry_run: bool,

    /// Emit JSON records instead of plain lines
    #[arg(long, conflicts_with = "serve")]
    pub json: bool,

    /// Answer JSON requests on stdin, one reply per line on stdout
    #[arg(long)]
    pub serve: bool,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
