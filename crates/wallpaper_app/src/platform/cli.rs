use std::path::PathBuf;

use clap::Parser;
use wallpaper_core::TimeWindow;

/// Set a top-rated wallpaper from Reddit as the desktop background.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "top-wallpaper", version, about)]
pub struct Cli {
    /// Subreddit to read; join several with '+'.
    #[arg(short = 's', long = "subreddit", value_name = "CHANNEL")]
    pub subreddit: Option<String>,

    /// Ranking window: hour, day, week, month, year or all.
    #[arg(short = 't', long = "time", value_name = "WINDOW")]
    pub time: Option<TimeWindow>,

    /// Directory where accepted wallpapers are kept.
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Narrowest acceptable image, in pixels.
    #[arg(long, value_name = "PX")]
    pub min_width: Option<u32>,

    /// Config file (RON). Defaults to <config dir>/top_wallpaper/config.ron.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not contact the content source; pick from the cache.
    #[arg(long)]
    pub offline: bool,

    /// Log debug output to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
