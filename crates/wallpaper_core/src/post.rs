use std::fmt;
use std::str::FromStr;

/// Multi-subreddit union queried when no channel is given.
pub const DEFAULT_CHANNEL: &str =
    "wallpapers+wallpaper+WQHD_Wallpaper+topwalls+multiwall+gmbwallpapers";

/// A ranked post from the content source. Order in a listing is the rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub url: String,
    pub score: i64,
    pub title: Option<String>,
}

impl PostRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            score: 0,
            title: None,
        }
    }
}

/// Time range over which the "top" ranking is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 6] = [
        TimeWindow::Hour,
        TimeWindow::Day,
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::Year,
        TimeWindow::All,
    ];

    /// Query value understood by the listing endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTimeWindowError {
    pub input: String,
}

impl fmt::Display for ParseTimeWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown time window '{}' (expected one of hour, day, week, month, year, all)",
            self.input
        )
    }
}

impl std::error::Error for ParseTimeWindowError {}

impl FromStr for TimeWindow {
    type Err = ParseTimeWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TimeWindow::ALL
            .into_iter()
            .find(|window| window.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseTimeWindowError {
                input: s.to_string(),
            })
    }
}
