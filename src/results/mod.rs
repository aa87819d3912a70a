//! Training artifacts: timestamped table and win-rate files, run metadata,
//! and the win-rate chart.

mod metadata;
mod plot;
mod store;

pub use metadata::{RunMetadata, WinRateReport};
pub use plot::{render_win_rate_chart, write_win_rate_chart, PLOT_HEIGHT, PLOT_WIDTH};
pub use store::{ResultsStore, SavedResults, DEFAULT_RESULTS_DIR, PLOT_FILE};
