mod progress;
mod report;

pub use progress::ScanProgress;
pub use report::{
    FileReport, ReportWriter, indent, render_matches, render_positioned_matches,
};
