use std::io::{self, Write};

use crate::sim::state::HistorySample;

/// Summary statistics computed from a propagation history.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub steps: usize,
    pub duration_s: f64,
    /// Final (phi, theta, psi) from the quaternion trajectory, deg.
    pub final_quat_deg: [f64; 3],
    /// Final (phi, theta, psi) from the Euler trajectory, deg.
    pub final_euler_deg: [f64; 3],
    pub final_divergence_deg: f64,
    pub max_divergence_deg: f64,
}

impl RunSummary {
    /// Compute a summary, or `None` for an empty history.
    pub fn from_history(history: &[HistorySample]) -> Option<Self> {
        let last = history.last()?;

        let max_divergence_deg = history
            .iter()
            .map(|s| s.divergence().norm())
            .fold(0.0_f64, f64::max);

        Some(RunSummary {
            steps: history.len(),
            duration_s: last.time,
            final_quat_deg: [last.quat_deg.x, last.quat_deg.y, last.quat_deg.z],
            final_euler_deg: [last.euler_deg.x, last.euler_deg.y, last.euler_deg.z],
            final_divergence_deg: last.divergence().norm(),
            max_divergence_deg,
        })
    }
}

/// Write a run summary as JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, summary: &RunSummary) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"steps\": {},", summary.steps)?;
    writeln!(writer, "  \"duration_s\": {:.4},", summary.duration_s)?;
    writeln!(
        writer,
        "  \"final_quat_deg\": [{:.4}, {:.4}, {:.4}],",
        summary.final_quat_deg[0], summary.final_quat_deg[1], summary.final_quat_deg[2]
    )?;
    writeln!(
        writer,
        "  \"final_euler_deg\": [{:.4}, {:.4}, {:.4}],",
        summary.final_euler_deg[0], summary.final_euler_deg[1], summary.final_euler_deg[2]
    )?;
    writeln!(
        writer,
        "  \"final_divergence_deg\": {:.6},",
        summary.final_divergence_deg
    )?;
    writeln!(
        writer,
        "  \"max_divergence_deg\": {:.6}",
        summary.max_divergence_deg
    )?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write a run summary JSON to a file.
pub fn write_summary_file(path: &str, summary: &RunSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summary)
}
