use std::io::{self, Write};

use crate::sim::state::HistorySample;

/// Write the propagation history to CSV format.
///
/// Columns: time, then both trajectories as (phi, theta, psi) in degrees —
/// quaternion-derived first, directly-integrated second.
pub fn write_history<W: Write>(writer: &mut W, history: &[HistorySample]) -> io::Result<()> {
    writeln!(
        writer,
        "time,phi_q,theta_q,psi_q,phi_euler,theta_euler,psi_euler"
    )?;

    for s in history {
        writeln!(
            writer,
            "{:.4},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            s.time,
            s.quat_deg.x,
            s.quat_deg.y,
            s.quat_deg.z,
            s.euler_deg.x,
            s.euler_deg.y,
            s.euler_deg.z,
        )?;
    }

    Ok(())
}

/// Write the history to a CSV file at the given path.
pub fn write_history_file(path: &str, history: &[HistorySample]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_history(&mut file, history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn csv_output_has_header_and_rows() {
        let history = vec![
            HistorySample {
                time: 0.0,
                quat_deg: Vector3::zeros(),
                euler_deg: Vector3::zeros(),
            },
            HistorySample {
                time: 1.0 / 60.0,
                quat_deg: Vector3::new(0.1, 0.2, 1.5),
                euler_deg: Vector3::new(0.1, 0.2, 1.5),
            },
        ];

        let mut buf = Vec::new();
        write_history(&mut buf, &history).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("time,phi_q"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[1].starts_with("0.0000,"));
    }
}
