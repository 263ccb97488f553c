use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use attitude_sim::sim::{HistorySample, Propagator, PropagatorConfig};

fn main() -> eframe::Result {
    let app = AttitudeViz::new();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Attitude Propagation",
        options,
        Box::new(|_| Ok(Box::new(app))),
    )
}

struct AttitudeViz {
    prop: Propagator,
    running: bool,
    // Commanded body rates, deg/s, as shown on the sliders
    rate_cmd: [f64; 3],
}

impl AttitudeViz {
    fn new() -> Self {
        Self {
            prop: Propagator::new(PropagatorConfig::default()).unwrap(),
            running: false,
            rate_cmd: [0.0, 0.0, 90.0],
        }
    }
}

impl eframe::App for AttitudeViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.running {
            // The repaint cadence is the tick driver: one step per frame.
            self.prop.step();
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Quaternion vs. direct Euler integration");

            ui.horizontal(|ui| {
                let label = if self.running { "Stop" } else { "Start" };
                if ui.button(label).clicked() {
                    self.running = !self.running;
                }
                if ui.button("Reset").clicked() {
                    self.prop.reset();
                    self.rate_cmd = [0.0, 0.0, 90.0];
                }

                ui.separator();

                let mut changed = false;
                for (value, text) in self
                    .rate_cmd
                    .iter_mut()
                    .zip(["Roll (°/s)", "Pitch (°/s)", "Yaw (°/s)"])
                {
                    changed |= ui
                        .add(egui::Slider::new(value, -180.0..=180.0).text(text))
                        .changed();
                }
                if changed {
                    self.prop
                        .set_body_rates(self.rate_cmd[0], self.rate_cmd[1], self.rate_cmd[2]);
                }
            });

            let q = self.prop.quaternion();
            ui.monospace(format!(
                "t = {:8.2} s    q = ({:+.6}, {:+.6}, {:+.6}, {:+.6})    |q| = {:.9}",
                self.prop.state().time,
                q[0],
                q[1],
                q[2],
                q[3],
                q.norm(),
            ));
            if let Some((yaw, pitch, roll)) = self.prop.latest_ypr() {
                ui.monospace(format!(
                    "yaw {:+9.3}°   pitch {:+9.3}°   roll {:+9.3}°",
                    yaw, pitch, roll
                ));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let history = self.prop.history();
            let step = (history.len() / 2000).max(1);
            let sampled: Vec<&HistorySample> = history.iter().step_by(step).collect();

            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            let angle_plot = |ui: &mut egui::Ui, title: &str, axis: usize| {
                ui.label(title);
                let quat: PlotPoints = sampled
                    .iter()
                    .map(|s| [s.time, s.quat_deg[axis]])
                    .collect();
                let euler: PlotPoints = sampled
                    .iter()
                    .map(|s| [s.time, s.euler_deg[axis]])
                    .collect();
                Plot::new(title)
                    .width(half_w)
                    .height(half_h)
                    .x_axis_label("Time (s)")
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new("Quaternion", quat));
                        plot_ui.line(Line::new("Euler", euler));
                    });
            };

            ui.horizontal(|ui| {
                ui.vertical(|ui| angle_plot(ui, "Roll (deg)", 0));
                ui.vertical(|ui| angle_plot(ui, "Pitch (deg)", 1));
            });

            ui.horizontal(|ui| {
                ui.vertical(|ui| angle_plot(ui, "Yaw (deg)", 2));

                // Gap between the two trajectories
                ui.vertical(|ui| {
                    ui.label("Divergence (deg)");
                    let points: PlotPoints = sampled
                        .iter()
                        .map(|s| [s.time, s.divergence().norm()])
                        .collect();
                    Plot::new("divergence")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Gap", points));
                        });
                });
            });
        });
    }
}
