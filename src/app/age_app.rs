use crate::app::views::{AuthView, DetectorPanel};
use crate::config::Settings;

pub struct AgeLensApp {
    settings: Settings,
    authenticated: bool,
    auth_view: AuthView,
    detector_panel: Option<DetectorPanel>,
}

impl AgeLensApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            authenticated: false,
            auth_view: AuthView::default(),
            detector_panel: None,
        }
    }

    pub fn start_gui(settings: Settings) {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(egui::vec2(960.0, 640.0))
                .with_title("AgeLens"),
            ..Default::default()
        };

        let _result = eframe::run_native(
            "AgeLens",
            options,
            Box::new(move |_cc| Ok(Box::new(AgeLensApp::new(settings)))),
        );
    }
}

impl eframe::App for AgeLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(panel) = &mut self.detector_panel {
            panel.poll_events();
        }

        if !self.authenticated {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.add_space(48.0);
                if self.auth_view.draw(ui) {
                    self.authenticated = true;
                }
            });
            ctx.request_repaint();
            return;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(48.0);
            ui.vertical_centered(|ui| {
                ui.heading("Welcome!");
                ui.add_space(12.0);
                let start = ui.add_enabled(
                    self.detector_panel.is_none(),
                    egui::Button::new("Discover your age"),
                );
                if start.clicked() {
                    self.detector_panel = Some(DetectorPanel::open(&self.settings));
                }
            });
        });

        let mut close_requested = false;
        if let Some(panel) = &mut self.detector_panel {
            egui::Window::new("Age Detector")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    close_requested = panel.draw(ui);
                });
        }
        if close_requested {
            if let Some(panel) = self.detector_panel.take() {
                panel.close();
            }
        }

        ctx.request_repaint();
    }
}
