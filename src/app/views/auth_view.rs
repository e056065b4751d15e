#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Login,
    SignUp,
}

/// Placeholder login/sign-up form. No real credential handling: submit
/// always succeeds.
pub struct AuthView {
    mode: AuthMode,
    full_name: String,
    email: String,
    password: String,
}

impl Default for AuthView {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            full_name: String::new(),
            email: String::new(),
            password: String::new(),
        }
    }
}

impl AuthView {
    /// Returns true when the form was submitted.
    pub fn draw(&mut self, ui: &mut egui::Ui) -> bool {
        let mut submitted = false;

        ui.vertical_centered(|ui| {
            match self.mode {
                AuthMode::Login => {
                    ui.heading("Welcome back");
                    ui.label("Enter your credentials to continue");
                }
                AuthMode::SignUp => {
                    ui.heading("Create account");
                    ui.label("Sign up to get started");
                }
            }
            ui.add_space(12.0);

            if self.mode == AuthMode::SignUp {
                ui.add(egui::TextEdit::singleline(&mut self.full_name).hint_text("Full name"));
            }
            ui.add(egui::TextEdit::singleline(&mut self.email).hint_text("Email address"));
            ui.add(
                egui::TextEdit::singleline(&mut self.password)
                    .hint_text("Password")
                    .password(true),
            );
            ui.add_space(12.0);

            let submit_label = match self.mode {
                AuthMode::Login => "Log in",
                AuthMode::SignUp => "Sign up",
            };
            if ui.button(submit_label).clicked() {
                submitted = true;
            }

            ui.add_space(8.0);
            let toggle_label = match self.mode {
                AuthMode::Login => "Don't have an account? Sign up",
                AuthMode::SignUp => "Already have an account? Log in",
            };
            if ui.link(toggle_label).clicked() {
                self.mode = match self.mode {
                    AuthMode::Login => AuthMode::SignUp,
                    AuthMode::SignUp => AuthMode::Login,
                };
            }
        });

        submitted
    }
}
