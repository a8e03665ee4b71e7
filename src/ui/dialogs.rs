//! Modal windows: login, settings and confirmations

use std::time::Instant;

use eframe::egui;

use crate::app::FlashpadApp;

pub struct Dialogs;

impl Dialogs {
    /// Show whichever modal the state asks for
    pub fn show(ctx: &egui::Context, app: &mut FlashpadApp) {
        if app.state.settings.is_some() {
            Self::show_settings(ctx, app);
        } else if app.state.login_visible {
            Self::show_login(ctx, app);
        }
        if app.state.confirm.is_some() {
            Self::show_confirm(ctx, app);
        }
    }

    fn show_login(ctx: &egui::Context, app: &mut FlashpadApp) {
        let mut submit = false;
        let mut settings = false;
        let api_url = app.state.credentials().api_url.clone();
        let form = &mut app.state.login;

        egui::Modal::new(egui::Id::new("login_modal")).show(ctx, |ui| {
            ui.set_width(340.0);
            ui.heading("Log in to Flashpad");
            ui.label(egui::RichText::new(api_url).small().weak());
            ui.add_space(10.0);

            ui.label("Email");
            ui.add(
                egui::TextEdit::singleline(&mut form.email)
                    .hint_text("you@example.com")
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(4.0);
            ui.label("Password");
            let password = ui.add(
                egui::TextEdit::singleline(&mut form.password)
                    .password(true)
                    .desired_width(f32::INFINITY),
            );
            if password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }

            if let Some(error) = &form.error {
                ui.add_space(6.0);
                ui.colored_label(ui.visuals().error_fg_color, error);
            }
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                let label = if form.pending { "Logging in..." } else { "Log in" };
                if ui
                    .add_enabled(!form.pending, egui::Button::new(label))
                    .clicked()
                {
                    submit = true;
                }
                if form.pending {
                    ui.spinner();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Settings").clicked() {
                        settings = true;
                    }
                });
            });
        });

        if submit && !app.state.login.pending {
            let effects = app.state.submit_login();
            app.dispatch(effects);
        }
        if settings {
            app.state.open_settings();
        }
    }

    fn show_settings(ctx: &egui::Context, app: &mut FlashpadApp) {
        let mut save = false;
        let mut cancel = false;
        let email = app.state.credentials().user_email.clone();

        let Some(api_url) = app.state.settings.as_mut() else {
            return;
        };
        let response = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.heading("Settings");
            ui.add_space(10.0);

            ui.label("API URL");
            ui.add(egui::TextEdit::singleline(api_url).desired_width(f32::INFINITY));
            if !email.is_empty() {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(format!("Logged in as {email}")).weak());
            }
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    save = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

        if save {
            let effects = app.state.save_settings(Instant::now());
            app.dispatch(effects);
        } else if cancel || response.should_close() {
            app.state.settings = None;
        }
    }

    fn show_confirm(ctx: &egui::Context, app: &mut FlashpadApp) {
        let Some(action) = app.state.confirm else {
            return;
        };
        let mut answer = None;

        let response = egui::Modal::new(egui::Id::new("confirm_modal")).show(ctx, |ui| {
            ui.set_width(320.0);
            ui.heading(action.title());
            ui.add_space(8.0);
            ui.label(action.message());
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    answer = Some(false);
                }
                if ui.button("Confirm").clicked() {
                    answer = Some(true);
                }
            });
        });

        if answer.is_none() && response.should_close() {
            answer = Some(false);
        }
        if let Some(accepted) = answer {
            let effects = app.state.resolve_confirm(accepted, Instant::now());
            app.dispatch(effects);
        }
    }
}
