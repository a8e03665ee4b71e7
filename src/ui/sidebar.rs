//! Sidebar with the account header, search box and document list

use eframe::egui;

use crate::app::FlashpadApp;
use crate::core::document::DocumentId;
use crate::core::document_list::{account_label, relative_date};

/// Sidebar listing the remote documents
pub struct Sidebar;

impl Sidebar {
    /// Show the sidebar
    pub fn show(ui: &mut egui::Ui, app: &mut FlashpadApp) {
        let logged_in = app.state.credentials().is_authenticated();

        ui.vertical(|ui| {
            ui.add_space(4.0);
            Self::show_account(ui, app);
            ui.separator();

            if ui
                .add_enabled(
                    logged_in,
                    egui::Button::new("+ New document")
                        .min_size(egui::vec2(ui.available_width(), 28.0)),
                )
                .clicked()
            {
                app.new_document();
            }
            ui.add_space(6.0);

            ui.add(
                egui::TextEdit::singleline(&mut app.state.documents.filter)
                    .hint_text("Search...")
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(6.0);

            if let Some(id) = Self::show_documents(ui, app) {
                let effects = app.state.open_document(id);
                app.dispatch(effects);
            }
        });
    }

    fn show_account(ui: &mut egui::Ui, app: &FlashpadApp) {
        let credentials = app.state.credentials();
        if !credentials.is_authenticated() {
            ui.label(egui::RichText::new("Not logged in").weak());
            return;
        }

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.strong(&credentials.user_email);
                ui.label(
                    egui::RichText::new(account_label(&credentials.user_type))
                        .small()
                        .weak(),
                );
            });
        });
    }

    /// Returns the document the user clicked, if any
    fn show_documents(ui: &mut egui::Ui, app: &mut FlashpadApp) -> Option<DocumentId> {
        let list = &app.state.documents;

        if list.items().is_empty() {
            if list.is_loading() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
            } else if list.has_failed() {
                ui.label("Could not load documents");
                if ui.button("Retry").clicked() {
                    let effect = app.state.refresh_documents();
                    app.dispatch(vec![effect]);
                }
            } else if app.state.credentials().is_authenticated() {
                ui.label(egui::RichText::new("No documents yet").weak());
            }
            return None;
        }

        let today = chrono::Local::now().naive_local();
        let mut clicked = None;

        egui::ScrollArea::vertical()
            .id_salt("document_list")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut shown = 0;
                for doc in list.visible() {
                    shown += 1;
                    let active = list.is_active(&doc.id);
                    let response = ui.selectable_label(active, doc.display_title());
                    if let Some(timestamp) = doc.timestamp() {
                        let label = relative_date(timestamp, today);
                        if !label.is_empty() {
                            ui.label(egui::RichText::new(label).small().weak());
                        }
                    }
                    ui.add_space(2.0);
                    if response.clicked() && !active {
                        clicked = Some(doc.id.clone());
                    }
                }
                if shown == 0 {
                    ui.label(egui::RichText::new("No matching document").weak());
                }
            });

        clicked
    }
}
