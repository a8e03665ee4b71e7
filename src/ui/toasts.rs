//! Bottom-right notification toasts

use eframe::egui;

use crate::core::notifications::{Notifications, ToastLevel};

pub struct Toasts;

impl Toasts {
    pub fn show(ctx: &egui::Context, notifications: &Notifications) {
        if notifications.toasts().is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                for toast in notifications.toasts() {
                    let accent = match toast.level {
                        ToastLevel::Info => ui.visuals().hyperlink_color,
                        ToastLevel::Success => egui::Color32::from_rgb(80, 170, 110),
                        ToastLevel::Error => ui.visuals().error_fg_color,
                    };
                    egui::Frame::popup(ui.style())
                        .stroke(egui::Stroke::new(1.0, accent))
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.colored_label(accent, &toast.message);
                        });
                    ui.add_space(6.0);
                }
            });
    }
}
