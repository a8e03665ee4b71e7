//! Main application shell and UI coordination

use std::sync::Arc;
use std::time::Instant;

use eframe::egui;

use crate::core::config::AppConfig;
use crate::core::credentials::LocalStore;
use crate::core::export;
use crate::remote::{Backend, HttpStore};
use crate::state::{AppState, Effect};
use crate::ui::{dialogs::Dialogs, editor::EditorPanel, sidebar::Sidebar, toasts::Toasts};

/// Main application
pub struct FlashpadApp {
    /// Headless application state
    pub state: AppState,
    /// Runs API requests off the GUI thread
    backend: Backend,
    /// Commonmark cache for rendered lines
    pub commonmark_cache: egui_commonmark::CommonMarkCache,
    /// Whether sidebar is visible
    pub sidebar_visible: bool,
}

impl FlashpadApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Using default config: {:#}", e);
            AppConfig::default()
        });
        Self::apply_theme(&cc.egui_ctx, &config);

        let storage_path = LocalStore::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let storage = LocalStore::open(storage_path)?;
        tracing::info!("Using storage: {}", storage.path().display());
        let state = AppState::new(config, storage);

        let credentials = state.credentials();
        let store = HttpStore::new(&credentials.api_url, Some(credentials.api_key.clone()))?;
        let mut backend = Backend::new(Arc::new(store))?;
        let ctx = cc.egui_ctx.clone();
        backend.set_waker(move || ctx.request_repaint());

        let sidebar_visible = state.config.ui.sidebar_visible;
        let mut app = Self {
            state,
            backend,
            commonmark_cache: egui_commonmark::CommonMarkCache::default(),
            sidebar_visible,
        };
        let effects = app.state.startup();
        app.dispatch(effects);
        Ok(app)
    }

    fn apply_theme(ctx: &egui::Context, config: &AppConfig) {
        if config.ui.theme == "light" {
            ctx.set_visuals(egui::Visuals::light());
        } else {
            ctx.set_visuals(egui::Visuals::dark());
        }
    }

    /// Carry out the effects requested by the state
    pub fn dispatch(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit(request) => self.backend.submit(request),
                Effect::Reconnect => self.reconnect(),
            }
        }
    }

    fn reconnect(&mut self) {
        let credentials = self.state.credentials();
        let token = Some(credentials.api_key.clone());
        match HttpStore::new(&credentials.api_url, token) {
            Ok(store) => {
                tracing::info!("Using API endpoint {}", store.api_url());
                self.backend.set_store(Arc::new(store));
            }
            Err(e) => {
                tracing::error!("Failed to create API client: {}", e);
                self.state
                    .notifications
                    .error(e.user_message(), Instant::now());
            }
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
        self.state.config.ui.sidebar_visible = self.sidebar_visible;
        if let Err(e) = self.state.config.save() {
            tracing::warn!("Failed to save config: {:#}", e);
        }
    }

    pub fn new_document(&mut self) {
        let effects = self.state.new_document();
        self.dispatch(effects);
    }

    pub fn save_document(&mut self) {
        let effects = self.state.manual_save();
        self.dispatch(effects);
    }

    /// Start a new document from a markdown or text file
    fn import_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Markdown", &["md", "markdown", "txt"])
            .pick_file()
        else {
            return;
        };

        let now = Instant::now();
        match export::import_file(&path) {
            Ok((title, content)) => {
                let effects = self.state.import_document(title, &content, now);
                self.dispatch(effects);
                self.state.notifications.info("Document imported", now);
            }
            Err(e) => {
                tracing::error!("Import failed: {:#}", e);
                self.state
                    .notifications
                    .error(format!("Import failed: {e}"), now);
            }
        }
    }

    fn export_file(&mut self, html: bool) {
        let Some(session) = self.state.session() else {
            return;
        };
        let stem = if session.title().trim().is_empty() {
            "document".to_string()
        } else {
            session.title().trim().to_string()
        };
        let (name, extension) = if html { ("HTML", "html") } else { ("Markdown", "md") };

        let Some(path) = rfd::FileDialog::new()
            .add_filter(name, &[extension])
            .set_file_name(format!("{stem}.{extension}"))
            .save_file()
        else {
            return;
        };

        let result = if html {
            export::export_html(&path, session.title(), session.editor())
        } else {
            export::export_markdown(&path, session.editor())
        };
        let now = Instant::now();
        match result {
            Ok(()) => self
                .state
                .notifications
                .success(format!("Exported to {}", path.display()), now),
            Err(e) => {
                tracing::error!("Export failed: {:#}", e);
                self.state
                    .notifications
                    .error(format!("Export failed: {e}"), now);
            }
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        let has_session = self.state.session().is_some();
        let has_id = self
            .state
            .session()
            .is_some_and(|s| s.document_id().is_some());
        let logged_in = self.state.credentials().is_authenticated();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.add_enabled(logged_in, egui::Button::new("New Document")).clicked() {
                        self.new_document();
                        ui.close();
                    }
                    if ui.add_enabled(logged_in, egui::Button::new("Import...")).clicked() {
                        self.import_file();
                        ui.close();
                    }
                    ui.add_enabled_ui(has_session, |ui| {
                        ui.menu_button("Export", |ui| {
                            if ui.button("Markdown...").clicked() {
                                self.export_file(false);
                                ui.close();
                            }
                            if ui.button("HTML...").clicked() {
                                self.export_file(true);
                                ui.close();
                            }
                        });
                    });
                    ui.separator();
                    if ui.add_enabled(has_session, egui::Button::new("Save")).clicked() {
                        self.save_document();
                        ui.close();
                    }
                    if ui.add_enabled(has_id, egui::Button::new("Delete...")).clicked() {
                        self.state.ask_delete();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Toggle Sidebar").clicked() {
                        self.toggle_sidebar();
                        ui.close();
                    }
                    if ui.button("Refresh Documents").clicked() {
                        let effect = self.state.refresh_documents();
                        self.dispatch(vec![effect]);
                        ui.close();
                    }
                });

                ui.menu_button("Account", |ui| {
                    if ui.button("Settings...").clicked() {
                        self.state.open_settings();
                        ui.close();
                    }
                    if ui.add_enabled(logged_in, egui::Button::new("Log Out...")).clicked() {
                        self.state.ask_logout();
                        ui.close();
                    }
                });
            });
        });
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (save, sidebar) = ctx.input_mut(|i| {
            (
                i.consume_key(egui::Modifiers::COMMAND, egui::Key::S),
                i.consume_key(egui::Modifiers::COMMAND, egui::Key::B),
            )
        });
        if save {
            self.save_document();
        }
        if sidebar {
            self.toggle_sidebar();
        }
    }
}

impl eframe::App for FlashpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        for event in self.backend.poll() {
            let effects = self.state.handle(event, now);
            self.dispatch(effects);
        }
        let effects = self.state.tick(now);
        self.dispatch(effects);

        self.handle_shortcuts(ctx);

        // Render menu bar
        self.render_menu_bar(ctx);

        // Render sidebar with the document list
        if self.sidebar_visible {
            let width = self.state.config.ui.sidebar_width;
            egui::SidePanel::left("sidebar")
                .resizable(true)
                .default_width(width)
                .min_width(180.0)
                .show(ctx, |ui| {
                    Sidebar::show(ui, self);
                });
        }

        // Render main content area
        egui::CentralPanel::default().show(ctx, |ui| {
            EditorPanel::show(ui, self);
        });

        Dialogs::show(ctx, self);
        Toasts::show(ctx, &self.state.notifications);

        if let Some(wait) = self.state.next_wakeup(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}
