use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use shared::domain::InventoryItem;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormMode {
    Add,
    Edit { original_name: String },
}

/// Draft state for the modal item form. `None` on the app struct means the
/// controller is idle.
#[derive(Debug, Clone)]
struct ItemForm {
    mode: FormMode,
    name: String,
    quantity: u32,
    cost: f64,
}

impl ItemForm {
    fn add() -> Self {
        Self {
            mode: FormMode::Add,
            name: String::new(),
            quantity: 1,
            cost: 0.0,
        }
    }

    fn edit(item: &InventoryItem) -> Self {
        Self {
            mode: FormMode::Edit {
                original_name: item.name.clone(),
            },
            name: item.name.clone(),
            quantity: item.quantity,
            cost: item.cost,
        }
    }

    fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add Item",
            FormMode::Edit { .. } => "Edit Item",
        }
    }

    fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add",
            FormMode::Edit { .. } => "Update",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Store => "Store",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

/// Case-insensitive substring filter over the cached list; never touches the
/// store.
fn filter_by_search<'a>(items: &'a [InventoryItem], search_term: &str) -> Vec<&'a InventoryItem> {
    let needle = search_term.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .collect()
}

/// Row label with the first letter uppercased, as the list view shows names.
fn display_item_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub struct InventoryApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    inventory: Vec<InventoryItem>,
    search_term: String,
    form: Option<ItemForm>,

    store_ready: bool,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl InventoryApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            inventory: Vec::new(),
            search_term: String::new(),
            form: None,
            store_ready: false,
            status: "Connecting to inventory store...".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::StoreReady => {
                    self.store_ready = true;
                    self.status = "Store ready - loading inventory".to_string();
                    self.status_banner = None;
                }
                UiEvent::InventoryRefreshed(items) => {
                    self.status = format!("{} item(s) in inventory", items.len());
                    self.inventory = items;
                }
                UiEvent::Error(err) => self.report_error(err),
            }
        }
    }

    fn report_error(&mut self, err: UiError) {
        self.status = format!(
            "{} error while {}: {}",
            err_label(err.category()),
            err.context().label(),
            err.message()
        );
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: self.status.clone(),
        });
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Search");
            ui.add(
                egui::TextEdit::singleline(&mut self.search_term)
                    .hint_text("Filter items by name")
                    .desired_width(260.0),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(self.store_ready, egui::Button::new("Add New Item"))
                    .clicked()
                {
                    self.form = Some(ItemForm::add());
                }
                if ui
                    .add_enabled(self.store_ready, egui::Button::new("Refresh"))
                    .clicked()
                {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::Refresh,
                        &mut self.status,
                    );
                }
            });
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(banner.message.clone());
                        if ui.small_button("Dismiss").clicked() {
                            self.status_banner = None;
                        }
                    });
                });
            ui.add_space(4.0);
        }
    }

    fn show_inventory_list(&mut self, ui: &mut egui::Ui) {
        ui.heading("Inventory Items");
        ui.add_space(4.0);

        let mut edit_target: Option<InventoryItem> = None;
        let mut remove_target: Option<String> = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                let visible = filter_by_search(&self.inventory, &self.search_term);
                if visible.is_empty() {
                    if self.inventory.is_empty() {
                        ui.label("Inventory is empty. Add an item to get started.");
                    } else {
                        ui.label("No items match the current search.");
                    }
                }
                for item in visible {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(display_item_name(&item.name))
                                .strong()
                                .size(16.0),
                        );
                        ui.label(format!("Quantity: {}", item.quantity));
                        ui.label(format!("Cost: ${:.2}", item.cost));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Delete").clicked() {
                                remove_target = Some(item.name.clone());
                            }
                            if ui.button("Edit").clicked() {
                                edit_target = Some(item.clone());
                            }
                        });
                    });
                    ui.separator();
                }
            });

        if let Some(item) = edit_target {
            self.form = Some(ItemForm::edit(&item));
        }
        if let Some(name) = remove_target {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::RemoveItem { name },
                &mut self.status,
            );
        }
    }

    fn show_item_form(&mut self, ctx: &egui::Context) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        let mut open = true;
        let mut submitted = false;

        egui::Window::new(form.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Item");
                ui.text_edit_singleline(&mut form.name);
                ui.label("Quantity");
                ui.add(egui::DragValue::new(&mut form.quantity).range(0..=u32::MAX));
                ui.label("Cost");
                ui.add(
                    egui::DragValue::new(&mut form.cost)
                        .range(0.0..=f64::MAX)
                        .speed(0.05)
                        .prefix("$"),
                );
                ui.add_space(8.0);
                if ui.button(form.submit_label()).clicked() {
                    submitted = true;
                }
            });

        if submitted {
            if let Some(form) = self.form.take() {
                self.form = self.submit_form(form);
            }
        } else if !open {
            self.form = None;
        }
    }

    /// Dispatches the form to the store worker, or hands the form back when
    /// validation rejects it so the modal stays open.
    fn submit_form(&mut self, form: ItemForm) -> Option<ItemForm> {
        let name = form.name.trim();
        if name.is_empty() {
            let context = match &form.mode {
                FormMode::Add => UiErrorContext::AddItem,
                FormMode::Edit { .. } => UiErrorContext::UpdateItem,
            };
            self.report_error(UiError::validation(context, "item name must not be empty"));
            return Some(form);
        }

        let cmd = match &form.mode {
            FormMode::Add => BackendCommand::AddItem {
                name: name.to_string(),
                quantity: form.quantity,
                cost: form.cost,
            },
            // Replace is keyed by the recorded edit target; renaming through
            // the form field is ignored.
            FormMode::Edit { original_name } => BackendCommand::UpdateItem {
                name: original_name.clone(),
                quantity: form.quantity,
                cost: form.cost,
            },
        };
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
        None
    }
}

impl eframe::App for InventoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let modal_open = self.form.is_some();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| {
                self.show_toolbar(ui);
                self.show_status_banner(ui);
                ui.separator();
                self.show_inventory_list(ui);
                ui.separator();
                ui.small(self.status.as_str());
            });
        });

        self.show_item_form(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn sample(name: &str) -> InventoryItem {
        InventoryItem::new(name, 1, 1.0)
    }

    fn test_app() -> (InventoryApp, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (_ui_tx, ui_rx) = bounded(8);
        (InventoryApp::new(cmd_tx, ui_rx), cmd_rx)
    }

    #[test]
    fn search_filter_is_case_insensitive_substring() {
        let items = vec![sample("Apples"), sample("Bananas"), sample("apple-juice")];
        let visible: Vec<&str> = filter_by_search(&items, "app")
            .into_iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(visible, vec!["Apples", "apple-juice"]);
    }

    #[test]
    fn empty_search_shows_every_item() {
        let items = vec![sample("Apples"), sample("Bananas")];
        assert_eq!(filter_by_search(&items, "").len(), 2);
    }

    #[test]
    fn capitalizes_first_letter_for_display() {
        assert_eq!(display_item_name("widget"), "Widget");
        assert_eq!(display_item_name("Widget"), "Widget");
        assert_eq!(display_item_name(""), "");
    }

    #[test]
    fn add_form_opens_with_defaults() {
        let form = ItemForm::add();
        assert_eq!(form.mode, FormMode::Add);
        assert_eq!(form.name, "");
        assert_eq!(form.quantity, 1);
        assert_eq!(form.cost, 0.0);
    }

    #[test]
    fn edit_form_prefills_fields_and_records_target() {
        let item = InventoryItem::new("bolt", 7, 0.35);
        let form = ItemForm::edit(&item);
        assert_eq!(
            form.mode,
            FormMode::Edit {
                original_name: "bolt".to_string()
            }
        );
        assert_eq!(form.name, "bolt");
        assert_eq!(form.quantity, 7);
        assert_eq!(form.cost, 0.35);
    }

    #[test]
    fn empty_name_submit_keeps_form_and_dispatches_nothing() {
        let (mut app, cmd_rx) = test_app();

        let returned = app.submit_form(ItemForm::add());
        assert!(returned.is_some(), "form stays open for correction");
        assert!(cmd_rx.try_recv().is_err(), "no command reaches the worker");
        assert!(app.status_banner.is_some(), "validation error is surfaced");
    }

    #[test]
    fn add_submit_dispatches_upsert_command_and_closes_form() {
        let (mut app, cmd_rx) = test_app();

        let mut form = ItemForm::add();
        form.name = "  screw ".to_string();
        form.quantity = 3;
        form.cost = 0.10;

        let returned = app.submit_form(form);
        assert!(returned.is_none(), "successful submit returns to idle");

        match cmd_rx.try_recv().expect("command dispatched") {
            BackendCommand::AddItem {
                name,
                quantity,
                cost,
            } => {
                assert_eq!(name, "screw", "name is trimmed before dispatch");
                assert_eq!(quantity, 3);
                assert_eq!(cost, 0.10);
            }
            _ => panic!("expected AddItem"),
        }
    }

    #[test]
    fn edit_submit_keys_replace_by_recorded_target() {
        let (mut app, cmd_rx) = test_app();

        let item = InventoryItem::new("bolt", 7, 0.35);
        let mut form = ItemForm::edit(&item);
        form.name = "bolt-renamed".to_string();
        form.quantity = 2;
        form.cost = 0.50;

        assert!(app.submit_form(form).is_none());

        match cmd_rx.try_recv().expect("command dispatched") {
            BackendCommand::UpdateItem {
                name,
                quantity,
                cost,
            } => {
                assert_eq!(name, "bolt", "replace is keyed by the edit target");
                assert_eq!(quantity, 2);
                assert_eq!(cost, 0.50);
            }
            _ => panic!("expected UpdateItem"),
        }
    }

    #[test]
    fn refreshed_inventory_replaces_the_cached_list() {
        let (cmd_tx, _cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let mut app = InventoryApp::new(cmd_tx, ui_rx);
        app.inventory = vec![sample("stale")];

        ui_tx
            .try_send(UiEvent::InventoryRefreshed(vec![
                sample("fresh-a"),
                sample("fresh-b"),
            ]))
            .expect("send refresh");
        app.process_ui_events();

        let names: Vec<&str> = app
            .inventory
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(names, vec!["fresh-a", "fresh-b"]);
    }
}
