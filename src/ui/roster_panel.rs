//! Roster panel: search, sort controls, multi-select, and the student table.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROW_DOWN, ARROW_UP, PENCIL, TRASH};

use super::app::App;
use super::components::{action_button, avatar, danger_button};
use super::student_form::StudentForm;
use crate::models::{SortDirection, SortKey, Student};
use crate::view::{self, course_names, resolved_course_name};

/// Show the roster panel (search/sort toolbar plus the student table).
pub fn show(app: &mut App, ui: &mut Ui) {
    let visible = view::visible_students(&app.students, &app.courses, app.sort, &app.search_query);

    show_toolbar(app, ui, &visible);
    ui.add_space(10.0);

    ui.label(format!("Showing {} of {} students", visible.len(), app.students.len()));
    ui.add_space(10.0);

    if visible.is_empty() {
        show_empty_state(app, ui);
    } else {
        show_table(app, ui, &visible);
    }
}

fn show_toolbar(app: &mut App, ui: &mut Ui, visible: &[Student]) {
    ui.add_enabled_ui(!app.is_processing, |ui| {
        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.add(
                egui::TextEdit::singleline(&mut app.search_query)
                    .desired_width(220.0)
                    .hint_text("Name, email, or course..."),
            );

            ui.add_space(20.0);

            ui.label("Sort by:");
            egui::ComboBox::from_id_salt("roster_sort_key")
                .width(100.0)
                .selected_text(app.sort.key.label())
                .show_ui(ui, |ui| {
                    for key in [SortKey::Name, SortKey::Course] {
                        if ui.selectable_label(app.sort.key == key, key.label()).clicked() {
                            app.sort.key = key;
                        }
                    }
                });

            let direction_icon = match app.sort.direction {
                SortDirection::Ascending => ARROW_UP,
                SortDirection::Descending => ARROW_DOWN,
            };
            if ui.button(direction_icon).on_hover_text("Flip sort direction").clicked() {
                app.sort.direction = app.sort.direction.flipped();
            }

            ui.add_space(20.0);

            let mut all_selected = app.selection.all_visible_selected(visible);
            if ui
                .checkbox(&mut all_selected, format!("Select all ({})", visible.len()))
                .changed()
            {
                app.selection.toggle_all(visible);
            }

            if !app.selection.is_empty() {
                ui.add_space(10.0);
                if danger_button(ui, TRASH, &format!("Delete Selected ({})", app.selection.len())).clicked() {
                    app.request_bulk_delete();
                }
            }
        });
    });
}

fn show_table(app: &mut App, ui: &mut Ui, visible: &[Student]) {
    let names = course_names(&app.courses);

    ScrollArea::vertical().id_salt("roster_scroll").show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("roster_grid")
            .num_columns(6)
            .striped(true)
            .min_col_width(40.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.label("");
                ui.label("");
                ui.strong("Name");
                ui.strong("Email");
                ui.strong("Course");
                ui.strong("Actions");
                ui.end_row();

                // Data rows
                for student in visible {
                    let mut selected = app.selection.contains(&student.student_id);
                    ui.add_enabled_ui(!app.is_processing, |ui| {
                        if ui.checkbox(&mut selected, "").changed() {
                            app.selection.toggle(&student.student_id);
                        }
                    });

                    avatar(ui, &student.image_url, 32.0);
                    ui.label(&student.name);
                    ui.label(&student.email);
                    ui.label(resolved_course_name(&names, student.course_id));

                    ui.add_enabled_ui(!app.is_processing, |ui| {
                        ui.horizontal(|ui| {
                            if action_button(ui, PENCIL, "Edit").clicked() {
                                app.form = StudentForm::edit(student);
                            }
                            ui.add_space(4.0);
                            if action_button(ui, TRASH, "Delete").clicked() {
                                app.request_delete(student.clone());
                            }
                        });
                    });

                    ui.end_row();
                }
            });
    });
}

fn show_empty_state(app: &App, ui: &mut Ui) {
    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        if app.search_query.trim().is_empty() {
            ui.label("No students yet. Add your first student to get started.");
        } else {
            ui.label("No students match your search.");
        }
    });
}
