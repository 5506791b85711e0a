//! Main application UI.

use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align, Layout, RichText};
use egui_phosphor::regular::{MOON, PLUS, SUN};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::courses::{self, CourseLoad};
use crate::models::{Course, NewStudent, SortConfig, Student};
use crate::storage::Storage;
use crate::store::students::MUTATION_LATENCY;
use crate::store::{Latency, StudentStore, Theme, ThemeStore};
use crate::view::Selection;

use super::components::{error_banner, loading_indicator, primary_button};
use super::student_form::StudentForm;
use super::{roster_panel, student_form};

/// Messages from async tasks to UI.
pub enum UiMessage {
    CoursesFetched(Result<Vec<Course>, String>),
    StudentSaved { student: Student, roster: Vec<Student> },
    StudentRemoved { roster: Vec<Student> },
    StudentsRemoved { removed: usize, roster: Vec<Student> },
}

/// Target for the delete confirmation dialog.
#[derive(Clone)]
pub enum DeleteTarget {
    /// One student, captured when its row delete button is clicked.
    Single(Student),
    /// Snapshot of the selection at the moment bulk delete was requested.
    Bulk(HashSet<String>),
}

/// Main application state.
pub struct App {
    // Runtime and stores
    rt: tokio::runtime::Runtime,
    store: Arc<tokio::sync::Mutex<StudentStore>>,
    theme: ThemeStore,

    // Message channel for async communication
    tx: mpsc::UnboundedSender<UiMessage>,
    rx: mpsc::UnboundedReceiver<UiMessage>,

    // Cached data
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
    pub course_load: CourseLoad,

    // Processing state: true while a mutation's simulated latency is in
    // flight; every mutating control is disabled meanwhile.
    pub is_processing: bool,

    // View state
    pub search_query: String,
    pub sort: SortConfig,
    pub selection: Selection,

    // Dialogs
    pub form: StudentForm,
    pub show_delete_confirm: bool,
    pub delete_target: Option<DeleteTarget>,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        storage: Arc<dyn Storage>,
        rt: tokio::runtime::Runtime,
    ) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // eframe applies the system color scheme before we are constructed,
        // so the current visuals stand in for the platform preference.
        let system_preference = if cc.egui_ctx.style().visuals.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        };
        let theme = ThemeStore::load(storage.clone(), system_preference);
        apply_theme(&cc.egui_ctx, theme.theme());

        let store = StudentStore::load(storage, Latency::Fixed(MUTATION_LATENCY));
        let students = store.students().to_vec();

        let (tx, rx) = mpsc::unbounded_channel();

        let mut app = Self {
            rt,
            store: Arc::new(tokio::sync::Mutex::new(store)),
            theme,
            tx,
            rx,
            students,
            courses: Vec::new(),
            course_load: CourseLoad::Loading,
            is_processing: false,
            search_query: String::new(),
            sort: SortConfig::default(),
            selection: Selection::new(),
            form: StudentForm::default(),
            show_delete_confirm: false,
            delete_target: None,
        };

        app.fetch_courses(config);
        app
    }

    /// Start the one-shot course load.
    fn fetch_courses(&mut self, config: AppConfig) {
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = courses::load_courses(&config).await.map_err(|e| {
                tracing::error!("Course fetch failed: {}", e);
                "Failed to fetch courses. Please try again later.".to_string()
            });
            let _ = tx.send(UiMessage::CoursesFetched(result));
        });
    }

    /// Create a new student.
    pub fn add_student(&mut self, input: NewStudent) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        self.is_processing = true;

        self.rt.spawn(async move {
            let mut store = store.lock().await;
            let student = store.add(input).await;
            let _ = tx.send(UiMessage::StudentSaved {
                student,
                roster: store.students().to_vec(),
            });
        });
    }

    /// Update an existing student.
    pub fn update_student(&mut self, updated: Student) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        self.is_processing = true;

        self.rt.spawn(async move {
            let mut store = store.lock().await;
            let student = store.update(updated).await;
            let _ = tx.send(UiMessage::StudentSaved {
                student,
                roster: store.students().to_vec(),
            });
        });
    }

    /// Delete a single student.
    fn remove_student(&mut self, student_id: String) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        self.is_processing = true;

        self.rt.spawn(async move {
            let mut store = store.lock().await;
            store.remove(&student_id).await;
            let _ = tx.send(UiMessage::StudentRemoved {
                roster: store.students().to_vec(),
            });
        });
    }

    /// Delete every student in the id set.
    fn remove_students(&mut self, ids: HashSet<String>) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        self.is_processing = true;

        self.rt.spawn(async move {
            let mut store = store.lock().await;
            let removed = store.remove_many(&ids).await;
            let _ = tx.send(UiMessage::StudentsRemoved {
                removed,
                roster: store.students().to_vec(),
            });
        });
    }

    /// Capture the current selection and open the bulk confirmation dialog.
    pub fn request_bulk_delete(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.delete_target = Some(DeleteTarget::Bulk(self.selection.ids().clone()));
        self.show_delete_confirm = true;
    }

    /// Open the single-student confirmation dialog.
    pub fn request_delete(&mut self, student: Student) {
        self.delete_target = Some(DeleteTarget::Single(student));
        self.show_delete_confirm = true;
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::CoursesFetched(result) => {
                    (self.course_load, self.courses) = CourseLoad::complete(result);
                }
                UiMessage::StudentSaved { student, roster } => {
                    tracing::info!("Saved student '{}'", student.name);
                    self.students = roster;
                    self.is_processing = false;
                    self.form.reset();
                }
                UiMessage::StudentRemoved { roster } => {
                    self.students = roster;
                    self.is_processing = false;
                    self.show_delete_confirm = false;
                    self.delete_target = None;
                }
                UiMessage::StudentsRemoved { removed, roster } => {
                    tracing::info!("Deleted {} students", removed);
                    self.students = roster;
                    self.is_processing = false;
                    self.selection.clear();
                    self.show_delete_confirm = false;
                    self.delete_target = None;
                }
            }
        }
    }

    /// Render the header bar: title, add button, theme toggle.
    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Student Roster").size(20.0));

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let icon = match self.theme.theme() {
                        Theme::Light => MOON,
                        Theme::Dark => SUN,
                    };
                    if ui.button(icon).on_hover_text("Toggle theme").clicked() {
                        let theme = self.theme.toggle();
                        apply_theme(ctx, theme);
                    }

                    ui.add_space(8.0);

                    let can_add = matches!(self.course_load, CourseLoad::Ready) && !self.is_processing;
                    ui.add_enabled_ui(can_add, |ui| {
                        if primary_button(ui, PLUS, "Add Student").clicked() {
                            self.form = StudentForm::create();
                        }
                    });
                });
            });
            ui.add_space(6.0);
        });
    }

    /// Render the delete confirmation dialog.
    fn show_delete_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_delete_confirm {
            return;
        }
        let Some(target) = self.delete_target.clone() else {
            return;
        };

        let message = match &target {
            DeleteTarget::Single(student) => format!(
                "Are you sure you want to delete the student \"{}\"? This action cannot be undone.",
                student.name
            ),
            DeleteTarget::Bulk(ids) => format!(
                "Are you sure you want to delete the {} selected students? This action cannot be undone.",
                ids.len()
            ),
        };

        egui::Window::new("Confirm Deletion")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(!self.is_processing, |ui| {
                        if ui.button("Cancel").clicked() {
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                    });

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.is_processing {
                            ui.spinner();
                            ui.label("Deleting...");
                        } else if ui.button("Delete").clicked() {
                            match target {
                                DeleteTarget::Single(student) => self.remove_student(student.student_id),
                                DeleteTarget::Bulk(ids) => self.remove_students(ids),
                            }
                        }
                    });
                });
            });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_async_results();

        // Request repaint during async operations
        if self.is_processing || self.course_load.is_loading() {
            ctx.request_repaint();
        }

        self.show_header(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match &self.course_load {
            CourseLoad::Loading => loading_indicator(ui, "Loading courses..."),
            CourseLoad::Error(message) => error_banner(ui, message),
            CourseLoad::Ready => roster_panel::show(self, ui),
        });

        if self.form.is_open {
            student_form::show(self, ctx);
        }

        self.show_delete_dialog(ctx);
    }
}

/// Apply the theme to the egui context (the dark-mode marker of the UI).
fn apply_theme(ctx: &egui::Context, theme: Theme) {
    match theme {
        Theme::Light => ctx.set_visuals(egui::Visuals::light()),
        Theme::Dark => ctx.set_visuals(egui::Visuals::dark()),
    }
}
