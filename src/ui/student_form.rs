//! Student add/edit form dialog with field-level validation.

use eframe::egui::{self, Align, Layout};

use super::app::App;
use super::components::field_error;
use crate::models::{DEFAULT_IMAGE_URL, NewStudent, Student, is_valid_email};

/// Form state for student CRUD.
#[derive(Default, Clone)]
pub struct StudentForm {
    /// Id of the student being edited; `None` when creating.
    pub editing_id: Option<String>,
    pub name: String,
    pub email: String,
    /// 0 means "not selected".
    pub course_id: i32,
    pub image_url: String,
    pub errors: FormErrors,
    pub is_open: bool,
}

/// Field-level validation messages.
#[derive(Default, Clone)]
pub struct FormErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
}

impl FormErrors {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.course.is_none()
    }
}

impl StudentForm {
    /// Reset the form to default (closed) state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Open a blank form for creating a student.
    pub fn create() -> Self {
        Self {
            is_open: true,
            ..Default::default()
        }
    }

    /// Open a form pre-filled for editing an existing student.
    pub fn edit(student: &Student) -> Self {
        Self {
            editing_id: Some(student.student_id.clone()),
            name: student.name.clone(),
            email: student.email.clone(),
            course_id: student.course_id,
            image_url: student.image_url.clone(),
            errors: FormErrors::default(),
            is_open: true,
        }
    }

    /// Validate required fields and the email format. Returns the messages;
    /// an invalid form never reaches the store.
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if self.name.trim().is_empty() {
            errors.name = Some("Name is required.".to_string());
        }
        if self.email.trim().is_empty() {
            errors.email = Some("Email is required.".to_string());
        } else if !is_valid_email(self.email.trim()) {
            errors.email = Some("Email is not valid.".to_string());
        }
        if self.course_id == 0 {
            errors.course = Some("Please select a course.".to_string());
        }

        errors
    }

    /// Build the submission payload, filling in the placeholder image.
    fn payload(&self) -> NewStudent {
        NewStudent {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            course_id: self.course_id,
            image_url: if self.image_url.trim().is_empty() {
                DEFAULT_IMAGE_URL.to_string()
            } else {
                self.image_url.trim().to_string()
            },
        }
    }
}

/// Show the form dialog.
pub fn show(app: &mut App, ctx: &egui::Context) {
    let title = if app.form.editing_id.is_some() {
        "Edit Student"
    } else {
        "Add New Student"
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("student_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.vertical(|ui| {
                        ui.add(egui::TextEdit::singleline(&mut app.form.name).desired_width(240.0));
                        if let Some(message) = app.form.errors.name.clone() {
                            field_error(ui, &message);
                        }
                    });
                    ui.end_row();

                    ui.label("Email:");
                    ui.vertical(|ui| {
                        ui.add(egui::TextEdit::singleline(&mut app.form.email).desired_width(240.0));
                        if let Some(message) = app.form.errors.email.clone() {
                            field_error(ui, &message);
                        }
                    });
                    ui.end_row();

                    ui.label("Course:");
                    ui.vertical(|ui| {
                        let selected = app
                            .courses
                            .iter()
                            .find(|c| c.id == app.form.course_id)
                            .map(|c| c.name.clone())
                            .unwrap_or_else(|| "Select a course...".to_string());

                        egui::ComboBox::from_id_salt("student_form_course")
                            .width(240.0)
                            .selected_text(selected)
                            .show_ui(ui, |ui| {
                                for course in &app.courses {
                                    if ui
                                        .selectable_label(app.form.course_id == course.id, &course.name)
                                        .clicked()
                                    {
                                        app.form.course_id = course.id;
                                    }
                                }
                            });
                        if let Some(message) = app.form.errors.course.clone() {
                            field_error(ui, &message);
                        }
                    });
                    ui.end_row();

                    ui.label("Image URL:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.form.image_url)
                            .desired_width(240.0)
                            .hint_text("Optional"),
                    );
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.add_enabled_ui(!app.is_processing, |ui| {
                    if ui.button("Cancel").clicked() {
                        app.form.reset();
                    }
                });

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if app.is_processing {
                        ui.spinner();
                        ui.label("Saving...");
                    } else if ui.button("Save Student").clicked() {
                        save_student(app);
                    }
                });
            });
        });
}

fn save_student(app: &mut App) {
    let errors = app.form.validate();
    if !errors.is_empty() {
        app.form.errors = errors;
        return;
    }

    let payload = app.form.payload();
    match app.form.editing_id.clone() {
        Some(student_id) => {
            app.update_student(Student {
                student_id,
                name: payload.name,
                email: payload.email,
                course_id: payload.course_id,
                image_url: payload.image_url,
            });
        }
        None => app.add_student(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> StudentForm {
        StudentForm {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            course_id: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(filled_form().validate().is_empty());
    }

    #[test]
    fn test_missing_required_fields() {
        let errors = StudentForm::default().validate();
        assert!(errors.name.is_some());
        assert!(errors.email.is_some());
        assert!(errors.course.is_some());
    }

    #[test]
    fn test_bad_email_format_is_rejected() {
        let mut form = filled_form();
        form.email = "not-an-email".to_string();
        assert!(form.validate().email.is_some());
    }

    #[test]
    fn test_unselected_course_is_rejected() {
        let mut form = filled_form();
        form.course_id = 0;
        assert!(form.validate().course.is_some());
    }

    #[test]
    fn test_payload_falls_back_to_placeholder_image() {
        let form = filled_form();
        assert_eq!(form.payload().image_url, DEFAULT_IMAGE_URL);

        let mut form = filled_form();
        form.image_url = " https://example.com/me.png ".to_string();
        assert_eq!(form.payload().image_url, "https://example.com/me.png");
    }

    #[test]
    fn test_edit_prefills_fields() {
        let student = crate::models::seed_students().remove(0);
        let form = StudentForm::edit(&student);

        assert_eq!(form.editing_id.as_deref(), Some("1"));
        assert_eq!(form.name, student.name);
        assert_eq!(form.course_id, student.course_id);
        assert!(form.is_open);
    }
}
