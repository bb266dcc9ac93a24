//! Task list screen and the sheets it presents.

use egui::{Color32, Context, CornerRadius, Frame, Margin, RichText, Sense, Stroke, Ui};
use taskup_core::{CloseReason, ConfigResult, SheetId, SheetStack};
use taskup_widgets::{section_label, separator, theme, PillButton, SheetView};

use crate::config::AppConfig;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            TaskStatus::Todo => Color32::from_rgb(148, 163, 184),
            TaskStatus::InProgress => Color32::from_rgb(245, 158, 11),
            TaskStatus::Done => Color32::from_rgb(34, 197, 94),
        }
    }
}

/// A row on the task list.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub title: String,
    pub project: String,
    pub due: String,
    pub status: TaskStatus,
}

impl Task {
    fn new(title: &str, project: &str, due: &str, status: TaskStatus) -> Self {
        Self {
            title: title.to_string(),
            project: project.to_string(),
            due: due.to_string(),
            status,
        }
    }
}

/// Sheets registered by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetIds {
    pub details: SheetId,
    pub filters: SheetId,
}

/// The task list with its details and filter sheets.
pub struct TaskScreen {
    tasks: Vec<Task>,
    selected: Option<usize>,
    filter: Option<TaskStatus>,
    ids: SheetIds,
}

impl TaskScreen {
    /// Register the screen's sheets with `sheets`.
    pub fn new(config: &AppConfig, sheets: &mut SheetStack) -> ConfigResult<Self> {
        let ids = SheetIds {
            details: sheets.insert(config.details_sheet.clone())?,
            filters: sheets.insert(config.filter_sheet.clone())?,
        };
        Ok(Self {
            tasks: sample_tasks(),
            selected: None,
            filter: None,
            ids,
        })
    }

    pub fn ids(&self) -> SheetIds {
        self.ids
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Indices of tasks passing the status filter.
    pub fn visible_tasks(&self) -> Vec<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| self.filter.is_none_or(|status| task.status == status))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn set_filter(&mut self, filter: Option<TaskStatus>) {
        self.filter = filter;
    }

    /// Select a task and present its details.
    pub fn open_details(&mut self, index: usize, sheets: &mut SheetStack) {
        if index >= self.tasks.len() {
            return;
        }
        self.selected = Some(index);
        sheets.open(self.ids.details);
    }

    pub fn mark_done(&mut self, index: usize) {
        if let Some(task) = self.tasks.get_mut(index) {
            log::info!("Marked '{}' as done", task.title);
            task.status = TaskStatus::Done;
        }
    }

    /// Forget the selection once the details sheet is gone.
    pub fn sheet_closed(&mut self, id: SheetId) {
        if id == self.ids.details {
            self.selected = None;
        }
    }

    /// Draw the list and every mounted sheet.
    pub fn show(&mut self, ctx: &Context, sheets: &mut SheetStack) {
        egui::CentralPanel::default()
            .frame(Frame::new().fill(Color32::from_rgb(248, 250, 252)).inner_margin(Margin::same(16)))
            .show(ctx, |ui| self.show_list(ui, sheets));

        let mounted: Vec<SheetId> = sheets.mounted().map(|(id, _)| id).collect();
        for id in mounted {
            let Some(sheet) = sheets.get_mut(id) else {
                continue;
            };
            if id == self.ids.details {
                let mut mark_done = false;
                let task = self.selected.and_then(|i| self.tasks.get(i));
                SheetView::new(id, sheet).show(ctx, |ui| {
                    mark_done = details_body(ui, task);
                });
                if mark_done {
                    if let Some(index) = self.selected {
                        self.mark_done(index);
                    }
                    sheet_close(sheets, id);
                }
            } else if id == self.ids.filters {
                let mut chosen = None;
                let current = self.filter;
                SheetView::new(id, sheet).show(ctx, |ui| {
                    chosen = filter_body(ui, current);
                });
                if let Some(filter) = chosen {
                    self.set_filter(filter);
                    sheet_close(sheets, id);
                }
            }
        }
    }

    fn show_list(&mut self, ui: &mut Ui, sheets: &mut SheetStack) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("My tasks").size(22.0).strong().color(theme::TEXT));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if PillButton::new("Filter").show(ui) {
                    sheets.open(self.ids.filters);
                }
            });
        });
        ui.add_space(8.0);
        if let Some(status) = self.filter {
            section_label(ui, &format!("Showing: {}", status.label()));
            ui.add_space(4.0);
        }

        let mut clicked = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for index in self.visible_tasks() {
                if task_row(ui, &self.tasks[index]) {
                    clicked = Some(index);
                }
                ui.add_space(8.0);
            }
        });
        if let Some(index) = clicked {
            self.open_details(index, sheets);
        }
    }
}

fn sheet_close(sheets: &mut SheetStack, id: SheetId) {
    sheets.close(id, CloseReason::Programmatic);
}

/// A card for one task. Returns true if clicked.
fn task_row(ui: &mut Ui, task: &Task) -> bool {
    let response = Frame::new()
        .fill(Color32::WHITE)
        .corner_radius(CornerRadius::same(10))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                status_dot(ui, task.status);
                ui.vertical(|ui| {
                    ui.label(RichText::new(&task.title).size(15.0).color(theme::TEXT));
                    ui.label(
                        RichText::new(format!("{} · due {}", task.project, task.due))
                            .size(12.0)
                            .color(theme::TEXT_MUTED),
                    );
                });
            });
        })
        .response
        .interact(Sense::click());
    let clicked = response.clicked();
    response.on_hover_cursor(egui::CursorIcon::PointingHand);
    clicked
}

fn status_dot(ui: &mut Ui, status: TaskStatus) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), Sense::hover());
    ui.painter().circle_filled(rect.center(), 5.0, status.color());
}

/// Body of the details sheet. Returns true when "Mark as done" was pressed.
fn details_body(ui: &mut Ui, task: Option<&Task>) -> bool {
    let Some(task) = task else {
        ui.label(RichText::new("No task selected").color(theme::TEXT_MUTED));
        return false;
    };

    ui.label(RichText::new(&task.title).size(18.0).strong().color(theme::TEXT));
    ui.add_space(8.0);
    separator(ui);
    section_label(ui, "Project");
    ui.label(RichText::new(&task.project).color(theme::TEXT));
    ui.add_space(6.0);
    section_label(ui, "Due");
    ui.label(RichText::new(&task.due).color(theme::TEXT));
    ui.add_space(6.0);
    section_label(ui, "Status");
    ui.horizontal(|ui| {
        status_dot(ui, task.status);
        ui.label(RichText::new(task.status.label()).color(theme::TEXT));
    });
    ui.add_space(16.0);

    task.status != TaskStatus::Done && PillButton::new("Mark as done").primary().full_width().show(ui)
}

/// Body of the filter sheet. Returns the newly chosen filter, if any.
fn filter_body(ui: &mut Ui, current: Option<TaskStatus>) -> Option<Option<TaskStatus>> {
    let mut chosen = None;
    let options = std::iter::once(None).chain(TaskStatus::ALL.into_iter().map(Some));
    for option in options {
        let label = option.map(TaskStatus::label).unwrap_or("All tasks");
        let button = if option == current {
            PillButton::new(label).primary().full_width()
        } else {
            PillButton::new(label).full_width()
        };
        if button.show(ui) {
            chosen = Some(option);
        }
        ui.add_space(6.0);
    }
    chosen
}

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("Draft Q3 roadmap", "Planning", "Jul 02", TaskStatus::InProgress),
        Task::new("Review risk register", "Platform", "Jul 04", TaskStatus::Todo),
        Task::new("Update scope document", "Mobile app", "Jul 05", TaskStatus::Todo),
        Task::new("Upload design attachments", "Mobile app", "Jul 08", TaskStatus::Done),
        Task::new("Resource plan for August", "Planning", "Jul 10", TaskStatus::Todo),
        Task::new("Team retro notes", "Platform", "Jul 11", TaskStatus::Done),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskup_core::SheetPhase;

    fn screen() -> (TaskScreen, SheetStack) {
        let mut sheets = SheetStack::new(800.0);
        let screen = TaskScreen::new(&AppConfig::default(), &mut sheets).expect("valid config");
        (screen, sheets)
    }

    #[test]
    fn test_registers_two_sheets() {
        let (screen, sheets) = screen();
        assert_eq!(sheets.len(), 2);
        assert_ne!(screen.ids().details, screen.ids().filters);
    }

    #[test]
    fn test_filter_limits_visible_tasks() {
        let (mut screen, _) = screen();
        assert_eq!(screen.visible_tasks().len(), screen.tasks().len());
        screen.set_filter(Some(TaskStatus::Done));
        let visible = screen.visible_tasks();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|&i| screen.tasks()[i].status == TaskStatus::Done));
    }

    #[test]
    fn test_open_details_selects_and_presents() {
        let (mut screen, mut sheets) = screen();
        screen.open_details(1, &mut sheets);
        assert_eq!(screen.selected(), Some(1));
        let details = sheets.get(screen.ids().details).expect("sheet");
        assert_eq!(details.phase(), SheetPhase::Opening);

        screen.sheet_closed(screen.ids().details);
        assert_eq!(screen.selected(), None);
    }

    #[test]
    fn test_open_details_ignores_bad_index() {
        let (mut screen, mut sheets) = screen();
        screen.open_details(99, &mut sheets);
        assert_eq!(screen.selected(), None);
        assert!(!sheets.is_any_mounted());
    }

    #[test]
    fn test_mark_done() {
        let (mut screen, _) = screen();
        screen.mark_done(1);
        assert_eq!(screen.tasks()[1].status, TaskStatus::Done);
    }
}
