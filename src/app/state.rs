use super::mode::Mode;
use crate::ui::theme::Theme;
use chrono::NaiveDate;
use std::time::Instant;
use taskdeck::auth::Session;
use taskdeck::board::{self, ColumnKey, Filter, GroupBy, MoveRequest, StatusCounts};
use taskdeck::store::TaskStore;
use taskdeck::task::{Priority, Status, Task, TaskDraft};
use tracing::debug;

/// Reusable text editing buffer with cursor.
///
/// `cursor` is a char index (not a byte index), always in `0..=char_count`.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    pub input: String,
    pub cursor: usize,
}

impl TextBuffer {
    pub fn new(input: String) -> Self {
        let cursor = input.chars().count();
        Self { input, cursor }
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert(&mut self, c: char) {
        let byte_idx = self.byte_offset(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let byte_idx = self.byte_offset(self.cursor - 1);
            self.input.remove(byte_idx);
            self.cursor -= 1;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    /// Text before and after the cursor, for rendering a caret in place.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.input.split_at(self.byte_offset(self.cursor))
    }
}

/// Which form row owns keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Name,
    Status,
    Priority,
    Due,
    Description,
    Image,
}

impl FormFocus {
    pub fn next(self) -> FormFocus {
        match self {
            FormFocus::Name => FormFocus::Status,
            FormFocus::Status => FormFocus::Priority,
            FormFocus::Priority => FormFocus::Due,
            FormFocus::Due => FormFocus::Description,
            FormFocus::Description => FormFocus::Image,
            FormFocus::Image => FormFocus::Name,
        }
    }

    pub fn prev(self) -> FormFocus {
        match self {
            FormFocus::Name => FormFocus::Image,
            FormFocus::Status => FormFocus::Name,
            FormFocus::Priority => FormFocus::Status,
            FormFocus::Due => FormFocus::Priority,
            FormFocus::Description => FormFocus::Due,
            FormFocus::Image => FormFocus::Description,
        }
    }
}

/// Add/edit form state. `editing` carries the task id when this is an
/// edit; the draft's validation errors are shown inline.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub editing: Option<u64>,
    pub name: TextBuffer,
    pub status: Status,
    pub priority: Priority,
    pub due: TextBuffer,
    pub description: TextBuffer,
    pub image: TextBuffer,
    pub focus: FormFocus,
    pub error: Option<String>,
}

impl TaskForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            editing: None,
            name: TextBuffer::default(),
            status: Status::Todo,
            priority: Priority::Low,
            due: TextBuffer::new(today.format("%Y-%m-%d").to_string()),
            description: TextBuffer::default(),
            image: TextBuffer::default(),
            focus: FormFocus::Name,
            error: None,
        }
    }

    pub fn for_task(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            name: TextBuffer::new(task.name.clone()),
            status: task.status,
            priority: task.priority,
            due: TextBuffer::new(task.due_date.format("%Y-%m-%d").to_string()),
            description: TextBuffer::new(task.description.clone().unwrap_or_default()),
            image: TextBuffer::new(task.image.clone().unwrap_or_default()),
            focus: FormFocus::Name,
            error: None,
        }
    }

    /// Build and validate the submission draft.
    pub fn draft(&self) -> Result<TaskDraft, String> {
        let due_date = NaiveDate::parse_from_str(self.due.input.trim(), "%Y-%m-%d")
            .map_err(|_| "due date must be YYYY-MM-DD".to_string())?;

        let description = match self.description.input.trim() {
            "" => None,
            text => Some(text.to_string()),
        };
        let image = match self.image.input.trim() {
            "" => None,
            url => Some(url.to_string()),
        };

        let draft = TaskDraft {
            name: self.name.input.trim().to_string(),
            status: self.status,
            priority: self.priority,
            due_date,
            description,
            image,
        };
        draft.validate().map_err(|e| e.to_string())?;
        Ok(draft)
    }
}

fn cycle_status_option(current: Option<Status>) -> Option<Status> {
    match current {
        None => Some(Status::Todo),
        Some(Status::Todo) => Some(Status::InProgress),
        Some(Status::InProgress) => Some(Status::Done),
        Some(Status::Done) => None,
    }
}

fn cycle_priority_option(current: Option<Priority>) -> Option<Priority> {
    match current {
        None => Some(Priority::Low),
        Some(Priority::Low) => Some(Priority::Medium),
        Some(Priority::Medium) => Some(Priority::High),
        Some(Priority::High) => None,
    }
}

/// All mutable UI state. The store owns the collection and its history;
/// everything else here is display parameters and input-in-progress.
pub struct AppState {
    pub store: TaskStore,
    pub session: Session,
    pub theme: Theme,
    pub mode: Mode,
    pub group_by: GroupBy,
    pub filter: Filter,
    /// 1-based column page, shared by all three columns.
    pub page: usize,
    pub page_size: usize,
    pub selected_column: usize,
    pub selected_row: usize,
    pub search_input: TextBuffer,
    pub form: Option<TaskForm>,
    pub pending_delete: Option<u64>,
    pub status_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub today: NaiveDate,
}

impl AppState {
    pub fn new(
        store: TaskStore,
        session: Session,
        theme: Theme,
        page_size: usize,
        today: NaiveDate,
    ) -> Self {
        Self {
            store,
            session,
            theme,
            mode: Mode::Navigate,
            group_by: GroupBy::State,
            filter: Filter::default(),
            page: 1,
            page_size: page_size.max(1),
            selected_column: 0,
            selected_row: 0,
            search_input: TextBuffer::default(),
            form: None,
            pending_delete: None,
            status_message: None,
            should_quit: false,
            today,
        }
    }

    pub fn columns(&self) -> [ColumnKey; 3] {
        board::columns(self.group_by)
    }

    /// Tasks visible on the current page of one column.
    pub fn column_page(&self, index: usize) -> Vec<Task> {
        let filtered = board::filter_tasks(self.store.tasks(), &self.filter);
        let key = self.columns()[index];
        let in_column = board::column_tasks(&filtered, key, self.today);
        board::paginate(&in_column, self.page, self.page_size)
            .iter()
            .map(|task| (**task).clone())
            .collect()
    }

    /// Total tasks in one column across all pages (for the header count).
    pub fn column_total(&self, index: usize) -> usize {
        let filtered = board::filter_tasks(self.store.tasks(), &self.filter);
        let key = self.columns()[index];
        board::column_tasks(&filtered, key, self.today).len()
    }

    pub fn counts(&self) -> StatusCounts {
        board::status_counts(self.store.tasks())
    }

    pub fn selected_task(&self) -> Option<Task> {
        self.column_page(self.selected_column)
            .into_iter()
            .nth(self.selected_row)
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    fn clamp_selection(&mut self) {
        let len = self.column_page(self.selected_column).len();
        if len == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= len {
            self.selected_row = len - 1;
        }
    }

    pub fn move_column(&mut self, delta: isize) {
        let count = 3_isize;
        self.selected_column =
            ((self.selected_column as isize + delta).rem_euclid(count)) as usize;
        self.clamp_selection();
    }

    pub fn move_row(&mut self, delta: isize) {
        let len = self.column_page(self.selected_column).len();
        if len == 0 {
            self.selected_row = 0;
            return;
        }
        let next = self.selected_row as isize + delta;
        self.selected_row = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn change_page(&mut self, delta: isize) {
        let next = self.page as isize + delta;
        self.page = next.max(1) as usize;
        self.clamp_selection();
    }

    pub fn cycle_group_by(&mut self) {
        self.group_by = self.group_by.next();
        self.page = 1;
        self.selected_column = 0;
        self.selected_row = 0;
        debug!(group_by = %self.group_by, "grouping changed");
    }

    // ── filters ──────────────────────────────────────────────────────

    pub fn cycle_status_filter(&mut self) {
        self.filter.status = cycle_status_option(self.filter.status);
        self.page = 1;
        self.clamp_selection();
    }

    pub fn cycle_priority_filter(&mut self) {
        self.filter.priority = cycle_priority_option(self.filter.priority);
        self.page = 1;
        self.clamp_selection();
    }

    pub fn clear_filters(&mut self) {
        if self.filter.is_active() {
            self.filter = Filter::default();
            self.page = 1;
            self.clamp_selection();
            self.notify("Filters cleared");
        }
    }

    pub fn begin_search(&mut self) {
        self.search_input = TextBuffer::new(self.filter.search.clone().unwrap_or_default());
        self.mode = Mode::Search;
    }

    pub fn commit_search(&mut self) {
        let term = self.search_input.input.trim().to_string();
        self.filter.search = if term.is_empty() { None } else { Some(term) };
        self.page = 1;
        self.mode = Mode::Navigate;
        self.clamp_selection();
    }

    pub fn cancel_search(&mut self) {
        self.mode = Mode::Navigate;
    }

    // ── forms ────────────────────────────────────────────────────────

    pub fn begin_add(&mut self) {
        self.form = Some(TaskForm::blank(self.today));
        self.mode = Mode::AddTask;
    }

    pub fn begin_edit(&mut self) {
        if let Some(task) = self.selected_task() {
            self.form = Some(TaskForm::for_task(&task));
            self.mode = Mode::EditTask;
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.mode = Mode::Navigate;
    }

    pub fn submit_form(&mut self) {
        let Some(form) = self.form.clone() else {
            return;
        };
        match form.draft() {
            Err(message) => {
                if let Some(open) = &mut self.form {
                    open.error = Some(message);
                }
            }
            Ok(draft) => {
                let applied = match form.editing {
                    Some(id) => match self.store.find(id).cloned() {
                        Some(task) => {
                            let updated = task.with_fields(&draft);
                            self.store.update_task(&updated)
                        }
                        None => false,
                    },
                    None => self.store.add_task(&draft),
                };
                self.form = None;
                self.mode = Mode::Navigate;
                if applied {
                    self.notify(if form.editing.is_some() {
                        "Task updated"
                    } else {
                        "Task created"
                    });
                } else {
                    self.notify("Change rejected, board unchanged (see logs)");
                }
                self.clamp_selection();
            }
        }
    }

    // ── card movement ────────────────────────────────────────────────

    /// Move the selected card one column left or right (the keyboard
    /// stand-in for dragging it between columns).
    pub fn request_move(&mut self, delta: isize) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let dest_index = self.selected_column as isize + delta;
        if !(0..3).contains(&dest_index) {
            return;
        }
        let columns = self.columns();
        let request = MoveRequest {
            source: columns[self.selected_column],
            dest: columns[dest_index as usize],
            task_id: task.id,
        };
        match board::apply_move(&task, &request) {
            Some(updated) => {
                if self.store.update_task(&updated) {
                    self.selected_column = dest_index as usize;
                    self.notify(format!("Moved to {}", request.dest.label()));
                } else {
                    self.notify("Move rejected, board unchanged (see logs)");
                }
                self.clamp_selection();
            }
            None => {
                self.notify("Due-date columns follow the due date; edit the task instead");
            }
        }
    }

    // ── delete ───────────────────────────────────────────────────────

    pub fn request_delete(&mut self) {
        if let Some(task) = self.selected_task() {
            self.pending_delete = Some(task.id);
            self.mode = Mode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            if self.store.delete_task(id) {
                self.notify("Task deleted");
            } else {
                self.notify("Delete rejected, board unchanged (see logs)");
            }
        }
        self.mode = Mode::Navigate;
        self.clamp_selection();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::Navigate;
    }

    // ── history ──────────────────────────────────────────────────────

    pub fn undo_action(&mut self) {
        if self.store.undo() {
            self.notify("Undone");
        } else {
            self.notify("Nothing to undo");
        }
        self.clamp_selection();
    }

    pub fn redo_action(&mut self) {
        if self.store.redo() {
            self.notify("Redone");
        } else {
            self.notify("Nothing to redo");
        }
        self.clamp_selection();
    }

    // ── identity ─────────────────────────────────────────────────────

    pub fn login(&mut self) {
        if self.session.login() {
            let name = self
                .session
                .user()
                .map(|user| user.display_name.clone())
                .unwrap_or_default();
            self.notify(format!("Signed in as {name}"));
        } else {
            self.notify("Sign-in failed (see logs)");
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.notify("Signed out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use taskdeck::api::{ApiError, TaskService};
    use taskdeck::auth::{AuthError, IdentityProvider, User};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn task(id: u64, name: &str, status: Status, due: &str) -> Task {
        Task {
            id,
            created_at: "2023-04-30T09:15:00Z".parse().unwrap(),
            name: name.to_string(),
            status,
            priority: Priority::Low,
            due_date: date(due),
            description: None,
            image: None,
        }
    }

    /// Minimal always-succeeding service for UI-state tests.
    #[derive(Clone, Default)]
    struct StubService {
        next_id: Rc<RefCell<u64>>,
        seed: Vec<Task>,
    }

    impl TaskService for StubService {
        fn list(&self) -> Result<Vec<Task>, ApiError> {
            Ok(self.seed.clone())
        }

        fn create(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            Ok(Task {
                id: 100 + *next,
                created_at: "2023-05-01T08:00:00Z".parse().unwrap(),
                name: draft.name.clone(),
                status: draft.status,
                priority: draft.priority,
                due_date: draft.due_date,
                description: draft.description.clone(),
                image: draft.image.clone(),
            })
        }

        fn update(&self, task: &Task) -> Result<Task, ApiError> {
            Ok(task.clone())
        }

        fn delete(&self, _id: u64) -> Result<(), ApiError> {
            Ok(())
        }
    }

    struct NoProvider;

    impl IdentityProvider for NoProvider {
        fn login(&self) -> Result<User, AuthError> {
            Err(AuthError::MissingCredentials(std::path::PathBuf::from(
                "/nowhere",
            )))
        }
    }

    fn app_state(seed: Vec<Task>) -> AppState {
        let service = StubService {
            seed,
            ..StubService::default()
        };
        let mut store = TaskStore::new(Box::new(service), 50);
        store.initialize();
        AppState::new(
            store,
            Session::new(Box::new(NoProvider)),
            Theme::default(),
            3,
            date("2023-05-02"),
        )
    }

    fn seed_board() -> Vec<Task> {
        vec![
            task(1, "Task 1", Status::Todo, "2023-05-01"),
            task(2, "Task 2", Status::Todo, "2023-05-02"),
            task(3, "Task 3", Status::InProgress, "2023-05-02"),
            task(4, "Task 4", Status::Done, "2023-05-03"),
            task(5, "Task 5", Status::Todo, "2023-05-03"),
            task(6, "Task 6", Status::Todo, "2023-05-04"),
        ]
    }

    #[test]
    fn column_pages_respect_page_size() {
        let state = app_state(seed_board());
        // Four todos, page size three.
        assert_eq!(state.column_total(0), 4);
        assert_eq!(state.column_page(0).len(), 3);

        let mut state = state;
        state.change_page(1);
        assert_eq!(state.column_page(0).len(), 1);
        assert_eq!(state.column_page(0)[0].id, 6);
    }

    #[test]
    fn selection_is_clamped_when_page_shrinks() {
        let mut state = app_state(seed_board());
        state.selected_row = 2;
        state.change_page(1);
        // Page 2 of the todo column has a single card.
        assert_eq!(state.selected_row, 0);
    }

    #[test]
    fn group_cycle_resets_page_and_selection() {
        let mut state = app_state(seed_board());
        state.change_page(1);
        state.selected_column = 2;
        state.cycle_group_by();
        assert_eq!(state.group_by, GroupBy::Priority);
        assert_eq!(state.page, 1);
        assert_eq!(state.selected_column, 0);
    }

    #[test]
    fn invalid_form_keeps_the_form_open_with_error() {
        let mut state = app_state(seed_board());
        state.begin_add();
        if let Some(form) = &mut state.form {
            form.name = TextBuffer::new("ab".to_string());
        }
        state.submit_form();
        let form = state.form.as_ref().expect("form stays open");
        assert!(form.error.as_ref().unwrap().contains("name"));
        assert_eq!(state.mode, Mode::AddTask);
    }

    #[test]
    fn valid_form_submits_and_closes() {
        let mut state = app_state(seed_board());
        state.begin_add();
        if let Some(form) = &mut state.form {
            form.name = TextBuffer::new("A brand new task".to_string());
        }
        state.submit_form();
        assert!(state.form.is_none());
        assert_eq!(state.mode, Mode::Navigate);
        assert_eq!(state.store.tasks().len(), 7);
    }

    #[test]
    fn moving_a_card_right_updates_its_status() {
        let mut state = app_state(seed_board());
        state.selected_column = 0;
        state.selected_row = 0;
        state.request_move(1);
        assert_eq!(state.store.find(1).unwrap().status, Status::InProgress);
        assert_eq!(state.selected_column, 1);
        assert!(state.store.can_undo());
    }

    #[test]
    fn moves_are_refused_under_date_grouping() {
        let mut state = app_state(seed_board());
        state.cycle_group_by();
        state.cycle_group_by();
        assert_eq!(state.group_by, GroupBy::Date);
        let before = state.store.tasks().to_vec();
        state.request_move(1);
        assert_eq!(state.store.tasks(), &before[..]);
        assert!(!state.store.can_undo());
    }

    #[test]
    fn status_filter_cycles_through_all_states() {
        let mut state = app_state(seed_board());
        state.cycle_status_filter();
        assert_eq!(state.filter.status, Some(Status::Todo));
        state.cycle_status_filter();
        state.cycle_status_filter();
        state.cycle_status_filter();
        assert_eq!(state.filter.status, None);
    }

    #[test]
    fn counts_ignore_active_filters() {
        let mut state = app_state(seed_board());
        state.filter.search = Some("Task 1".to_string());
        let counts = state.counts();
        assert_eq!(counts.todo, 4);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.done, 1);
    }

    #[test]
    fn delete_flow_confirms_before_removing() {
        let mut state = app_state(seed_board());
        state.selected_column = 2;
        state.request_delete();
        assert_eq!(state.mode, Mode::ConfirmDelete);
        assert_eq!(state.pending_delete, Some(4));
        assert_eq!(state.store.tasks().len(), 6);

        state.confirm_delete();
        assert_eq!(state.store.tasks().len(), 5);
        assert!(state.store.find(4).is_none());
        assert_eq!(state.mode, Mode::Navigate);
    }
}
