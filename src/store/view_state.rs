use crate::models::Task;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    List,
    Calendar,
    Profile,
}

/// Presentation-layer state: the active screen, whether the task form is
/// open, and the task being edited (kept only to prefill the form — the
/// save operation itself is tagged explicitly by the caller).
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub view: View,
    pub show_form: bool,
    pub editing: Option<Task>,
}

impl ViewState {
    pub fn open_create_form(&mut self) {
        self.editing = None;
        self.show_form = true;
    }

    pub fn open_edit_form(&mut self, task: Task) {
        self.editing = Some(task);
        self.show_form = true;
    }

    pub fn close_form(&mut self) {
        self.show_form = false;
        self.editing = None;
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_the_form_clears_editing() {
        let mut state = ViewState::default();
        assert_eq!(state.view, View::List);

        state.open_create_form();
        assert!(state.show_form);
        assert!(state.editing.is_none());

        state.close_form();
        assert!(!state.show_form);
        assert!(state.editing.is_none());
    }
}
