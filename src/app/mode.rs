use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Navigate,
    AddTask,
    EditTask,
    ConfirmDelete,
    Search,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Navigate => write!(f, "NAVIGATE"),
            Mode::AddTask => write!(f, "ADD"),
            Mode::EditTask => write!(f, "EDIT"),
            Mode::ConfirmDelete => write!(f, "CONFIRM"),
            Mode::Search => write!(f, "SEARCH"),
        }
    }
}
