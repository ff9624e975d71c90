/// Screen currently shown in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    History,
}

impl View {
    /// The other screen (Ctrl+L switches between the two)
    pub fn toggled(self) -> Self {
        match self {
            Self::Home => Self::History,
            Self::History => Self::Home,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Timer",
            Self::History => "History",
        }
    }
}

/// Input field focused in the new-cycle form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Task,
    MinutesAmount,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Task => Self::MinutesAmount,
            Self::MinutesAmount => Self::Task,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_toggle() {
        assert_eq!(View::Home.toggled(), View::History);
        assert_eq!(View::History.toggled(), View::Home);
        assert_eq!(View::default(), View::Home);
    }

    #[test]
    fn test_form_field_cycles() {
        assert_eq!(FormField::Task.next(), FormField::MinutesAmount);
        assert_eq!(FormField::MinutesAmount.next(), FormField::Task);
    }
}
