// Menu state machine. Transitions are pure so they can be tested without a terminal.
use crate::data::dataset::Dataset;
use crate::data::filter::RecordFilter;
use shared::models::EducationLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    State,
    Municipality,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    FilterSelect(FilterKind),
    ColumnSelect(RecordFilter),
    Report { filter: RecordFilter, level: EducationLevel },
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidChoice,
    EmptyFilter,
    Finished,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::InvalidChoice => "Invalid option.",
            Notice::EmptyFilter => "No data found for this filter.",
            Notice::Finished => "\nProgram finished.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: MenuState,
    pub notice: Option<Notice>,
}

impl Transition {
    fn to(next: MenuState) -> Self {
        Transition { next, notice: None }
    }

    fn with_notice(next: MenuState, notice: Notice) -> Self {
        Transition { next, notice: Some(notice) }
    }
}

impl MenuState {
    /// Empty for `Report` and `Exit`, which never read input.
    pub fn prompt(&self, dataset: &Dataset) -> String {
        match self {
            MenuState::MainMenu => "\nFilter the data?\n\
                1 - Analyse all states and municipalities\n\
                2 - Choose a state (Sigla_uf)\n\
                3 - Choose a specific municipality\n\
                0 - Exit\n\
                Enter the option number: "
                .to_string(),
            MenuState::FilterSelect(FilterKind::State) => format!(
                "\nAvailable states: {}\nEnter the state code (e.g. SP): ",
                dataset.state_codes().join(", ")
            ),
            MenuState::FilterSelect(FilterKind::Municipality) => "Enter the municipality name: ".to_string(),
            MenuState::ColumnSelect(_) => {
                let mut prompt = String::from("\nChoose the column to analyse:\n");
                for (idx, level) in EducationLevel::ALL.iter().enumerate() {
                    prompt.push_str(&format!("{} - {}\n", idx + 1, level.column_name()));
                }
                prompt.push_str("Enter the column number: ");
                prompt
            }
            MenuState::Continue => "\nRun another analysis? (S/N): ".to_string(),
            MenuState::Report { .. } | MenuState::Exit => String::new(),
        }
    }

    pub fn on_input(&self, input: &str, dataset: &Dataset) -> Transition {
        let answer = input.trim();
        match self {
            MenuState::MainMenu => match answer {
                "0" => Transition::with_notice(MenuState::Exit, Notice::Finished),
                "1" => Self::select_rows(RecordFilter::All, dataset),
                "2" => Transition::to(MenuState::FilterSelect(FilterKind::State)),
                "3" => Transition::to(MenuState::FilterSelect(FilterKind::Municipality)),
                _ => Transition::with_notice(MenuState::MainMenu, Notice::InvalidChoice),
            },
            MenuState::FilterSelect(FilterKind::State) => Self::select_rows(RecordFilter::state(answer), dataset),
            MenuState::FilterSelect(FilterKind::Municipality) => {
                Self::select_rows(RecordFilter::municipality(answer), dataset)
            }
            MenuState::ColumnSelect(filter) => match EducationLevel::from_menu_choice(answer) {
                Some(level) => Transition::to(MenuState::Report { filter: filter.clone(), level }),
                None => Transition::with_notice(MenuState::MainMenu, Notice::InvalidChoice),
            },
            MenuState::Continue => match answer.to_uppercase().as_str() {
                "S" => Transition::to(MenuState::MainMenu),
                _ => Transition::with_notice(MenuState::Exit, Notice::Finished),
            },
            MenuState::Report { .. } | MenuState::Exit => Transition::to(self.clone()),
        }
    }

    pub fn after_report(&self) -> MenuState {
        match self {
            MenuState::Report { .. } => MenuState::Continue,
            other => other.clone(),
        }
    }

    fn select_rows(filter: RecordFilter, dataset: &Dataset) -> Transition {
        if !dataset.records().iter().any(|r| filter.matches(r)) {
            Transition::with_notice(MenuState::MainMenu, Notice::EmptyFilter)
        } else {
            Transition::to(MenuState::ColumnSelect(filter))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TransferRecord;

    fn dataset() -> Dataset {
        Dataset::new(vec![TransferRecord {
            state_code: "SP".to_string(),
            municipality: "CAMPINAS".to_string(),
            executing_entity: None,
            infantile: "R$ 1,00".to_string(),
            fundamental: "R$ 2,00".to_string(),
            secondary: "R$ 3,00".to_string(),
        }])
    }

    #[test]
    fn test_main_menu_transitions() {
        let data = dataset();
        let menu = MenuState::MainMenu;
        assert_eq!(menu.on_input("0", &data).next, MenuState::Exit);
        assert_eq!(menu.on_input("1", &data).next, MenuState::ColumnSelect(RecordFilter::All));
        assert_eq!(menu.on_input(" 2 ", &data).next, MenuState::FilterSelect(FilterKind::State));
        assert_eq!(menu.on_input("3", &data).next, MenuState::FilterSelect(FilterKind::Municipality));

        let invalid = menu.on_input("9", &data);
        assert_eq!(invalid.next, MenuState::MainMenu);
        assert_eq!(invalid.notice, Some(Notice::InvalidChoice));
    }

    #[test]
    fn test_state_selection_normalizes_and_reports_empty() {
        let data = dataset();
        let select = MenuState::FilterSelect(FilterKind::State);
        assert_eq!(
            select.on_input("sp ", &data).next,
            MenuState::ColumnSelect(RecordFilter::State("SP".to_string()))
        );

        let empty = select.on_input("RJ", &data);
        assert_eq!(empty.next, MenuState::MainMenu);
        assert_eq!(empty.notice, Some(Notice::EmptyFilter));
    }

    #[test]
    fn test_unknown_municipality_returns_to_main_menu() {
        let data = dataset();
        let t = MenuState::FilterSelect(FilterKind::Municipality).on_input("Atlantis", &data);
        assert_eq!(t, Transition::with_notice(MenuState::MainMenu, Notice::EmptyFilter));
    }

    #[test]
    fn test_invalid_column_goes_back_to_main_menu() {
        let data = dataset();
        let column = MenuState::ColumnSelect(RecordFilter::All);
        let t = column.on_input("7", &data);
        assert_eq!(t.next, MenuState::MainMenu);
        assert_eq!(t.notice, Some(Notice::InvalidChoice));

        assert_eq!(
            column.on_input("2", &data).next,
            MenuState::Report { filter: RecordFilter::All, level: EducationLevel::Fundamental }
        );
    }

    #[test]
    fn test_continue_prompt() {
        let data = dataset();
        assert_eq!(MenuState::Continue.on_input("s", &data).next, MenuState::MainMenu);
        assert_eq!(MenuState::Continue.on_input(" S ", &data).next, MenuState::MainMenu);
        assert_eq!(MenuState::Continue.on_input("Y", &data).next, MenuState::Exit);
        assert_eq!(MenuState::Continue.on_input("n", &data).next, MenuState::Exit);
        assert_eq!(MenuState::Continue.on_input("", &data).next, MenuState::Exit);
    }

    #[test]
    fn test_report_flows_into_continue() {
        let report = MenuState::Report { filter: RecordFilter::All, level: EducationLevel::Infantile };
        assert_eq!(report.after_report(), MenuState::Continue);
    }

    #[test]
    fn test_continue_prompt_uses_s_n() {
        assert!(MenuState::Continue.prompt(&dataset()).ends_with("(S/N): "));
    }

    #[test]
    fn test_state_prompt_lists_available_codes() {
        let prompt = MenuState::FilterSelect(FilterKind::State).prompt(&dataset());
        assert!(prompt.contains("Available states: SP"));
    }
}
