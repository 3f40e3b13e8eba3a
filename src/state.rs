use tracing::{debug, info};
use uuid::Uuid;

use crate::generator;
use crate::import::{ImportOutcome, ImportRequest};
use crate::models::Student;
use crate::roster::Roster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Students,
    Database,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Panel CITE",
            View::Students => "Gestión de Trayectorias",
            View::Database => "Base de Datos Maestra",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            View::Dashboard => "Monitoreo de indicadores institucionales",
            View::Students => "Seguimiento individual de alumnos",
            View::Database => "Administración y modificación de legajos",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(View),
    SelectStudent(Uuid),
    CloseDetail,
    UpdateStudent(Student),
    DeleteStudent(Uuid),
    ImportRequested { file_name: String },
    ImportCompleted(ImportOutcome),
}

/// Work the caller must carry out after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    StartImport(ImportRequest),
    Notify(String),
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub roster: Roster,
    pub view: View,
    pub selected: Option<Uuid>,
    /// Raised while an import started outside the database view is running.
    pub importing: bool,
}

impl AppState {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    pub fn selected_student(&self) -> Option<&Student> {
        self.selected.and_then(|id| self.roster.get(id))
    }
}

pub fn update(state: &mut AppState, action: Action) -> Effect {
    match action {
        Action::Navigate(view) => {
            state.view = view;
            Effect::None
        }
        Action::SelectStudent(id) => {
            if state.roster.get(id).is_some() {
                state.selected = Some(id);
            }
            Effect::None
        }
        Action::CloseDetail => {
            state.selected = None;
            Effect::None
        }
        Action::UpdateStudent(mut student) => {
            generator::refresh_derived(&mut student);
            let id = student.id;
            if !state.roster.replace(student) {
                debug!(student_id = %id, "ignored edit for unknown student");
            }
            Effect::None
        }
        Action::DeleteStudent(id) => {
            if state.roster.delete(id) && state.selected == Some(id) {
                state.selected = None;
            }
            Effect::None
        }
        Action::ImportRequested { file_name } => {
            let origin = state.view;
            if origin != View::Database {
                state.importing = true;
            }
            info!(file = %file_name, ?origin, "import requested");
            Effect::StartImport(ImportRequest { file_name, origin })
        }
        Action::ImportCompleted(outcome) => {
            let ImportOutcome {
                students,
                file_name,
                origin,
            } = outcome;
            let processed = students.len();
            state.roster.replace_all(students);
            if state.selected_student().is_none() {
                state.selected = None;
            }
            info!(processed, file = %file_name, "import applied");

            if origin == View::Database {
                debug!("database view reports its own completion");
                return Effect::None;
            }

            state.importing = false;
            state.view = View::Students;
            Effect::Notify(import_notice(processed, &file_name))
        }
    }
}

pub fn import_notice(processed: usize, file_name: &str) -> String {
    format!(
        "Base de datos actualizada correctamente. Se procesaron {processed} registros desde \"{file_name}\"."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RiskLevel, SubjectStatus};
    use crate::random::RngSource;
    use crate::risk;

    fn state_with(count: usize) -> AppState {
        let students = generator::generate(count, &mut RngSource::seeded(31));
        AppState::new(Roster::from(students))
    }

    fn outcome(count: usize, file_name: &str, origin: View) -> ImportOutcome {
        ImportOutcome {
            students: generator::generate(count, &mut RngSource::seeded(32)),
            file_name: file_name.to_string(),
            origin,
        }
    }

    #[test]
    fn starts_on_dashboard() {
        let state = state_with(3);
        assert_eq!(state.view, View::Dashboard);
        assert!(state.selected.is_none());
        assert!(!state.importing);
    }

    #[test]
    fn navigate_switches_view() {
        let mut state = state_with(3);
        assert_eq!(update(&mut state, Action::Navigate(View::Database)), Effect::None);
        assert_eq!(state.view, View::Database);
    }

    #[test]
    fn select_ignores_unknown_ids() {
        let mut state = state_with(3);
        update(&mut state, Action::SelectStudent(Uuid::nil()));
        assert!(state.selected.is_none());

        let id = state.roster.students()[1].id;
        update(&mut state, Action::SelectStudent(id));
        assert_eq!(state.selected_student().map(|s| s.id), Some(id));

        update(&mut state, Action::CloseDetail);
        assert!(state.selected.is_none());
    }

    #[test]
    fn update_student_is_visible_through_selection() {
        let mut state = state_with(4);
        let mut edited = state.roster.students()[0].clone();
        update(&mut state, Action::SelectStudent(edited.id));
        edited.attendance_rate = 72;
        update(&mut state, Action::UpdateStudent(edited.clone()));

        assert_eq!(state.roster.len(), 4);
        assert_eq!(state.selected_student(), Some(&edited));
    }

    #[test]
    fn edited_subjects_drive_stored_risk() {
        let mut state = state_with(4);
        let mut edited = state.roster.students()[2].clone();
        for subject in &mut edited.subjects {
            subject.status = SubjectStatus::MustRepeat { score: 1 };
        }
        edited.risk_level = RiskLevel::Low;
        update(&mut state, Action::UpdateStudent(edited.clone()));

        let stored = state.roster.get(edited.id).unwrap();
        assert_eq!(stored.risk_level, RiskLevel::High);
        assert_eq!(stored.risk_level, risk::classify(&stored.subjects));
        assert!(stored.notes.ends_with(generator::HIGH_RISK_NOTE));
        for (before, after) in state_with(4).roster.iter().zip(state.roster.iter()) {
            if after.id != edited.id {
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn edit_for_unknown_student_leaves_roster_alone() {
        let mut state = state_with(3);
        let before = state.roster.clone();
        let mut stranger = state.roster.students()[0].clone();
        stranger.id = Uuid::nil();
        stranger.division = "Z".to_string();

        assert_eq!(update(&mut state, Action::UpdateStudent(stranger)), Effect::None);
        assert_eq!(state.roster, before);
    }

    #[test]
    fn deleting_selected_student_closes_detail() {
        let mut state = state_with(4);
        let id = state.roster.students()[3].id;
        update(&mut state, Action::SelectStudent(id));
        update(&mut state, Action::DeleteStudent(id));

        assert_eq!(state.roster.len(), 3);
        assert!(state.selected.is_none());
    }

    #[test]
    fn import_from_students_view_raises_busy_and_notifies() {
        let mut state = state_with(4);
        update(&mut state, Action::Navigate(View::Students));

        let effect = update(
            &mut state,
            Action::ImportRequested {
                file_name: "legajos.xlsx".to_string(),
            },
        );
        assert_eq!(
            effect,
            Effect::StartImport(ImportRequest {
                file_name: "legajos.xlsx".to_string(),
                origin: View::Students,
            })
        );
        assert!(state.importing);
        assert_eq!(state.roster.len(), 4);

        let effect = update(
            &mut state,
            Action::ImportCompleted(outcome(7, "legajos.xlsx", View::Students)),
        );
        assert_eq!(effect, Effect::Notify(import_notice(7, "legajos.xlsx")));
        assert!(!state.importing);
        assert_eq!(state.view, View::Students);
        assert_eq!(state.roster.len(), 7);
    }

    #[test]
    fn import_from_dashboard_lands_on_students() {
        let mut state = state_with(2);
        update(
            &mut state,
            Action::ImportRequested {
                file_name: "a.csv".to_string(),
            },
        );
        update(
            &mut state,
            Action::ImportCompleted(outcome(5, "a.csv", View::Dashboard)),
        );
        assert_eq!(state.view, View::Students);
    }

    #[test]
    fn import_from_database_view_is_silent() {
        let mut state = state_with(4);
        update(&mut state, Action::Navigate(View::Database));
        update(
            &mut state,
            Action::ImportRequested {
                file_name: "maestra.csv".to_string(),
            },
        );
        assert!(!state.importing);

        let effect = update(
            &mut state,
            Action::ImportCompleted(outcome(6, "maestra.csv", View::Database)),
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(state.view, View::Database);
        assert_eq!(state.roster.len(), 6);
    }

    #[test]
    fn import_drops_stale_selection() {
        let mut state = state_with(3);
        let id = state.roster.students()[0].id;
        update(&mut state, Action::SelectStudent(id));
        update(
            &mut state,
            Action::ImportCompleted(outcome(3, "x.csv", View::Students)),
        );
        assert!(state.selected.is_none());
    }

    #[test]
    fn notice_names_file_and_count() {
        assert_eq!(
            import_notice(152, "alumnos.csv"),
            "Base de datos actualizada correctamente. Se procesaron 152 registros desde \"alumnos.csv\"."
        );
    }
}
