use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SubjectRecordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum YearLevel {
    #[serde(rename = "1°")]
    First,
    #[serde(rename = "2°")]
    Second,
    #[serde(rename = "3°")]
    Third,
    #[serde(rename = "4°")]
    Fourth,
    #[serde(rename = "5°")]
    Fifth,
    #[serde(rename = "6°")]
    Sixth,
}

impl YearLevel {
    pub const ALL: [YearLevel; 6] = [
        YearLevel::First,
        YearLevel::Second,
        YearLevel::Third,
        YearLevel::Fourth,
        YearLevel::Fifth,
        YearLevel::Sixth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            YearLevel::First => "1°",
            YearLevel::Second => "2°",
            YearLevel::Third => "3°",
            YearLevel::Fourth => "4°",
            YearLevel::Fifth => "5°",
            YearLevel::Sixth => "6°",
        }
    }
}

impl fmt::Display for YearLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Academic state of one curriculum subject. Graded states carry their score,
/// so a score can never exist on a pending or in-progress subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectStatus {
    Approved { score: u8 },
    /// Owed from an earlier year.
    Pending,
    InProgress,
    InRemediation { score: u8 },
    MustRepeat { score: u8 },
}

impl SubjectStatus {
    pub fn score(&self) -> Option<u8> {
        match *self {
            SubjectStatus::Approved { score }
            | SubjectStatus::InRemediation { score }
            | SubjectStatus::MustRepeat { score } => Some(score),
            SubjectStatus::Pending | SubjectStatus::InProgress => None,
        }
    }

    pub fn is_failing(&self) -> bool {
        matches!(
            self,
            SubjectStatus::InRemediation { .. } | SubjectStatus::MustRepeat { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubjectStatus::Approved { .. } => "Aprobada",
            SubjectStatus::Pending => "Pendiente",
            SubjectStatus::InProgress => "Cursando",
            SubjectStatus::InRemediation { .. } => "En Intensificación",
            SubjectStatus::MustRepeat { .. } => "Recursando",
        }
    }
}

impl fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score() {
            Some(score) => write!(f, "{} ({})", self.label(), score),
            None => f.write_str(self.label()),
        }
    }
}

/// Serialized through [`SubjectRecord`], which spells out `score` and
/// `isPrevious` and rejects records where they disagree with the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SubjectRecord", try_from = "SubjectRecord")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub status: SubjectStatus,
    pub year: YearLevel,
}

impl Subject {
    pub fn is_previous(&self) -> bool {
        matches!(self.status, SubjectStatus::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum StatusLabel {
    #[serde(rename = "Aprobada")]
    Approved,
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Cursando")]
    InProgress,
    #[serde(rename = "En Intensificación")]
    InRemediation,
    #[serde(rename = "Recursando")]
    MustRepeat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubjectRecord {
    id: String,
    name: String,
    status: StatusLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<u8>,
    year: YearLevel,
    is_previous: bool,
}

impl From<Subject> for SubjectRecord {
    fn from(subject: Subject) -> Self {
        let is_previous = subject.is_previous();
        let status = match subject.status {
            SubjectStatus::Approved { .. } => StatusLabel::Approved,
            SubjectStatus::Pending => StatusLabel::Pending,
            SubjectStatus::InProgress => StatusLabel::InProgress,
            SubjectStatus::InRemediation { .. } => StatusLabel::InRemediation,
            SubjectStatus::MustRepeat { .. } => StatusLabel::MustRepeat,
        };
        SubjectRecord {
            id: subject.id,
            name: subject.name,
            status,
            score: subject.status.score(),
            year: subject.year,
            is_previous,
        }
    }
}

impl TryFrom<SubjectRecord> for Subject {
    type Error = SubjectRecordError;

    fn try_from(record: SubjectRecord) -> Result<Self, Self::Error> {
        let graded = |score: Option<u8>| score.ok_or(SubjectRecordError::MissingScore);
        let status = match (record.status, record.score) {
            (StatusLabel::Approved, score) => SubjectStatus::Approved {
                score: graded(score)?,
            },
            (StatusLabel::InRemediation, score) => SubjectStatus::InRemediation {
                score: graded(score)?,
            },
            (StatusLabel::MustRepeat, score) => SubjectStatus::MustRepeat {
                score: graded(score)?,
            },
            (StatusLabel::Pending, None) => SubjectStatus::Pending,
            (StatusLabel::InProgress, None) => SubjectStatus::InProgress,
            (StatusLabel::Pending | StatusLabel::InProgress, Some(_)) => {
                return Err(SubjectRecordError::UnexpectedScore)
            }
        };

        let subject = Subject {
            id: record.id,
            name: record.name,
            status,
            year: record.year,
        };
        if subject.is_previous() != record.is_previous {
            return Err(SubjectRecordError::PreviousMismatch {
                status: subject.status.label(),
            });
        }
        Ok(subject)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Bajo")]
    Low,
    #[serde(rename = "Medio")]
    Medium,
    #[serde(rename = "Alto")]
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Bajo",
            RiskLevel::Medium => "Medio",
            RiskLevel::High => "Alto",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    pub name: String,
    pub relation: String,
    pub phone: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedPerson {
    pub name: String,
    pub dni: String,
    pub relation: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub birth_date: NaiveDate,
    pub current_year: YearLevel,
    pub division: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub photo_url: String,
    pub guardians: Vec<Guardian>,
    pub authorized_persons: Vec<AuthorizedPerson>,
    pub subjects: Vec<Subject>,
    pub attendance_rate: u8,
    pub risk_level: RiskLevel,
    pub notes: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Section label as shown on the roster, e.g. `3° B`.
    pub fn course(&self) -> String {
        format!("{} {}", self.current_year, self.division)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pending_subject_carries_previous_flag_and_no_score() {
        let subject = Subject {
            id: "sub-3".to_string(),
            name: "Historia".to_string(),
            status: SubjectStatus::Pending,
            year: YearLevel::Fourth,
        };
        let value = serde_json::to_value(&subject).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "sub-3",
                "name": "Historia",
                "status": "Pendiente",
                "year": "4°",
                "isPrevious": true,
            })
        );
    }

    #[test]
    fn graded_subject_round_trips() {
        let subject = Subject {
            id: "sub-0".to_string(),
            name: "Matemáticas".to_string(),
            status: SubjectStatus::InRemediation { score: 5 },
            year: YearLevel::First,
        };
        let value = serde_json::to_value(&subject).unwrap();
        assert_eq!(value["status"], "En Intensificación");
        assert_eq!(value["score"], 5);
        assert_eq!(value["isPrevious"], false);
        assert_eq!(serde_json::from_value::<Subject>(value).unwrap(), subject);
    }

    #[test]
    fn inconsistent_records_are_rejected() {
        let previous_on_approved = json!({
            "id": "sub-0", "name": "Arte", "status": "Aprobada",
            "score": 8, "year": "2°", "isPrevious": true,
        });
        assert!(serde_json::from_value::<Subject>(previous_on_approved).is_err());

        let score_on_pending = json!({
            "id": "sub-0", "name": "Arte", "status": "Pendiente",
            "score": 8, "year": "2°", "isPrevious": true,
        });
        assert!(serde_json::from_value::<Subject>(score_on_pending).is_err());

        let missing_score = json!({
            "id": "sub-0", "name": "Arte", "status": "Recursando",
            "year": "2°", "isPrevious": false,
        });
        assert!(serde_json::from_value::<Subject>(missing_score).is_err());
    }

    #[test]
    fn risk_level_uses_school_labels() {
        assert_eq!(serde_json::to_value(RiskLevel::High).unwrap(), "Alto");
        assert_eq!(
            serde_json::from_value::<RiskLevel>(json!("Medio")).unwrap(),
            RiskLevel::Medium
        );
    }
}
