use crate::models::{RiskLevel, Student, Subject};

pub fn failing_count(subjects: &[Subject]) -> usize {
    subjects.iter().filter(|s| s.status.is_failing()).count()
}

pub fn previous_count(subjects: &[Subject]) -> usize {
    subjects.iter().filter(|s| s.is_previous()).count()
}

/// Failed subjects plus subjects owed from previous years.
pub fn risk_load(subjects: &[Subject]) -> usize {
    failing_count(subjects) + previous_count(subjects)
}

pub fn classify(subjects: &[Subject]) -> RiskLevel {
    match risk_load(subjects) {
        0 => RiskLevel::Low,
        1 | 2 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

/// Students ordered by risk load (heaviest first), ties broken by lowest
/// attendance.
pub fn highest_risk(students: &[Student], limit: usize) -> Vec<&Student> {
    let mut ranked: Vec<(usize, &Student)> = students
        .iter()
        .map(|student| (risk_load(&student.subjects), student))
        .collect();

    ranked.sort_by(|(load_a, a), (load_b, b)| {
        load_b
            .cmp(load_a)
            .then(a.attendance_rate.cmp(&b.attendance_rate))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|(_, student)| student)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;
    use crate::models::{SubjectStatus, YearLevel};
    use crate::random::RngSource;

    fn subject(status: SubjectStatus) -> Subject {
        Subject {
            id: "sub-0".to_string(),
            name: "Matemáticas".to_string(),
            status,
            year: YearLevel::Third,
        }
    }

    fn approved(n: usize) -> Vec<Subject> {
        (0..n)
            .map(|_| subject(SubjectStatus::Approved { score: 8 }))
            .collect()
    }

    #[test]
    fn all_approved_is_low() {
        assert_eq!(classify(&approved(10)), RiskLevel::Low);
    }

    #[test]
    fn in_progress_does_not_count() {
        let mut subjects = approved(9);
        subjects.push(subject(SubjectStatus::InProgress));
        assert_eq!(risk_load(&subjects), 0);
        assert_eq!(classify(&subjects), RiskLevel::Low);
    }

    #[test]
    fn one_or_two_problems_is_medium() {
        let mut subjects = approved(8);
        subjects.push(subject(SubjectStatus::Pending));
        assert_eq!(classify(&subjects), RiskLevel::Medium);
        subjects.push(subject(SubjectStatus::MustRepeat { score: 2 }));
        assert_eq!(classify(&subjects), RiskLevel::Medium);
    }

    #[test]
    fn three_problems_is_high() {
        let mut subjects = approved(7);
        subjects.push(subject(SubjectStatus::Pending));
        subjects.push(subject(SubjectStatus::InRemediation { score: 5 }));
        subjects.push(subject(SubjectStatus::MustRepeat { score: 1 }));
        assert_eq!(failing_count(&subjects), 2);
        assert_eq!(previous_count(&subjects), 1);
        assert_eq!(classify(&subjects), RiskLevel::High);
    }

    #[test]
    fn ranking_puts_heaviest_load_first() {
        let mut rng = RngSource::seeded(11);
        let mut students = generator::generate(3, &mut rng);
        students[0].subjects = approved(10);
        students[1].subjects = approved(10);
        students[1].subjects[0].status = SubjectStatus::Pending;
        students[2].subjects = approved(10);
        students[2].subjects[0].status = SubjectStatus::Pending;
        students[1].attendance_rate = 90;
        students[2].attendance_rate = 70;

        let ranked = highest_risk(&students, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, students[2].id);
        assert_eq!(ranked[1].id, students[1].id);
    }
}
