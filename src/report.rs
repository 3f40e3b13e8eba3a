use std::fmt::Write;

use crate::models::{RiskLevel, Student, SubjectStatus, YearLevel};
use crate::risk;
use crate::roster::Roster;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub approved: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub in_remediation: usize,
    pub must_repeat: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.approved + self.pending + self.in_progress + self.in_remediation + self.must_repeat
    }
}

/// Dashboard indicators for a roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterSummary {
    pub total: usize,
    pub risk: RiskCounts,
    pub statuses: StatusCounts,
    pub by_year: Vec<(YearLevel, usize)>,
    pub avg_attendance: f64,
}

pub fn summarize(roster: &Roster) -> RosterSummary {
    let mut risk = RiskCounts::default();
    let mut statuses = StatusCounts::default();
    let mut by_year: Vec<(YearLevel, usize)> =
        YearLevel::ALL.iter().map(|year| (*year, 0)).collect();
    let mut attendance_total = 0u64;

    for student in roster {
        match student.risk_level {
            RiskLevel::Low => risk.low += 1,
            RiskLevel::Medium => risk.medium += 1,
            RiskLevel::High => risk.high += 1,
        }

        for subject in &student.subjects {
            match subject.status {
                SubjectStatus::Approved { .. } => statuses.approved += 1,
                SubjectStatus::Pending => statuses.pending += 1,
                SubjectStatus::InProgress => statuses.in_progress += 1,
                SubjectStatus::InRemediation { .. } => statuses.in_remediation += 1,
                SubjectStatus::MustRepeat { .. } => statuses.must_repeat += 1,
            }
        }

        if let Some(entry) = by_year.iter_mut().find(|(year, _)| *year == student.current_year) {
            entry.1 += 1;
        }
        attendance_total += u64::from(student.attendance_rate);
    }

    let total = roster.len();
    RosterSummary {
        total,
        risk,
        statuses,
        by_year,
        avg_attendance: if total == 0 {
            0.0
        } else {
            attendance_total as f64 / total as f64
        },
    }
}

pub fn build_report(roster: &Roster, school: &str, limit: usize) -> String {
    let summary = summarize(roster);
    let mut output = String::new();

    let _ = writeln!(output, "# Informe de Trayectorias");
    let _ = writeln!(
        output,
        "Generado para {} ({} legajos, asistencia promedio {:.1}%)",
        school, summary.total, summary.avg_attendance
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Nivel de Riesgo");

    if summary.total == 0 {
        let _ = writeln!(output, "No hay legajos cargados.");
    } else {
        for (level, count) in [
            (RiskLevel::High, summary.risk.high),
            (RiskLevel::Medium, summary.risk.medium),
            (RiskLevel::Low, summary.risk.low),
        ] {
            let _ = writeln!(
                output,
                "- {}: {} alumnos ({:.1}%)",
                level,
                count,
                percent(count, summary.total)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Estado de Materias");
    let statuses = summary.statuses;
    let subject_total = statuses.total();
    if subject_total == 0 {
        let _ = writeln!(output, "No hay materias registradas.");
    } else {
        for (label, count) in [
            ("Aprobada", statuses.approved),
            ("En Intensificación", statuses.in_remediation),
            ("Recursando", statuses.must_repeat),
            ("Pendiente", statuses.pending),
            ("Cursando", statuses.in_progress),
        ] {
            let _ = writeln!(
                output,
                "- {}: {} ({:.1}%)",
                label,
                count,
                percent(count, subject_total)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Matrícula por Año");
    for (year, count) in &summary.by_year {
        let _ = writeln!(output, "- {year}: {count} alumnos");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Alumnos con Mayor Riesgo");

    let ranked = risk::highest_risk(roster.students(), limit);
    if ranked.is_empty() {
        let _ = writeln!(output, "No hay alumnos para mostrar.");
    } else {
        for student in ranked {
            let _ = writeln!(
                output,
                "- {} ({}, DNI {}) riesgo {} con {} materias adeudadas, asistencia {}%",
                student.full_name(),
                student.course(),
                student.dni,
                student.risk_level,
                risk::risk_load(&student.subjects),
                student.attendance_rate
            );
        }
    }

    output
}

/// Plain-text record sheet for one student.
pub fn format_detail(student: &Student) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{} ({})", student.full_name(), student.id);
    let _ = writeln!(
        output,
        "DNI {} | Nacimiento {} | Curso {}",
        student.dni,
        student.birth_date.format("%d/%m/%Y"),
        student.course()
    );
    let _ = writeln!(output, "Domicilio: {}", student.address);
    let _ = writeln!(output, "Contacto: {} / {}", student.phone, student.email);
    let _ = writeln!(
        output,
        "Asistencia {}% | Riesgo {}",
        student.attendance_rate, student.risk_level
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "Materias:");
    for subject in &student.subjects {
        let marker = if subject.is_previous() { " (previa)" } else { "" };
        let _ = writeln!(output, "  - {}: {}{}", subject.name, subject.status, marker);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Responsables:");
    for guardian in &student.guardians {
        let _ = writeln!(
            output,
            "  - {} ({}) {}{}",
            guardian.name,
            guardian.relation,
            guardian.phone,
            guardian
                .email
                .as_deref()
                .map(|email| format!(" {email}"))
                .unwrap_or_default()
        );
    }

    let _ = writeln!(output, "Autorizados:");
    for person in &student.authorized_persons {
        let _ = writeln!(
            output,
            "  - {} (DNI {}, {}) {}",
            person.name, person.dni, person.relation, person.phone
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Observaciones: {}", student.notes.trim_end());

    output
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}
