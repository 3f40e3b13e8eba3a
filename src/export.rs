use std::io::Write;

use serde::Serialize;

use crate::error::ExportError;
use crate::models::Student;
use crate::risk;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: String,
    first_name: &'a str,
    last_name: &'a str,
    dni: &'a str,
    year: &'static str,
    division: &'a str,
    attendance_rate: u8,
    risk_level: &'static str,
    failing_subjects: usize,
    previous_subjects: usize,
    guardian_name: &'a str,
    guardian_phone: &'a str,
}

impl<'a> From<&'a Student> for CsvRow<'a> {
    fn from(student: &'a Student) -> Self {
        let guardian = student.guardians.first();
        CsvRow {
            id: student.id.to_string(),
            first_name: &student.first_name,
            last_name: &student.last_name,
            dni: &student.dni,
            year: student.current_year.label(),
            division: &student.division,
            attendance_rate: student.attendance_rate,
            risk_level: student.risk_level.label(),
            failing_subjects: risk::failing_count(&student.subjects),
            previous_subjects: risk::previous_count(&student.subjects),
            guardian_name: guardian.map(|g| g.name.as_str()).unwrap_or_default(),
            guardian_phone: guardian.map(|g| g.phone.as_str()).unwrap_or_default(),
        }
    }
}

pub fn write_json<W: Write>(students: &[Student], mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, students)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_csv<W: Write>(students: &[Student], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for student in students {
        csv_writer.serialize(CsvRow::from(student))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_roster<W: Write>(
    students: &[Student],
    format: ExportFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Json => write_json(students, writer),
        ExportFormat::Csv => write_csv(students, writer),
    }
}
