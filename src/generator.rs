use chrono::NaiveDate;
use tracing::info;
use uuid::{Builder, Uuid};

use crate::models::{
    AuthorizedPerson, Guardian, RiskLevel, Student, Subject, SubjectStatus, YearLevel,
};
use crate::random::{pick, RandomSource};
use crate::risk;

pub const SUBJECTS: [&str; 10] = [
    "Matemáticas",
    "Prácticas del Lenguaje",
    "Inglés",
    "Historia",
    "Geografía",
    "Biología",
    "Físico-Química",
    "Educación Física",
    "Construcción de Ciudadanía",
    "Arte",
];

const NAMES: [&str; 14] = [
    "Sofía", "Martín", "Lucas", "Valentina", "Mateo", "Camila", "Benjamín", "Abril", "Joaquín",
    "Mía", "Lautaro", "Isabella", "Bautista", "Catalina",
];

const SURNAMES: [&str; 14] = [
    "García",
    "Martínez",
    "López",
    "González",
    "Pérez",
    "Rodríguez",
    "Sánchez",
    "Romero",
    "Díaz",
    "Fernández",
    "Ruiz",
    "Gómez",
    "Flores",
    "Benítez",
];

const STREETS: [&str; 8] = [
    "Av. Bernardo de Irigoyen",
    "Int. Manny",
    "Av. San Martín",
    "25 de Mayo",
    "Pueyrredón",
    "Sarmiento",
    "Belgrano",
    "Rivadavia",
];

const DIVISIONS: [&str; 3] = ["A", "B", "C"];
const GUARDIAN_RELATIONS: [&str; 3] = ["Padre", "Madre", "Tutor"];
const AUTHORIZED_RELATIONS: [&str; 5] = [
    "Abuelo/a",
    "Tío/a",
    "Hermano/a Mayor",
    "Vecino/a",
    "Padrino/Madrina",
];

pub const LOCALITY: &str = "Gral. Rodríguez";
pub const ROUTINE_NOTE: &str = "Alumno regular de la institución. ";
pub const HIGH_RISK_NOTE: &str = "Requiere seguimiento estricto por inasistencias.";

/// Builds `count` synthetic students. Position `i` drives the email and photo
/// URL; everything else is drawn from `rng`.
pub fn generate<R>(count: usize, rng: &mut R) -> Vec<Student>
where
    R: RandomSource + ?Sized,
{
    let students: Vec<Student> = (0..count).map(|i| student(i, rng)).collect();
    info!(count = students.len(), "generated mock roster");
    students
}

/// Maps a uniform roll in `[0, 1)` to a subject status, drawing the score
/// for graded states.
pub fn status_for_roll<R>(roll: f64, rng: &mut R) -> SubjectStatus
where
    R: RandomSource + ?Sized,
{
    if roll < 0.15 {
        SubjectStatus::InRemediation {
            score: score_in(rng, 4, 6),
        }
    } else if roll < 0.25 {
        SubjectStatus::MustRepeat {
            score: score_in(rng, 1, 3),
        }
    } else if roll < 0.30 {
        SubjectStatus::Pending
    } else if roll < 0.35 {
        SubjectStatus::InProgress
    } else {
        SubjectStatus::Approved {
            score: score_in(rng, 7, 10),
        }
    }
}

fn student<R>(index: usize, rng: &mut R) -> Student
where
    R: RandomSource + ?Sized,
{
    let id = fresh_id(rng);
    let year = *pick(rng, &YearLevel::ALL);
    let subjects = subjects_for(year, rng);
    let risk_level = risk::classify(&subjects);

    let authorized_count = rng.int_in(1, 3);
    let authorized_persons = (0..authorized_count)
        .map(|_| AuthorizedPerson {
            name: full_name(rng),
            dni: rng.int_in(20_000_000, 40_000_000).to_string(),
            relation: pick(rng, &AUTHORIZED_RELATIONS).to_string(),
            phone: phone(rng),
        })
        .collect();

    let first_name = pick(rng, &NAMES).to_string();
    let last_name = pick(rng, &SURNAMES).to_string();
    let dni = rng.int_in(40_000_000, 60_000_000).to_string();
    let birth_date = birth_date(rng);
    let division = pick(rng, &DIVISIONS).to_string();
    let address = format!(
        "{} {}, {}",
        pick(rng, &STREETS),
        rng.int_in(100, 900),
        LOCALITY
    );
    let phone_number = phone(rng);
    let guardian = Guardian {
        name: full_name(rng),
        relation: pick(rng, &GUARDIAN_RELATIONS).to_string(),
        phone: phone(rng),
        email: Some(format!("tutor{index}@gmail.com")),
    };
    let attendance_rate = score_in(rng, 60, 100);

    Student {
        id,
        first_name,
        last_name,
        dni,
        birth_date,
        current_year: year,
        division,
        address,
        phone: phone_number,
        email: format!("alumno{index}@ees6favaloro.edu.ar"),
        photo_url: photo_url(index),
        guardians: vec![guardian],
        authorized_persons,
        subjects,
        attendance_rate,
        risk_level,
        notes: notes_for(risk_level),
    }
}

fn subjects_for<R>(year: YearLevel, rng: &mut R) -> Vec<Subject>
where
    R: RandomSource + ?Sized,
{
    SUBJECTS
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let roll = rng.roll();
            Subject {
                id: format!("sub-{idx}"),
                name: name.to_string(),
                status: status_for_roll(roll, rng),
                year,
            }
        })
        .collect()
}

pub fn notes_for(risk_level: RiskLevel) -> String {
    let mut notes = ROUTINE_NOTE.to_string();
    if risk_level == RiskLevel::High {
        notes.push_str(HIGH_RISK_NOTE);
    }
    notes
}

/// Re-derives the risk level from the student's subjects and keeps the
/// high-risk advisory at the end of the notes in step with it.
pub fn refresh_derived(student: &mut Student) {
    student.risk_level = risk::classify(&student.subjects);
    let mut notes = student
        .notes
        .strip_suffix(HIGH_RISK_NOTE)
        .unwrap_or(&student.notes)
        .to_string();
    if student.risk_level == RiskLevel::High {
        notes.push_str(HIGH_RISK_NOTE);
    }
    student.notes = notes;
}

fn photo_url(index: usize) -> String {
    format!("https://picsum.photos/200/200?random={index}")
}

fn score_in<R>(rng: &mut R, min: u8, max: u8) -> u8
where
    R: RandomSource + ?Sized,
{
    let drawn = rng.int_in(u32::from(min), u32::from(max));
    u8::try_from(drawn).unwrap_or(max)
}

fn full_name<R>(rng: &mut R) -> String
where
    R: RandomSource + ?Sized,
{
    let name = pick(rng, &NAMES);
    let surname = pick(rng, &SURNAMES);
    format!("{name} {surname}")
}

fn phone<R>(rng: &mut R) -> String
where
    R: RandomSource + ?Sized,
{
    let head = rng.int_in(1000, 9999);
    let tail = rng.int_in(1000, 9999);
    format!("11-{head}-{tail}")
}

fn birth_date<R>(rng: &mut R) -> NaiveDate
where
    R: RandomSource + ?Sized,
{
    let day = rng.int_in(1, 28);
    let month = rng.int_in(1, 12);
    let year = rng.int_in(2006, 2012) as i32;
    // Days stop at 28, so every month accepts them.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn fresh_id<R>(rng: &mut R) -> Uuid
where
    R: RandomSource + ?Sized,
{
    Builder::from_random_bytes(rng.bytes()).into_uuid()
}
