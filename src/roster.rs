use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::models::Student;

/// The in-memory student roster for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn new(students: Vec<Student>) -> Self {
        Self { students }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Student> {
        self.students.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Swaps in `updated` for the record sharing its id. Returns false and
    /// leaves the roster untouched when no record matches.
    pub fn replace(&mut self, updated: Student) -> bool {
        match self.students.iter_mut().find(|s| s.id == updated.id) {
            Some(slot) => {
                debug!(student_id = %updated.id, "replaced student record");
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        let removed = self.students.len() != before;
        if removed {
            debug!(student_id = %id, "deleted student record");
        }
        removed
    }

    /// Discards every record in favour of `students`.
    pub fn replace_all(&mut self, students: Vec<Student>) {
        debug!(
            previous = self.students.len(),
            incoming = students.len(),
            "replacing roster"
        );
        self.students = students;
    }
}

impl From<Vec<Student>> for Roster {
    fn from(students: Vec<Student>) -> Self {
        Self::new(students)
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Student;
    type IntoIter = std::slice::Iter<'a, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
