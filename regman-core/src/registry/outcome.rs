use std::fmt::{Display, Formatter};

/// Result of a registry operation whose presence/absence checks ran.
/// I/O failures are reported separately as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    StudentAdded(String),
    DuplicateStudent,
    StudentRemoved,
    StudentNotFound,
    CourseAdded(String),
    DuplicateCourse,
    CourseRemoved,
    CourseNotFound,
    Registered,
    Unregistered,
    StudentOrCourseNotFound,
    InvalidField(&'static str),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::StudentAdded(_)
                | Outcome::StudentRemoved
                | Outcome::CourseAdded(_)
                | Outcome::CourseRemoved
                | Outcome::Registered
                | Outcome::Unregistered
        )
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::StudentAdded(name) => write!(f, "Student {} added successfully.", name),
            Outcome::DuplicateStudent => f.write_str("Student ID already exists."),
            Outcome::StudentRemoved => f.write_str("Student removed successfully."),
            Outcome::StudentNotFound => f.write_str("Student not found."),
            Outcome::CourseAdded(name) => write!(f, "Course {} added successfully.", name),
            Outcome::DuplicateCourse => f.write_str("Course code already exists."),
            Outcome::CourseRemoved => f.write_str("Course removed successfully."),
            Outcome::CourseNotFound => f.write_str("Course not found."),
            Outcome::Registered => f.write_str("Student registered for course successfully."),
            Outcome::Unregistered => {
                f.write_str("Student unregistered from course successfully.")
            }
            Outcome::StudentOrCourseNotFound => f.write_str("Student or course not found."),
            Outcome::InvalidField(field) => write!(
                f,
                "Invalid {}: it must not be empty or contain ',' ';' or line breaks.",
                field
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Outcome::StudentAdded("Ada".to_string()).to_string(),
            "Student Ada added successfully."
        );
        assert_eq!(
            Outcome::CourseAdded("Math".to_string()).to_string(),
            "Course Math added successfully."
        );
        assert_eq!(
            Outcome::InvalidField("course code").to_string(),
            "Invalid course code: it must not be empty or contain ',' ';' or line breaks."
        );
    }

    #[test]
    fn test_is_success() {
        assert!(Outcome::Registered.is_success());
        assert!(Outcome::StudentAdded("Ada".to_string()).is_success());
        assert!(!Outcome::StudentNotFound.is_success());
        assert!(!Outcome::InvalidField("name").is_success());
    }
}
