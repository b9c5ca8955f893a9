use anyhow::{anyhow, Result};
use std::fmt::{Display, Formatter};

pub const FIELD_SEPARATOR: char = ',';
pub const COURSE_SEPARATOR: char = ';';

/// Whether `value` can be stored as a single field of a record line.
pub fn is_storable(value: &str) -> bool {
    !value.contains(|c: char| matches!(c, FIELD_SEPARATOR | COURSE_SEPARATOR | '\r' | '\n'))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub student_id: String,
    /// Stored form of the password; empty when the student logs in by ID alone.
    pub password: String,
    /// Names of the registered courses, in registration order.
    pub courses: Vec<String>,
}

impl Student {
    pub fn new<T: Into<String>>(name: T, student_id: T, password: T) -> Self {
        Self {
            name: name.into(),
            student_id: student_id.into(),
            password: password.into(),
            courses: Vec::new(),
        }
    }

    pub fn add_course<T: Into<String>>(&mut self, course: T) {
        self.courses.push(course.into());
    }

    /// Removes the first registration for `course`, if any.
    pub fn remove_course(&mut self, course: &str) -> bool {
        match self.courses.iter().position(|c| c == course) {
            Some(idx) => {
                self.courses.remove(idx);
                true
            }
            None => false,
        }
    }

    /// `name,student_id,password,course1;course2`
    pub fn to_line(&self) -> String {
        let courses = self.courses.join(&COURSE_SEPARATOR.to_string());
        [
            self.name.as_str(),
            self.student_id.as_str(),
            self.password.as_str(),
            courses.as_str(),
        ]
        .join(&FIELD_SEPARATOR.to_string())
    }

    /// Parses a record line. Lines without the password column
    /// (`name,student_id,courses`) load with an empty password.
    pub fn from_line(line: &str) -> Result<Self> {
        let fields = strip_line_ending(line).split(FIELD_SEPARATOR).collect::<Vec<&str>>();
        let (name, student_id, password, courses) = match fields.as_slice() {
            [name, id, password, courses] => (*name, *id, *password, *courses),
            [name, id, courses] => (*name, *id, "", *courses),
            _ => {
                return Err(anyhow!(
                    "Expected 3 or 4 fields in student record, found {}",
                    fields.len()
                ))
            }
        };
        if student_id.is_empty() {
            return Err(anyhow!("Student record has an empty ID"));
        }

        Ok(Self {
            name: name.to_string(),
            student_id: student_id.to_string(),
            password: password.to_string(),
            courses: parse_courses(courses),
        })
    }
}

// Surrounding spaces belong to the first and last fields.
fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(|c: char| matches!(c, '\r' | '\n'))
}

fn parse_courses(field: &str) -> Vec<String> {
    field
        .split(COURSE_SEPARATOR)
        .filter(|course| !course.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Course {
    pub name: String,
    pub course_code: String,
}

impl Course {
    pub fn new<T: Into<String>>(name: T, course_code: T) -> Self {
        Self {
            name: name.into(),
            course_code: course_code.into(),
        }
    }

    /// `name,course_code`
    pub fn to_line(&self) -> String {
        format!("{}{}{}", self.name, FIELD_SEPARATOR, self.course_code)
    }

    pub fn from_line(line: &str) -> Result<Self> {
        let fields = strip_line_ending(line).split(FIELD_SEPARATOR).collect::<Vec<&str>>();
        match fields.as_slice() {
            [_, code] if code.is_empty() => Err(anyhow!("Course record has an empty code")),
            [name, code] => Ok(Course::new(*name, *code)),
            _ => Err(anyhow!(
                "Expected 2 fields in course record, found {}",
                fields.len()
            )),
        }
    }
}

impl Display for Course {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.course_code)
    }
}
