use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::outcome::Outcome;
use super::records::{is_storable, Course, Student};
use crate::app_ctx::AppContext;
use crate::runtime::TargetRuntime;

/// Owns the students and courses and keeps both data files in sync with them.
///
/// Every successful mutation rewrites both files in full. There is no
/// rollback: if the write fails the in-memory change stays applied and the
/// error is returned to the caller.
pub struct RegistrationManager {
    app_context: Arc<AppContext>,
    students: BTreeMap<String, Student>,
    courses: BTreeMap<String, Course>,
}

impl RegistrationManager {
    /// Loads both data files. A missing file loads as empty.
    pub async fn load(app_context: Arc<AppContext>) -> Result<Self> {
        let storage = &app_context.blueprint.storage;
        let runtime = &app_context.runtime;

        let mut students = BTreeMap::new();
        for student in read_records(runtime, &storage.student_file, Student::from_line).await? {
            if let Some(old) = students.insert(student.student_id.clone(), student) {
                log::warn!(
                    "Duplicate student ID {} in {}, keeping the last record",
                    old.student_id,
                    storage.student_file
                );
            }
        }

        let mut courses = BTreeMap::new();
        for course in read_records(runtime, &storage.course_file, Course::from_line).await? {
            if let Some(old) = courses.insert(course.course_code.clone(), course) {
                log::warn!(
                    "Duplicate course code {} in {}, keeping the last record",
                    old.course_code,
                    storage.course_file
                );
            }
        }

        log::info!(
            "Loaded {} students from {} and {} courses from {}",
            students.len(),
            storage.student_file,
            courses.len(),
            storage.course_file
        );

        Ok(Self {
            app_context,
            students,
            courses,
        })
    }

    /// Rewrites both data files from memory.
    pub async fn save(&self) -> Result<()> {
        let storage = &self.app_context.blueprint.storage;
        let file = &self.app_context.runtime.file;

        let students = render_lines(self.students.values().map(Student::to_line));
        file.write(&storage.student_file, students.as_bytes())
            .await
            .with_context(|| format!("Unable to write {}", storage.student_file))?;

        let courses = render_lines(self.courses.values().map(Course::to_line));
        file.write(&storage.course_file, courses.as_bytes())
            .await
            .with_context(|| format!("Unable to write {}", storage.course_file))?;

        log::debug!(
            "Saved {} students and {} courses",
            self.students.len(),
            self.courses.len()
        );
        Ok(())
    }

    /// `password` is the plain password; it is stored digested. An empty
    /// password lets the student log in by ID alone.
    pub async fn add_student(
        &mut self,
        name: &str,
        student_id: &str,
        password: &str,
    ) -> Result<Outcome> {
        if let Some(invalid) = invalid_field(&[("name", name), ("student ID", student_id)]) {
            return Ok(rejected(invalid));
        }
        if self.students.contains_key(student_id) {
            return Ok(rejected(Outcome::DuplicateStudent));
        }

        let password = if password.is_empty() {
            String::new()
        } else {
            self.app_context.blueprint.auth.digest.apply(password)
        };
        if !is_storable(&password) {
            return Ok(rejected(Outcome::InvalidField("password")));
        }

        self.students.insert(
            student_id.to_string(),
            Student::new(name, student_id, password.as_str()),
        );
        self.save().await?;
        Ok(Outcome::StudentAdded(name.to_string()))
    }

    pub async fn remove_student(&mut self, student_id: &str) -> Result<Outcome> {
        if self.students.remove(student_id).is_none() {
            return Ok(rejected(Outcome::StudentNotFound));
        }
        self.save().await?;
        Ok(Outcome::StudentRemoved)
    }

    pub async fn add_course(&mut self, name: &str, course_code: &str) -> Result<Outcome> {
        if let Some(invalid) = invalid_field(&[("course name", name), ("course code", course_code)])
        {
            return Ok(rejected(invalid));
        }
        if self.courses.contains_key(course_code) {
            return Ok(rejected(Outcome::DuplicateCourse));
        }

        self.courses
            .insert(course_code.to_string(), Course::new(name, course_code));
        self.save().await?;
        Ok(Outcome::CourseAdded(name.to_string()))
    }

    /// Students keep the course name in their lists after the course is removed.
    pub async fn remove_course(&mut self, course_code: &str) -> Result<Outcome> {
        if self.courses.remove(course_code).is_none() {
            return Ok(rejected(Outcome::CourseNotFound));
        }
        self.save().await?;
        Ok(Outcome::CourseRemoved)
    }

    /// Appends the course name to the student's list, even if already present.
    pub async fn register(&mut self, student_id: &str, course_code: &str) -> Result<Outcome> {
        let (Some(student), Some(course)) = (
            self.students.get_mut(student_id),
            self.courses.get(course_code),
        ) else {
            return Ok(rejected(Outcome::StudentOrCourseNotFound));
        };

        student.add_course(course.name.as_str());
        self.save().await?;
        Ok(Outcome::Registered)
    }

    /// Drops the first registration matching the course name. Succeeds even
    /// when the student was not registered for it.
    pub async fn unregister(&mut self, student_id: &str, course_code: &str) -> Result<Outcome> {
        let (Some(student), Some(course)) = (
            self.students.get_mut(student_id),
            self.courses.get(course_code),
        ) else {
            return Ok(rejected(Outcome::StudentOrCourseNotFound));
        };

        if !student.remove_course(&course.name) {
            log::debug!("{} was not registered for {}", student_id, course.name);
        }
        self.save().await?;
        Ok(Outcome::Unregistered)
    }

    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.students.get(student_id)
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn course(&self, course_code: &str) -> Option<&Course> {
        self.courses.get(course_code)
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn student_info(&self, student_id: &str) -> String {
        match self.students.get(student_id) {
            Some(student) => profile(student).join("\n"),
            None => Outcome::StudentNotFound.to_string(),
        }
    }

    pub fn all_students_info(&self) -> String {
        if self.students.is_empty() {
            return "No students registered.".to_string();
        }
        self.students
            .values()
            .map(|student| profile(student).join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn available_courses(&self) -> String {
        if self.courses.is_empty() {
            return "No courses available.".to_string();
        }
        let mut lines = vec!["Available courses:".to_string()];
        lines.extend(self.courses.values().map(|course| format!("- {}", course)));
        lines.join("\n")
    }

    pub fn authenticate_admin(&self, email: &str, password: &str) -> bool {
        let ok = self.app_context.blueprint.auth.admin.authenticate(email, password);
        if !ok {
            log::warn!("Failed admin login for {}", email);
        }
        ok
    }

    /// Students without a stored password are authenticated by ID alone.
    pub fn authenticate_student(&self, student_id: &str, password: &str) -> Option<&Student> {
        let digest = self.app_context.blueprint.auth.digest;
        let student = self.students.get(student_id).filter(|student| {
            student.password.is_empty() || digest.verify(password, &student.password)
        });
        if student.is_none() {
            log::warn!("Failed student login for {}", student_id);
        }
        student
    }
}

async fn read_records<T>(
    runtime: &TargetRuntime,
    path: &str,
    parse: fn(&str) -> Result<T>,
) -> Result<Vec<T>> {
    if !runtime.file.exists(path).await? {
        log::debug!("{} does not exist yet, starting empty", path);
        return Ok(Vec::new());
    }
    let content = runtime
        .file
        .read(path)
        .await
        .with_context(|| format!("Unable to read {}", path))?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse(line).with_context(|| format!("{}:{}", path, idx + 1)))
        .collect()
}

fn render_lines<I: Iterator<Item = String>>(lines: I) -> String {
    lines.map(|line| line + "\n").collect()
}

fn invalid_field(fields: &[(&'static str, &str)]) -> Option<Outcome> {
    fields
        .iter()
        .find(|(_, value)| value.trim().is_empty() || !is_storable(value))
        .map(|(field, _)| Outcome::InvalidField(*field))
}

fn rejected(outcome: Outcome) -> Outcome {
    log::debug!("Rejected: {}", outcome);
    outcome
}

fn profile(student: &Student) -> Vec<String> {
    let mut lines = vec![
        format!("Student Name: {}", student.name),
        format!("Student ID: {}", student.student_id),
    ];
    if student.courses.is_empty() {
        lines.push(format!("{} is not registered for any courses.", student.name));
    } else {
        lines.push(format!(
            "{} is registered for the following courses:",
            student.name
        ));
        lines.extend(student.courses.iter().map(|course| format!("- {}", course)));
    }
    lines
}
