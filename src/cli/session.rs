use anyhow::Result;
use regman_core::registry::RegistrationManager;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const MAIN_MENU: &str = "\n1. Admin Login\n2. Student Login\n3. Exit\n";
const ADMIN_MENU: &str = "\n1. Add Student\n2. Remove Student\n3. Add Course\n4. Remove Course\n5. Register Student for Course\n6. Unregister Student from Course\n7. View Student\n8. View All Students\n9. View Courses\n10. Logout\n";
const STUDENT_MENU: &str = "\n1. View Available Courses\n2. Register for a Course\n3. Unregister from a Course\n4. View My Profile\n5. Logout\n";
const CHOICE: &str = "Enter your choice: ";
const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

/// Interactive console over any line-oriented input and output.
/// End of input ends the session.
pub struct Session<R, W> {
    manager: RegistrationManager,
    input: R,
    output: W,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(manager: RegistrationManager, input: R, output: W) -> Self {
        Self {
            manager,
            input,
            output,
        }
    }

    pub fn into_parts(self) -> (RegistrationManager, W) {
        (self.manager, self.output)
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.say(MAIN_MENU).await?;
            let Some(choice) = self.prompt(CHOICE).await? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => self.admin_login().await?,
                "2" => self.student_login().await?,
                "3" => return Ok(()),
                _ => self.say(INVALID_CHOICE).await?,
            }
        }
    }

    async fn admin_login(&mut self) -> Result<()> {
        let Some(email) = self.prompt("Enter admin email: ").await? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Enter admin password: ").await? else {
            return Ok(());
        };
        if self.manager.authenticate_admin(&email, &password) {
            log::info!("Admin {} logged in", email);
            self.admin_menu().await
        } else {
            self.say("Invalid admin credentials.").await
        }
    }

    async fn student_login(&mut self) -> Result<()> {
        let Some(student_id) = self.prompt("Enter your student ID: ").await? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Enter your password: ").await? else {
            return Ok(());
        };
        if self
            .manager
            .authenticate_student(&student_id, &password)
            .is_some()
        {
            log::info!("Student {} logged in", student_id);
            self.student_menu(&student_id).await
        } else {
            self.say("Invalid student ID or password.").await
        }
    }

    async fn admin_menu(&mut self) -> Result<()> {
        loop {
            self.say(ADMIN_MENU).await?;
            let Some(choice) = self.prompt(CHOICE).await? else {
                return Ok(());
            };
            let message = match choice.as_str() {
                "1" => {
                    let Some([name, student_id, password]) = self
                        .prompts([
                            "Enter the student name: ",
                            "Enter the student ID: ",
                            "Enter the student password (blank for ID-only login): ",
                        ])
                        .await?
                    else {
                        return Ok(());
                    };
                    self.manager
                        .add_student(&name, &student_id, &password)
                        .await?
                        .to_string()
                }
                "2" => {
                    let Some([student_id]) = self.prompts(["Enter the student ID: "]).await?
                    else {
                        return Ok(());
                    };
                    self.manager.remove_student(&student_id).await?.to_string()
                }
                "3" => {
                    let Some([name, code]) = self
                        .prompts(["Enter the course name: ", "Enter the course code: "])
                        .await?
                    else {
                        return Ok(());
                    };
                    self.manager.add_course(&name, &code).await?.to_string()
                }
                "4" => {
                    let Some([code]) = self.prompts(["Enter the course code: "]).await? else {
                        return Ok(());
                    };
                    self.manager.remove_course(&code).await?.to_string()
                }
                "5" | "6" => {
                    let Some([student_id, code]) = self
                        .prompts(["Enter the student ID: ", "Enter the course code: "])
                        .await?
                    else {
                        return Ok(());
                    };
                    let outcome = if choice == "5" {
                        self.manager.register(&student_id, &code).await?
                    } else {
                        self.manager.unregister(&student_id, &code).await?
                    };
                    outcome.to_string()
                }
                "7" => {
                    let Some([student_id]) = self.prompts(["Enter the student ID: "]).await?
                    else {
                        return Ok(());
                    };
                    self.manager.student_info(&student_id)
                }
                "8" => self.manager.all_students_info(),
                "9" => self.manager.available_courses(),
                "10" => return Ok(()),
                _ => INVALID_CHOICE.to_string(),
            };
            self.say(message).await?;
        }
    }

    async fn student_menu(&mut self, student_id: &str) -> Result<()> {
        loop {
            self.say(STUDENT_MENU).await?;
            let Some(choice) = self.prompt(CHOICE).await? else {
                return Ok(());
            };
            let message = match choice.as_str() {
                "1" => self.manager.available_courses(),
                "2" | "3" => {
                    let Some([code]) = self.prompts(["Enter the course code: "]).await? else {
                        return Ok(());
                    };
                    let outcome = if choice == "2" {
                        self.manager.register(student_id, &code).await?
                    } else {
                        self.manager.unregister(student_id, &code).await?
                    };
                    outcome.to_string()
                }
                "4" => self.manager.student_info(student_id),
                "5" => return Ok(()),
                _ => INVALID_CHOICE.to_string(),
            };
            self.say(message).await?;
        }
    }

    /// Asks each question in turn. `None` once input has ended.
    async fn prompts<const N: usize>(
        &mut self,
        questions: [&str; N],
    ) -> Result<Option<[String; N]>> {
        let mut answers: [String; N] = std::array::from_fn(|_| String::new());
        for (answer, question) in answers.iter_mut().zip(questions) {
            match self.prompt(question).await? {
                Some(line) => *answer = line,
                None => return Ok(None),
            }
        }
        Ok(Some(answers))
    }

    async fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        self.output.write_all(question.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn say<T: AsRef<str>>(&mut self, message: T) -> Result<()> {
        self.output.write_all(message.as_ref().as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }
}
