use std::sync::Arc;

use regman_core::app_ctx::AppContext;
use regman_core::blueprint::Blueprint;
use regman_core::config::reader::ConfigReader;
use regman_core::registry::outcome::Outcome;
use regman_core::registry::RegistrationManager;

const CONFIG: &str = r#"{
  "storage": { "student_file": "students.txt", "course_file": "courses.txt" },
  "auth": { "password_storage": "Plaintext" }
}"#;

async fn load(config_path: &str) -> anyhow::Result<RegistrationManager> {
    let runtime = regman::cli::rt::init();
    let config = ConfigReader::init(runtime.clone()).read(config_path).await?;
    let blueprint = Blueprint::try_from(config)?;
    RegistrationManager::load(Arc::new(AppContext { blueprint, runtime })).await
}

#[tokio::test]
async fn round_trip_on_disk() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("regman.json");
    std::fs::write(&config_path, CONFIG)?;
    let config_path = config_path.to_str().unwrap();

    let mut manager = load(config_path).await?;
    assert_eq!(
        manager.add_student("Ada", "s1", "pw").await?,
        Outcome::StudentAdded("Ada".to_string())
    );
    manager.add_student("Bob", "s2", "").await?;
    manager.add_course("Math", "M101").await?;
    manager.add_course("Art", "A200").await?;
    manager.register("s1", "M101").await?;
    manager.register("s1", "A200").await?;
    manager.register("s2", "A200").await?;

    let students = std::fs::read_to_string(dir.path().join("students.txt"))?;
    insta::assert_snapshot!(students, @r"
    Ada,s1,pw,Math;Art
    Bob,s2,,Art
    ");
    let courses = std::fs::read_to_string(dir.path().join("courses.txt"))?;
    insta::assert_snapshot!(courses, @r"
    Art,A200
    Math,M101
    ");

    let reloaded = load(config_path).await?;
    assert_eq!(
        reloaded.students().collect::<Vec<_>>(),
        manager.students().collect::<Vec<_>>()
    );
    assert_eq!(
        reloaded.courses().collect::<Vec<_>>(),
        manager.courses().collect::<Vec<_>>()
    );
    assert!(reloaded.authenticate_student("s1", "pw").is_some());
    Ok(())
}

#[tokio::test]
async fn legacy_student_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("regman.json");
    std::fs::write(&config_path, CONFIG)?;
    std::fs::write(dir.path().join("students.txt"), "Ada,s1,Math;Art\nBob,s2,\n")?;
    std::fs::write(dir.path().join("courses.txt"), "Math,M101\nArt,A200\n")?;

    let mut manager = load(config_path.to_str().unwrap()).await?;
    assert_eq!(manager.student("s1").unwrap().courses, vec!["Math", "Art"]);
    assert!(manager.authenticate_student("s2", "").is_some());

    // the next save upgrades the file to the four-column layout
    manager.unregister("s1", "M101").await?;
    let students = std::fs::read_to_string(dir.path().join("students.txt"))?;
    assert_eq!(students, "Ada,s1,,Art\nBob,s2,,\n");
    Ok(())
}

#[tokio::test]
async fn malformed_file_is_an_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("regman.json");
    std::fs::write(&config_path, CONFIG)?;
    std::fs::write(dir.path().join("students.txt"), "Ada,s1,pw,Math\nAda\n")?;

    let err = load(config_path.to_str().unwrap()).await.err().unwrap();
    assert!(err.to_string().ends_with("students.txt:2"));
    Ok(())
}
