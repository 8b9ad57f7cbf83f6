use std::fs;

use quiz_core::model::{CourseId, ResultRecord, SessionMode};
use quiz_core::time::fixed_now;
use storage::files::QUESTIONS_FILE;
use storage::repository::{QuestionRepository, ResultRepository, StorageError};
use storage::FileRepository;

const TWO_QUESTIONS: &str = r#"[
    {"question": "Default SSH port?", "options": ["21", "22", "80"], "correct": [1]},
    {"question": "Pick the TCP-based protocols", "options": ["HTTP", "DNS over UDP", "SSH"], "correct": [0, 2]}
]"#;

fn write_course(root: &std::path::Path, name: &str, body: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(QUESTIONS_FILE), body).unwrap();
}

#[test]
fn lists_only_directories_with_question_files() {
    let tmp = tempfile::tempdir().unwrap();
    write_course(tmp.path(), "siem", TWO_QUESTIONS);
    write_course(tmp.path(), "network", "[]");
    fs::create_dir_all(tmp.path().join("assets")).unwrap();
    fs::write(tmp.path().join("README.md"), "notes").unwrap();

    let repo = FileRepository::new(tmp.path(), tmp.path().join("results.txt"));
    let courses = repo.list_courses().unwrap();

    let names: Vec<&str> = courses.iter().map(CourseId::as_str).collect();
    assert_eq!(names, vec!["network", "siem"]);
}

#[test]
fn missing_data_dir_lists_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = FileRepository::new(tmp.path().join("nope"), tmp.path().join("results.txt"));
    assert!(repo.list_courses().unwrap().is_empty());
}

#[test]
fn loads_questions_and_distinguishes_missing_from_empty() {
    let tmp = tempfile::tempdir().unwrap();
    write_course(tmp.path(), "siem", TWO_QUESTIONS);
    write_course(tmp.path(), "network", "[]");
    let repo = FileRepository::new(tmp.path(), tmp.path().join("results.txt"));

    let questions = repo
        .load_questions(&CourseId::new("siem").unwrap())
        .unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[1].correct_answers(), vec!["HTTP", "SSH"]);

    let empty = repo
        .load_questions(&CourseId::new("network").unwrap())
        .unwrap();
    assert!(empty.is_empty());

    let err = repo
        .load_questions(&CourseId::new("cloud").unwrap())
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let tmp = tempfile::tempdir().unwrap();
    write_course(tmp.path(), "broken", "{ not json");
    let repo = FileRepository::new(tmp.path(), tmp.path().join("results.txt"));

    let err = repo
        .load_questions(&CourseId::new("broken").unwrap())
        .unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[test]
fn result_log_only_appends() {
    let tmp = tempfile::tempdir().unwrap();
    let log = tmp.path().join("logs").join("results.txt");
    let repo = FileRepository::new(tmp.path(), &log);

    let training = ResultRecord {
        course: CourseId::new("siem").unwrap(),
        mode: SessionMode::Training,
        score: 10,
        total: 10,
        passed: None,
        recorded_at: fixed_now(),
    };
    let exam = ResultRecord {
        mode: SessionMode::Exam,
        score: 37,
        total: 45,
        passed: Some(false),
        ..training.clone()
    };
    repo.append_result(&training).unwrap();
    repo.append_result(&exam).unwrap();

    let contents = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("| siem | Training | 10/10 (100.0%)"));
    assert!(lines[1].ends_with("| siem | Exam | 37/45 (82.2%) | FAILED"));
}
