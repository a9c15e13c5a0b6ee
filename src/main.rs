//! Student Roster entry point
//!
//! Opens the roster, adds the sample class, prints a report and saves.

use student_roster::{ClassReport, LetterGrade, Roster, Settings, StudentRecord};

fn sample_students() -> Vec<StudentRecord> {
    let class = [
        ("S001", "Alice Johnson", 20, "alice@email.com", [95.0, 88.0, 92.0]),
        ("S002", "Bob Smith", 19, "bob@email.com", [78.0, 85.0, 80.0]),
        ("S003", "Charlie Brown", 21, "charlie@email.com", [92.0, 96.0, 89.0]),
        ("S004", "Diana Prince", 20, "diana@email.com", [67.0, 72.0, 75.0]),
        ("S005", "Eve Wilson", 22, "eve@email.com", [45.0, 50.0, 48.0]),
    ];
    class
        .into_iter()
        .map(|(id, name, age, email, [math, science, english])| {
            StudentRecord::new(id, name, age, email).with_grades([
                ("Math", math),
                ("Science", science),
                ("English", english),
            ])
        })
        .collect()
}

fn main() {
    env_logger::init();

    let settings = Settings::from_env();
    log::info!("Student Roster starting (store: {})", settings.store_path().display());

    let mut roster = Roster::open(&settings);
    for student in sample_students() {
        roster.add(student);
    }

    println!("\nDemonstrating search functionality:");
    if let Some(found) = roster.find("S001") {
        println!("Found: {}", found);
    }

    println!("\nStudents with grade '{}':", LetterGrade::A);
    for student in roster.by_letter_grade(LetterGrade::A) {
        println!("  {}", student);
    }

    println!();
    print!("{}", ClassReport::build(&roster, settings.report_top_count));

    match roster.save() {
        Ok(()) => println!("\nData saved to {}", roster.path().display()),
        Err(e) => eprintln!("\nError saving data: {}", e),
    }
}
