//! Terminal output formatting
//!
//! Formats students and file metadata for terminal output in table and
//! detail views.

use crate::config::Settings;
use crate::models::Student;
use crate::storage::FileInfo;

// Column widths count characters, not bytes; names may be Han text.
fn width_of(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, width: usize) -> String {
    let len = width_of(s);
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

/// Format a list of students as a table, one row per student
pub fn format_student_list(students: &[&Student]) -> String {
    if students.is_empty() {
        return "No students found.".to_string();
    }

    // Calculate column widths
    let id_width = students
        .iter()
        .map(|s| width_of(s.id()))
        .max()
        .unwrap_or(2)
        .max(2);
    let name_width = students
        .iter()
        .map(|s| width_of(s.name()))
        .max()
        .unwrap_or(4)
        .max(4);
    let class_width = students
        .iter()
        .map(|s| width_of(s.class_name()))
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{}  {}  {:<6}  {:>3}  {}  {}\n",
        pad("ID", id_width),
        pad("Name", name_width),
        "Gender",
        "Age",
        pad("Class", class_width),
        "Contact",
    ));
    output.push_str(&format!(
        "{}  {}  {:-<6}  {:->3}  {}  {:-<10}\n",
        "-".repeat(id_width),
        "-".repeat(name_width),
        "",
        "",
        "-".repeat(class_width),
        "",
    ));

    for student in students {
        output.push_str(&format!(
            "{}  {}  {:<6}  {:>3}  {}  {}\n",
            pad(student.id(), id_width),
            pad(student.name(), name_width),
            student.gender().as_str(),
            student.age(),
            pad(student.class_name(), class_width),
            student.contact(),
        ));
    }

    output.push_str(&format!("\nTotal: {} students\n", students.len()));
    output
}

/// Format a single student's details
pub fn format_student_details(student: &Student) -> String {
    let mut output = String::new();

    output.push_str(&format!("Student: {}\n", student.name()));
    output.push_str(&format!("  ID:      {}\n", student.id()));
    output.push_str(&format!("  Gender:  {}\n", student.gender()));
    output.push_str(&format!("  Age:     {}\n", student.age()));
    output.push_str(&format!("  Class:   {}\n", student.class_name()));
    output.push_str(&format!("  Contact: {}\n", student.contact()));

    output
}

/// Format the per-class headcounts
pub fn format_class_summary(classes: &[(String, usize)], total: usize) -> String {
    if classes.is_empty() {
        return "No classes found.".to_string();
    }

    let class_width = classes
        .iter()
        .map(|(name, _)| width_of(name))
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!("{}  {:>8}\n", pad("Class", class_width), "Students"));
    output.push_str(&format!(
        "{}  {:->8}\n",
        "-".repeat(class_width),
        "",
    ));

    for (name, count) in classes {
        output.push_str(&format!("{}  {:>8}\n", pad(name, class_width), count));
    }

    output.push_str(&format!(
        "{}  {:->8}\n",
        "-".repeat(class_width),
        "",
    ));
    output.push_str(&format!("{}  {:>8}\n", pad("TOTAL", class_width), total));
    output
}

/// Format the dataset file's metadata
pub fn format_file_info(info: &FileInfo, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Data file: {}\n", info.path.display()));
    if !info.exists {
        output.push_str("  Status: not created yet\n");
        return output;
    }

    output.push_str(&format!("  Size:     {} bytes\n", info.size));
    match &info.last_modified {
        Some(modified) => output.push_str(&format!(
            "  Modified: {}\n",
            modified.format(&settings.date_format)
        )),
        None => output.push_str("  Modified: unknown\n"),
    }

    output
}
