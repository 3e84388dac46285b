//! Student CLI commands
//!
//! Implements CLI commands for managing student records.

use clap::Subcommand;

use crate::display::{format_class_summary, format_student_details, format_student_list};
use crate::error::{RosterError, RosterResult};
use crate::models::{StudentRecord, StudentUpdate};
use crate::services::StudentService;

/// Student subcommands
#[derive(Subcommand)]
pub enum StudentCommands {
    /// Add a new student
    Add {
        /// Student id (6-20 digits)
        id: String,
        /// Student name
        name: String,
        /// Gender (male or female)
        #[arg(short, long)]
        gender: String,
        /// Age (15-49)
        #[arg(short, long)]
        age: i64,
        /// Class name
        #[arg(short, long)]
        class: String,
        /// Phone number or email address
        #[arg(long)]
        contact: String,
    },
    /// Show a student's details
    Show {
        /// Student id
        id: String,
    },
    /// List all students
    List,
    /// Search students by name or class
    Search {
        /// Name fragment (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,
        /// Exact class name
        #[arg(short, long)]
        class: Option<String>,
    },
    /// Update a student's fields
    Update {
        /// Student id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New gender (male or female)
        #[arg(short, long)]
        gender: Option<String>,
        /// New age
        #[arg(short, long)]
        age: Option<i64>,
        /// New class name
        #[arg(short, long)]
        class: Option<String>,
        /// New phone number or email address
        #[arg(long)]
        contact: Option<String>,
    },
    /// Delete students by id
    Delete {
        /// One or more student ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Delete every student in a class
    DeleteClass {
        /// Class name
        class: String,
    },
    /// Show the total number of students
    Count,
    /// List classes with their headcounts
    Classes,
}

/// Handle a student command
pub fn handle_student_command(
    service: &mut StudentService,
    cmd: StudentCommands,
) -> RosterResult<()> {
    match cmd {
        StudentCommands::Add {
            id,
            name,
            gender,
            age,
            class,
            contact,
        } => {
            let message = service.add(StudentRecord {
                student_id: id,
                name,
                gender,
                age,
                class_name: class,
                contact,
            })?;
            println!("{}", message);
        }

        StudentCommands::Show { id } => {
            let student = service.get(&id)?;
            print!("{}", format_student_details(student));
        }

        StudentCommands::List => {
            print!("{}", format_student_list(&service.list_all()));
        }

        StudentCommands::Search { name, class } => {
            let results = match (name, class) {
                (Some(name), None) => service.search_by_name(&name),
                (None, Some(class)) => service.search_by_class(&class),
                _ => {
                    return Err(RosterError::InvalidOperation(
                        "use exactly one of --name or --class".into(),
                    ));
                }
            };
            print!("{}", format_student_list(&results));
        }

        StudentCommands::Update {
            id,
            name,
            gender,
            age,
            class,
            contact,
        } => {
            let update = StudentUpdate {
                name,
                gender,
                age,
                class_name: class,
                contact,
            };
            let message = service.update(&id, &update)?;
            println!("{}", message);
        }

        StudentCommands::Delete { ids } => {
            if ids.len() == 1 {
                let message = service.delete(&ids[0])?;
                println!("{}", message);
            } else {
                let (_, message) = service.delete_batch(&ids)?;
                println!("{}", message);
            }
        }

        StudentCommands::DeleteClass { class } => {
            let (_, message) = service.delete_by_class(&class)?;
            println!("{}", message);
        }

        StudentCommands::Count => {
            println!("{} students", service.count());
        }

        StudentCommands::Classes => {
            let classes: Vec<(String, usize)> = service
                .class_list()
                .into_iter()
                .map(|name| {
                    let count = service.count_in_class(&name);
                    (name, count)
                })
                .collect();
            print!("{}", format_class_summary(&classes, service.count()));
        }
    }

    Ok(())
}
