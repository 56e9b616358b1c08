use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};

use campus_records::models::{CourseRecord, CourseResult, StudentRecord};
use campus_records::{report, searching, snapshot, sorting};

#[derive(Parser)]
#[command(name = "campus-records")]
#[command(about = "Academic record store with indexed lookup and prerequisite analysis", long_about = None)]
struct Cli {
    /// Snapshot file holding the full record set
    #[arg(long, global = true, default_value = "campus-records.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKey {
    Id,
    Name,
    Gpa,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty snapshot file
    Init,
    /// Load a small sample catalog and roster
    Seed,
    /// Add one student
    AddStudent {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        semester: u32,
    },
    /// Import students from a CSV file
    ImportStudents {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Remove a student
    RemoveStudent {
        #[arg(long)]
        id: String,
    },
    /// Add a course to the catalog
    AddCourse {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        credits: u32,
        #[arg(long)]
        department: String,
        #[arg(long)]
        prereq: Vec<String>,
    },
    /// Remove a course from the catalog
    RemoveCourse {
        #[arg(long)]
        code: String,
    },
    /// Record a graded result for a student
    RecordResult {
        #[arg(long)]
        student: String,
        #[arg(long)]
        course: String,
        #[arg(long)]
        score: f64,
    },
    /// List students in a chosen order
    List {
        #[arg(long, value_enum, default_value_t = SortKey::Id)]
        sort_by: SortKey,
        #[arg(long, default_value_t = false)]
        descending: bool,
    },
    /// Search students by name or department
    #[command(group(
        ArgGroup::new("criteria")
            .args(["name", "department"])
            .required(true)
            .multiple(false)
    ))]
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        department: Option<String>,
    },
    /// Show GPA statistics across all students
    Stats,
    /// List every prerequisite reachable from a course
    Prereqs {
        #[arg(long)]
        course: String,
    },
    /// Shortest prerequisite chain between two courses
    Path {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Check the catalog for circular prerequisites
    CheckCycles,
    /// Write a full markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn print_student(student: &StudentRecord) {
    println!(
        "- {} {} ({}, semester {}) GPA {:.2}",
        student.student_id,
        student.name,
        student.department,
        student.semester,
        student.gpa()
    );
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (mut store, mut graph) = snapshot::load(&cli.data)?;
    let mut mutated = false;

    match cli.command {
        Commands::Init => {
            mutated = true;
            println!("Initialized empty snapshot at {}.", cli.data.display());
        }
        Commands::Seed => {
            let catalog = [
                ("CS101", "Object Oriented Programming", 3, "CS", vec![]),
                ("CS201", "Data Structures & Algorithms", 3, "CS", vec![]),
                ("CS202", "Computer Networks", 3, "CS", vec![]),
                ("CS301", "Database Systems", 3, "CS", vec!["CS201", "CS101"]),
                ("CS401", "Web Development", 3, "CS", vec!["CS301", "CS101"]),
            ];
            for (code, name, credits, department, prereqs) in catalog {
                let mut course = CourseRecord::new(code, name, credits, department)?;
                for prereq in prereqs {
                    course.add_prerequisite(prereq);
                }
                graph.add(course)?;
            }

            let roster = [
                ("S001", "Avery Lee", "avery.lee@campus.edu", "555-0100", "CS", 3),
                ("S002", "Jules Moreno", "jules.moreno@campus.edu", "555-0101", "CS", 2),
                ("S003", "Kiara Patel", "kiara.patel@campus.edu", "555-0102", "EE", 4),
            ];
            for (id, name, email, phone, department, semester) in roster {
                store.add(StudentRecord::new(id, name, email, phone, department, semester)?)?;
            }
            mutated = true;
            println!(
                "Seeded {} courses and {} students.",
                graph.len(),
                store.len()
            );
        }
        Commands::AddStudent {
            id,
            name,
            email,
            phone,
            department,
            semester,
        } => {
            store.add(StudentRecord::new(
                id.clone(),
                name,
                email,
                phone,
                department,
                semester,
            )?)?;
            mutated = true;
            println!("Added student {id}.");
        }
        Commands::ImportStudents { csv } => {
            let inserted = snapshot::import_students_csv(&csv, &mut store)?;
            mutated = true;
            println!("Inserted {inserted} students from {}.", csv.display());
        }
        Commands::RemoveStudent { id } => {
            store.remove(&id)?;
            mutated = true;
            println!("Removed student {id}.");
        }
        Commands::AddCourse {
            code,
            name,
            credits,
            department,
            prereq,
        } => {
            let mut course = CourseRecord::new(code.clone(), name, credits, department)?;
            for prerequisite in prereq {
                course.add_prerequisite(prerequisite);
            }
            graph.add(course)?;
            mutated = true;
            println!("Added course {code}.");
        }
        Commands::RemoveCourse { code } => {
            graph.remove(&code)?;
            mutated = true;
            println!("Removed course {code}.");
        }
        Commands::RecordResult {
            student,
            course,
            score,
        } => {
            let record = graph
                .get(&course)
                .with_context(|| format!("course {course} is not in the catalog"))?
                .clone();
            let result = CourseResult::new(&record, score)?;
            let grade = result.grade;
            store.add_result(&student, result)?;
            mutated = true;
            println!(
                "Recorded {} for {student} in {course} (grade {}).",
                score,
                grade.letter()
            );
        }
        Commands::List {
            sort_by,
            descending,
        } => {
            let students = store.all_students();
            if students.is_empty() {
                println!("No students in the system.");
                return Ok(());
            }
            let mut ordered = match sort_by {
                SortKey::Id => students,
                SortKey::Name => sorting::quick_sort_by_name(&students),
                SortKey::Gpa => sorting::merge_sort_by_gpa(&students, !descending),
            };
            // id and name orders come out ascending; flip on request
            if descending && !matches!(sort_by, SortKey::Gpa) {
                ordered.reverse();
            }
            for student in &ordered {
                print_student(student);
            }
        }
        Commands::Search { name, department } => {
            let students = store.all_students();
            let matches: Vec<&StudentRecord> = if let Some(term) = name.as_deref() {
                searching::search_by_name(&students, term)
            } else if let Some(dept) = department.as_deref() {
                searching::search_by_department(&students, dept)
            } else {
                Vec::new()
            };
            if matches.is_empty() {
                println!("No matching students.");
            } else {
                for student in matches {
                    print_student(student);
                }
            }
        }
        Commands::Stats => match store.statistics() {
            None => println!("No students in the system."),
            Some(stats) => print!("{}", report::format_statistics(&stats)),
        },
        Commands::Prereqs { course } => {
            let chain = graph.all_prerequisites(&course);
            if chain.len() <= 1 {
                println!("{course} has no prerequisites.");
            } else {
                println!("{}", chain.join(" -> "));
            }
        }
        Commands::Path { from, to } => {
            let path = graph.shortest_prerequisite_path(&from, &to);
            if path.is_empty() {
                println!("No prerequisite path from {from} to {to}.");
            } else {
                println!("{}", path.join(" -> "));
            }
        }
        Commands::CheckCycles => {
            if graph.has_cycle() {
                println!("Circular prerequisites detected.");
            } else {
                println!("No circular prerequisites.");
            }
        }
        Commands::Report { out } => {
            let rendered = report::build_report(&store, &graph);
            std::fs::write(&out, rendered)?;
            println!("Report written to {}.", out.display());
        }
    }

    if mutated {
        snapshot::save(&cli.data, &store, &graph)?;
    }

    Ok(())
}
