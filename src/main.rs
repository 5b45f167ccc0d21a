use class_assignment::assignment::{assign, read_subjects, read_teachers};
use class_assignment::FlowError;
use log::error;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

const DEFAULT_TEACHERS: &str = "dataset/teachers_toy.csv";
const DEFAULT_SUBJECTS: &str = "dataset/subjects_toy.csv";

fn run(teachers_file: &str, subjects_file: &str) -> Result<(), FlowError> {
    let teachers = read_teachers(BufReader::new(File::open(teachers_file)?))?;
    let subjects = read_subjects(BufReader::new(File::open(subjects_file)?))?;
    let total_classes = subjects.total_classes;

    let assignment = assign(teachers, subjects)?;
    println!("{}", assignment);
    if assignment.total_flow < total_classes {
        println!("unassigned: {}", total_classes - assignment.total_flow);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let teachers_file = args.get(1).map_or(DEFAULT_TEACHERS, String::as_str);
    let subjects_file = args.get(2).map_or(DEFAULT_SUBJECTS, String::as_str);

    match run(teachers_file, subjects_file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
