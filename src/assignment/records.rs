use crate::error::FlowError;
use log::{trace, warn};
use std::io::BufRead;

pub const DELIMITER: char = ';';
pub const MAX_SUBJECTS_PER_TEACHER: usize = 4;

/// One row of the teachers file: `name;offering;subject;subject;subject;subject`.
///
/// The offering count is kept as read so that a bad value is reported when the
/// source edges are built instead of when the file is loaded.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct TeacherRecord {
    pub name: String,
    pub offering: String,
    pub subject_ids: Vec<String>,
}

impl TeacherRecord {
    pub fn new(name: impl Into<String>, offering: impl Into<String>, subject_ids: &[&str]) -> Self {
        TeacherRecord {
            name: name.into(),
            offering: offering.into(),
            subject_ids: subject_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Number of classes the teacher offers.
    pub fn offering_count(&self) -> Result<u64, FlowError> {
        parse_count(&self.offering).ok_or_else(|| FlowError::malformed(format!("teacher {:?} has offering count {:?}", self.name, self.offering)))
    }
}

/// One row of the subjects file: `id;title;classes;...`.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SubjectRecord {
    pub fields: Vec<String>,
}

impl SubjectRecord {
    pub fn new(fields: &[&str]) -> Self {
        SubjectRecord { fields: fields.iter().map(|s| s.to_string()).collect() }
    }

    #[inline]
    fn field(&self, i: usize) -> &str {
        self.fields.get(i).map_or("", |s| s.trim())
    }

    pub fn id(&self) -> &str {
        self.field(0)
    }

    pub fn title(&self) -> &str {
        self.field(1)
    }

    pub fn class_slots(&self) -> Result<u64, FlowError> {
        parse_count(self.field(2)).ok_or_else(|| FlowError::malformed(format!("subject {:?} has class count {:?}", self.id(), self.field(2))))
    }
}

/// Subject rows with the trailing control row already taken off.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SubjectTable {
    pub subjects: Vec<SubjectRecord>,
    pub total_classes: u64,
}

impl SubjectTable {
    /// Splits off the last record, whose first non-empty field is the number of
    /// classes across every subject.
    pub fn from_records(mut records: Vec<SubjectRecord>) -> Result<Self, FlowError> {
        let control = records.pop().ok_or_else(|| FlowError::malformed("subject file has no control row"))?;
        let total = control.fields.iter().map(|f| f.trim()).find(|f| !f.is_empty()).unwrap_or("");
        let total_classes = parse_count(total).ok_or_else(|| FlowError::malformed(format!("control row declares {:?} classes", total)))?;

        Ok(SubjectTable { subjects: records, total_classes })
    }
}

fn parse_count(field: &str) -> Option<u64> {
    field.trim().parse().ok()
}

fn split_line(line: &str) -> Vec<String> {
    line.trim_end_matches('\r').split(DELIMITER).map(|f| f.trim().to_string()).collect()
}

// data rows only: the header line and blank lines are dropped
fn data_rows<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>, FlowError> {
    let mut rows = Vec::new();
    for line in reader.lines().skip(1) {
        let fields = split_line(&line?);
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        trace!("row {:?}", fields);
        rows.push(fields);
    }
    Ok(rows)
}

pub fn read_teachers<R: BufRead>(reader: R) -> Result<Vec<TeacherRecord>, FlowError> {
    let mut teachers = Vec::new();
    for mut fields in data_rows(reader)? {
        if fields[0].is_empty() {
            warn!("skipping teacher row without a name: {:?}", fields);
            continue;
        }
        fields.resize(2 + MAX_SUBJECTS_PER_TEACHER, String::new());

        let subject_ids = fields.drain(2..2 + MAX_SUBJECTS_PER_TEACHER).filter(|s| !s.is_empty()).collect();
        let offering = fields.swap_remove(1);
        let name = fields.swap_remove(0);
        teachers.push(TeacherRecord { name, offering, subject_ids });
    }
    Ok(teachers)
}

pub fn read_subjects<R: BufRead>(reader: R) -> Result<SubjectTable, FlowError> {
    let records = data_rows(reader)?.into_iter().map(|fields| SubjectRecord { fields }).collect();
    SubjectTable::from_records(records)
}
