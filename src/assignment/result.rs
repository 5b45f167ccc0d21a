use crate::assignment::records::{SubjectRecord, TeacherRecord};
use crate::maximum_flow::graph::FlowNetwork;
use std::collections::BTreeMap;
use std::fmt;

/// Classes of one subject given to one teacher.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Allocation {
    pub teacher: usize,
    pub subject: usize,
    pub classes: u64,
}

#[derive(Debug, Clone)]
pub struct Assignment {
    pub total_flow: u64,
    pub allocations: Vec<Allocation>,
    pub teachers_index: BTreeMap<usize, TeacherRecord>,
    pub subjects_index: BTreeMap<usize, SubjectRecord>,
}

impl Assignment {
    pub(crate) fn extract(network: &FlowNetwork<u64>, total_flow: u64, teachers_index: BTreeMap<usize, TeacherRecord>, subjects_index: BTreeMap<usize, SubjectRecord>) -> Self {
        let allocations = network
            .edges_list()
            .filter(|&(from, to, flow)| flow > 0 && teachers_index.contains_key(&from) && subjects_index.contains_key(&to))
            .map(|(teacher, subject, classes)| Allocation { teacher, subject, classes })
            .collect();

        Assignment { total_flow, allocations, teachers_index, subjects_index }
    }

    pub fn teacher_name(&self, vertex: usize) -> Option<&str> {
        self.teachers_index.get(&vertex).map(|t| t.name.as_str())
    }

    pub fn subject_id(&self, vertex: usize) -> Option<&str> {
        self.subjects_index.get(&vertex).map(|s| s.id())
    }

    pub fn classes_of_teacher(&self, vertex: usize) -> u64 {
        self.allocations.iter().filter(|a| a.teacher == vertex).map(|a| a.classes).sum()
    }

    pub fn classes_of_subject(&self, vertex: usize) -> u64 {
        self.allocations.iter().filter(|a| a.subject == vertex).map(|a| a.classes).sum()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for a in self.allocations.iter() {
            let teacher = self.teacher_name(a.teacher).unwrap_or("?");
            let subject = self.subjects_index.get(&a.subject).map_or("?".to_string(), |s| format!("{} {}", s.id(), s.title()).trim().to_string());
            writeln!(f, "{} -> {}: {}", teacher, subject, a.classes)?;
        }
        write!(f, "total: {}", self.total_flow)
    }
}
