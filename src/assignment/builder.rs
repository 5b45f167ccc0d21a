use crate::assignment::records::{SubjectRecord, SubjectTable, TeacherRecord};
use crate::assignment::result::Assignment;
use crate::error::FlowError;
use crate::maximum_flow::capacity::Capacity;
use crate::maximum_flow::edmonds_karp::EdmondsKarp;
use crate::maximum_flow::graph::FlowNetwork;
use crate::maximum_flow::MaximumFlowSolver;
use log::{info, warn};
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

/// Lays teachers and subjects out as a source-teacher-subject-sink network.
///
/// Vertex `0` is the source, `1..=T` are the teachers in record order,
/// `T+1..=T+S` are the subjects in record order and `T+S+1` is the sink.
pub struct AssignmentBuilder {
    network: FlowNetwork<u64>,
    num_teachers: usize,
    num_subjects: usize,
    total_classes: u64,
    teachers_index: BTreeMap<usize, TeacherRecord>,
    subjects_index: BTreeMap<usize, SubjectRecord>,
    subject_vertices: HashMap<String, usize>,
}

impl AssignmentBuilder {
    pub fn index(teachers: Vec<TeacherRecord>, subjects: SubjectTable) -> Self {
        let num_teachers = teachers.len();
        let num_subjects = subjects.subjects.len();
        let network = FlowNetwork::new(num_teachers + num_subjects + 2);

        let teachers_index: BTreeMap<_, _> = teachers.into_iter().enumerate().map(|(i, t)| (i + 1, t)).collect();
        let subjects_index: BTreeMap<_, _> = subjects.subjects.into_iter().enumerate().map(|(j, s)| (num_teachers + 1 + j, s)).collect();

        let mut subject_vertices: HashMap<String, usize> = HashMap::with_capacity(num_subjects);
        for (&vertex, subject) in subjects_index.iter() {
            if subject_vertices.contains_key(subject.id()) {
                warn!("subject {:?} is declared more than once, vertex {} is unreachable", subject.id(), vertex);
                continue;
            }
            subject_vertices.insert(subject.id().to_string(), vertex);
        }

        info!("indexed {} teachers and {} subjects into {} vertices", num_teachers, num_subjects, network.num_nodes());
        AssignmentBuilder {
            network,
            num_teachers,
            num_subjects,
            total_classes: subjects.total_classes,
            teachers_index,
            subjects_index,
            subject_vertices,
        }
    }

    #[inline]
    pub fn source(&self) -> usize {
        0
    }

    #[inline]
    pub fn sink(&self) -> usize {
        self.network.num_nodes() - 1
    }

    pub fn teacher_vertices(&self) -> Range<usize> {
        1..self.num_teachers + 1
    }

    pub fn subject_vertices(&self) -> Range<usize> {
        self.num_teachers + 1..self.num_teachers + self.num_subjects + 1
    }

    pub fn subject_vertex(&self, subject_id: &str) -> Option<usize> {
        self.subject_vertices.get(subject_id).copied()
    }

    pub fn teachers_index(&self) -> &BTreeMap<usize, TeacherRecord> {
        &self.teachers_index
    }

    pub fn subjects_index(&self) -> &BTreeMap<usize, SubjectRecord> {
        &self.subjects_index
    }

    pub fn network(&self) -> &FlowNetwork<u64> {
        &self.network
    }

    /// Adds `source -> teacher` with the teacher's offering count as capacity.
    /// Every count is checked before the first edge is added.
    pub fn connect_source(&mut self) -> Result<(), FlowError> {
        let capacities = self.teachers_index.iter().map(|(&vertex, teacher)| teacher.offering_count().map(|c| (vertex, c))).collect::<Result<Vec<_>, FlowError>>()?;
        if capacities.iter().try_fold(0u64, |sum, &(_, c)| sum.checked_add(c)).is_none() {
            return Err(FlowError::malformed("teacher offering counts overflow when added together"));
        }

        let source = self.source();
        for (teacher, capacity) in capacities {
            self.network.add_edge(source, teacher, Capacity::Finite(capacity))?;
        }
        Ok(())
    }

    /// Adds `subject -> sink` with the subject's class count as capacity, one
    /// count per subject in index order.
    pub fn connect_sink(&mut self) -> Result<(), FlowError> {
        let capacities = self.subjects_index.values().map(SubjectRecord::class_slots).collect::<Result<Vec<_>, FlowError>>()?;
        let declared = capacities
            .iter()
            .try_fold(0u64, |sum, &c| sum.checked_add(c))
            .ok_or_else(|| FlowError::malformed("subject class counts overflow when added together"))?;
        if declared != self.total_classes {
            return Err(FlowError::malformed(format!("subjects declare {} classes but the control row declares {}", declared, self.total_classes)));
        }

        let sink = self.sink();
        for (subject, capacity) in self.subject_vertices().zip(capacities) {
            self.network.add_edge(subject, sink, Capacity::Finite(capacity))?;
        }
        Ok(())
    }

    /// Adds an unbounded `teacher -> subject` edge for every subject a teacher teaches.
    pub fn connect_teachers_to_subjects(&mut self) -> Result<(), FlowError> {
        let mut edges = Vec::new();
        for (&teacher, record) in self.teachers_index.iter() {
            for subject_id in record.subject_ids.iter() {
                let subject = self
                    .subject_vertex(subject_id)
                    .ok_or_else(|| FlowError::malformed(format!("teacher {:?} teaches unknown subject {:?}", record.name, subject_id)))?;
                edges.push((teacher, subject));
            }
        }

        for (teacher, subject) in edges {
            self.network.add_edge(teacher, subject, Capacity::Infinite)?;
        }
        Ok(())
    }

    pub fn solve<S>(mut self, solver: &mut S) -> Result<Assignment, FlowError>
    where
        S: MaximumFlowSolver<u64>,
    {
        let (source, sink) = (self.source(), self.sink());
        let total_flow = solver.solve(source, sink, &mut self.network)?;
        info!("assigned {} of {} classes", total_flow, self.total_classes);

        Ok(Assignment::extract(&self.network, total_flow, self.teachers_index, self.subjects_index))
    }
}

/// Builds the full network from loaded records and solves it with Edmonds-Karp.
pub fn assign(teachers: Vec<TeacherRecord>, subjects: SubjectTable) -> Result<Assignment, FlowError> {
    let mut builder = AssignmentBuilder::index(teachers, subjects);
    builder.connect_source()?;
    builder.connect_sink()?;
    builder.connect_teachers_to_subjects()?;
    builder.solve(&mut EdmondsKarp::default())
}
