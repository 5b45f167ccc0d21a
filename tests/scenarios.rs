use class_assignment::assignment::{assign, AssignmentBuilder, SubjectRecord, SubjectTable, TeacherRecord};
use class_assignment::maximum_flow::capacity::Capacity;
use class_assignment::maximum_flow::edmonds_karp::EdmondsKarp;
use class_assignment::maximum_flow::graph::FlowNetwork;
use class_assignment::maximum_flow::MaximumFlowSolver;
use class_assignment::FlowError;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn subjects(rows: &[(&str, &str)]) -> SubjectTable {
    let subjects: Vec<_> = rows.iter().map(|&(id, classes)| SubjectRecord::new(&[id, id, classes])).collect();
    let total_classes = subjects.iter().map(|s| s.class_slots().unwrap()).sum();
    SubjectTable { subjects, total_classes }
}

#[test]
fn two_teachers_share_one_subject() {
    init();
    // 0: source, 1-2: teachers, 3: subject, 4: sink
    let mut network: FlowNetwork<u64> = FlowNetwork::new(5);
    network.add_edge(0, 1, Capacity::Finite(2)).unwrap();
    network.add_edge(0, 2, Capacity::Finite(1)).unwrap();
    network.add_edge(1, 3, Capacity::Infinite).unwrap();
    network.add_edge(2, 3, Capacity::Infinite).unwrap();
    network.add_edge(3, 4, Capacity::Finite(2)).unwrap();

    let flow = EdmondsKarp::default().solve(0, 4, &mut network).unwrap();

    assert_eq!(flow, 2);
    let split = network.get_edge(1, 3).unwrap().flow + network.get_edge(2, 3).unwrap().flow;
    assert_eq!(split, 2);
    assert!(network.get_edge(3, 4).unwrap().flow <= 2);
    assert_eq!(network.inflow(4), 2);
}

#[test]
fn teacher_offering_nothing_gets_nothing() {
    init();
    let teachers = vec![TeacherRecord::new("Ana", "0", &["MAT"]), TeacherRecord::new("Bruno", "1", &["MAT"])];
    let assignment = assign(teachers, subjects(&[("MAT", "5")])).unwrap();

    assert_eq!(assignment.classes_of_teacher(1), 0);
    assert_eq!(assignment.classes_of_teacher(2), 1);
    assert_eq!(assignment.total_flow, 1);
}

#[test]
fn subject_without_classes_gets_nothing() {
    init();
    let teachers = vec![TeacherRecord::new("Ana", "4", &["MAT", "FIS"])];
    let assignment = assign(teachers, subjects(&[("MAT", "0"), ("FIS", "1")])).unwrap();

    assert_eq!(assignment.classes_of_subject(2), 0);
    assert_eq!(assignment.classes_of_subject(3), 1);
    assert_eq!(assignment.total_flow, 1);
}

#[test]
fn non_numeric_offering_is_rejected() {
    init();
    let teachers = vec![TeacherRecord::new("Ana", "dois", &["MAT"])];
    let mut builder = AssignmentBuilder::index(teachers, subjects(&[("MAT", "2")]));

    let err = builder.connect_source().unwrap_err();
    assert!(matches!(err, FlowError::MalformedRecord { .. }));
    assert!(builder.network().get_edge(builder.source(), 1).is_none());
    assert_eq!(builder.network().num_edges(), 0);
}

#[test]
fn control_total_must_match_subjects() {
    init();
    let mut table = subjects(&[("MAT", "2"), ("FIS", "1")]);
    table.total_classes = 2;
    let mut builder = AssignmentBuilder::index(vec![TeacherRecord::new("Ana", "1", &["MAT"])], table);

    builder.connect_source().unwrap();
    assert!(matches!(builder.connect_sink(), Err(FlowError::MalformedRecord { .. })));
}

#[test]
fn disconnected_network_has_zero_flow() {
    init();
    let teachers = vec![TeacherRecord::new("Ana", "3", &[])];
    let assignment = assign(teachers, subjects(&[("MAT", "2")])).unwrap();

    assert_eq!(assignment.total_flow, 0);
    assert!(assignment.allocations.is_empty());
}

#[test]
fn allocations_respect_both_ends() {
    init();
    let teachers = vec![
        TeacherRecord::new("Ana", "2", &["MAT", "FIS"]),
        TeacherRecord::new("Bruno", "3", &["FIS", "QUI"]),
        TeacherRecord::new("Carla", "1", &["MAT", "QUI", "FIS"]),
    ];
    let table = subjects(&[("MAT", "1"), ("FIS", "2"), ("QUI", "4")]);
    let offering: Vec<u64> = teachers.iter().map(|t| t.offering_count().unwrap()).collect();
    let slots: Vec<u64> = table.subjects.iter().map(|s| s.class_slots().unwrap()).collect();

    let assignment = assign(teachers, table).unwrap();

    assert_eq!(assignment.total_flow, 6);
    for (i, &capacity) in offering.iter().enumerate() {
        assert!(assignment.classes_of_teacher(i + 1) <= capacity);
    }
    for (j, &capacity) in slots.iter().enumerate() {
        assert!(assignment.classes_of_subject(4 + j) <= capacity);
    }
    assert!(assignment.allocations.iter().all(|a| a.classes > 0));
    assert_eq!(assignment.allocations.iter().map(|a| a.classes).sum::<u64>(), assignment.total_flow);
}
