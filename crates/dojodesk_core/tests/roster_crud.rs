use chrono::{NaiveDate, NaiveDateTime};
use dojodesk_core::{
    ClassSessionPatch, NewClassSession, NewStudent, RosterError, RosterStore,
    StudentPatch, StudentValidationError,
};
use std::collections::HashSet;
use uuid::Uuid;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .unwrap()
}

fn student(name: &str) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
        rank: "Blue".to_string(),
        active: true,
    }
}

fn class(title: &str) -> NewClassSession {
    NewClassSession {
        title: title.to_string(),
        scheduled_at: at(31, 18),
        instructor: "Carlos".to_string(),
    }
}

#[test]
fn add_student_returns_record_with_given_fields() {
    let mut roster = RosterStore::new();
    let ana = roster
        .add_student(NewStudent {
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            rank: "Blue".to_string(),
            active: true,
        })
        .unwrap();

    assert!(!ana.id.is_nil());
    assert_eq!(ana.name, "Ana");
    assert_eq!(ana.email, "a@x.com");
    assert_eq!(ana.rank, "Blue");
    assert!(ana.active);
    assert_eq!(roster.list_students().len(), 1);
    assert_eq!(roster.get_student(ana.id), Some(&ana));
}

#[test]
fn student_ids_are_unique_across_many_adds() {
    let mut roster = RosterStore::new();
    let ids = (0..200)
        .map(|index| roster.add_student(student(&format!("S{index}"))).unwrap().id)
        .collect::<HashSet<_>>();
    assert_eq!(ids.len(), 200);
}

#[test]
fn lists_keep_insertion_order_after_removal() {
    let mut roster = RosterStore::new();
    let a = roster.add_student(student("A")).unwrap();
    let b = roster.add_student(student("B")).unwrap();
    let c = roster.add_student(student("C")).unwrap();

    roster.remove_student(b.id).unwrap();
    let names = roster
        .list_students()
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["A", "C"]);
    assert_eq!(roster.list_students()[0].id, a.id);
    assert_eq!(roster.list_students()[1].id, c.id);
}

#[test]
fn update_student_merges_only_present_fields() {
    let mut roster = RosterStore::new();
    let ana = roster.add_student(student("Ana")).unwrap();

    let updated = roster
        .update_student(
            ana.id,
            &StudentPatch {
                rank: Some("Purple".to_string()),
                active: Some(false),
                ..StudentPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.id, ana.id);
    assert_eq!(updated.name, "Ana");
    assert_eq!(updated.email, ana.email);
    assert_eq!(updated.rank, "Purple");
    assert!(!updated.active);
    assert_eq!(roster.get_student(ana.id), Some(&updated));
}

#[test]
fn update_with_blank_name_is_rejected_without_change() {
    let mut roster = RosterStore::new();
    let ana = roster.add_student(student("Ana")).unwrap();

    let err = roster
        .update_student(
            ana.id,
            &StudentPatch {
                name: Some(" ".to_string()),
                rank: Some("Black".to_string()),
                ..StudentPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(
        err,
        RosterError::InvalidStudent(StudentValidationError::BlankName)
    );
    assert_eq!(roster.get_student(ana.id), Some(&ana));
}

#[test]
fn unknown_ids_leave_both_collections_unchanged() {
    let mut roster = RosterStore::new();
    let ana = roster.add_student(student("Ana")).unwrap();
    let fundamentals = roster.add_class(class("Fundamentals")).unwrap();
    roster.toggle_attendance(fundamentals.id, ana.id).unwrap();

    let students_before = roster.list_students().to_vec();
    let classes_before = roster.list_classes().to_vec();
    let missing = Uuid::new_v4();

    assert_eq!(
        roster
            .update_student(
                missing,
                &StudentPatch {
                    name: Some("Ghost".to_string()),
                    ..StudentPatch::default()
                }
            )
            .unwrap_err(),
        RosterError::StudentNotFound(missing)
    );
    assert_eq!(
        roster
            .update_class(
                missing,
                &ClassSessionPatch {
                    title: Some("Ghost".to_string()),
                    ..ClassSessionPatch::default()
                }
            )
            .unwrap_err(),
        RosterError::ClassNotFound(missing)
    );
    assert!(roster.remove_student(missing).is_err());
    assert!(roster.remove_class(missing).is_err());

    assert_eq!(roster.list_students(), students_before.as_slice());
    assert_eq!(roster.list_classes(), classes_before.as_slice());
}

#[test]
fn add_class_starts_with_no_attendees() {
    let mut roster = RosterStore::new();
    let fundamentals = roster.add_class(class("Fundamentals")).unwrap();

    assert!(fundamentals.attendee_ids.is_empty());
    assert_eq!(fundamentals.instructor, "Carlos");
    assert_eq!(fundamentals.scheduled_at, at(31, 18));
    assert_eq!(roster.class_count(), 1);
}

#[test]
fn toggle_attendance_twice_restores_membership() {
    let mut roster = RosterStore::new();
    let ana = roster.add_student(student("Ana")).unwrap();
    let fundamentals = roster.add_class(class("Fundamentals")).unwrap();

    assert!(roster.toggle_attendance(fundamentals.id, ana.id).unwrap());
    assert_eq!(
        roster.get_class(fundamentals.id).unwrap().attendee_ids,
        vec![ana.id]
    );

    assert!(!roster.toggle_attendance(fundamentals.id, ana.id).unwrap());
    assert!(roster
        .get_class(fundamentals.id)
        .unwrap()
        .attendee_ids
        .is_empty());
}

#[test]
fn toggle_attendance_rejects_unknown_class_or_student() {
    let mut roster = RosterStore::new();
    let ana = roster.add_student(student("Ana")).unwrap();
    let fundamentals = roster.add_class(class("Fundamentals")).unwrap();
    let missing = Uuid::new_v4();

    assert_eq!(
        roster.toggle_attendance(missing, ana.id).unwrap_err(),
        RosterError::ClassNotFound(missing)
    );
    assert_eq!(
        roster.toggle_attendance(fundamentals.id, missing).unwrap_err(),
        RosterError::StudentNotFound(missing)
    );
    assert!(roster
        .get_class(fundamentals.id)
        .unwrap()
        .attendee_ids
        .is_empty());
}

#[test]
fn remove_student_cascades_into_every_class() {
    let mut roster = RosterStore::new();
    let ana = roster.add_student(student("Ana")).unwrap();
    let bruno = roster.add_student(student("Bruno")).unwrap();
    let morning = roster.add_class(class("Morning")).unwrap();
    let evening = roster.add_class(class("Evening")).unwrap();
    roster.toggle_attendance(morning.id, ana.id).unwrap();
    roster.toggle_attendance(morning.id, bruno.id).unwrap();
    roster.toggle_attendance(evening.id, ana.id).unwrap();

    let removed = roster.remove_student(ana.id).unwrap();
    assert_eq!(removed.id, ana.id);

    assert!(roster.list_students().iter().all(|s| s.id != ana.id));
    assert!(roster
        .list_classes()
        .iter()
        .all(|c| !c.attendee_ids.contains(&ana.id)));
    assert_eq!(
        roster.get_class(morning.id).unwrap().attendee_ids,
        vec![bruno.id]
    );
}

#[test]
fn update_class_keeps_attendees_and_remove_class_keeps_students() {
    let mut roster = RosterStore::new();
    let ana = roster.add_student(student("Ana")).unwrap();
    let fundamentals = roster.add_class(class("Fundamentals")).unwrap();
    roster.toggle_attendance(fundamentals.id, ana.id).unwrap();

    let updated = roster
        .update_class(
            fundamentals.id,
            &ClassSessionPatch {
                scheduled_at: Some(at(30, 19)),
                ..ClassSessionPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.title, "Fundamentals");
    assert_eq!(updated.scheduled_at, at(30, 19));
    assert_eq!(updated.attendee_ids, vec![ana.id]);

    roster.remove_class(fundamentals.id).unwrap();
    assert_eq!(roster.class_count(), 0);
    assert_eq!(roster.student_count(), 1);
}
