//! Read-only projections for dashboard and attendance views.

use crate::model::class_session::{ClassId, ClassSession};
use crate::model::student::StudentId;
use crate::store::roster_store::RosterStore;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Summary counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub student_count: usize,
    pub class_count: usize,
    pub active_student_count: usize,
}

/// One roster row on the attendance view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRow {
    pub student_id: StudentId,
    pub name: String,
    pub rank: String,
    pub present: bool,
}

/// Attendance view for one class: every student with a presence flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSheet {
    pub class_id: ClassId,
    pub title: String,
    pub scheduled_at: NaiveDateTime,
    /// Roster order, not marking order.
    pub rows: Vec<AttendanceRow>,
}

impl AttendanceSheet {
    pub fn present_count(&self) -> usize {
        self.rows.iter().filter(|row| row.present).count()
    }
}

pub fn dashboard_summary(roster: &RosterStore) -> DashboardSummary {
    DashboardSummary {
        student_count: roster.student_count(),
        class_count: roster.class_count(),
        active_student_count: roster
            .list_students()
            .iter()
            .filter(|student| student.active)
            .count(),
    }
}

/// Builds the attendance sheet, or `None` when the class does not exist.
pub fn attendance_sheet(roster: &RosterStore, class_id: ClassId) -> Option<AttendanceSheet> {
    let class = roster.get_class(class_id)?;
    Some(sheet_for(roster, class))
}

fn sheet_for(roster: &RosterStore, class: &ClassSession) -> AttendanceSheet {
    let rows = roster
        .list_students()
        .iter()
        .map(|student| AttendanceRow {
            student_id: student.id,
            name: student.name.clone(),
            rank: student.rank.clone(),
            present: class.has_attendee(student.id),
        })
        .collect();

    AttendanceSheet {
        class_id: class.id,
        title: class.title.clone(),
        scheduled_at: class.scheduled_at,
        rows,
    }
}
