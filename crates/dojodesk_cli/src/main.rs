//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `dojodesk_core` linkage.
//! - Run one deterministic roster scenario and print its summary.

use dojodesk_core::{Academy, ClassForm, LoginForm, StudentForm};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("dojodesk_core ping={}", dojodesk_core::ping());
    println!("dojodesk_core version={}", dojodesk_core::core_version());

    match smoke() {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("dojodesk smoke failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn smoke() -> Result<String, Box<dyn std::error::Error>> {
    let mut academy = Academy::default();
    academy.login(&LoginForm::new("admin", "1234"))?;

    let student = academy.save_student(
        None,
        &StudentForm {
            name: "Smoke Student".to_string(),
            email: "smoke@example.com".to_string(),
            ..StudentForm::default()
        },
    )?;
    let class = academy.save_class(
        None,
        &ClassForm {
            title: "Smoke Class".to_string(),
            scheduled_at: "2025-01-01 10:00".to_string(),
            instructor: "Smoke Coach".to_string(),
        },
    )?;
    academy
        .roster_mut()
        .toggle_attendance(class.id, student.id)?;

    let summary = academy.dashboard();
    let present = academy
        .attendance_sheet(class.id)
        .map(|sheet| sheet.present_count())
        .unwrap_or_default();
    Ok(format!(
        "smoke students={} classes={} present={}",
        summary.student_count, summary.class_count, present
    ))
}
