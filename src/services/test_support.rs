use actix_web::{HttpMessage, HttpRequest, HttpResponse, test, web};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use crate::config::ReportConfig;
use crate::models::attendance::entities::{Attendance, AttendanceStatus};
use crate::models::classes::entities::Class;
use crate::models::grades::entities::{Grade, Term};
use crate::models::students::entities::StudentProfile;
use crate::models::teachers::entities::TeacherProfile;
use crate::models::users::entities::{CurrentUser, UserRole};
use crate::storage::Storage;
use crate::storage::memory_storage::MemoryStorage;

pub fn settings() -> ReportConfig {
    ReportConfig {
        recent_items: 5,
    }
}

pub fn request_as(role: UserRole, uid: &str) -> HttpRequest {
    let req = test::TestRequest::default()
        .app_data(web::Data::new(settings()))
        .to_http_request();
    req.extensions_mut().insert(CurrentUser {
        uid: uid.to_string(),
        email: format!("{uid}@school.test"),
        role,
    });
    req
}

pub fn as_dyn(storage: &Arc<MemoryStorage>) -> Arc<dyn Storage> {
    storage.clone()
}

pub async fn body_json(resp: HttpResponse) -> serde_json::Value {
    let bytes = actix_web::body::to_bytes(resp.into_body())
        .await
        .unwrap_or_default();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, d, 8, 0, 0).unwrap()
}

pub fn student(id: &str, name: &str, class_id: &str) -> StudentProfile {
    let mut s = StudentProfile::new(id, &format!("{id}@school.test"), name);
    s.student_id = format!("S-{id}");
    s.class_id = class_id.to_string();
    s
}

pub fn teacher(id: &str, classes: &[&str]) -> TeacherProfile {
    let mut t = TeacherProfile::new(id, &format!("{id}@school.test"), "Tom Teacher");
    t.teacher_id = format!("T-{id}");
    t.department = "Science".to_string();
    t.classes = classes.iter().map(|c| c.to_string()).collect();
    t
}

pub fn class(id: &str, teacher_id: &str) -> Class {
    let mut c = Class::new(id, id);
    c.teacher_id = teacher_id.to_string();
    c
}

pub fn grade(id: &str, student_id: &str, teacher_id: &str, score: f64) -> Grade {
    let mut g = Grade {
        id: id.to_string(),
        student_id: student_id.to_string(),
        student_name: String::new(),
        teacher_id: teacher_id.to_string(),
        subject: "Math".to_string(),
        term: Term::First,
        year: 2024,
        test1: score,
        test2: score,
        exam: score,
        assignment: score,
        total_score: 0.0,
        letter_grade: String::new(),
        remarks: String::new(),
        created_at: day(1),
        updated_at: day(1),
    };
    g.recalculate();
    g
}

pub fn attendance(
    id: &str,
    student_id: &str,
    class_id: &str,
    d: u32,
    status: AttendanceStatus,
) -> Attendance {
    Attendance {
        id: id.to_string(),
        student_id: student_id.to_string(),
        student_name: String::new(),
        class_id: class_id.to_string(),
        class_name: class_id.to_string(),
        date: day(d),
        status,
        remarks: String::new(),
        recorded_by: "t1".to_string(),
        recorded_at: day(d),
    }
}
