//! 列表：搜索、筛选、排序、分页

use std::cmp::Ordering;

use crate::models::common::{PaginatedResponse, PaginationInfo, PaginationQuery};
use crate::models::students::entities::StudentProfile;
use crate::models::students::requests::StudentListParams;
use crate::models::teachers::entities::TeacherProfile;
use crate::models::teachers::requests::TeacherListParams;

pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentSort {
    Name,
    Gpa,
    Attendance,
    EnrollmentDate,
}

impl StudentSort {
    /// 未知或缺省的排序方式按姓名升序
    pub fn parse(sort_by: Option<&str>) -> Self {
        match sort_by.map(str::trim) {
            Some("gpa") => StudentSort::Gpa,
            Some("attendance") => StudentSort::Attendance,
            Some("enrollmentDate" | "enrollment_date") => StudentSort::EnrollmentDate,
            _ => StudentSort::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeacherSort {
    Name,
    Classes,
    HireDate,
}

impl TeacherSort {
    pub fn parse(sort_by: Option<&str>) -> Self {
        match sort_by.map(str::trim) {
            Some("classes") => TeacherSort::Classes,
            Some("hireDate" | "hire_date") => TeacherSort::HireDate,
            _ => TeacherSort::Name,
        }
    }
}

fn normalized_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn matches_search(needle: &str, haystacks: &[&str]) -> bool {
    haystacks.iter().any(|h| h.to_lowercase().contains(needle))
}

fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// 按页切片；页码小于 1 视为 1，页大小限制在 1..=100
pub fn paginate<T>(items: Vec<T>, query: &PaginationQuery) -> PaginatedResponse<T> {
    let page = query.page.max(1);
    let size = query.size.clamp(1, MAX_PAGE_SIZE);
    let total = items.len() as i64;
    let total_pages = (total + size - 1) / size;

    let start = (page - 1).saturating_mul(size).min(total) as usize;
    let items = items.into_iter().skip(start).take(size as usize).collect();

    PaginatedResponse {
        items,
        pagination: PaginationInfo {
            page,
            page_size: size,
            total,
            total_pages,
        },
        data_complete: true,
    }
}

pub fn filter_students(
    students: Vec<StudentProfile>,
    params: &StudentListParams,
) -> Vec<StudentProfile> {
    let search = normalized_search(params.search.as_deref());
    let grade_level = params
        .grade_level
        .as_deref()
        .map(str::trim)
        .filter(|g| !g.is_empty());

    students
        .into_iter()
        .filter(|s| {
            search.as_deref().is_none_or(|needle| {
                matches_search(
                    needle,
                    &[s.full_name(), s.student_id.as_str(), s.profile.email.as_str()],
                )
            })
        })
        .filter(|s| grade_level.is_none_or(|g| s.grade_level == g))
        .collect()
}

pub fn sort_students(students: &mut [StudentProfile], sort: StudentSort) {
    match sort {
        StudentSort::Name => students.sort_by(|a, b| by_name(a.full_name(), b.full_name())),
        StudentSort::Gpa => students.sort_by(|a, b| b.gpa.total_cmp(&a.gpa)),
        StudentSort::Attendance => {
            students.sort_by(|a, b| b.attendance_percentage.cmp(&a.attendance_percentage))
        }
        StudentSort::EnrollmentDate => {
            students.sort_by(|a, b| b.enrollment_date.cmp(&a.enrollment_date))
        }
    }
}

pub fn list_students(
    students: Vec<StudentProfile>,
    params: &StudentListParams,
) -> PaginatedResponse<StudentProfile> {
    let mut students = filter_students(students, params);
    sort_students(&mut students, StudentSort::parse(params.sort_by.as_deref()));
    paginate(students, &params.pagination)
}

pub fn filter_teachers(
    teachers: Vec<TeacherProfile>,
    params: &TeacherListParams,
) -> Vec<TeacherProfile> {
    let search = normalized_search(params.search.as_deref());
    let department = params
        .department
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    teachers
        .into_iter()
        .filter(|t| {
            search.as_deref().is_none_or(|needle| {
                matches_search(
                    needle,
                    &[t.full_name(), t.teacher_id.as_str(), t.profile.email.as_str()],
                )
            })
        })
        .filter(|t| department.is_none_or(|d| t.department.eq_ignore_ascii_case(d)))
        .collect()
}

pub fn sort_teachers(teachers: &mut [TeacherProfile], sort: TeacherSort) {
    match sort {
        TeacherSort::Name => teachers.sort_by(|a, b| by_name(a.full_name(), b.full_name())),
        TeacherSort::Classes => teachers.sort_by(|a, b| b.classes.len().cmp(&a.classes.len())),
        TeacherSort::HireDate => teachers.sort_by(|a, b| b.hire_date.cmp(&a.hire_date)),
    }
}

pub fn list_teachers(
    teachers: Vec<TeacherProfile>,
    params: &TeacherListParams,
) -> PaginatedResponse<TeacherProfile> {
    let mut teachers = filter_teachers(teachers, params);
    sort_teachers(&mut teachers, TeacherSort::parse(params.sort_by.as_deref()));
    paginate(teachers, &params.pagination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn student(id: &str, name: &str, gpa: f64) -> StudentProfile {
        let mut s = StudentProfile::new(id, &format!("{id}@school.test"), name);
        s.student_id = format!("STU-{id}");
        s.gpa = gpa;
        s
    }

    fn page(page: i64, size: i64) -> PaginationQuery {
        PaginationQuery { page, size }
    }

    #[test]
    fn test_second_page_of_forty_five() {
        let items: Vec<i32> = (1..=45).collect();
        let result = paginate(items, &page(2, 20));
        assert_eq!(result.items, (21..=40).collect::<Vec<_>>());
        assert_eq!(result.pagination.total, 45);
        assert_eq!(result.pagination.total_pages, 3);
    }

    #[test]
    fn test_page_beyond_end_is_empty() {
        let items: Vec<i32> = (1..=45).collect();
        let result = paginate(items, &page(4, 20));
        assert!(result.items.is_empty());
        assert_eq!(result.pagination.total_pages, 3);
    }

    #[test]
    fn test_page_and_size_are_clamped() {
        let items: Vec<i32> = (1..=250).collect();
        let result = paginate(items.clone(), &page(0, 500));
        assert_eq!(result.pagination.page, 1);
        assert_eq!(result.pagination.page_size, 100);
        assert_eq!(result.items.len(), 100);

        let result = paginate(items, &page(-3, 0));
        assert_eq!(result.pagination.page_size, 1);
        assert_eq!(result.items, vec![1]);
    }

    #[test]
    fn test_huge_page_number_is_past_the_end() {
        let items: Vec<i32> = (1..=45).collect();
        let result = paginate(items.clone(), &page(i64::MAX, 20));
        assert!(result.items.is_empty());
        assert_eq!(result.pagination.total_pages, 3);

        // (page - 1) * 20 会在 i64 上回绕到 20
        let result = paginate(items, &page(4_611_686_018_427_387_906, 20));
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_empty_listing_has_no_pages() {
        let result = paginate(Vec::<i32>::new(), &PaginationQuery::default());
        assert_eq!(result.pagination.total_pages, 0);
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_search_covers_name_id_and_email() {
        let students = vec![
            student("a1", "Ada Obi", 3.0),
            student("b2", "Bola Ade", 2.0),
            student("c3", "Chi Eze", 1.0),
        ];
        let params = |search: &str| StudentListParams {
            search: Some(search.to_string()),
            ..Default::default()
        };

        assert_eq!(filter_students(students.clone(), &params("ADE")).len(), 1);
        assert_eq!(filter_students(students.clone(), &params("stu-c3")).len(), 1);
        assert_eq!(filter_students(students.clone(), &params("@school")).len(), 3);
        assert_eq!(filter_students(students, &params("  ")).len(), 3);
    }

    #[test]
    fn test_grade_level_filter() {
        let mut eleventh = student("b2", "Bola", 2.0);
        eleventh.grade_level = "11".into();
        let students = vec![student("a1", "Ada", 3.0), eleventh];
        let params = StudentListParams {
            grade_level: Some("11".into()),
            ..Default::default()
        };
        let result = filter_students(students, &params);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id(), "b2");
    }

    #[test]
    fn test_student_sorts() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut students = vec![
            student("a1", "charlie", 2.5),
            student("b2", "Alice", 3.5),
            student("c3", "bob", 1.5),
        ];
        for (i, s) in students.iter_mut().enumerate() {
            s.attendance_percentage = 70 + i as i32 * 10;
            s.enrollment_date = base + Duration::days(i as i64);
        }

        let names = |list: &[StudentProfile]| {
            list.iter().map(|s| s.id().to_string()).collect::<Vec<_>>()
        };

        let mut list = students.clone();
        sort_students(&mut list, StudentSort::parse(None));
        assert_eq!(names(&list), vec!["b2", "c3", "a1"]);

        sort_students(&mut list, StudentSort::parse(Some("gpa")));
        assert_eq!(names(&list), vec!["b2", "a1", "c3"]);

        sort_students(&mut list, StudentSort::parse(Some("attendance")));
        assert_eq!(names(&list), vec!["c3", "b2", "a1"]);

        sort_students(&mut list, StudentSort::parse(Some("enrollmentDate")));
        assert_eq!(names(&list), vec!["c3", "b2", "a1"]);

        assert_eq!(StudentSort::parse(Some("shoeSize")), StudentSort::Name);
    }

    #[test]
    fn test_teacher_listing() {
        let mut t1 = TeacherProfile::new("t1", "zed@school.test", "Zed");
        t1.department = "Science".into();
        t1.classes = vec!["10A".into(), "10B".into()];
        let mut t2 = TeacherProfile::new("t2", "amy@school.test", "Amy");
        t2.department = "Arts".into();
        t2.classes = vec!["11A".into()];
        let mut t3 = TeacherProfile::new("t3", "ben@school.test", "Ben");
        t3.department = "Science".into();

        let all = vec![t1, t2, t3];

        let by_classes = list_teachers(
            all.clone(),
            &TeacherListParams {
                sort_by: Some("classes".into()),
                ..Default::default()
            },
        );
        assert_eq!(by_classes.items[0].id(), "t1");
        assert_eq!(by_classes.items[2].id(), "t3");

        let science = list_teachers(
            all,
            &TeacherListParams {
                department: Some("Science".into()),
                ..Default::default()
            },
        );
        assert_eq!(science.pagination.total, 2);
        assert_eq!(science.items[0].id(), "t3");
    }
}
