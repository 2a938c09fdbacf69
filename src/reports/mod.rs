//! 报表计算
//!
//! 纯函数，输入是已经加载好的集合，不做任何网络访问。
//! 服务层负责取数与降级，这里只负责统计、筛选、排序和分页。

pub mod attendance;
pub mod class_performance;
pub mod dashboard;
pub mod listing;
pub mod rollups;
pub mod visibility;

pub use attendance::{analyze_class_attendance, summarize_attendance};
pub use class_performance::build_class_report;
pub use dashboard::{build_hr_dashboard, build_teacher_dashboard};
pub use listing::{list_students, list_teachers, paginate};
pub use visibility::{can_view_student, visible_students};
