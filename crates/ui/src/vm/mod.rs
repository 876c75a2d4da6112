mod dashboard_vm;
mod time_fmt;

pub use dashboard_vm::{DashboardVm, KpiVm, SubjectBarVm, TaskRowVm, exam_hint};
pub use time_fmt::{format_created_at, format_today_stamp};
