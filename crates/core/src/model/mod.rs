mod exam;
mod ids;
mod subject;
mod task;
mod usp;

pub use ids::{ParseIdError, TaskId};

pub use exam::{ExamCountdown, ExamDraft, ExamError, ExamInfo, parse_exam_date};
pub use subject::{SubjectError, SubjectProgress, default_subjects};
pub use task::{Task, TaskError, normalize_title, sort_newest_first};
pub use usp::{UspCard, default_usp_cards};
