mod answers;
mod category;
mod history;
mod ids;
mod question;

pub use answers::AnswerSet;
pub use category::{Category, CategoryResult};
pub use history::{SessionHistory, SubmissionRecord};
pub use ids::{ParseIdError, QuestionId, SubmissionId};
pub use question::{ANSWER_OPTIONS, AnswerOption, Likert, LikertError, Question};
