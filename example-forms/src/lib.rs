pub mod basic_text;
pub mod job_application;
pub mod numbers;
pub mod user_profile;

// Re-export basic_text forms
pub use basic_text::{basic_text, basic_text_item};

// Re-export job_application forms
pub use job_application::{MAX_SALARY, job_application, start_after_graduation};

// Re-export numbers forms
pub use numbers::{number2_greater, numbers, numbers_item};

// Re-export user_profile forms
pub use user_profile::{user_profile, user_profile_item};
