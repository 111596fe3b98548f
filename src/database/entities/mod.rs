pub mod thread_responses;
pub mod threads;

pub use thread_responses::ResponseStatus;
