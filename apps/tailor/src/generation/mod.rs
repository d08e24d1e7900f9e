// Application generation: tailoring plan, interview pitch, resume document,
// and the pipeline that runs them for each accepted posting.

pub mod documents;
pub mod pipeline;
pub mod pitch;
pub mod tailoring;
