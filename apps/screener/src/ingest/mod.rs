// Resume ingestion: PDF directory -> one tagged document for the model.

pub mod pdf;

pub use pdf::{load_resume_dir, ResumeDocument};
