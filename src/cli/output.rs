pub use tidypath_core::format::OutputFormat;

// The clap ValueEnum impl for OutputFormat lives in tidypath-core (feature "clap")
// because the orphan rule forbids implementing it here.
