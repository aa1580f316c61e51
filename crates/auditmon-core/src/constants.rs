//! Tag and attribute names shared by the recorder, replay, and the graph.

// Marker roles written by the recorder.
pub const OBSERVATION: &str = "observation";
pub const OBSERVATION_MEMBER: &str = "observation_member";
pub const START: &str = "start";
pub const STOP: &str = "stop";
pub const RESUME: &str = "resume";

// Structural program graph, read-only to auditmon.
pub const DECLARES: &str = "declares";
pub const PROJECT: &str = "project";
pub const PACKAGE: &str = "package";
pub const CLASS: &str = "class";
pub const METHOD: &str = "method";
pub const LIBRARY: &str = "library";

/// Display name attribute on any element.
pub const NAME: &str = "name";
/// Optional source file name attribute on top-level classes.
pub const SOURCE_FILE: &str = "source_file";

/// Origin recorded when the caller does not name one.
pub const DEFAULT_ORIGIN: &str = "manual";
/// Reason recorded when the caller does not name one.
pub const DEFAULT_STOP_REASON: &str = "stop";

/// Tags the recorder reserves; a session may not be named after one of these.
pub const RESERVED_TAGS: &[&str] = &[OBSERVATION, OBSERVATION_MEMBER, START, STOP, RESUME];
