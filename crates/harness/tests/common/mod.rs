
/// `TestContext`: a harness over the scripted pipeline with inspectable collaborators.
pub mod harness;
