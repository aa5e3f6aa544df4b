//! Workspace root package. It only hosts repository tooling such as the
//! pre-commit hooks; the code lives under `crates/`.
