//! File based builders: `prepare()`, configure with `with_*` / `using_*`, then `execute()`.

pub mod capacity;
pub mod hide;
pub mod unveil;
