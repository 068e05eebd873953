//! Maven build file support

pub mod classifier;
pub mod pom;

pub use classifier::{
    ChildModuleMap, classify_parent_pom, classify_pom, find_child_modules,
};
pub use pom::Pom;
