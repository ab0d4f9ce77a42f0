pub mod classify;
pub mod langs;
pub mod scan;
pub mod source_loader;
pub mod tree;

#[cfg(test)]
mod classify_tests;
#[cfg(test)]
mod tree_tests;
