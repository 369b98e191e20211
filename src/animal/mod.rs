//! The animals index, the entry point into each animal's records.

mod animals_page;

pub use animals_page::get_animals_page;
