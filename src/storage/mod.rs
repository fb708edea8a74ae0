mod day_file;

pub use day_file::DayFileStore;
